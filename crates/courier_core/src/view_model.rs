use crate::{JobId, JobStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub query: QueryView,
    pub rows: Vec<ResultRowView>,
    pub banner: Option<String>,
    pub active_jobs: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryView {
    /// Nothing typed yet.
    #[default]
    Prompt,
    TooShort,
    Loading,
    Results,
    NoResults,
    Error(String),
}

impl QueryView {
    /// Placeholder text shown instead of (or above) the result list.
    pub fn message(&self) -> Option<String> {
        match self {
            QueryView::Prompt | QueryView::Results => None,
            QueryView::TooShort => Some("Type at least 2 characters to search...".to_string()),
            QueryView::Loading => Some("Searching...".to_string()),
            QueryView::NoResults => {
                Some("No results found. Try a different search term.".to_string())
            }
            QueryView::Error(message) => Some(format!("Error: {message}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    /// 1-based position, as typed by the user.
    pub number: usize,
    pub id: JobId,
    pub label: String,
    pub description: Option<String>,
    pub episode_info: Option<String>,
    pub duration: Option<String>,
    pub button: ButtonView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

/// Download affordance for a row whose job last reported `status`.
pub fn button_for(status: Option<JobStatus>) -> ButtonView {
    let (label, enabled) = match status {
        None | Some(JobStatus::Idle) => ("Download", true),
        Some(JobStatus::Submitting) => ("⏳ Starting...", false),
        Some(JobStatus::Polling) => ("📥 Downloading...", false),
        Some(JobStatus::Completed) => ("✓ Downloaded", false),
        Some(JobStatus::Failed) => ("❌ Failed", true),
        Some(JobStatus::NotFound) => ("❌ Not found", true),
        Some(JobStatus::TimedOut) => ("⌛ Timed out", true),
    };
    ButtonView { label, enabled }
}
