use crate::{JobId, JobStatus, QueryState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search box (one event per edit, not debounced).
    InputChanged(String),
    /// User clicked the download affordance of a result row (0-based).
    DownloadClicked { index: usize },
    /// Search dispatcher reported a new query state.
    QueryStateChanged(QueryState),
    /// Job poller reported a transition for a job.
    JobStateChanged {
        id: JobId,
        status: JobStatus,
        message: Option<String>,
    },
}
