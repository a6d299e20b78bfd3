use std::collections::BTreeMap;

use crate::view_model::{button_for, AppViewModel, QueryView, ResultRowView};
use crate::{CatalogItem, JobId, JobStatus, QueryState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    query: QueryView,
    results: Vec<CatalogItem>,
    /// Last reported status per id. Terminal entries keep their final label
    /// until the result list is replaced.
    jobs: BTreeMap<JobId, JobStatus>,
    banner: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self
            .results
            .iter()
            .enumerate()
            .map(|(index, item)| ResultRowView {
                number: index + 1,
                id: item.id.clone(),
                label: item.label.clone(),
                description: item.description.clone(),
                episode_info: item.episode_info.clone(),
                duration: item.duration.clone(),
                button: button_for(self.jobs.get(&item.id).copied()),
            })
            .collect();

        AppViewModel {
            input: self.input.clone(),
            query: self.query.clone(),
            rows,
            banner: self.banner.clone(),
            active_jobs: self.jobs.values().filter(|s| s.is_active()).count(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn job_status(&self, id: &JobId) -> Option<JobStatus> {
        self.jobs.get(id).copied()
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    /// Id and label behind result row `index`, if its affordance is enabled.
    pub(crate) fn download_target(&self, index: usize) -> Option<(JobId, String)> {
        let item = self.results.get(index)?;
        if !button_for(self.job_status(&item.id)).enabled {
            return None;
        }
        Some((item.id.clone(), item.label.clone()))
    }

    pub(crate) fn apply_query(&mut self, query: QueryState) {
        match query {
            QueryState::Loading => {
                // Previous results stay visible underneath the spinner.
                self.query = QueryView::Loading;
            }
            QueryState::TooShort => {
                self.query = QueryView::TooShort;
                self.results.clear();
                self.forget_finished_jobs();
            }
            QueryState::Results(items) => {
                self.query = if items.is_empty() {
                    QueryView::NoResults
                } else {
                    QueryView::Results
                };
                self.results = items;
                self.banner = None;
                self.forget_finished_jobs();
            }
            QueryState::Error(message) => {
                self.query = QueryView::Error(message);
                self.results.clear();
                self.forget_finished_jobs();
            }
        }
        self.dirty = true;
    }

    pub(crate) fn apply_job(&mut self, id: JobId, status: JobStatus, message: Option<String>) {
        if status == JobStatus::Failed {
            if let Some(message) = message {
                self.banner = Some(format!("Download failed: {message}"));
            }
        }
        self.jobs.insert(id, status);
        self.dirty = true;
    }

    /// Terminal statuses are shown once; a re-rendered row starts fresh.
    fn forget_finished_jobs(&mut self) {
        self.jobs.retain(|_, status| status.is_active());
    }

    pub(crate) fn clear_banner(&mut self) {
        if self.banner.take().is_some() {
            self.dirty = true;
        }
    }
}
