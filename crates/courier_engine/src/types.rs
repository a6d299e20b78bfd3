use courier_core::{JobId, JobStatus, QueryState};

/// State changes pushed to the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Query(QueryState),
    Job {
        id: JobId,
        status: JobStatus,
        /// Set on a failed submission; the backend's or transport's reason.
        message: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub id: JobId,
    pub label: String,
    pub quality: String,
    pub output_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionReceipt {
    pub message: Option<String>,
}
