//! Courier engine: backend IO, search debouncing and job polling.
mod backend;
mod controller;
mod dispatcher;
mod engine;
mod error;
mod poller;
mod sink;
mod types;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use backend::{BackendSettings, CatalogBackend, HttpBackend};
pub use controller::DownloadController;
pub use dispatcher::SearchDispatcher;
pub use engine::{EngineConfig, EngineHandle};
pub use error::{BackendError, EngineError, PollError, SearchError, SubmissionError};
pub use poller::{DownloadDefaults, JobPoller};
pub use sink::{ChannelViewSink, ViewSink};
pub use types::{DownloadRequest, SubmissionReceipt, ViewEvent};

/// Shared state is only touched between suspension points, so a poisoned
/// lock still holds consistent data.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
