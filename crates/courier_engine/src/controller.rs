use std::sync::{Arc, Mutex};

use courier_core::{JobId, JobRegistry, JobStatus};
use courier_logging::courier_info;
use tokio::task::JoinHandle;

use crate::{lock, CatalogBackend, EngineConfig, JobPoller, SearchDispatcher, ViewSink};

/// The two inbound entry points of the engine: search input and download
/// requests. Methods must be called from within a Tokio runtime.
pub struct DownloadController {
    dispatcher: SearchDispatcher,
    poller: Arc<JobPoller>,
    registry: Arc<Mutex<JobRegistry>>,
}

impl DownloadController {
    pub fn new(
        config: &EngineConfig,
        backend: Arc<dyn CatalogBackend>,
        sink: Arc<dyn ViewSink>,
        registry: Arc<Mutex<JobRegistry>>,
    ) -> Self {
        let dispatcher = SearchDispatcher::new(backend.clone(), sink.clone(), config.debounce);
        let poller = Arc::new(JobPoller::new(
            backend,
            registry.clone(),
            sink,
            config.poll.clone(),
            config.download.clone(),
        ));
        Self {
            dispatcher,
            poller,
            registry,
        }
    }

    pub fn request_search(&self, text: &str) {
        self.dispatcher.on_input(text);
    }

    /// Starts tracking `id` unless a job for it is already in flight.
    ///
    /// Returns `None` when admission is refused; the in-flight job and its
    /// affordance are left alone.
    pub fn request_download(&self, id: JobId, label: String) -> Option<JoinHandle<JobStatus>> {
        let admitted = lock(&self.registry).try_admit(&id);
        if !admitted {
            courier_info!("download {} already in progress; request ignored", id);
            return None;
        }

        let poller = self.poller.clone();
        Some(tokio::spawn(async move { poller.run(id, label).await }))
    }

    pub fn is_active(&self, id: &JobId) -> bool {
        lock(&self.registry).contains(id)
    }
}
