use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use courier_core::{JobId, JobRegistry, PollPolicy, DEFAULT_DEBOUNCE};
use courier_logging::courier_debug;
use tokio::sync::mpsc;

use crate::{
    BackendSettings, CatalogBackend, DownloadController, DownloadDefaults, EngineError,
    HttpBackend, ViewSink,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub backend: BackendSettings,
    pub debounce: Duration,
    pub poll: PollPolicy,
    pub download: DownloadDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendSettings::default(),
            debounce: DEFAULT_DEBOUNCE,
            poll: PollPolicy::default(),
            download: DownloadDefaults::default(),
        }
    }
}

enum EngineCommand {
    Search(String),
    Download { id: JobId, label: String },
}

/// Runs the controller on a dedicated thread with a single-threaded runtime,
/// so synchronous front ends can drive it.
pub struct EngineHandle {
    cmd_tx: mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, sink: Arc<dyn ViewSink>) -> Result<Self, EngineError> {
        let backend = HttpBackend::new(&config.backend)?;
        Self::with_backend(config, Arc::new(backend), sink)
    }

    pub fn with_backend(
        config: EngineConfig,
        backend: Arc<dyn CatalogBackend>,
        sink: Arc<dyn ViewSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("courier-engine".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    let registry = Arc::new(Mutex::new(JobRegistry::new()));
                    let controller = DownloadController::new(&config, backend, sink, registry);
                    while let Some(command) = cmd_rx.recv().await {
                        handle_command(&controller, command);
                    }
                    courier_debug!("engine command channel closed; shutting down");
                });
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn request_search(&self, text: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Search(text.into()));
    }

    pub fn request_download(&self, id: JobId, label: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Download {
            id,
            label: label.into(),
        });
    }
}

fn handle_command(controller: &DownloadController, command: EngineCommand) {
    match command {
        EngineCommand::Search(text) => controller.request_search(&text),
        EngineCommand::Download { id, label } => {
            // Refusals are logged by the controller; the job runs detached.
            let _ = controller.request_download(id, label);
        }
    }
}
