#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use courier_core::{CatalogItem, JobId, JobRegistry, JobStatus, QueryState, RemoteStatus};
use courier_engine::{
    CatalogBackend, DownloadController, DownloadRequest, EngineConfig, PollError, SearchError,
    SubmissionError, SubmissionReceipt, ViewEvent, ViewSink,
};
use tokio::time::Instant;

/// In-memory backend with scripted answers. Every call is recorded with the
/// (possibly paused) tokio clock.
#[derive(Default)]
pub struct ScriptedBackend {
    searches: Mutex<Vec<(String, Instant)>>,
    search_results: Mutex<HashMap<String, Result<Vec<CatalogItem>, SearchError>>>,
    search_latency: Mutex<HashMap<String, Duration>>,
    submissions: Mutex<Vec<DownloadRequest>>,
    submit_script: Mutex<VecDeque<Result<SubmissionReceipt, SubmissionError>>>,
    polls: Mutex<Vec<(JobId, Instant)>>,
    poll_script: Mutex<HashMap<JobId, VecDeque<Result<RemoteStatus, PollError>>>>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_search(&self, query: &str, result: Result<Vec<CatalogItem>, SearchError>) {
        self.search_results
            .lock()
            .unwrap()
            .insert(query.to_string(), result);
    }

    pub fn with_search_latency(&self, query: &str, latency: Duration) {
        self.search_latency
            .lock()
            .unwrap()
            .insert(query.to_string(), latency);
    }

    pub fn reject_next_submission(&self, err: SubmissionError) {
        self.submit_script.lock().unwrap().push_back(Err(err));
    }

    /// Answers for consecutive status checks of `id`; once exhausted the job
    /// reports `downloading` forever.
    pub fn script_polls(&self, id: &str, answers: Vec<Result<RemoteStatus, PollError>>) {
        self.poll_script
            .lock()
            .unwrap()
            .insert(JobId::from(id), answers.into());
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches
            .lock()
            .unwrap()
            .iter()
            .map(|(query, _)| query.clone())
            .collect()
    }

    pub fn search_times(&self) -> Vec<Instant> {
        self.searches.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }

    pub fn submissions(&self) -> Vec<DownloadRequest> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn poll_times(&self, id: &str) -> Vec<Instant> {
        let id = JobId::from(id);
        self.polls
            .lock()
            .unwrap()
            .iter()
            .filter(|(polled, _)| *polled == id)
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait::async_trait]
impl CatalogBackend for ScriptedBackend {
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, SearchError> {
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), Instant::now()));
        let latency = self.search_latency.lock().unwrap().get(query).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.search_results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(vec![CatalogItem::new(format!("id-{query}"), query)]))
    }

    async fn submit_download(
        &self,
        request: &DownloadRequest,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.submissions.lock().unwrap().push(request.clone());
        self.submit_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(SubmissionReceipt {
                    message: Some("Download started successfully".to_string()),
                })
            })
    }

    async fn poll_status(&self, id: &JobId) -> Result<RemoteStatus, PollError> {
        self.polls.lock().unwrap().push((id.clone(), Instant::now()));
        self.poll_script
            .lock()
            .unwrap()
            .get_mut(id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(RemoteStatus::InProgress("downloading".to_string())))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn query_states(&self) -> Vec<QueryState> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Query(state) => Some(state),
                ViewEvent::Job { .. } => None,
            })
            .collect()
    }

    pub fn job_statuses(&self, id: &str) -> Vec<JobStatus> {
        let id = JobId::from(id);
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Job {
                    id: job_id, status, ..
                } if job_id == id => Some(status),
                _ => None,
            })
            .collect()
    }
}

impl ViewSink for RecordingSink {
    fn emit(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct Harness {
    pub backend: Arc<ScriptedBackend>,
    pub sink: Arc<RecordingSink>,
    pub registry: Arc<Mutex<JobRegistry>>,
    pub controller: DownloadController,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let backend = ScriptedBackend::new();
        let sink = RecordingSink::new();
        let registry = Arc::new(Mutex::new(JobRegistry::new()));
        let controller =
            DownloadController::new(&config, backend.clone(), sink.clone(), registry.clone());
        Self {
            backend,
            sink,
            registry,
            controller,
        }
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.registry.lock().unwrap().contains(&JobId::from(id))
    }
}

pub fn spacing(times: &[Instant]) -> Vec<Duration> {
    times.windows(2).map(|pair| pair[1] - pair[0]).collect()
}
