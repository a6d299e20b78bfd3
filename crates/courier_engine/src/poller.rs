use std::sync::{Arc, Mutex};

use courier_core::{Job, JobId, JobRegistry, JobStatus, PollOutcome, PollPolicy, PollStep};
use courier_logging::{courier_info, courier_trace, courier_warn};
use tokio::time::Instant;

use crate::{lock, CatalogBackend, DownloadRequest, PollError, ViewEvent, ViewSink};

/// Parameters sent with every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDefaults {
    pub quality: String,
    pub output_dir: String,
}

impl Default for DownloadDefaults {
    fn default() -> Self {
        Self {
            quality: "HD1080".to_string(),
            output_dir: "downloads".to_string(),
        }
    }
}

/// Tracks one admitted job from submission to a terminal status.
///
/// Status checks for a job are strictly sequential: the next one is only
/// scheduled after the previous one resolved.
pub struct JobPoller {
    backend: Arc<dyn CatalogBackend>,
    registry: Arc<Mutex<JobRegistry>>,
    sink: Arc<dyn ViewSink>,
    policy: PollPolicy,
    defaults: DownloadDefaults,
}

impl JobPoller {
    pub fn new(
        backend: Arc<dyn CatalogBackend>,
        registry: Arc<Mutex<JobRegistry>>,
        sink: Arc<dyn ViewSink>,
        policy: PollPolicy,
        defaults: DownloadDefaults,
    ) -> Self {
        Self {
            backend,
            registry,
            sink,
            policy,
            defaults,
        }
    }

    /// Runs the job to completion. The caller must already hold the registry
    /// slot for `id`; it is released exactly once, before the terminal status
    /// is reported.
    pub async fn run(&self, id: JobId, label: String) -> JobStatus {
        let mut job = Job::new(id, label);
        job.begin_submission();
        self.report(&job, None);

        let request = DownloadRequest {
            id: job.id().clone(),
            label: job.label().to_string(),
            quality: self.defaults.quality.clone(),
            output_dir: self.defaults.output_dir.clone(),
        };
        match self.backend.submit_download(&request).await {
            Ok(receipt) => {
                courier_info!(
                    "download {} ({:?}) accepted: {}",
                    job.id(),
                    job.label(),
                    receipt.message.as_deref().unwrap_or("started")
                );
                job.finish_submission(true);
                self.report(&job, None);
            }
            Err(err) => {
                courier_warn!("download {} rejected: {}", job.id(), err);
                job.finish_submission(false);
                return self.finish(&job, Some(err.to_string()));
            }
        }

        let accepted_at = Instant::now();
        loop {
            let outcome = match self.backend.poll_status(job.id()).await {
                Ok(status) => PollOutcome::Status(status),
                Err(PollError::NotFound) => PollOutcome::NotFound,
                Err(PollError::Transient(reason)) => {
                    courier_warn!("status check for {} failed: {}", job.id(), reason);
                    PollOutcome::Transient
                }
            };

            match job.record_poll(outcome, accepted_at.elapsed(), &self.policy) {
                PollStep::PollAfter(delay) => {
                    courier_trace!(
                        "download {} still running after {} checks; next in {:?}",
                        job.id(),
                        job.poll_attempt(),
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                PollStep::Finished(_) => return self.finish(&job, None),
            }
        }
    }

    fn finish(&self, job: &Job, message: Option<String>) -> JobStatus {
        lock(&self.registry).release(job.id());
        courier_info!(
            "download {} finished as {:?} after {} status checks",
            job.id(),
            job.status(),
            job.poll_attempt()
        );
        self.report(job, message);
        job.status()
    }

    fn report(&self, job: &Job, message: Option<String>) {
        self.sink.emit(ViewEvent::Job {
            id: job.id().clone(),
            status: job.status(),
            message,
        });
    }
}
