use std::fmt;
use std::time::Duration;

/// Catalog identifier of a downloadable item. Identity of a job is its id,
/// never its label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for JobId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Idle,
    Submitting,
    Polling,
    Completed,
    Failed,
    NotFound,
    TimedOut,
}

impl JobStatus {
    /// Terminal statuses are irreversible; no network activity follows them.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::NotFound | JobStatus::TimedOut
        )
    }

    /// `Submitting` and `Polling` hold a registry slot.
    pub fn is_active(self) -> bool {
        matches!(self, JobStatus::Submitting | JobStatus::Polling)
    }
}

/// Status reported by the backend for a job it knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteStatus {
    InProgress(String),
    Completed,
    Failed,
}

impl RemoteStatus {
    /// Only `completed` and `failed` are meaningful; everything else
    /// (`starting`, `downloading`, unknown values) counts as progress.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "completed" => RemoteStatus::Completed,
            "failed" => RemoteStatus::Failed,
            other => RemoteStatus::InProgress(other.to_string()),
        }
    }
}

/// Result of one status check, already classified by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Status(RemoteStatus),
    /// The backend no longer knows the job id.
    NotFound,
    /// Network or server error; the job itself may be fine.
    Transient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Spacing between checks while the job reports progress.
    pub interval: Duration,
    /// Spacing after a transient failure.
    pub backoff_interval: Duration,
    /// `None` polls until the backend reports a terminal status.
    pub max_attempts: Option<u32>,
    pub max_duration: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            backoff_interval: Duration::from_secs(5),
            max_attempts: None,
            max_duration: None,
        }
    }
}

/// What the poll loop does after a status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    PollAfter(Duration),
    Finished(JobStatus),
}

/// One download request, from admission until its terminal transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    id: JobId,
    label: String,
    status: JobStatus,
    poll_attempt: u32,
}

impl Job {
    pub fn new(id: JobId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            status: JobStatus::Idle,
            poll_attempt: 0,
        }
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn poll_attempt(&self) -> u32 {
        self.poll_attempt
    }

    /// `Idle -> Submitting`. Returns false if the job already left `Idle`.
    pub fn begin_submission(&mut self) -> bool {
        if self.status != JobStatus::Idle {
            return false;
        }
        self.status = JobStatus::Submitting;
        true
    }

    /// `Submitting -> Polling | Failed`.
    pub fn finish_submission(&mut self, accepted: bool) -> JobStatus {
        if self.status == JobStatus::Submitting {
            self.status = if accepted {
                JobStatus::Polling
            } else {
                JobStatus::Failed
            };
        }
        self.status
    }

    /// Applies one status check to a polling job and decides what comes next.
    ///
    /// `elapsed` is the time since the submission was accepted. Calling this on
    /// a job that is not `Polling` changes nothing.
    pub fn record_poll(
        &mut self,
        outcome: PollOutcome,
        elapsed: Duration,
        policy: &PollPolicy,
    ) -> PollStep {
        if self.status != JobStatus::Polling {
            return PollStep::Finished(self.status);
        }
        self.poll_attempt = self.poll_attempt.saturating_add(1);

        let delay = match outcome {
            PollOutcome::Status(RemoteStatus::Completed) => {
                return self.finish(JobStatus::Completed);
            }
            PollOutcome::Status(RemoteStatus::Failed) => {
                return self.finish(JobStatus::Failed);
            }
            PollOutcome::NotFound => return self.finish(JobStatus::NotFound),
            PollOutcome::Status(RemoteStatus::InProgress(_)) => policy.interval,
            PollOutcome::Transient => policy.backoff_interval,
        };

        let attempts_exhausted = policy
            .max_attempts
            .is_some_and(|max| self.poll_attempt >= max);
        let out_of_time = policy.max_duration.is_some_and(|max| elapsed >= max);
        if attempts_exhausted || out_of_time {
            return self.finish(JobStatus::TimedOut);
        }

        PollStep::PollAfter(delay)
    }

    fn finish(&mut self, status: JobStatus) -> PollStep {
        self.status = status;
        PollStep::Finished(status)
    }
}
