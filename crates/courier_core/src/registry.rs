use std::collections::HashSet;

use crate::JobId;

/// Set of job ids currently in a non-terminal status.
///
/// Admission is a check-and-insert with no suspension point in between, so a
/// second request for an id that is still in flight is refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobRegistry {
    active: HashSet<JobId>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, and changes nothing, if `id` is already active.
    pub fn try_admit(&mut self, id: &JobId) -> bool {
        self.active.insert(id.clone())
    }

    /// Idempotent.
    pub fn release(&mut self, id: &JobId) {
        self.active.remove(id);
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.active.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
