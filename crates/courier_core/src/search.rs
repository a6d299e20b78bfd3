use std::time::Duration;

/// Queries shorter than this (after trimming) never reach the backend.
pub const MIN_QUERY_CHARS: usize = 2;

/// Quiet period that must follow the last input event before a search runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A search scheduled for one input event, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchDecision {
    TooShort,
    Dispatch(SearchTicket),
}

/// Sequencing for one input stream.
///
/// Every input event supersedes everything issued before it, including a
/// request that is already on the wire: its response is stale once a newer
/// event has arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchGate {
    latest: u64,
}

impl SearchGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_input(&mut self, text: &str) -> SearchDecision {
        self.latest = self.latest.wrapping_add(1);
        let query = text.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return SearchDecision::TooShort;
        }
        SearchDecision::Dispatch(SearchTicket {
            seq: self.latest,
            query: query.to_string(),
        })
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.latest == seq
    }
}
