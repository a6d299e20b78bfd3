use std::sync::{Arc, Mutex};
use std::time::Duration;

use courier_core::{QueryState, SearchDecision, SearchGate, SearchTicket};
use courier_logging::{courier_debug, courier_trace, courier_warn};
use tokio_util::sync::CancellationToken;

use crate::{lock, CatalogBackend, ViewEvent, ViewSink};

/// Debounces raw input into at most one search per quiet period.
///
/// A new input event cancels the pending timer but never an in-flight request;
/// a response that arrives after newer input is dropped instead of rendered.
pub struct SearchDispatcher {
    backend: Arc<dyn CatalogBackend>,
    sink: Arc<dyn ViewSink>,
    debounce: Duration,
    gate: Arc<Mutex<SearchGate>>,
    pending: Mutex<Option<CancellationToken>>,
}

impl SearchDispatcher {
    pub fn new(backend: Arc<dyn CatalogBackend>, sink: Arc<dyn ViewSink>, debounce: Duration) -> Self {
        Self {
            backend,
            sink,
            debounce,
            gate: Arc::new(Mutex::new(SearchGate::new())),
            pending: Mutex::new(None),
        }
    }

    /// Handles one input event. Must be called from within a Tokio runtime.
    pub fn on_input(&self, text: &str) {
        let decision = lock(&self.gate).on_input(text);
        if let Some(previous) = lock(&self.pending).take() {
            previous.cancel();
        }

        let ticket = match decision {
            SearchDecision::TooShort => {
                self.sink.emit(ViewEvent::Query(QueryState::TooShort));
                return;
            }
            SearchDecision::Dispatch(ticket) => ticket,
        };

        let token = CancellationToken::new();
        *lock(&self.pending) = Some(token.clone());

        let backend = self.backend.clone();
        let sink = self.sink.clone();
        let gate = self.gate.clone();
        let debounce = self.debounce;
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    courier_trace!("search #{} superseded before dispatch", ticket.seq);
                    return;
                }
                _ = tokio::time::sleep(debounce) => {}
            }
            run_search(backend.as_ref(), sink.as_ref(), &gate, ticket).await;
        });
    }
}

async fn run_search(
    backend: &dyn CatalogBackend,
    sink: &dyn ViewSink,
    gate: &Mutex<SearchGate>,
    ticket: SearchTicket,
) {
    if !lock(gate).is_current(ticket.seq) {
        courier_trace!("search #{} superseded at dispatch", ticket.seq);
        return;
    }
    courier_debug!("search #{} dispatched query={:?}", ticket.seq, ticket.query);
    sink.emit(ViewEvent::Query(QueryState::Loading));

    let result = backend.search(&ticket.query).await;
    let current = lock(gate).is_current(ticket.seq);
    if !current {
        courier_debug!("search #{} discarded: newer input arrived", ticket.seq);
        return;
    }

    let state = match result {
        Ok(items) => {
            courier_debug!("search #{} returned {} results", ticket.seq, items.len());
            QueryState::Results(items)
        }
        Err(err) => {
            courier_warn!("search #{} failed: {}", ticket.seq, err);
            QueryState::Error(err.to_string())
        }
    };
    sink.emit(ViewEvent::Query(state));
}
