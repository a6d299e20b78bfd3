//! Courier core: pure job lifecycle logic and view-model helpers.
//!
//! Nothing in here performs IO. The engine drives [`Job`] and
//! [`JobRegistry`] from its async tasks; the front end drives [`update`].
mod catalog;
mod effect;
mod job;
mod msg;
mod registry;
mod search;
mod state;
mod update;
mod view_model;

pub use catalog::{CatalogItem, QueryState};
pub use effect::Effect;
pub use job::{Job, JobId, JobStatus, PollOutcome, PollPolicy, PollStep, RemoteStatus};
pub use msg::Msg;
pub use registry::JobRegistry;
pub use search::{SearchDecision, SearchGate, SearchTicket, DEFAULT_DEBOUNCE, MIN_QUERY_CHARS};
pub use state::AppState;
pub use update::update;
pub use view_model::{button_for, AppViewModel, ButtonView, QueryView, ResultRowView};
