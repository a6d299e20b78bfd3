use crate::JobId;

/// User intents forwarded to the engine. These are its only two entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RequestSearch { text: String },
    RequestDownload { id: JobId, label: String },
}
