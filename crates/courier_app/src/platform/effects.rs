use std::sync::{mpsc, Arc};

use courier_core::{Effect, Msg};
use courier_engine::{EngineConfig, EngineError, EngineHandle, ViewEvent, ViewSink};
use courier_logging::{courier_debug, courier_info};

use super::input::AppInput;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, msg_tx: mpsc::Sender<AppInput>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(config, Arc::new(MsgSink { tx: msg_tx }))?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestSearch { text } => {
                    courier_debug!("RequestSearch text_len={}", text.len());
                    self.engine.request_search(text);
                }
                Effect::RequestDownload { id, label } => {
                    courier_info!("RequestDownload id={} label={:?}", id, label);
                    self.engine.request_download(id, label);
                }
            }
        }
    }
}

/// Turns engine view events into messages for the update loop.
struct MsgSink {
    tx: mpsc::Sender<AppInput>,
}

impl ViewSink for MsgSink {
    fn emit(&self, event: ViewEvent) {
        let msg = match event {
            ViewEvent::Query(state) => Msg::QueryStateChanged(state),
            ViewEvent::Job {
                id,
                status,
                message,
            } => Msg::JobStateChanged {
                id,
                status,
                message,
            },
        };
        let _ = self.tx.send(AppInput::Msg(msg));
    }
}
