use std::sync::mpsc;

use crate::ViewEvent;

pub trait ViewSink: Send + Sync {
    fn emit(&self, event: ViewEvent);
}

/// Forwards view events into a std channel for a synchronous consumer.
pub struct ChannelViewSink {
    tx: mpsc::Sender<ViewEvent>,
}

impl ChannelViewSink {
    pub fn new(tx: mpsc::Sender<ViewEvent>) -> Self {
        Self { tx }
    }
}

impl ViewSink for ChannelViewSink {
    fn emit(&self, event: ViewEvent) {
        // A closed receiver means the view is gone; nothing left to update.
        let _ = self.tx.send(event);
    }
}
