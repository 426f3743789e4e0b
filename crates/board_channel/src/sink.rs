use std::sync::mpsc;

use crate::ChannelEvent;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: ChannelEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ChannelEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ChannelEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ChannelEvent) {
        let _ = self.tx.send(event);
    }
}
