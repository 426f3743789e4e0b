use std::sync::mpsc;

use board_channel::{ChannelEvent, ChannelHandle, EventSink};
use board_core::{decode_inbound, Effect, Msg};
use board_logging::{board_error, board_info, board_warn};
use serde_json::Value;

/// Everything the board loop reacts to, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Msg(Msg),
    ChannelClosed { reason: String },
    InputClosed,
}

/// Where outbound events go.
pub trait Outbox {
    fn send(&self, name: &str, payload: Value);
}

impl Outbox for ChannelHandle {
    fn send(&self, name: &str, payload: Value) {
        self.emit(name, payload);
    }
}

pub struct EffectRunner<O: Outbox> {
    outbox: O,
}

impl<O: Outbox> EffectRunner<O> {
    pub fn new(outbox: O) -> Self {
        Self { outbox }
    }

    /// Executes the effects and returns the alerts the user must see.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<String> {
        let mut alerts = Vec::new();
        for effect in effects {
            match effect {
                Effect::Emit(event) => match event.payload() {
                    Ok(payload) => {
                        board_info!("Emit {}", event.name());
                        self.outbox.send(event.name(), payload);
                    }
                    Err(err) => board_error!("Could not encode {}: {}", event.name(), err),
                },
                Effect::Alert { message } => {
                    board_warn!("Alert: {}", message);
                    alerts.push(message);
                }
            }
        }
        alerts
    }
}

/// Turns channel events into board messages on the loop's queue.
pub struct ChannelForwarder {
    tx: mpsc::Sender<AppEvent>,
}

impl ChannelForwarder {
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelForwarder {
    fn emit(&self, event: ChannelEvent) {
        match event {
            ChannelEvent::Connected { sid } => {
                board_info!("Channel session ready (sid {:?})", sid);
            }
            ChannelEvent::Event { name, payload } => match decode_inbound(&name, payload) {
                Ok(msg) => {
                    let _ = self.tx.send(AppEvent::Msg(msg));
                }
                Err(err) => board_warn!("Ignoring channel event: {}", err),
            },
            ChannelEvent::Disconnected { reason } => {
                let _ = self.tx.send(AppEvent::ChannelClosed { reason });
            }
        }
    }
}
