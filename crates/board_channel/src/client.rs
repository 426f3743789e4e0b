use std::sync::{mpsc, Arc};
use std::thread;

use board_logging::{board_info, board_warn};
use serde_json::Value;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::session::run_session;
use crate::sink::{ChannelEventSink, EventSink};
use crate::{ChannelCommand, ChannelError, ChannelEvent, ChannelSettings};

/// Handle to a channel session running on its own thread.
///
/// The session ends with exactly one [`ChannelEvent::Disconnected`].
#[derive(Clone)]
pub struct ChannelHandle {
    cmd_tx: UnboundedSender<ChannelCommand>,
}

impl ChannelHandle {
    /// Starts a session that delivers its events to `sink`.
    pub fn spawn(settings: ChannelSettings, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = unbounded_channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    let err = ChannelError::Runtime(err.to_string());
                    sink.emit(ChannelEvent::Disconnected {
                        reason: err.to_string(),
                    });
                    return;
                }
            };

            let result = runtime.block_on(run_session(&settings, cmd_rx, sink.as_ref()));
            let reason = match result {
                Ok(()) => {
                    board_info!("Channel closed");
                    "closed".to_string()
                }
                Err(err) => {
                    board_warn!("Channel failed: {}", err);
                    err.to_string()
                }
            };
            sink.emit(ChannelEvent::Disconnected { reason });
        });

        Self { cmd_tx }
    }

    /// Starts a session and returns a receiver for its events.
    pub fn connect(settings: ChannelSettings) -> (Self, mpsc::Receiver<ChannelEvent>) {
        let (event_tx, event_rx) = mpsc::channel();
        let handle = Self::spawn(settings, Arc::new(ChannelEventSink::new(event_tx)));
        (handle, event_rx)
    }

    /// Queues a named event. Dropped silently once the session is gone.
    pub fn emit(&self, name: impl Into<String>, payload: Value) {
        let _ = self.cmd_tx.send(ChannelCommand::Emit {
            name: name.into(),
            payload,
        });
    }

    pub fn close(&self) {
        let _ = self.cmd_tx.send(ChannelCommand::Close);
    }
}
