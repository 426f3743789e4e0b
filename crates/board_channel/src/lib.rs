//! Board channel: the named-event transport between the board and its backend.
//!
//! Speaks Socket.IO v5 over the Engine.IO v4 websocket transport, which is
//! what the backend serves on `/socket.io/`.
mod client;
mod packet;
mod session;
mod sink;
mod types;

pub use client::ChannelHandle;
pub use packet::{EnginePacket, Handshake, PacketError, SocketPacket, DEFAULT_NAMESPACE};
pub use session::run_session;
pub use sink::{ChannelEventSink, EventSink};
pub use types::{ChannelCommand, ChannelError, ChannelEvent, ChannelSettings};
