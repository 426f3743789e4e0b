//! Board core: pure controller state machine, view model and text helpers.
mod effect;
mod feedback;
mod format;
mod inbound;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, OutboundEvent};
pub use feedback::{GitChoice, Panel, StoryOutcome};
pub use format::format_output;
pub use inbound::{decode_inbound, DecodeError, INBOUND_EVENTS};
pub use msg::{DropZone, Msg};
pub use state::{BoardSession, BoardState, DragPayload, Layout, StorySeed, DEFAULT_USER_ID};
pub use update::update;
pub use view_model::{BoardViewModel, StoryView};
