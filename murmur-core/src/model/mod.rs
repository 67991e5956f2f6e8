mod connection;
mod frame;
mod room;

pub use connection::ConnectionId;
pub use frame::{ClientFrame, EndReason, ServerFrame, SignalPayload};
pub use room::{RoomId, RoomKind};
