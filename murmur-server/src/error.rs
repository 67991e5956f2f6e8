use murmur_core::{RoomId, RoomKind};
use thiserror::Error;

/// Inbound frame could not be turned into a `ClientFrame`.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("undecodable frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("binary frames are not part of the protocol")]
    Binary,

    #[error("invalid `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

/// A handler could not complete. Logged at the router boundary.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("room {0} no longer exists")]
    RoomVanished(RoomId),

    #[error("room {room_id} is a {actual} room, cannot join it as {requested}")]
    KindMismatch {
        room_id: RoomId,
        actual: RoomKind,
        requested: RoomKind,
    },
}

/// Outbound buffer refused a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("outbound buffer is full")]
    Full,

    #[error("outbound buffer is closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("coordinator has shut down")]
    Closed,
}
