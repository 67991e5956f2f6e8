use crate::model::connection::ConnectionId;
use crate::model::room::RoomId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque JSON object carried by signaling and report frames.
///
/// The server never looks inside; signaling payloads are re-emitted verbatim.
pub type SignalPayload = Map<String, Value>;

/// Frames a client may send over its connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_id: RoomId,
        #[serde(default)]
        username: String,
    },
    LeaveRoom {},
    ChatMessage {
        message: Value,
    },
    JoinRandom {
        #[serde(default)]
        username: String,
    },
    VideoOffer(SignalPayload),
    VideoAnswer(SignalPayload),
    IceCandidate(SignalPayload),
    UserReport(SignalPayload),
    #[serde(rename_all = "camelCase")]
    EndSession {
        #[serde(default)]
        session_id: Option<String>,
    },
}

impl ClientFrame {
    /// Wire name of the frame, as found in its `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientFrame::JoinRoom { .. } => "join_room",
            ClientFrame::LeaveRoom {} => "leave_room",
            ClientFrame::ChatMessage { .. } => "chat_message",
            ClientFrame::JoinRandom { .. } => "join_random",
            ClientFrame::VideoOffer(_) => "video_offer",
            ClientFrame::VideoAnswer(_) => "video_answer",
            ClientFrame::IceCandidate(_) => "ice_candidate",
            ClientFrame::UserReport(_) => "user_report",
            ClientFrame::EndSession { .. } => "end_session",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Reported,
    UserEnded,
}

/// Frames the server pushes to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    #[serde(rename_all = "camelCase")]
    Connected { connection_id: ConnectionId },
    #[serde(rename_all = "camelCase")]
    RoomJoined { room_id: RoomId, member_count: usize },
    UserJoined {
        username: String,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    UserLeft {
        member_count: usize,
        timestamp: DateTime<Utc>,
    },
    MessageReceived {
        message: Value,
        username: String,
        timestamp: DateTime<Utc>,
    },
    RandomWaiting {},
    #[serde(rename_all = "camelCase")]
    RandomPaired {
        room_id: RoomId,
        partner_username: String,
    },
    PartnerDisconnected {},
    SessionEnded {
        reason: EndReason,
        timestamp: DateTime<Utc>,
    },
    VideoOffer(SignalPayload),
    VideoAnswer(SignalPayload),
    IceCandidate(SignalPayload),
}

impl ServerFrame {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerFrame::Connected { .. } => "connected",
            ServerFrame::RoomJoined { .. } => "room_joined",
            ServerFrame::UserJoined { .. } => "user_joined",
            ServerFrame::UserLeft { .. } => "user_left",
            ServerFrame::MessageReceived { .. } => "message_received",
            ServerFrame::RandomWaiting {} => "random_waiting",
            ServerFrame::RandomPaired { .. } => "random_paired",
            ServerFrame::PartnerDisconnected {} => "partner_disconnected",
            ServerFrame::SessionEnded { .. } => "session_ended",
            ServerFrame::VideoOffer(_) => "video_offer",
            ServerFrame::VideoAnswer(_) => "video_answer",
            ServerFrame::IceCandidate(_) => "ice_candidate",
        }
    }

    /// Traffic forwarded on behalf of other participants. Losing one of these
    /// leaves the receiver's view of its session intact, unlike frames that
    /// commit pairing or room state.
    pub fn is_relayed(&self) -> bool {
        matches!(
            self,
            ServerFrame::UserJoined { .. }
                | ServerFrame::UserLeft { .. }
                | ServerFrame::MessageReceived { .. }
                | ServerFrame::VideoOffer(_)
                | ServerFrame::VideoAnswer(_)
                | ServerFrame::IceCandidate(_)
        )
    }
}
