use crate::coordinator::Coordinator;
use crate::error::{FrameError, RouteError};
use chrono::Utc;
use murmur_core::{
    ClientFrame, ConnectionId, EndReason, RoomId, RoomKind, ServerFrame, SignalPayload,
};
use serde_json::Value;
use tracing::{debug, info, warn};

impl Coordinator {
    /// Dispatches one inbound frame. Handler failures stop here: they are
    /// logged and the connection stays open.
    pub(crate) fn route(&mut self, sender: ConnectionId, frame: ClientFrame) {
        let kind = frame.kind();
        if !self.registry.is_live(&sender) {
            debug!("Dropping {} from unregistered connection {}", kind, sender);
            return;
        }
        debug!("Routing {} from {}", kind, sender);

        let res = match frame {
            ClientFrame::JoinRoom { room_id, username } => {
                self.join_room(sender, room_id, &username)
            }
            ClientFrame::LeaveRoom {} => {
                self.leave_current_room(&sender);
                Ok(())
            }
            ClientFrame::ChatMessage { message } => self.chat_message(sender, message),
            ClientFrame::JoinRandom { username } => {
                self.join_random(sender, &username);
                Ok(())
            }
            ClientFrame::VideoOffer(payload) => self.relay(sender, ServerFrame::VideoOffer(payload)),
            ClientFrame::VideoAnswer(payload) => {
                self.relay(sender, ServerFrame::VideoAnswer(payload))
            }
            ClientFrame::IceCandidate(payload) => {
                self.relay(sender, ServerFrame::IceCandidate(payload))
            }
            ClientFrame::UserReport(payload) => self.user_report(sender, payload),
            ClientFrame::EndSession { session_id } => self.end_session(sender, session_id),
        };

        if let Err(e) = res {
            warn!("Handling {} from {} failed: {}", kind, sender, e);
            if let RouteError::RoomVanished(room_id) = e {
                self.forget_room(&sender, &room_id);
            }
        }
    }

    fn join_room(
        &mut self,
        sender: ConnectionId,
        room_id: RoomId,
        username: &str,
    ) -> Result<(), RouteError> {
        if room_id.is_empty() {
            return Err(FrameError::InvalidField {
                field: "roomId",
                reason: "must not be empty",
            }
            .into());
        }

        let existing_kind = self.rooms.get(&room_id).map(|room| room.kind());
        if let Some(actual) = existing_kind.filter(|kind| *kind != RoomKind::Named) {
            return Err(RouteError::KindMismatch {
                room_id,
                actual,
                requested: RoomKind::Named,
            });
        }

        self.registry.set_username(&sender, username);

        if self.registry.room_of(&sender).as_ref() == Some(&room_id) {
            let member_count = self
                .rooms
                .get(&room_id)
                .map(|room| room.len())
                .ok_or_else(|| RouteError::RoomVanished(room_id.clone()))?;
            self.send_to(
                &sender,
                ServerFrame::RoomJoined {
                    room_id,
                    member_count,
                },
            );
            return Ok(());
        }

        self.stop_searching(&sender);
        self.leave_current_room(&sender);

        let member_count = self
            .rooms
            .create_or_join(&room_id, sender, RoomKind::Named)?;
        self.registry.update_room(&sender, Some(room_id.clone()));
        info!(
            "Connection {} joined room {} ({} member(s))",
            sender, room_id, member_count
        );

        let joined = ServerFrame::UserJoined {
            username: self.registry.username_of(&sender),
            timestamp: Utc::now(),
        };
        self.broadcast(&room_id, Some(&sender), joined)?;
        self.send_to(
            &sender,
            ServerFrame::RoomJoined {
                room_id,
                member_count,
            },
        );
        Ok(())
    }

    fn chat_message(&mut self, sender: ConnectionId, message: Value) -> Result<(), RouteError> {
        let Some(room_id) = self.registry.room_of(&sender) else {
            debug!("Chat message from {} outside any room, ignoring", sender);
            return Ok(());
        };

        let frame = ServerFrame::MessageReceived {
            message,
            username: self.registry.username_of(&sender),
            timestamp: Utc::now(),
        };
        self.broadcast(&room_id, Some(&sender), frame)
    }

    /// Forwards a signaling frame to the rest of the room without looking at it.
    fn relay(&mut self, sender: ConnectionId, frame: ServerFrame) -> Result<(), RouteError> {
        let Some(room_id) = self.registry.room_of(&sender) else {
            debug!("{} from {} outside any room, ignoring", frame.kind(), sender);
            return Ok(());
        };

        self.broadcast(&room_id, Some(&sender), frame)
    }

    fn user_report(
        &mut self,
        sender: ConnectionId,
        payload: SignalPayload,
    ) -> Result<(), RouteError> {
        let room_id = self.registry.room_of(&sender);
        warn!(
            reporter = %sender,
            room = ?room_id.as_ref().map(RoomId::as_str),
            report = %serde_json::Value::Object(payload),
            "User report received"
        );

        let Some(room_id) = room_id else {
            return Ok(());
        };

        self.broadcast(
            &room_id,
            None,
            ServerFrame::SessionEnded {
                reason: EndReason::Reported,
                timestamp: Utc::now(),
            },
        )
    }

    /// Announces the end of the session, then deletes the room outright.
    fn end_session(
        &mut self,
        sender: ConnectionId,
        session_id: Option<String>,
    ) -> Result<(), RouteError> {
        let Some(room_id) = self.registry.room_of(&sender) else {
            debug!("End of session from {} outside any room, ignoring", sender);
            return Ok(());
        };
        info!(
            "Connection {} ended session {:?} in room {}",
            sender, session_id, room_id
        );

        self.broadcast(
            &room_id,
            None,
            ServerFrame::SessionEnded {
                reason: EndReason::UserEnded,
                timestamp: Utc::now(),
            },
        )?;

        if let Some(room) = self.rooms.delete(&room_id) {
            for member in room.participants() {
                if self.registry.room_of(member).as_ref() == Some(&room_id) {
                    self.registry.update_room(member, None);
                }
            }
        }
        Ok(())
    }

    /// Clears a room pointer that outlived its room.
    fn forget_room(&mut self, id: &ConnectionId, room_id: &RoomId) {
        if self.registry.room_of(id).as_ref() == Some(room_id) {
            warn!("Clearing stale room {} of connection {}", room_id, id);
            self.registry.update_room(id, None);
        }
    }
}
