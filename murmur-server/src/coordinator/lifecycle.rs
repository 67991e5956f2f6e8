use crate::coordinator::Coordinator;
use chrono::Utc;
use murmur_core::{ConnectionId, RoomId, RoomKind, ServerFrame};
use tracing::{debug, info, warn};

impl Coordinator {
    /// The only teardown path for a connection. Safe to call repeatedly.
    ///
    /// Afterwards the connection is in no queue and no room, and any room it
    /// was the last member of no longer exists.
    pub(crate) fn disconnect(&mut self, id: &ConnectionId) {
        if !self.registry.is_live(id) {
            debug!("Connection {} already torn down", id);
            return;
        }

        self.stop_searching(id);
        self.leave_current_room(id);
        self.registry.unregister(id);

        info!("Connection {} closed", id);
    }

    pub(crate) fn stop_searching(&mut self, id: &ConnectionId) {
        if self.queue.remove(id) {
            debug!("Connection {} left the matchmaking queue", id);
        }
        self.registry.set_searching(id, false);
    }

    /// Removes `id` from its current room and notifies whoever is left.
    ///
    /// A `Random` room never survives with one member: the remaining partner
    /// gets `partner_disconnected` and is removed as well.
    pub(crate) fn leave_current_room(&mut self, id: &ConnectionId) {
        let Some(room_id) = self.registry.room_of(id) else {
            return;
        };
        self.registry.update_room(id, None);

        let Some(outcome) = self.rooms.leave(&room_id, id) else {
            warn!(
                "Connection {} pointed at room {} without being a member",
                id, room_id
            );
            return;
        };

        if outcome.room_deleted() {
            return;
        }

        match outcome.kind {
            RoomKind::Random => {
                for partner in &outcome.remaining {
                    info!("Partner {} of {} left room {}", partner, id, room_id);
                    self.send_to(partner, ServerFrame::PartnerDisconnected {});
                    self.evict(partner, &room_id);
                }
            }
            RoomKind::Named => {
                let frame = ServerFrame::UserLeft {
                    member_count: outcome.remaining.len(),
                    timestamp: Utc::now(),
                };
                if let Err(e) = self.broadcast(&room_id, None, frame) {
                    warn!("Failed to announce departure from {}: {}", room_id, e);
                }
            }
        }
    }

    /// Removes `id` from `room_id` without notifying anyone.
    pub(crate) fn evict(&mut self, id: &ConnectionId, room_id: &RoomId) {
        if self.registry.room_of(id).as_ref() == Some(room_id) {
            self.registry.update_room(id, None);
        }
        self.rooms.leave(room_id, id);
    }
}
