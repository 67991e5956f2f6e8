use crate::error::{DeliveryError, RouteError};
use crate::room::Room;
use crate::session::ConnectionRegistry;
use murmur_core::{ConnectionId, RoomId, RoomKind, ServerFrame};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// What is left of a room after a member departed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    pub room_id: RoomId,
    pub kind: RoomKind,
    /// Members still in the room. Empty means the room was deleted.
    pub remaining: Vec<ConnectionId>,
}

impl LeaveOutcome {
    pub fn room_deleted(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Owns every room. A room is present iff it has at least one participant.
#[derive(Debug, Default)]
pub struct RoomTable {
    rooms: HashMap<RoomId, Room>,
    next_pair: u64,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `conn` to `room_id`, creating the room on first join.
    ///
    /// Returns the member count after the join. Joining a room of another
    /// kind is refused.
    pub fn create_or_join(
        &mut self,
        room_id: &RoomId,
        conn: ConnectionId,
        kind: RoomKind,
    ) -> Result<usize, RouteError> {
        let room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating {} room {}", kind, room_id);
            Room::new(kind)
        });

        if room.kind() != kind {
            return Err(RouteError::KindMismatch {
                room_id: room_id.clone(),
                actual: room.kind(),
                requested: kind,
            });
        }

        room.insert(conn);
        Ok(room.len())
    }

    /// Opens a fresh `Random` room holding exactly `a` and `b`.
    ///
    /// Callers guarantee that neither connection is in a room.
    pub fn create_paired(&mut self, a: ConnectionId, b: ConnectionId) -> RoomId {
        let room_id = self.allocate_pair_id();

        let mut room = Room::new(RoomKind::Random);
        room.insert(a);
        room.insert(b);
        self.rooms.insert(room_id.clone(), room);

        info!("Paired {} with {} in room {}", a, b, room_id);
        room_id
    }

    /// Counter plus random suffix, skipping anything a named room already took.
    fn allocate_pair_id(&mut self) -> RoomId {
        loop {
            self.next_pair += 1;
            let mut suffix = Uuid::new_v4().simple().to_string();
            suffix.truncate(8);

            let candidate = RoomId::new(format!("random-{}-{}", self.next_pair, suffix));
            if !self.rooms.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Removes `conn` from `room_id`, deleting the room once it is empty.
    ///
    /// Returns `None` if the room does not exist or `conn` was not in it.
    pub fn leave(&mut self, room_id: &RoomId, conn: &ConnectionId) -> Option<LeaveOutcome> {
        let room = self.rooms.get_mut(room_id)?;
        if !room.remove(conn) {
            return None;
        }

        let kind = room.kind();
        let remaining: Vec<ConnectionId> = room.participants().copied().collect();

        if remaining.is_empty() {
            self.rooms.remove(room_id);
            info!("Room {} is empty, deleted", room_id);
        }

        Some(LeaveOutcome {
            room_id: room_id.clone(),
            kind,
            remaining,
        })
    }

    /// Drops a room regardless of its membership, returning who was in it.
    pub fn delete(&mut self, room_id: &RoomId) -> Option<Room> {
        let room = self.rooms.remove(room_id)?;
        info!("Room {} deleted with {} member(s)", room_id, room.len());
        Some(room)
    }

    /// Delivers `frame` to every participant except `except`.
    ///
    /// Returns the participants whose delivery failed.
    pub fn broadcast(
        &self,
        room_id: &RoomId,
        except: Option<&ConnectionId>,
        frame: &ServerFrame,
        registry: &ConnectionRegistry,
    ) -> Result<Vec<(ConnectionId, DeliveryError)>, RouteError> {
        let room = self
            .rooms
            .get(room_id)
            .ok_or_else(|| RouteError::RoomVanished(room_id.clone()))?;

        let mut failed = Vec::new();
        for member in room.participants() {
            if Some(member) == except {
                continue;
            }
            if let Err(e) = registry.deliver(member, frame.clone()) {
                debug!("Broadcast of {} to {} failed: {}", frame.kind(), member, e);
                failed.push((*member, e));
            }
        }

        Ok(failed)
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
