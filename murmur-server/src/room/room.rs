use murmur_core::{ConnectionId, RoomKind};
use std::collections::HashSet;

/// A set of connections that receive each other's broadcasts. Keyed by its
/// id in the [`RoomTable`](crate::RoomTable).
#[derive(Debug, Clone)]
pub struct Room {
    kind: RoomKind,
    participants: HashSet<ConnectionId>,
}

impl Room {
    pub(crate) fn new(kind: RoomKind) -> Self {
        Self {
            kind,
            participants: HashSet::new(),
        }
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub(crate) fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn participants(&self) -> impl Iterator<Item = &ConnectionId> {
        self.participants.iter()
    }

    pub(crate) fn insert(&mut self, id: ConnectionId) -> bool {
        self.participants.insert(id)
    }

    pub(crate) fn remove(&mut self, id: &ConnectionId) -> bool {
        self.participants.remove(id)
    }
}
