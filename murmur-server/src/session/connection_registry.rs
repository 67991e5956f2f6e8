use crate::error::DeliveryError;
use crate::session::Outbound;
use murmur_core::{ConnectionId, RoomId, ServerFrame};
use std::collections::HashMap;

pub const DEFAULT_USERNAME: &str = "Anonymous";

/// Per-connection state tracked while the transport is open.
#[derive(Debug)]
pub struct Session {
    pub username: String,
    pub room: Option<RoomId>,
    pub searching: bool,
    outbound: Outbound,
}

/// Who is connected, which room they are in and whether they are searching.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    sessions: HashMap<ConnectionId, Session>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection with no room and no active search.
    ///
    /// Returns `false` and leaves the existing entry untouched if the id is
    /// already registered.
    pub fn register(&mut self, id: ConnectionId, outbound: Outbound) -> bool {
        if self.sessions.contains_key(&id) {
            return false;
        }

        self.sessions.insert(
            id,
            Session {
                username: DEFAULT_USERNAME.to_owned(),
                room: None,
                searching: false,
                outbound,
            },
        );
        true
    }

    pub fn unregister(&mut self, id: &ConnectionId) -> Option<Session> {
        self.sessions.remove(id)
    }

    pub fn is_live(&self, id: &ConnectionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn update_room(&mut self, id: &ConnectionId, room: Option<RoomId>) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.room = room;
        }
    }

    pub fn set_searching(&mut self, id: &ConnectionId, searching: bool) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.searching = searching;
        }
    }

    /// Stores the display label a client announced. Blank labels fall back
    /// to [`DEFAULT_USERNAME`].
    pub fn set_username(&mut self, id: &ConnectionId, username: &str) {
        if let Some(session) = self.sessions.get_mut(id) {
            let username = username.trim();
            session.username = if username.is_empty() {
                DEFAULT_USERNAME.to_owned()
            } else {
                username.to_owned()
            };
        }
    }

    pub fn room_of(&self, id: &ConnectionId) -> Option<RoomId> {
        self.sessions.get(id).and_then(|s| s.room.clone())
    }

    pub fn username_of(&self, id: &ConnectionId) -> String {
        self.sessions
            .get(id)
            .map(|s| s.username.clone())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_owned())
    }

    pub fn is_searching(&self, id: &ConnectionId) -> bool {
        self.sessions.get(id).is_some_and(|s| s.searching)
    }

    /// Pushes a frame into the connection's outbound buffer without waiting.
    pub fn deliver(&self, id: &ConnectionId, frame: ServerFrame) -> Result<(), DeliveryError> {
        match self.sessions.get(id) {
            Some(session) => session.outbound.try_deliver(frame),
            None => Err(DeliveryError::Closed),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
