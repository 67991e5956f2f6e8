use murmur_core::ConnectionId;
use std::collections::VecDeque;
use tracing::debug;

/// Connections waiting for an anonymous partner, oldest first.
///
/// A connection appears at most once.
#[derive(Debug, Default)]
pub struct MatchmakingQueue {
    waiting: VecDeque<ConnectionId>,
}

impl MatchmakingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` unless it is already waiting. Returns whether it was added.
    pub fn enqueue(&mut self, id: ConnectionId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.waiting.push_back(id);
        true
    }

    /// Pops entries oldest-first until one passes `is_eligible`.
    ///
    /// Entries that fail the check are discarded; they raced with a
    /// disconnect or otherwise stopped searching.
    pub fn pop_eligible<F>(&mut self, mut is_eligible: F) -> Option<ConnectionId>
    where
        F: FnMut(&ConnectionId) -> bool,
    {
        while let Some(candidate) = self.waiting.pop_front() {
            if is_eligible(&candidate) {
                return Some(candidate);
            }
            debug!("Discarding stale queue entry {}", candidate);
        }
        None
    }

    pub fn remove(&mut self, id: &ConnectionId) -> bool {
        let before = self.waiting.len();
        self.waiting.retain(|queued| queued != id);
        self.waiting.len() != before
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.waiting.contains(id)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}
