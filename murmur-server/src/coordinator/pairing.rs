use crate::coordinator::Coordinator;
use murmur_core::{ConnectionId, ServerFrame};
use tracing::{debug, error, info};

impl Coordinator {
    /// Pairs `sender` with the oldest live searcher, or queues it.
    ///
    /// Strict FIFO: nobody is paired ahead of an earlier joiner. Sending
    /// `random_paired` commits the pairing; it is never retracted.
    pub(crate) fn join_random(&mut self, sender: ConnectionId, username: &str) {
        self.registry.set_username(&sender, username);

        if self.queue.contains(&sender) {
            debug!("Connection {} is already searching", sender);
            self.send_to(&sender, ServerFrame::RandomWaiting {});
            return;
        }

        self.leave_current_room(&sender);
        if self.registry.room_of(&sender).is_some() {
            error!("Connection {} still has a room, refusing to pair", sender);
            return;
        }

        let registry = &self.registry;
        let partner = self.queue.pop_eligible(|candidate| {
            *candidate != sender
                && registry.is_searching(candidate)
                && registry.room_of(candidate).is_none()
        });

        let Some(partner) = partner else {
            self.queue.enqueue(sender);
            self.registry.set_searching(&sender, true);
            info!("Connection {} is waiting for a partner", sender);
            self.send_to(&sender, ServerFrame::RandomWaiting {});
            return;
        };

        let room_id = self.rooms.create_paired(sender, partner);
        for id in [sender, partner] {
            self.registry.set_searching(&id, false);
            self.registry.update_room(&id, Some(room_id.clone()));
        }

        let sender_name = self.registry.username_of(&sender);
        let partner_name = self.registry.username_of(&partner);

        self.send_to(
            &sender,
            ServerFrame::RandomPaired {
                room_id: room_id.clone(),
                partner_username: partner_name,
            },
        );
        self.send_to(
            &partner,
            ServerFrame::RandomPaired {
                room_id,
                partner_username: sender_name,
            },
        );
    }
}
