use crate::config::{OverflowPolicy, ServerConfig};
use crate::coordinator::{CoordinatorCommand, CoordinatorStats};
use crate::error::{DeliveryError, RouteError};
use crate::matchmaking::MatchmakingQueue;
use crate::room::RoomTable;
use crate::session::{ConnectionRegistry, Outbound};
use murmur_core::{ConnectionId, RoomId, ServerFrame};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Single owner of the registry, the room table and the matchmaking queue.
///
/// Runs as one task and handles one command at a time, so no two mutations
/// of these stores ever interleave.
pub struct Coordinator {
    pub(crate) registry: ConnectionRegistry,
    pub(crate) rooms: RoomTable,
    pub(crate) queue: MatchmakingQueue,
    config: ServerConfig,
    command_rx: mpsc::Receiver<CoordinatorCommand>,
    /// Connections whose delivery failed during the current command.
    doomed: Vec<ConnectionId>,
}

impl Coordinator {
    pub fn new(command_rx: mpsc::Receiver<CoordinatorCommand>, config: ServerConfig) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            rooms: RoomTable::new(),
            queue: MatchmakingQueue::new(),
            config,
            command_rx,
            doomed: Vec::new(),
        }
    }

    pub async fn run(mut self) {
        info!("Coordinator event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!("Command channel closed. Coordinator event loop finished");
    }

    fn handle_command(&mut self, cmd: CoordinatorCommand) {
        match cmd {
            CoordinatorCommand::Connect {
                connection_id,
                outbound,
            } => self.connect(connection_id, outbound),

            CoordinatorCommand::Frame {
                connection_id,
                frame,
            } => self.route(connection_id, frame),

            CoordinatorCommand::Disconnect { connection_id } => self.disconnect(&connection_id),

            CoordinatorCommand::Stats { reply } => {
                let _ = reply.send(self.stats());
            }
        }

        self.reap();
    }

    fn connect(&mut self, connection_id: ConnectionId, outbound: Outbound) {
        if !self.registry.register(connection_id, outbound) {
            error!("Connection {} registered twice, ignoring", connection_id);
            return;
        }

        info!("Connection {} opened", connection_id);
        self.send_to(&connection_id, ServerFrame::Connected { connection_id });
    }

    pub(crate) fn stats(&self) -> CoordinatorStats {
        CoordinatorStats {
            connections: self.registry.len(),
            rooms: self.rooms.len(),
            waiting: self.queue.len(),
        }
    }

    pub(crate) fn send_to(&mut self, id: &ConnectionId, frame: ServerFrame) {
        let relayed = frame.is_relayed();

        if let Err(e) = self.registry.deliver(id, frame) {
            self.on_delivery_failure(*id, e, relayed);
        }
    }

    pub(crate) fn broadcast(
        &mut self,
        room_id: &RoomId,
        except: Option<&ConnectionId>,
        frame: ServerFrame,
    ) -> Result<(), RouteError> {
        let failed = self
            .rooms
            .broadcast(room_id, except, &frame, &self.registry)?;

        let relayed = frame.is_relayed();
        for (id, e) in failed {
            self.on_delivery_failure(id, e, relayed);
        }
        Ok(())
    }

    /// Only relayed frames may be dropped. A full buffer on any other frame
    /// disconnects the connection under either policy.
    fn on_delivery_failure(&mut self, id: ConnectionId, err: DeliveryError, relayed: bool) {
        match (err, self.config.overflow_policy) {
            (DeliveryError::Full, OverflowPolicy::Drop) if relayed => {
                warn!("Outbound buffer of {} is full, dropping frame", id);
            }
            (DeliveryError::Full, _) => {
                warn!("Outbound buffer of {} is full, disconnecting", id);
                self.doomed.push(id);
            }
            (DeliveryError::Closed, _) => {
                debug!("Connection {} is gone, scheduling teardown", id);
                self.doomed.push(id);
            }
        }
    }

    /// Tears down every connection whose delivery failed. Teardown may fail
    /// further deliveries, so this loops until nothing is left.
    fn reap(&mut self) {
        while !self.doomed.is_empty() {
            for id in std::mem::take(&mut self.doomed) {
                self.disconnect(&id);
            }
        }
    }
}
