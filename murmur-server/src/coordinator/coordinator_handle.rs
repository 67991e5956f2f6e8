use crate::config::ServerConfig;
use crate::coordinator::{Coordinator, CoordinatorCommand, CoordinatorStats};
use crate::error::CoordinatorError;
use crate::session::Outbound;
use murmur_core::{ClientFrame, ConnectionId, ServerFrame};
use tokio::sync::{mpsc, oneshot};
use tracing::info;

/// Cloneable entry point to the coordinator task.
///
/// The task stops once every handle is dropped.
#[derive(Clone)]
pub struct CoordinatorHandle {
    command_tx: mpsc::Sender<CoordinatorCommand>,
    outbound_buffer: usize,
}

impl CoordinatorHandle {
    /// Spawns the coordinator on the current tokio runtime.
    pub fn spawn(config: ServerConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer.max(1));
        let outbound_buffer = config.outbound_buffer;

        info!(
            "Spawning coordinator (outbound buffer {}, overflow policy {})",
            outbound_buffer, config.overflow_policy
        );
        tokio::spawn(Coordinator::new(command_rx, config).run());

        Self {
            command_tx,
            outbound_buffer,
        }
    }

    /// Registers a new connection and hands back its outbound frames.
    ///
    /// The first frame on the receiver is `connected`.
    pub async fn connect(
        &self,
    ) -> Result<(ConnectionId, mpsc::Receiver<ServerFrame>), CoordinatorError> {
        let connection_id = ConnectionId::new();
        let (outbound, rx) = Outbound::channel(self.outbound_buffer);

        self.send(CoordinatorCommand::Connect {
            connection_id,
            outbound,
        })
        .await?;

        Ok((connection_id, rx))
    }

    pub async fn send_frame(
        &self,
        connection_id: ConnectionId,
        frame: ClientFrame,
    ) -> Result<(), CoordinatorError> {
        self.send(CoordinatorCommand::Frame {
            connection_id,
            frame,
        })
        .await
    }

    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), CoordinatorError> {
        self.send(CoordinatorCommand::Disconnect { connection_id })
            .await
    }

    /// Current store sizes. Every command sent before this one has been
    /// fully processed when it returns.
    pub async fn stats(&self) -> Result<CoordinatorStats, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(CoordinatorCommand::Stats { reply }).await?;
        rx.await.map_err(|_| CoordinatorError::Closed)
    }

    async fn send(&self, cmd: CoordinatorCommand) -> Result<(), CoordinatorError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| CoordinatorError::Closed)
    }
}
