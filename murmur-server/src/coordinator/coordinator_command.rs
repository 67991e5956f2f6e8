use crate::session::Outbound;
use murmur_core::{ClientFrame, ConnectionId};
use serde::Serialize;
use tokio::sync::oneshot;

/// Commands fed to the coordinator by transports.
#[derive(Debug)]
pub enum CoordinatorCommand {
    /// A transport opened; register it with its outbound buffer.
    Connect {
        connection_id: ConnectionId,
        outbound: Outbound,
    },

    /// A decoded frame from a connection, in arrival order.
    Frame {
        connection_id: ConnectionId,
        frame: ClientFrame,
    },

    /// The transport closed or errored.
    Disconnect { connection_id: ConnectionId },

    Stats {
        reply: oneshot::Sender<CoordinatorStats>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoordinatorStats {
    pub connections: usize,
    pub rooms: usize,
    pub waiting: usize,
}
