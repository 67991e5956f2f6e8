use crate::error::DeliveryError;
use murmur_core::ServerFrame;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Sending half of a connection's bounded outbound buffer.
///
/// Delivery never waits: a full or closed buffer is reported back to the
/// caller, which decides what to do with the peer.
#[derive(Debug, Clone)]
pub struct Outbound {
    tx: mpsc::Sender<ServerFrame>,
}

impl Outbound {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ServerFrame>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    pub fn try_deliver(&self, frame: ServerFrame) -> Result<(), DeliveryError> {
        self.tx.try_send(frame).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::Full,
            TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }
}
