use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// What to do when a connection's outbound buffer is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Discard relayed frames and keep the connection. Frames that commit
    /// pairing or room state still disconnect.
    Drop,
    /// Treat the slow peer as gone and tear it down.
    #[default]
    Disconnect,
}

#[derive(Debug, Error)]
#[error("unknown overflow policy `{0}` (expected `drop` or `disconnect`)")]
pub struct ParseOverflowPolicyError(String);

impl FromStr for OverflowPolicy {
    type Err = ParseOverflowPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "disconnect" => Ok(Self::Disconnect),
            other => Err(ParseOverflowPolicyError(other.to_owned())),
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drop => f.write_str("drop"),
            Self::Disconnect => f.write_str("disconnect"),
        }
    }
}

/// Runtime knobs for the coordinator and its connections.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Per-connection outbound frame buffer.
    pub outbound_buffer: usize,
    /// Inbound command mailbox shared by all connections.
    pub command_buffer: usize,
    pub overflow_policy: OverflowPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            outbound_buffer: 256,
            command_buffer: 1024,
            overflow_policy: OverflowPolicy::default(),
        }
    }
}
