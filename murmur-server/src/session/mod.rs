mod connection_registry;
mod outbound;

pub use connection_registry::*;
pub use outbound::*;
