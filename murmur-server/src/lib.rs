mod config;
mod coordinator;
mod error;
mod matchmaking;
mod room;
mod session;
mod signaling;

pub use config::*;
pub use coordinator::*;
pub use error::*;
pub use matchmaking::*;
pub use room::*;
pub use session::*;
pub use signaling::*;
