pub use murmur_core::model::{ConnectionId, RoomId};

pub mod model {
    pub use murmur_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use murmur_server::*;
}
