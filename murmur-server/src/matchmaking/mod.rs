mod matchmaking_queue;

pub use matchmaking_queue::*;
