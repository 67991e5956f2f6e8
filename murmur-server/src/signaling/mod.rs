mod app;
mod frame_codec;
mod ws_handler;

pub use app::*;
pub use frame_codec::*;
pub use ws_handler::*;
