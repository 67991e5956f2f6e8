use crate::error::FrameError;
use murmur_core::{ClientFrame, ServerFrame};

pub fn decode_frame(text: &str) -> Result<ClientFrame, FrameError> {
    Ok(serde_json::from_str(text)?)
}

pub fn encode_frame(frame: &ServerFrame) -> Result<String, FrameError> {
    Ok(serde_json::to_string(frame)?)
}
