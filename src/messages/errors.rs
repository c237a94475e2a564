use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Failed to parse message: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Packet is not valid UTF-8")]
    NotText,
}
