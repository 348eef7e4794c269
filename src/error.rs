use thiserror::Error;

/// Failures raised while speaking the stdio protocol. None of them is fatal:
/// the loop that hits one logs it and moves on to the next record.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to decode record: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to read record: {0}")]
    Read(#[source] std::io::Error),

    #[error("seq_id {seq_id} is out of range for a menu of {len} items")]
    Index { seq_id: i64, len: usize },

    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write event: {0}")]
    Write(#[source] std::io::Error),

    #[error("input stream closed")]
    StreamClosed,

    #[error("icon is not valid base64: {0}")]
    Icon(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
