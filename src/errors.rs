use thiserror::Error;

// Errors raised at the boundaries: reading input, decoding events, writing output.
// Flattening and column selection never fail.
#[derive(Debug, Error)]
pub enum RumError {
    // Input document could not be understood
    #[error("parse error: {0}")]
    Parse(String),

    // An event had an action but an unusable shape
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

// Type alias for results that use `RumError` as the error type
pub type Result<T> = std::result::Result<T, RumError>;
