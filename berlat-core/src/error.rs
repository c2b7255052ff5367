use thiserror::Error;

/// Main error type for berlat operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BerError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("BER encoding error: {0}")]
    Encoding(String),

    #[error("BER decoding error: {0}")]
    Decoding(String),

    #[error("Unknown selection id: {0}")]
    UnknownSelection(i32),

    #[error("Unknown enumerator: {0}")]
    UnknownEnumerator(String),

    #[error("Value rejected: {0}")]
    InvalidValue(String),
}

/// Result type alias for berlat operations
pub type BerResult<T> = Result<T, BerError>;
