use thiserror::Error;

/// Why a share token could not be turned back into a configuration.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("token is empty")]
    Empty,

    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("could not compress configuration: {0}")]
    Deflate(std::io::Error),

    #[error("token does not inflate: {0}")]
    Inflate(std::io::Error),

    #[error("inflated token exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("token payload is not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("token payload is not a configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CountdownError {
    #[error("Countdown not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CountdownError>;
