//! Error types for RekhaScan

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// RekhaScan error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration values violate scan geometry or band constraints
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Wire message could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Peer end of a channel was dropped
    #[error("Channel closed: {0}")]
    ChannelClosed(&'static str),

    /// Worker thread panicked
    #[error("Thread panicked: {0}")]
    ThreadPanicked(&'static str),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
