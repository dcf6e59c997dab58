use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("Session thread error: {0}")]
    Thread(String),

    #[error("Comparison session is closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, SyncError>;
