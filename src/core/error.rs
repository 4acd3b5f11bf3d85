use thiserror::Error;

#[derive(Error, Debug)]
pub enum TacticsError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),

    #[error("Object not found: {0:?}")]
    ObjectNotFound(crate::core::types::ObjectId),

    #[error("IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TacticsError>;
