//! Error types for Hermod.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
