use thiserror::Error;

/// Errors that can occur in the ground-station core
#[derive(Error, Debug)]
pub enum GroundError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Probe transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, GroundError>;
