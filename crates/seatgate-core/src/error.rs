use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Card format errors
    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    // Registry errors
    #[error("Resource index {index} out of range (0-{max})")]
    InvalidResource { index: usize, max: usize },

    #[error("Resource {index} is already occupied")]
    ResourceOccupied { index: usize },

    #[error("Resource {index} is vacant")]
    ResourceVacant { index: usize },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
