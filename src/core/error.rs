//! Error types for the dashboard

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown underlying: {0}")]
    UnknownUnderlying(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type DashResult<T> = Result<T, DashError>;

impl DashError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unknown_underlying(symbol: impl Into<String>) -> Self {
        Self::UnknownUnderlying(symbol.into())
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
