use thiserror::Error;

use crate::services::engine::pattern::PatternError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Invalid pattern: {0}")]
    Pattern(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Audit log error: {0}")]
    Audit(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::Io(error.to_string())
    }
}

impl From<PatternError> for AppError {
    fn from(error: PatternError) -> Self {
        AppError::Pattern(error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
