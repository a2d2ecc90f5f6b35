use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error when user input fails.
    #[error("inquire error: {0}")]
    Inquire(#[from] inquire::InquireError),
    /// Error when the home directory holding the global config cannot be found
    #[error("failed to find the home directory")]
    HomeDirNotFound,
    /// Error when a prompt gets no answer
    #[error("no answer for prompt '{0}'")]
    NoInput(String),
}
