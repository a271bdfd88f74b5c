use thiserror::Error;

/// Custom error types for ghostwrite
#[derive(Debug, Error)]
pub enum GhostwriteError {
    #[error("Invalid config file {path}: {message}")]
    InvalidConfig { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
