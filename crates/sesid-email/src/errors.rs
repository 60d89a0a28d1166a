//! Error types for identity management

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Domain identity not found: {0}")]
    NotFound(String),

    #[error("Failed to {operation}: {detail}")]
    Transport { operation: String, detail: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EmailError {
    pub fn transport(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        EmailError::Transport {
            operation: operation.into(),
            detail: detail.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EmailError::NotFound(_))
    }
}
