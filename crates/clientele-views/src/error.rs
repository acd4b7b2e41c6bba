//! Client-side error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    /// The request never produced a response, or the body was unreadable.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The form could not be turned into a request payload.
    #[error("{0}")]
    InvalidForm(String),
}

impl ViewError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ViewError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ViewResult<T> = Result<T, ViewError>;
