use std::time::Duration;

use thiserror::Error;

pub const TIMEOUT_MESSAGE: &str = "The request timed out. The AI agent is processing too much data. Please try a simpler, more specific question.";
pub const NOT_FOUND_MESSAGE: &str =
    "API server not found. Please make sure the backend server is running on port 8000.";
pub const SERVER_ERROR_MESSAGE: &str =
    "Server error. The AI agent may be overloaded. Please try again in a moment.";
pub const GENERIC_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("agent query timed out after {0:?}")]
    Timeout(Duration),
    #[error("agent endpoint returned 404")]
    NotFound,
    #[error("agent backend failed with status {status}")]
    Server { status: u16 },
    #[error("agent backend rejected the query with status {status}")]
    Status { status: u16 },
    #[error("agent transport failure: {0}")]
    Transport(String),
}

impl QueryError {
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            500..=599 => Self::Server { status },
            _ => Self::Status { status },
        }
    }

    /// Fixed text shown in the admin transcript instead of the raw failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Timeout(_) => TIMEOUT_MESSAGE,
            Self::NotFound => NOT_FOUND_MESSAGE,
            Self::Server { .. } => SERVER_ERROR_MESSAGE,
            Self::Status { .. } | Self::Transport(_) => GENERIC_ERROR_MESSAGE,
        }
    }

    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::NotFound => "not_found",
            Self::Server { .. } => "server",
            Self::Status { .. } => "status",
            Self::Transport(_) => "transport",
        }
    }
}
