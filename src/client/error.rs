use crate::schemas::Violations;

/// Failure of a dashboard call
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        message: String,
        violations: Option<Violations>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Rejected by the shared schema before any request was sent
    #[error("{0}")]
    Invalid(#[from] Violations),
}

impl ClientError {
    /// Field violations reported either locally or by the server
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            ClientError::Status { violations, .. } => violations.as_ref(),
            ClientError::Invalid(violations) => Some(violations),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
