//! Domain-specific error types and error handling.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Stored token record is corrupt: {reason}")]
    CorruptRecord { reason: String },
}

/// Core domain errors
///
/// `NotFound`, `AlreadyActive` and `Deleted` are expected outcomes handed back
/// to the caller. `BackingStoreUnavailable` is a hard failure of a store
/// collaborator and is never retried here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// `token` holds the masked token, see [`mask_token`]
    #[error("Token already active: {token}")]
    AlreadyActive { token: String },

    /// `token` holds the masked token, see [`mask_token`]
    #[error("Token deleted: {token}")]
    Deleted { token: String },

    #[error("Backing store unavailable: {message}")]
    BackingStoreUnavailable { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for a missing token
    pub fn token_not_found(token: &str) -> Self {
        DomainError::NotFound {
            resource: format!("token {}", mask_token(token)),
        }
    }

    /// A token that is still live
    pub fn already_active(token: &str) -> Self {
        DomainError::AlreadyActive {
            token: mask_token(token),
        }
    }

    /// A token that was hard-deleted
    pub fn deleted(token: &str) -> Self {
        DomainError::Deleted {
            token: mask_token(token),
        }
    }

    /// Whether the error is a normal outcome rather than a failure
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            DomainError::NotFound { .. }
                | DomainError::AlreadyActive { .. }
                | DomainError::Deleted { .. }
        )
    }

    /// Whether the error came from a store collaborator
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DomainError::BackingStoreUnavailable { .. })
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Token(TokenError::CorruptRecord {
            reason: err.to_string(),
        })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Keep the first 8 characters of a token for log lines and error messages
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(8).collect();
    if visible.len() < token.len() {
        format!("{}…", visible)
    } else {
        visible
    }
}

#[cfg(test)]
mod tests;
