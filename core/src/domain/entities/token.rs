//! Token entities for opaque session tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use sl_shared::config::session::MAX_TOKEN_TTL_SECONDS;

use crate::errors::DomainError;

/// Lifecycle state of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    /// Live and present in the expiring store
    Active,
    /// Logged out; kept in history and may be reactivated
    Inactive,
    /// Hard-deleted; terminal
    Deleted,
}

impl std::fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenStatus::Active => write!(f, "active"),
            TokenStatus::Inactive => write!(f, "inactive"),
            TokenStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// Snapshot of one issued token
///
/// The same snapshot is written to the live store (while active) and to the
/// owner's history hash; both copies are updated explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Opaque token string, the address of the record
    pub token: String,

    /// Owning user identifier
    pub user_id: String,

    /// Current lifecycle state
    pub status: TokenStatus,

    /// Timestamp when the token was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last state change
    pub updated_at: DateTime<Utc>,

    /// End of the current live window
    pub expires_at: DateTime<Utc>,

    /// Set while the token is inactive
    #[serde(default)]
    pub deactivated_at: Option<DateTime<Utc>>,

    /// Set once the token is hard-deleted
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TokenRecord {
    /// Creates a new active record
    ///
    /// # Arguments
    ///
    /// * `token` - The generated token string
    /// * `user_id` - The owning user
    /// * `ttl_seconds` - Length of the live window
    pub fn new(token: impl Into<String>, user_id: impl Into<String>, ttl_seconds: u64) -> Self {
        let now = Utc::now();

        Self {
            token: token.into(),
            user_id: user_id.into(),
            status: TokenStatus::Active,
            created_at: now,
            updated_at: now,
            expires_at: now + ttl(ttl_seconds),
            deactivated_at: None,
            deleted_at: None,
        }
    }

    /// Checks if the record is active
    pub fn is_active(&self) -> bool {
        self.status == TokenStatus::Active
    }

    /// Checks if the record is hard-deleted
    pub fn is_deleted(&self) -> bool {
        self.status == TokenStatus::Deleted
    }

    /// Moves an active token to inactive
    ///
    /// Deactivating an inactive token refreshes nothing and succeeds; a deleted
    /// token answers `Deleted`.
    pub fn deactivate(&mut self) -> Result<(), DomainError> {
        match self.status {
            TokenStatus::Deleted => Err(DomainError::deleted(&self.token)),
            TokenStatus::Inactive => Ok(()),
            TokenStatus::Active => {
                let now = Utc::now();
                self.status = TokenStatus::Inactive;
                self.deactivated_at = Some(now);
                self.updated_at = now;
                Ok(())
            }
        }
    }

    /// Moves an inactive token back to active with a fresh live window
    pub fn reactivate(&mut self, ttl_seconds: u64) -> Result<(), DomainError> {
        match self.status {
            TokenStatus::Active => Err(DomainError::already_active(&self.token)),
            TokenStatus::Deleted => Err(DomainError::deleted(&self.token)),
            TokenStatus::Inactive => {
                let now = Utc::now();
                self.status = TokenStatus::Active;
                self.deactivated_at = None;
                self.updated_at = now;
                self.expires_at = now + ttl(ttl_seconds);
                Ok(())
            }
        }
    }

    /// Starts a fresh live window for an active token whose previous one lapsed
    pub fn renew(&mut self, ttl_seconds: u64) -> Result<(), DomainError> {
        match self.status {
            TokenStatus::Active => {
                let now = Utc::now();
                self.updated_at = now;
                self.expires_at = now + ttl(ttl_seconds);
                Ok(())
            }
            TokenStatus::Inactive => self.reactivate(ttl_seconds),
            TokenStatus::Deleted => Err(DomainError::deleted(&self.token)),
        }
    }

    /// Marks the token as deleted; repeated calls keep the first deletion time
    pub fn mark_deleted(&mut self) {
        if self.is_deleted() {
            return;
        }
        let now = Utc::now();
        self.status = TokenStatus::Deleted;
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Gets the time remaining in the live window, zero once it has passed
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }

    /// Serializes the record for a backing store
    pub fn to_json(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a record read from a backing store
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        Ok(serde_json::from_str(raw)?)
    }
}

// Keeps timestamp arithmetic in range for callers that skip config normalization.
fn ttl(seconds: u64) -> Duration {
    Duration::seconds(seconds.min(MAX_TOKEN_TTL_SECONDS) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TokenError;

    const TEN_DAYS: u64 = 864_000;

    #[test]
    fn test_new_record_is_active() {
        let record = TokenRecord::new("tok", "user-1", TEN_DAYS);

        assert_eq!(record.token, "tok");
        assert_eq!(record.user_id, "user-1");
        assert!(record.is_active());
        assert_eq!(record.created_at, record.updated_at);
        assert!(record.deactivated_at.is_none());
        assert_eq!(record.expires_at - record.created_at, Duration::days(10));
    }

    #[test]
    fn test_deactivate_sets_timestamp() {
        let mut record = TokenRecord::new("tok", "user-1", TEN_DAYS);
        record.deactivate().unwrap();

        assert_eq!(record.status, TokenStatus::Inactive);
        assert!(record.deactivated_at.is_some());
        assert!(record.updated_at >= record.created_at);

        // Second deactivation is a no-op
        let snapshot = record.clone();
        record.deactivate().unwrap();
        assert_eq!(record, snapshot);
    }

    #[test]
    fn test_reactivate_clears_deactivation() {
        let mut record = TokenRecord::new("tok", "user-1", TEN_DAYS);
        let first_expiry = record.expires_at;
        record.deactivate().unwrap();
        record.reactivate(TEN_DAYS).unwrap();

        assert!(record.is_active());
        assert!(record.deactivated_at.is_none());
        assert!(record.expires_at >= first_expiry);
    }

    #[test]
    fn test_reactivate_active_is_rejected() {
        let mut record = TokenRecord::new("tok", "user-1", TEN_DAYS);
        let snapshot = record.clone();

        let err = record.reactivate(TEN_DAYS).unwrap_err();
        assert_eq!(err, DomainError::already_active("tok"));
        assert_eq!(record, snapshot);
    }

    #[test]
    fn test_deleted_is_terminal() {
        let mut record = TokenRecord::new("tok", "user-1", TEN_DAYS);
        record.mark_deleted();
        let deleted_at = record.deleted_at;

        assert!(record.is_deleted());
        assert!(matches!(record.reactivate(TEN_DAYS), Err(DomainError::Deleted { .. })));
        assert!(matches!(record.deactivate(), Err(DomainError::Deleted { .. })));

        record.mark_deleted();
        assert_eq!(record.deleted_at, deleted_at);
    }

    #[test]
    fn test_renew_extends_active_window() {
        let mut record = TokenRecord::new("tok", "user-1", 60);
        record.expires_at = Utc::now() - Duration::seconds(1);

        record.renew(TEN_DAYS).unwrap();
        assert!(record.is_active());
        assert!(record.time_until_expiration() > Duration::days(9));

        record.mark_deleted();
        assert!(matches!(record.renew(TEN_DAYS), Err(DomainError::Deleted { .. })));
    }

    #[test]
    fn test_time_until_expiration() {
        let mut record = TokenRecord::new("tok", "user-1", TEN_DAYS);
        let remaining = record.time_until_expiration();
        assert!(remaining <= Duration::days(10));
        assert!(remaining > Duration::days(9));

        record.expires_at = Utc::now() - Duration::days(1);
        assert_eq!(record.time_until_expiration(), Duration::zero());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let record = TokenRecord::new("tok", "user-1", TEN_DAYS);
        let json = record.to_json().unwrap();
        assert!(json.contains(r#""status":"active""#));

        let parsed = TokenRecord::from_json(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = TokenRecord::from_json("not a record").unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::CorruptRecord { .. })));
    }
}
