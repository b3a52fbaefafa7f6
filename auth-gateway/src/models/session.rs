use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::{Principal, Role};

/// Server-side session binding an opaque token to a user and role.
///
/// The role is copied at issue time and never re-read from the user
/// row, so a mid-session role change does not affect live tokens.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque, unguessable token value; unique across all sessions ever.
    pub token: String,
    pub user_id: Uuid,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    /// `None` means the session never expires passively.
    pub expires_at: Option<DateTime<Utc>>,
    /// Tombstone set at logout.
    pub revoked: bool,
}

/// Lifecycle: `Active -> {Expired | Revoked}`, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Expired,
    Revoked,
}

impl Session {
    /// Create a freshly issued session.
    pub fn new(token: String, user_id: Uuid, role: Role, ttl_hours: Option<i64>) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            role,
            issued_at: now,
            expires_at: ttl_hours.map(|h| now + Duration::hours(h)),
            revoked: false,
        }
    }

    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() > expires_at,
            None => false,
        }
    }

    /// Check if this session still resolves (not expired and not revoked).
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.revoked
    }

    pub fn state(&self) -> SessionState {
        if self.revoked {
            SessionState::Revoked
        } else if self.is_expired() {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }

    /// The principal this session resolves to while valid.
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.user_id,
            role: self.role,
        }
    }
}
