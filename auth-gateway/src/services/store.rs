use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Session, User};

/// Session store: the only shared mutable state behind the gate.
///
/// Injected as a trait object so tests run against an in-memory
/// backing while production uses Postgres.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a freshly issued session. Token values are unique
    /// across all sessions ever; a duplicate is an error.
    async fn put(&self, session: &Session) -> Result<(), anyhow::Error>;

    async fn get(&self, token: &str) -> Result<Option<Session>, anyhow::Error>;

    /// Mark a session revoked. Unknown or already-revoked tokens are a
    /// no-op: revocation must not reveal whether a token was ever live.
    async fn revoke(&self, token: &str) -> Result<(), anyhow::Error>;

    async fn health_check(&self) -> Result<(), anyhow::Error>;
}

/// Credential store holding user records; external collaborator of the
/// gateway, abstracted for the same injectability reasons.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, anyhow::Error>;

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, anyhow::Error>;

    async fn insert(&self, user: &User) -> Result<(), anyhow::Error>;

    async fn record_login(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<(), anyhow::Error>;

    async fn set_password_hash(&self, user_id: Uuid, hash: &str) -> Result<(), anyhow::Error>;
}
