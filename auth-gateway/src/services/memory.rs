//! In-memory store implementations backing tests and local development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{Session, User};
use crate::services::store::{CredentialStore, SessionStore};

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, session: &Session) -> Result<(), anyhow::Error> {
        if self.sessions.contains_key(&session.token) {
            return Err(anyhow::anyhow!("duplicate session token"));
        }
        self.sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, anyhow::Error> {
        Ok(self.sessions.get(token).map(|s| s.value().clone()))
    }

    async fn revoke(&self, token: &str) -> Result<(), anyhow::Error> {
        if let Some(mut session) = self.sessions.get_mut(token) {
            session.revoked = true;
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), anyhow::Error> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: DashMap<Uuid, User>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, anyhow::Error> {
        Ok(self
            .users
            .iter()
            .find(|u| u.identifier == identifier)
            .map(|u| u.value().clone()))
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, anyhow::Error> {
        Ok(self.users.get(&user_id).map(|u| u.value().clone()))
    }

    async fn insert(&self, user: &User) -> Result<(), anyhow::Error> {
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn record_login(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<(), anyhow::Error> {
        if let Some(mut user) = self.users.get_mut(&user_id) {
            user.last_login = Some(at);
        }
        Ok(())
    }

    async fn set_password_hash(&self, user_id: Uuid, hash: &str) -> Result<(), anyhow::Error> {
        if let Some(mut user) = self.users.get_mut(&user_id) {
            user.password_hash = hash.to_string();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[tokio::test]
    async fn duplicate_token_is_rejected() {
        let store = InMemorySessionStore::new();
        let session = Session::new("tok".to_string(), Uuid::new_v4(), Role::Admin, None);
        store.put(&session).await.unwrap();
        assert!(store.put(&session).await.is_err());
    }

    #[tokio::test]
    async fn revoke_is_idempotent_and_silent_on_unknown_tokens() {
        let store = InMemorySessionStore::new();
        let session = Session::new("tok".to_string(), Uuid::new_v4(), Role::Admin, None);
        store.put(&session).await.unwrap();

        store.revoke("tok").await.unwrap();
        store.revoke("tok").await.unwrap();
        store.revoke("never-issued").await.unwrap();

        let stored = store.get("tok").await.unwrap().unwrap();
        assert!(stored.revoked);
    }
}
