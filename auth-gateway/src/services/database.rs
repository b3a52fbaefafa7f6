//! PostgreSQL backing for the credential and session stores.
//!
//! Uses sqlx with runtime-bound queries; schema lives in `migrations/`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gateway_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use uuid::Uuid;

use crate::models::{Role, Session, User};
use crate::services::store::{CredentialStore, SessionStore};

/// PostgreSQL database wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and run pending migrations.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn user_from_row(row: &PgRow) -> Result<User, anyhow::Error> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("user_id")?,
        identifier: row.try_get("identifier")?,
        password_hash: row.try_get("password_hash")?,
        role: role.parse::<Role>().map_err(|e| anyhow::anyhow!(e))?,
        created_at: row.try_get("created_at")?,
        last_login: row.try_get("last_login")?,
    })
}

fn session_from_row(row: &PgRow) -> Result<Session, anyhow::Error> {
    let role: String = row.try_get("role")?;
    Ok(Session {
        token: row.try_get("token")?,
        user_id: row.try_get("user_id")?,
        role: role.parse::<Role>().map_err(|e| anyhow::anyhow!(e))?,
        issued_at: row.try_get("issued_at")?,
        expires_at: row.try_get("expires_at")?,
        revoked: row.try_get("revoked")?,
    })
}

#[async_trait]
impl CredentialStore for Database {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, anyhow::Error> {
        let row = sqlx::query("SELECT * FROM users WHERE identifier = $1")
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, anyhow::Error> {
        let row = sqlx::query("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, identifier, password_hash, role, created_at, last_login)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.identifier)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.last_login)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn record_login(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<(), anyhow::Error> {
        sqlx::query("UPDATE users SET last_login = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_password_hash(&self, user_id: Uuid, hash: &str) -> Result<(), anyhow::Error> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for Database {
    async fn put(&self, session: &Session) -> Result<(), anyhow::Error> {
        // The primary key on token enforces value uniqueness forever;
        // revoked rows are kept as tombstones, never reused.
        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, role, issued_at, expires_at, revoked)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.role.as_str())
        .bind(session.issued_at)
        .bind(session.expires_at)
        .bind(session.revoked)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, anyhow::Error> {
        let row = sqlx::query("SELECT * FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(session_from_row).transpose()
    }

    async fn revoke(&self, token: &str) -> Result<(), anyhow::Error> {
        // Matching zero rows is fine: revocation never reports whether
        // the token was live.
        sqlx::query("UPDATE sessions SET revoked = TRUE WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), anyhow::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
