use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use rand::Rng;

use crate::{
    dtos::auth::{LoginRequest, SignupRequest, TokenResponse, UpdatePasswordRequest},
    models::{Principal, SanitizedUser, Session, User},
    services::{
        error::ServiceError,
        store::{CredentialStore, SessionStore},
    },
    utils::{hash_password, verify_password, Password, PasswordHashString},
};

/// Token issuance, validation and revocation over the injected stores.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
    /// Passive session expiry; `None` keeps sessions live until logout.
    token_ttl_hours: Option<i64>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        token_ttl_hours: Option<i64>,
    ) -> Self {
        Self {
            users,
            sessions,
            token_ttl_hours,
        }
    }

    pub async fn signup(&self, req: SignupRequest) -> Result<SanitizedUser, ServiceError> {
        if self
            .users
            .find_by_identifier(&req.phone_number)
            .await?
            .is_some()
        {
            return Err(ServiceError::UserAlreadyExists);
        }

        let password_hash = hash_password(&Password::new(req.password))
            .map_err(|e| ServiceError::Store(anyhow::anyhow!("Password hashing error: {}", e)))?;

        let user = User::new(req.phone_number, password_hash.into_string(), req.role);
        self.users.insert(&user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(user.sanitized())
    }

    /// Verify credentials and issue a fresh session.
    ///
    /// Unknown identifier and wrong password produce the same error.
    /// Concurrent logins each get their own session; nothing caps the
    /// number of live sessions per user.
    pub async fn login(&self, req: LoginRequest) -> Result<TokenResponse, ServiceError> {
        let mut user = self
            .users
            .find_by_identifier(&req.identifier)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        verify_password(
            &Password::new(req.password),
            &PasswordHashString::new(user.password_hash.clone()),
        )
        .map_err(|_| ServiceError::InvalidCredentials)?;

        let token = generate_session_token();
        let session = Session::new(token.clone(), user.id, user.role, self.token_ttl_hours);
        self.sessions.put(&session).await?;

        let now = Utc::now();
        self.users.record_login(user.id, now).await?;
        user.last_login = Some(now);

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(TokenResponse {
            token,
            user: user.sanitized(),
        })
    }

    /// Revoke the presented token.
    ///
    /// Idempotent and non-informative: unknown and already-revoked
    /// tokens succeed just like live ones. Only a store fault errors.
    pub async fn logout(&self, token: &str) -> Result<(), ServiceError> {
        self.sessions.revoke(token).await?;
        tracing::info!("Session revoked");
        Ok(())
    }

    /// Resolve a presented token into a principal.
    ///
    /// The role comes from the session record, not the live user row,
    /// so a mid-session role change never alters issued tokens.
    pub async fn resolve(&self, token: &str) -> Result<Principal, ServiceError> {
        let session = self
            .sessions
            .get(token)
            .await?
            .ok_or(ServiceError::InvalidSession)?;

        if !session.is_valid() {
            return Err(ServiceError::InvalidSession);
        }

        Ok(session.principal())
    }

    pub async fn update_password(
        &self,
        principal: &Principal,
        req: UpdatePasswordRequest,
    ) -> Result<(), ServiceError> {
        let user = self
            .users
            .find_by_id(principal.user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        verify_password(
            &Password::new(req.old_password),
            &PasswordHashString::new(user.password_hash.clone()),
        )
        .map_err(|_| ServiceError::InvalidCredentials)?;

        let password_hash = hash_password(&Password::new(req.new_password))
            .map_err(|e| ServiceError::Store(anyhow::anyhow!("Password hashing error: {}", e)))?;

        self.users
            .set_password_hash(user.id, password_hash.as_str())
            .await?;

        tracing::info!(user_id = %user.id, "Password updated");

        Ok(())
    }
}

/// 256 bits of randomness, base64url without padding: computationally
/// unguessable and collision-free in practice; the store's uniqueness
/// check is the backstop.
fn generate_session_token() -> String {
    let token_bytes: [u8; 32] = rand::thread_rng().gen();
    general_purpose::URL_SAFE_NO_PAD.encode(token_bytes)
}
