//! User model - credential store account records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Role assigned to a user at signup.
///
/// Matching is by exact variant; no role implicitly contains another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Provider,
    Agent,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Provider => "provider",
            Role::Agent => "agent",
            Role::Customer => "customer",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    // Case-sensitive on purpose: role names are an exact-match contract.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "provider" => Ok(Role::Provider),
            "agent" => Ok(Role::Agent),
            "customer" => Ok(Role::Customer),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity owned by the credential store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    /// Phone number or email address used to log in.
    pub identifier: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user at signup time.
    pub fn new(identifier: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            identifier,
            password_hash,
            role,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    /// Convert to a response shape without the secret hash.
    pub fn sanitized(&self) -> SanitizedUser {
        SanitizedUser {
            id: self.id,
            identifier: self.identifier.clone(),
            role: self.role,
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }
}

/// User response for the API (no sensitive fields).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SanitizedUser {
    pub id: Uuid,
    pub identifier: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}
