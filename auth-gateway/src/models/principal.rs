use uuid::Uuid;

use super::Role;

/// Resolved identity and role for an authenticated request.
///
/// Produced by a successful validation plus access decision, carried
/// in the request extensions, never persisted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
}
