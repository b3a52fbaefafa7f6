//! Access decision engine: per-route auth specs, the allow/deny
//! decision, and the open-endpoint allowlist.

use thiserror::Error;

use crate::models::{Principal, Role};

/// A route's authorization requirement.
///
/// Resolved once at route registration from the declaration list and
/// read-only at request time; never re-parsed per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAuthSpec {
    /// Bypass entirely; a resolved principal, if any, is irrelevant.
    Public,
    /// Any resolved principal is admitted.
    AnyAuthenticated,
    /// Explicit, non-hierarchical set of admitted roles.
    RoleSet(Vec<Role>),
}

impl RouteAuthSpec {
    pub fn any() -> Self {
        RouteAuthSpec::AnyAuthenticated
    }

    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        RouteAuthSpec::RoleSet(roles.into_iter().collect())
    }

    /// Resolve a registration-time declaration: either the single
    /// wildcard marker `"*"` or an explicit list of role names.
    pub fn parse(declaration: &[&str]) -> Result<Self, String> {
        if declaration.iter().any(|d| *d == "*") {
            return Ok(RouteAuthSpec::AnyAuthenticated);
        }
        if declaration.is_empty() {
            return Err("empty role declaration".to_string());
        }
        let roles = declaration
            .iter()
            .map(|d| d.parse::<Role>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RouteAuthSpec::RoleSet(roles))
    }
}

/// Denial reasons; the gate maps these onto the wire taxonomy.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("authentication required")]
    Unauthenticated,
    #[error("role is not permitted on this route")]
    Forbidden,
}

/// Decide whether a request may proceed.
///
/// Order: `Public` allows unconditionally; anything else needs a
/// principal; the wildcard admits any principal; a role set admits
/// exact members only.
pub fn decide(spec: &RouteAuthSpec, principal: Option<&Principal>) -> Result<(), AccessDenied> {
    match (spec, principal) {
        (RouteAuthSpec::Public, _) => Ok(()),
        (_, None) => Err(AccessDenied::Unauthenticated),
        (RouteAuthSpec::AnyAuthenticated, Some(_)) => Ok(()),
        (RouteAuthSpec::RoleSet(roles), Some(p)) => {
            if roles.contains(&p.role) {
                Ok(())
            } else {
                Err(AccessDenied::Forbidden)
            }
        }
    }
}

/// Paths reachable without a token: exact literals plus prefix rules.
#[derive(Debug, Clone)]
pub struct OpenEndpoints {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl Default for OpenEndpoints {
    fn default() -> Self {
        Self {
            exact: vec![
                "/".to_string(),
                "/users/login".to_string(),
                "/users/signup".to_string(),
                "/health".to_string(),
            ],
            prefixes: vec!["/media/".to_string()],
        }
    }
}

impl OpenEndpoints {
    pub fn is_open(&self, path: &str) -> bool {
        self.exact.iter().any(|p| p == path) || self.prefixes.iter().any(|p| path.starts_with(p))
    }

    pub fn with_exact(mut self, path: impl Into<String>) -> Self {
        self.exact.push(path.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }
}
