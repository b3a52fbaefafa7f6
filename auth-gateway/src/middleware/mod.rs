pub mod auth;

pub use auth::{access_control, authenticate, AuthUser, BearerToken};
