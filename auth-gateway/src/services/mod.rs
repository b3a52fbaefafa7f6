pub mod auth;
pub mod database;
pub mod error;
pub mod memory;
pub mod store;

pub use auth::AuthService;
pub use database::Database;
pub use error::ServiceError;
pub use memory::{InMemoryCredentialStore, InMemorySessionStore};
pub use store::{CredentialStore, SessionStore};
