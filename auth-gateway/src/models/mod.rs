pub mod principal;
pub mod session;
pub mod user;

pub use principal::Principal;
pub use session::{Session, SessionState};
pub use user::{Role, SanitizedUser, User};
