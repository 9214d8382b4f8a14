//! Session handling: credential keys, the session capability, and the
//! authentication lifecycle.

pub mod claims;
pub mod keys;
pub mod manager;
pub mod store;

pub use claims::{is_expired_at, token_expiry};
pub use keys::StoreKey;
pub use manager::{SessionManager, SessionState};
pub use store::{Profile, Session, SessionStore};
