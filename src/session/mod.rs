mod session_id;
mod store;

pub use session_id::{SessionId, SESSION_COOKIE};
pub use store::{InMemorySessionStore, SessionStore};
