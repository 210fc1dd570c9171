pub mod session_guard;

pub use session_guard::{SessionGuard, SESSION_COOKIE};
