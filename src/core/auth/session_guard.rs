// Password gate for the dashboard.
//
// One shared admin password, no user accounts. A correct password yields an
// opaque random token that the HTTP layer stores in a cookie. Tokens live in
// memory only, so a restart signs everybody out.

use dashmap::DashMap;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::time::{Duration, Instant};
use subtle::ConstantTimeEq;

/// Name of the dashboard session cookie.
pub const SESSION_COOKIE: &str = "intake_session";

/// Length of an issued session token.
pub const TOKEN_LEN: usize = 64;

/// Fixed validity window of a session.
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub struct SessionGuard {
    password: String,
    /// Issued token -> expiry.
    issued: DashMap<String, Instant>,
    ttl: Duration,
}

impl SessionGuard {
    pub fn new(password: String) -> Self {
        Self::with_ttl(password, SESSION_TTL)
    }

    pub fn with_ttl(password: String, ttl: Duration) -> Self {
        Self {
            password,
            issued: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Compares `candidate` with the configured password in constant time.
    pub fn verify_password(&self, candidate: &str) -> bool {
        constant_time_eq(candidate.as_bytes(), self.password.as_bytes())
    }

    /// Issues a fresh session token and forgets expired ones.
    pub fn issue(&self) -> String {
        let now = Instant::now();
        self.issued.retain(|_, expires_at| *expires_at > now);

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        self.issued.insert(token.clone(), now + self.ttl);
        token
    }

    /// True if `token` has the right shape and is a live token issued here.
    pub fn is_valid(&self, token: &str) -> bool {
        if !has_session_shape(token) {
            return false;
        }
        match self.issued.get(token) {
            Some(expires_at) => *expires_at > Instant::now(),
            None => false,
        }
    }

    pub fn revoke(&self, token: &str) {
        self.issued.remove(token);
    }
}

/// Byte-wise comparison whose running time depends only on the lengths.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// 64 ASCII alphanumerics.
pub fn has_session_shape(token: &str) -> bool {
    token.len() == TOKEN_LEN && token.bytes().all(|b| b.is_ascii_alphanumeric())
}
