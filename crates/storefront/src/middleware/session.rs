//! Session middleware configuration.
//!
//! Sessions live in process memory only, in a bounded moka-backed store that
//! drops records once they go idle. A cart never outlives its session or a
//! server restart.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "kp_session";

/// Session expiry after inactivity, in seconds (1 day).
pub const SESSION_IDLE_SECONDS: i64 = 24 * 60 * 60;

/// Maximum number of live sessions kept in memory.
pub const SESSION_CAPACITY: u64 = 10_000;

/// Create the session layer with a bounded in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    let store = MokaStore::new(Some(SESSION_CAPACITY));

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_IDLE_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
