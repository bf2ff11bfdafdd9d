//! Session-related types.
//!
//! The session cookie only identifies the visitor. Each visitor's
//! [`SessionController`] lives in [`SessionControllers`] behind its own
//! mutex, so intents from one browser are applied one at a time even when
//! requests arrive in parallel.

use std::sync::Arc;
use std::time::Duration;

use kidsplay_core::SessionController;
use moka::future::Cache;
use tokio::sync::Mutex;
use tower_sessions::Session;
use tower_sessions::session::{Error, Id};

use crate::middleware::session::{SESSION_CAPACITY, SESSION_IDLE_SECONDS};

/// Session keys for storefront data.
pub mod keys {
    /// Marks a session that owns a controller.
    pub const VISITOR: &str = "visitor";
}

/// A controller shared by every request of one session.
pub type SharedController = Arc<Mutex<SessionController>>;

/// Per-session controllers, evicted on the same idle timeout as sessions.
#[derive(Clone)]
pub struct SessionControllers {
    cache: Cache<Id, SharedController>,
}

impl Default for SessionControllers {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionControllers {
    #[must_use]
    pub fn new() -> Self {
        let idle = Duration::from_secs(SESSION_IDLE_SECONDS.unsigned_abs());
        Self {
            cache: Cache::builder()
                .max_capacity(SESSION_CAPACITY)
                .time_to_idle(idle)
                .build(),
        }
    }

    /// The controller of a session that already has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn existing(&self, session: &Session) -> Result<Option<SharedController>, Error> {
        // Loading the record also drops cookie ids the store does not know.
        if session.get::<bool>(keys::VISITOR).await?.is_none() {
            return Ok(None);
        }
        match session.id() {
            Some(id) => Ok(self.cache.get(&id).await),
            None => Ok(None),
        }
    }

    /// The controller of this session, registering the visitor first if
    /// the session is new.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn get_or_create(&self, session: &Session) -> Result<SharedController, Error> {
        if session.get::<bool>(keys::VISITOR).await?.is_none() {
            session.insert(keys::VISITOR, true).await?;
        }
        if session.id().is_none() {
            session.save().await?;
        }
        let id = session.id().ok_or_else(|| {
            Error::Store(tower_sessions::session_store::Error::Backend(
                "session has no id after save".to_string(),
            ))
        })?;

        Ok(self
            .cache
            .get_with(id, async { Arc::new(Mutex::new(SessionController::new())) })
            .await)
    }

    /// A copy of this session's current state, or a fresh controller.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn current(&self, session: &Session) -> Result<SessionController, Error> {
        match self.existing(session).await? {
            Some(shared) => Ok(shared.lock().await.clone()),
            None => Ok(SessionController::new()),
        }
    }
}
