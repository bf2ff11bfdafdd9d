//! Application state shared across handlers.

use std::sync::Arc;

use kidsplay_core::{Product, ProductId};

use crate::config::StorefrontConfig;
use crate::models::SessionControllers;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the read-only product catalog and the per-session
/// controllers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Vec<Product>,
    sessions: SessionControllers,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - The fixed product list for every session
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Vec<Product>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                sessions: SessionControllers::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The full product catalog in its supplied order.
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.inner.catalog
    }

    /// Controllers of the live sessions.
    #[must_use]
    pub fn sessions(&self) -> &SessionControllers {
        &self.inner.sessions
    }

    /// Look up a catalog product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.inner.catalog.iter().find(|p| p.id == id)
    }
}
