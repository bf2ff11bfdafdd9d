//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>);
//!   an `https://` URL turns on secure session cookies
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_CATALOG_PATH` - JSON product catalog (default: bundled catalog)
//! - `STOREFRONT_CATALOG_PDF_URL` - Downloadable catalog shown in the catalog section
//! - `STORE_NAME`, `STORE_PHONE`, `STORE_EMAIL`, `STORE_ADDRESS` - Contact details
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),

    #[error("Invalid STOREFRONT_BASE_URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("STOREFRONT_BASE_URL must be an http(s) URL with a host, got '{0}'")]
    UnsupportedBaseUrl(String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Product catalog file; the bundled catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Link to the downloadable catalog
    pub catalog_pdf_url: Option<String>,
    /// Store contact details for the header and footer
    pub store: StoreInfo,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Store contact details.
#[derive(Debug, Clone)]
pub struct StoreInfo {
    pub name: String,
    /// Phone number as displayed, e.g. `8 (918) 563-62-22`
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl StoreInfo {
    /// `tel:` link for the phone number.
    #[must_use]
    pub fn tel_href(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: "КидсПлей".to_string(),
            phone: "8 (918) 563-62-22".to_string(),
            email: "info@kidsplay.ru".to_string(),
            address: "Москва, ул. Детская, 1".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Lookup(lookup);

        let host = env
            .or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = env
            .or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = env.or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        validate_base_url(&base_url)?;

        let defaults = StoreInfo::default();
        let store = StoreInfo {
            name: env.or_default("STORE_NAME", &defaults.name),
            phone: env.or_default("STORE_PHONE", &defaults.phone),
            email: env.or_default("STORE_EMAIL", &defaults.email),
            address: env.or_default("STORE_ADDRESS", &defaults.address),
        };

        Ok(Self {
            host,
            port,
            base_url,
            static_dir: PathBuf::from(
                env.or_default("STOREFRONT_STATIC_DIR", "crates/storefront/static"),
            ),
            catalog_path: env.optional("STOREFRONT_CATALOG_PATH").map(PathBuf::from),
            catalog_pdf_url: env.optional("STOREFRONT_CATALOG_PDF_URL"),
            store,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source with the empty string treated as unset.
struct Lookup<F>(F);

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    /// Get an optional variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// The base URL must be an absolute http(s) URL with a host.
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::UnsupportedBaseUrl(base_url.to_string()));
    }
    Ok(())
}
