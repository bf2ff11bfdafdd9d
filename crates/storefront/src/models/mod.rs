//! Types the storefront keeps between requests.

pub mod session;

pub use session::{SessionControllers, SharedController, keys as session_keys};
