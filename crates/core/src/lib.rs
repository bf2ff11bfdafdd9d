//! KidsPlay Core - catalog, cart and session logic.
//!
//! This crate holds everything the storefront needs to decide *what* to show:
//! - [`catalog`] - filter and sort the fixed product list
//! - [`cart`] - cart lines, quantities, totals and notifications
//! - [`session`] - the single-writer controller that owns one cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure transformations - no I/O, no
//! HTTP, no templates. Rendering is left to the `storefront` crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod session;
pub mod types;

pub use cart::{CartLine, CartState, Notification, NotificationKind};
pub use catalog::visible_products;
pub use session::{CartIntent, CartUpdate, SessionController, SessionSnapshot};
pub use types::*;
