//! Core types for KidsPlay.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod selection;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::{Discount, DiscountError, Product};
pub use selection::{CatalogSelection, FilterSelection, SortSelection};
