//! Catalog product records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Price, ProductId};

/// Discount percentages must stay below this bound.
const MAX_DISCOUNT_EXCLUSIVE: u8 = 100;

/// Errors from constructing a [`Discount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    #[error("discount must be below {MAX_DISCOUNT_EXCLUSIVE}%, got {0}%")]
    OutOfRange(u8),
}

/// A whole-number percentage discount in `[0, 100)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Discount(u8);

impl Discount {
    /// Get the percentage value.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Factor to multiply a base price by: `(100 - percent) / 100`.
    #[must_use]
    pub fn multiplier(self) -> Decimal {
        Decimal::from(MAX_DISCOUNT_EXCLUSIVE - self.0) / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<u8> for Discount {
    type Error = DiscountError;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        if percent >= MAX_DISCOUNT_EXCLUSIVE {
            return Err(DiscountError::OutOfRange(percent));
        }
        Ok(Self(percent))
    }
}

impl From<Discount> for u8 {
    fn from(discount: Discount) -> Self {
        discount.0
    }
}

/// An immutable catalog record supplied at session start.
///
/// Field names serialize in camelCase (`ageRange`, `isNew`) so a catalog can
/// be written by hand as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Base price before any discount, written as a whole number of units.
    #[serde(with = "whole_units")]
    pub price: Price,
    /// Opaque reference to a display asset.
    pub image: String,
    pub description: String,
    pub age_range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
}

impl Product {
    /// Price after applying the discount, if any.
    ///
    /// Catalog cards and cart lines both go through this method so the two
    /// can never disagree.
    #[must_use]
    pub fn effective_price(&self) -> Price {
        self.discount
            .map_or(self.price, |discount| self.price.scaled(discount.multiplier()))
    }

    /// Whether the product is flagged as new.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.is_new.unwrap_or(false)
    }

    /// Whether a discount is defined, including a zero discount.
    #[must_use]
    pub const fn is_on_sale(&self) -> bool {
        self.discount.is_some()
    }

    /// The discount percentage worth advertising, i.e. a non-zero one.
    #[must_use]
    pub fn badge_discount(&self) -> Option<u8> {
        self.discount.map(Discount::percent).filter(|&pct| pct > 0)
    }
}

/// Serde adapter storing a base price as a positive whole number.
mod whole_units {
    use rust_decimal::prelude::ToPrimitive;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::Price;

    pub fn serialize<S: Serializer>(price: &Price, serializer: S) -> Result<S::Ok, S::Error> {
        let units = price
            .amount
            .to_u64()
            .filter(|_| price.amount.fract().is_zero())
            .ok_or_else(|| S::Error::custom("base price must be a whole amount"))?;
        serializer.serialize_u64(units)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Price, D::Error> {
        let units = u64::deserialize(deserializer)?;
        if units == 0 {
            return Err(D::Error::custom("price must be positive"));
        }
        Ok(Price::from_whole(units))
    }
}
