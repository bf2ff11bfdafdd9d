//! Cart model: lines, quantities, totals.
//!
//! Every mutating operation consumes the current [`CartState`] and returns
//! the replacement, so a half-applied update can never be observed. The
//! operations that acknowledge the shopper also return a [`Notification`]
//! for the display layer; it is not part of the state.
//!
//! # Invariants
//!
//! - At most one line per product id.
//! - Every quantity is at least 1.
//! - Lines stay in the order they were first added.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// Smallest quantity a line can hold.
const MIN_QUANTITY: u32 = 1;

/// One product in the cart plus how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Product id of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price after discount.
    #[must_use]
    pub fn effective_price(&self) -> Price {
        self.product.effective_price()
    }

    /// Effective unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.effective_price().times(self.quantity)
    }
}

/// What kind of acknowledgement to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Added,
    Updated,
    Removed,
    Cleared,
}

/// A transient acknowledgement emitted alongside a cart change.
///
/// Delivery is fire-and-forget; dropping one never affects the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

impl Notification {
    fn new(kind: NotificationKind, product_name: Option<&str>) -> Self {
        Self {
            kind,
            product_name: product_name.map(str::to_owned),
        }
    }
}

/// The ordered cart lines for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == id)
    }

    /// Add one unit of `product`.
    ///
    /// An existing line is bumped in place and reported as
    /// [`NotificationKind::Updated`]; otherwise a new line with quantity 1 is
    /// appended and reported as [`NotificationKind::Added`].
    #[must_use]
    pub fn add_item(mut self, product: &Product) -> (Self, Notification) {
        let kind = if let Some(line) = self.get_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            NotificationKind::Updated
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: MIN_QUANTITY,
            });
            NotificationKind::Added
        };

        let notification = Notification::new(kind, Some(&product.name));
        (self, notification)
    }

    /// Replace a line's quantity with `max(1, quantity)`.
    ///
    /// Unknown ids are ignored.
    #[must_use]
    pub fn set_quantity(mut self, id: ProductId, quantity: i64) -> Self {
        if let Some(line) = self.get_mut(id) {
            line.quantity = clamp_quantity(quantity);
        }
        self
    }

    /// Delete the line for `id` if present.
    ///
    /// The notification is emitted whether or not the line existed; it names
    /// the product only when there was one to remove.
    #[must_use]
    pub fn remove_item(mut self, id: ProductId) -> (Self, Notification) {
        let removed = self
            .lines
            .iter()
            .position(|line| line.id() == id)
            .map(|index| self.lines.remove(index));

        let notification = Notification::new(
            NotificationKind::Removed,
            removed.as_ref().map(|line| line.product.name.as_str()),
        );
        (self, notification)
    }

    /// Drop every line.
    #[must_use]
    pub fn clear(self) -> (Self, Notification) {
        (Self::new(), Notification::new(NotificationKind::Cleared, None))
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of effective price times quantity over all lines.
    ///
    /// Nothing is rounded here; see [`Price`]'s `Display` for that.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(i64::from(MIN_QUANTITY))).unwrap_or(u32::MAX)
}
