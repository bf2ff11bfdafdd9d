//! Session controller: the single owner of one shopper's cart.
//!
//! The controller holds the current [`CartState`] and catalog selection,
//! applies one [`CartIntent`] at a time by replacing the held value, and
//! hands the new cart back together with any notification.

use serde::{Deserialize, Serialize};

use crate::cart::{CartState, Notification};
use crate::catalog;
use crate::types::{CatalogSelection, FilterSelection, Product, ProductId, SortSelection};

/// A shopper action that changes the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartIntent {
    Add(Product),
    SetQuantity { id: ProductId, quantity: i64 },
    Remove(ProductId),
    Clear,
}

/// The result of dispatching an intent.
#[derive(Debug)]
pub struct CartUpdate<'a> {
    /// The cart after the intent was applied.
    pub cart: &'a CartState,
    /// Acknowledgement for the shopper, if the intent produces one.
    pub notification: Option<Notification>,
}

/// Serializable state of a [`SessionController`].
///
/// Hosts that handle each intent in a separate request store this between
/// requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub cart: CartState,
    #[serde(default)]
    pub selection: CatalogSelection,
}

/// Owns the cart and catalog selection for one session.
#[derive(Debug, Clone, Default)]
pub struct SessionController {
    cart: CartState,
    selection: CatalogSelection,
}

impl SessionController {
    /// A fresh session with an empty cart and default selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from a stored snapshot.
    #[must_use]
    pub fn restore(snapshot: SessionSnapshot) -> Self {
        Self {
            cart: snapshot.cart,
            selection: snapshot.selection,
        }
    }

    /// Capture the current state for storage.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cart: self.cart.clone(),
            selection: self.selection,
        }
    }

    /// Current cart.
    #[must_use]
    pub const fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Apply one intent, replacing the held cart.
    pub fn dispatch(&mut self, intent: CartIntent) -> CartUpdate<'_> {
        let current = std::mem::take(&mut self.cart);

        let (next, notification) = match intent {
            CartIntent::Add(product) => {
                let (cart, notification) = current.add_item(&product);
                (cart, Some(notification))
            }
            CartIntent::SetQuantity { id, quantity } => (current.set_quantity(id, quantity), None),
            CartIntent::Remove(id) => {
                let (cart, notification) = current.remove_item(id);
                (cart, Some(notification))
            }
            CartIntent::Clear => {
                let (cart, notification) = current.clear();
                (cart, Some(notification))
            }
        };

        self.cart = next;
        CartUpdate {
            cart: &self.cart,
            notification,
        }
    }

    /// Current catalog selection.
    #[must_use]
    pub const fn selection(&self) -> CatalogSelection {
        self.selection
    }

    /// Store a new `(filter, sort)` pair.
    pub const fn select(&mut self, filter: FilterSelection, sort: SortSelection) {
        self.selection = CatalogSelection { filter, sort };
    }

    /// Products to display under the current selection.
    #[must_use]
    pub fn visible_products<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        catalog::visible_for(products, self.selection)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::NotificationKind;
    use crate::types::product::tests::product;
    use crate::types::{Discount, Price};

    fn catalog() -> Vec<Product> {
        let mut first = product(1, 1000);
        first.is_new = Some(true);
        first.discount = Some(Discount::try_from(10).unwrap());
        vec![first, product(2, 500)]
    }

    #[test]
    fn test_dispatch_replaces_cart_and_reports_notification() {
        let products = catalog();
        let mut session = SessionController::new();

        let update = session.dispatch(CartIntent::Add(products[0].clone()));
        assert_eq!(update.cart.total_items(), 1);
        assert_eq!(
            update.notification.map(|n| n.kind),
            Some(NotificationKind::Added)
        );

        session.dispatch(CartIntent::Add(products[1].clone()));
        let update = session.dispatch(CartIntent::Add(products[0].clone()));
        assert_eq!(
            update.notification.map(|n| n.kind),
            Some(NotificationKind::Updated)
        );
        assert_eq!(session.cart().total_price(), Price::from_whole(2300));
    }

    #[test]
    fn test_set_quantity_has_no_notification() {
        let products = catalog();
        let mut session = SessionController::new();
        session.dispatch(CartIntent::Add(products[1].clone()));

        let update = session.dispatch(CartIntent::SetQuantity {
            id: ProductId::new(2),
            quantity: -3,
        });

        assert!(update.notification.is_none());
        assert_eq!(update.cart.get(ProductId::new(2)).unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_and_clear_notify() {
        let products = catalog();
        let mut session = SessionController::new();
        session.dispatch(CartIntent::Add(products[0].clone()));

        let update = session.dispatch(CartIntent::Remove(ProductId::new(99)));
        assert_eq!(
            update.notification.map(|n| n.kind),
            Some(NotificationKind::Removed)
        );
        assert_eq!(session.cart().len(), 1);

        let update = session.dispatch(CartIntent::Clear);
        assert!(update.cart.is_empty());
        assert_eq!(
            update.notification.map(|n| n.kind),
            Some(NotificationKind::Cleared)
        );
    }

    #[test]
    fn test_selection_drives_visible_products() {
        let products = catalog();
        let mut session = SessionController::new();
        assert_eq!(session.visible_products(&products).len(), 2);

        session.select(FilterSelection::New, SortSelection::Default);
        let visible = session.visible_products(&products);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, ProductId::new(1));
    }

    #[test]
    fn test_snapshot_roundtrip_restores_state() {
        let products = catalog();
        let mut session = SessionController::new();
        session.dispatch(CartIntent::Add(products[0].clone()));
        session.select(FilterSelection::Sale, SortSelection::PriceDesc);

        let json = serde_json::to_value(session.snapshot()).unwrap();
        let restored =
            SessionController::restore(serde_json::from_value::<SessionSnapshot>(json).unwrap());

        assert_eq!(restored.cart(), session.cart());
        assert_eq!(restored.selection(), session.selection());
    }
}
