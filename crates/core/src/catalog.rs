//! Catalog view: which products to show, and in what order.

use crate::types::{CatalogSelection, FilterSelection, Product, SortSelection};

/// Produce the ordered list of products to display.
///
/// The filter runs first, then the sort. Sorting compares the base `price`
/// (not the discounted one) and is stable, so ties keep catalog order and
/// [`SortSelection::Default`] leaves the filtered order untouched.
///
/// An empty result is a valid outcome.
#[must_use]
pub fn visible_products(
    products: &[Product],
    filter: FilterSelection,
    sort: SortSelection,
) -> Vec<&Product> {
    let mut visible: Vec<&Product> = products
        .iter()
        .filter(|product| matches_filter(product, filter))
        .collect();

    match sort {
        SortSelection::Default => {}
        SortSelection::PriceAsc => visible.sort_by(|a, b| a.price.cmp(&b.price)),
        SortSelection::PriceDesc => visible.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    visible
}

/// [`visible_products`] for a stored selection.
#[must_use]
pub fn visible_for(products: &[Product], selection: CatalogSelection) -> Vec<&Product> {
    visible_products(products, selection.filter, selection.sort)
}

fn matches_filter(product: &Product, filter: FilterSelection) -> bool {
    match filter {
        FilterSelection::All => true,
        FilterSelection::New => product.is_new(),
        FilterSelection::Sale => product.is_on_sale(),
    }
}
