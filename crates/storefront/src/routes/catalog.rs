//! Catalog route handlers.
//!
//! The catalog grid is re-rendered as an HTMX fragment whenever the filter
//! or sort control changes. The chosen selection is stored in the session so
//! a full page reload shows the same view.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use kidsplay_core::{
    CatalogSelection, FilterSelection, Product, SessionController, SortSelection,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub description: String,
    pub age_range: String,
    pub is_new: bool,
    /// Percentage shown on the sale badge.
    pub discount_badge: Option<u8>,
    /// Price the shopper pays.
    pub price: String,
    /// Struck-through base price, only when a discount is advertised.
    pub compare_at_price: Option<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let discount_badge = product.badge_discount();
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            image: product.image.clone(),
            description: product.description.clone(),
            age_range: product.age_range.clone(),
            is_new: product.is_new(),
            discount_badge,
            price: product.effective_price().to_string(),
            compare_at_price: discount_badge.map(|_| product.price.to_string()),
        }
    }
}

/// One `<option>` of a select control.
#[derive(Clone)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Catalog grid display data for templates.
#[derive(Clone)]
pub struct CatalogView {
    pub products: Vec<ProductCardView>,
    pub filters: Vec<OptionView>,
    pub sorts: Vec<OptionView>,
}

impl CatalogView {
    /// Build the view for a list of visible products and the selection that
    /// produced it.
    #[must_use]
    pub fn new(products: &[&Product], selection: CatalogSelection) -> Self {
        Self {
            products: products.iter().map(|p| ProductCardView::from(*p)).collect(),
            filters: FilterSelection::ALL
                .into_iter()
                .map(|f| OptionView {
                    value: f.as_str(),
                    label: f.label(),
                    selected: f == selection.filter,
                })
                .collect(),
            sorts: SortSelection::ALL
                .into_iter()
                .map(|s| OptionView {
                    value: s.as_str(),
                    label: s.label(),
                    selected: s == selection.sort,
                })
                .collect(),
        }
    }
}

/// Catalog selection query parameters.
///
/// Missing parameters keep the stored selection; unknown values are
/// rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub filter: Option<FilterSelection>,
    pub sort: Option<SortSelection>,
}

impl CatalogQuery {
    /// Whether the query leaves the stored selection alone.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.filter.is_none() && self.sort.is_none()
    }

    /// Merge the query over a stored selection.
    #[must_use]
    pub fn apply_to(&self, current: CatalogSelection) -> CatalogSelection {
        CatalogSelection {
            filter: self.filter.unwrap_or(current.filter),
            sort: self.sort.unwrap_or(current.sort),
        }
    }
}

/// Catalog grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/catalog_grid.html")]
pub struct CatalogGridTemplate {
    pub catalog: CatalogView,
}

/// Render the catalog grid for the requested selection.
#[instrument(skip(state, session))]
pub async fn grid(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> Result<CatalogGridTemplate> {
    let catalog = select_and_render(&state, &session, &query).await?;
    Ok(CatalogGridTemplate { catalog })
}

/// Apply a catalog query to the session and build the resulting view.
///
/// A session is only started when the query carries a selection.
pub(crate) async fn select_and_render(
    state: &AppState,
    session: &Session,
    query: &CatalogQuery,
) -> Result<CatalogView> {
    let shared = if query.is_empty() {
        state.sessions().existing(session).await?
    } else {
        Some(state.sessions().get_or_create(session).await?)
    };
    let Some(shared) = shared else {
        return Ok(render(state, &SessionController::new()));
    };

    let mut controller = shared.lock().await;
    let current = controller.selection();
    let selection = query.apply_to(current);
    if selection != current {
        controller.select(selection.filter, selection.sort);
        tracing::debug!(
            filter = selection.filter.as_str(),
            sort = selection.sort.as_str(),
            "Catalog selection changed"
        );
    }

    Ok(render(state, &controller))
}

fn render(state: &AppState, controller: &SessionController) -> CatalogView {
    let selection = controller.selection();
    let visible = controller.visible_products(state.catalog());
    if visible.is_empty() {
        tracing::debug!(filter = selection.filter.as_str(), "No products match filter");
    }
    CatalogView::new(&visible, selection)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use kidsplay_core::{Discount, Price, ProductId};

    fn product(id: i32, price: u64, discount: Option<u8>) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Горка {id}"),
            price: Price::from_whole(price),
            image: String::new(),
            description: String::new(),
            age_range: "3-7 лет".to_string(),
            is_new: None,
            discount: discount.map(|d| Discount::try_from(d).unwrap()),
        }
    }

    #[test]
    fn test_card_shows_discounted_and_base_price() {
        let card = ProductCardView::from(&product(1, 45_000, Some(15)));
        assert_eq!(card.price, "38\u{a0}250\u{a0}₽");
        assert_eq!(card.compare_at_price.as_deref(), Some("45\u{a0}000\u{a0}₽"));
        assert_eq!(card.discount_badge, Some(15));
    }

    #[test]
    fn test_card_without_discount_has_no_compare_price() {
        let card = ProductCardView::from(&product(2, 500, None));
        assert_eq!(card.price, "500\u{a0}₽");
        assert!(card.compare_at_price.is_none());
        assert!(!card.is_new);
    }

    #[test]
    fn test_card_with_zero_discount_has_no_badge() {
        let card = ProductCardView::from(&product(3, 500, Some(0)));
        assert!(card.discount_badge.is_none());
        assert!(card.compare_at_price.is_none());
    }

    #[test]
    fn test_query_merges_over_stored_selection() {
        let stored = CatalogSelection {
            filter: FilterSelection::Sale,
            sort: SortSelection::PriceAsc,
        };
        let query = CatalogQuery {
            filter: None,
            sort: Some(SortSelection::PriceDesc),
        };
        let merged = query.apply_to(stored);
        assert_eq!(merged.filter, FilterSelection::Sale);
        assert_eq!(merged.sort, SortSelection::PriceDesc);
        assert_eq!(CatalogQuery::default().apply_to(stored), stored);
        assert!(CatalogQuery::default().is_empty());
        assert!(!query.is_empty());
    }

    #[test]
    fn test_catalog_view_marks_selected_options() {
        let selection = CatalogSelection {
            filter: FilterSelection::New,
            sort: SortSelection::Default,
        };
        let view = CatalogView::new(&[], selection);
        let selected: Vec<_> = view
            .filters
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, vec!["new"]);
        assert!(view.sorts.iter().any(|o| o.selected && o.value == "default"));
        assert!(view.products.is_empty());
    }
}
