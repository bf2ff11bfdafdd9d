//! Integration tests for catalog filtering and sorting.

use axum::http::StatusCode;
use kidsplay_core::{FilterSelection, SortSelection, visible_products};
use kidsplay_integration_tests::{TestClient, rub, test_app};
use kidsplay_storefront::catalog;

/// Product names in the order they first appear in `body`.
fn rendered_order(body: &str) -> Vec<String> {
    let products = catalog::load(None).expect("bundled catalog parses");
    let mut found: Vec<(usize, String)> = products
        .iter()
        .filter_map(|p| body.find(&p.name).map(|pos| (pos, p.name.clone())))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, name)| name).collect()
}

fn expected_order(filter: FilterSelection, sort: SortSelection) -> Vec<String> {
    let products = catalog::load(None).expect("bundled catalog parses");
    visible_products(&products, filter, sort)
        .into_iter()
        .map(|p| p.name.clone())
        .collect()
}

// ============================================================================
// Selection
// ============================================================================

#[tokio::test]
async fn test_default_view_lists_whole_catalog_in_order() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/catalog").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        rendered_order(&resp.body),
        expected_order(FilterSelection::All, SortSelection::Default)
    );
    assert_eq!(rendered_order(&resp.body).len(), 6);
}

#[tokio::test]
async fn test_every_selection_matches_core_ordering() {
    for filter in FilterSelection::ALL {
        for sort in SortSelection::ALL {
            let mut client = TestClient::new(test_app());
            let uri = format!("/catalog?filter={}&sort={}", filter.as_str(), sort.as_str());

            let resp = client.get(&uri).await;
            assert_eq!(resp.status, StatusCode::OK, "{uri}");
            assert_eq!(
                rendered_order(&resp.body),
                expected_order(filter, sort),
                "{uri}"
            );
        }
    }
}

#[tokio::test]
async fn test_new_filter_with_price_sort() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/catalog?filter=new&sort=price-asc").await;
    assert_eq!(
        rendered_order(&resp.body),
        vec!["Песочница «Кораблик»", "Игровой комплекс «Замок»"]
    );
}

#[tokio::test]
async fn test_selection_is_remembered_for_the_session() {
    let mut client = TestClient::new(test_app());

    client.get("/catalog?filter=sale").await;

    // Sort changes alone keep the stored filter
    let resp = client.get("/catalog?sort=price-desc").await;
    assert_eq!(
        rendered_order(&resp.body),
        expected_order(FilterSelection::Sale, SortSelection::PriceDesc)
    );

    let resp = client.get("/").await;
    assert!(resp.body.contains(r#"<option value="sale" selected>"#));
    assert!(resp.body.contains(r#"<option value="price-desc" selected>"#));
    assert!(!resp.body.contains("Качели «Гнездо»"));
}

#[tokio::test]
async fn test_unknown_selection_is_bad_request() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/catalog?filter=cheap").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = client.get("/?sort=random").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Product Cards
// ============================================================================

#[tokio::test]
async fn test_cards_show_badges_and_prices() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/catalog").await;
    assert!(resp.body.contains("НОВИНКА"));
    assert!(resp.body.contains("-10%"));
    assert!(resp.body.contains("-15%"));
    assert!(resp.body.contains("-20%"));
    assert!(resp.body.contains(&rub("166 500")));
    assert!(resp.body.contains(&format!(
        r#"<s class="compare-price">{}</s>"#,
        rub("185 000")
    )));
    assert!(resp.body.contains("3-12 лет"));
    assert!(resp.body.contains(r#"hx-post="/cart/add""#));
}
