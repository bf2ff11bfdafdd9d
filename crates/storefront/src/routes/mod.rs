//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Storefront page (?filter=&sort=)
//! GET  /health                 - Health check
//! GET  /static/*               - Stylesheet and images
//!
//! # Catalog (HTMX fragments)
//! GET  /catalog                - Catalog grid (?filter=all|new|sale&sort=default|price-asc|price-desc)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart drawer contents
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add one unit (product_id)
//! POST /cart/update            - Set quantity (product_id, quantity)
//! POST /cart/remove            - Remove line (product_id)
//! POST /cart/clear             - Empty the cart
//! ```

pub mod cart;
pub mod catalog;
pub mod home;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::{
    create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/catalog", get(catalog::grid))
        .nest("/cart", cart_routes())
}

/// Build the complete application with middleware and state.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", static_dir)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
