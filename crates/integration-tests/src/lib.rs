//! Integration tests for the KidsPlay storefront.
//!
//! The full router, middleware included, is driven in-process with
//! `tower::ServiceExt::oneshot`, so no running server is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kidsplay-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart drawer flow across requests
//! - `storefront_catalog` - Filter and sort over the bundled catalog
//! - `storefront_http` - Health, static assets and response headers

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use kidsplay_storefront::{
    catalog, config::StorefrontConfig, middleware::session::SESSION_COOKIE_NAME, routes,
    state::AppState,
};
use tower::ServiceExt;

/// Static assets of the storefront crate, independent of the test's working directory.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static");

/// Build the storefront app over the bundled catalog with default settings.
#[must_use]
pub fn test_app() -> Router {
    test_app_with(|_| None)
}

/// Build the storefront app with extra configuration variables.
#[must_use]
pub fn test_app_with(lookup: impl Fn(&str) -> Option<String>) -> Router {
    let config = StorefrontConfig::from_lookup(|key| match key {
        "STOREFRONT_STATIC_DIR" => Some(STATIC_DIR.to_string()),
        _ => lookup(key),
    })
    .expect("valid test configuration");
    let catalog = catalog::load(None).expect("bundled catalog parses");

    routes::app(AppState::new(config, catalog))
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Header value as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A browser stand-in that keeps the session cookie between requests.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// A second handle on the same app and session, for parallel requests.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: self.cookie.clone(),
        }
    }

    /// Whether the server has issued a session cookie yet.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty());
        self.send(request.expect("valid request")).await
    }

    /// POST an urlencoded form, e.g. `product_id=1&quantity=3`.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()));
        self.send(request.expect("valid request")).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let session_cookie = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
            .map(String::from);
        if let Some(cookie) = session_cookie {
            self.cookie = Some(cookie);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Format whole roubles the way prices appear on the page.
#[must_use]
pub fn rub(amount: &str) -> String {
    format!("{}\u{a0}₽", amount.replace(' ', "\u{a0}"))
}
