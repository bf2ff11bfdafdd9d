//! Integration tests for HTTP plumbing: health, static assets, headers and
//! page chrome.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use kidsplay_integration_tests::{TestClient, test_app, test_app_with};
use tower::ServiceExt;

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/static/css/main.css").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.header("content-type").is_some_and(|v| v.starts_with("text/css")));
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let mut client = TestClient::new(test_app());

    for uri in ["/", "/health", "/cart/count", "/static/css/main.css"] {
        let resp = client.get(uri).await;
        assert_eq!(resp.header("x-frame-options"), Some("DENY"), "{uri}");
        assert_eq!(resp.header("x-content-type-options"), Some("nosniff"), "{uri}");
        assert!(
            resp.header("content-security-policy")
                .is_some_and(|csp| csp.contains("https://unpkg.com")),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn test_request_id_is_generated_or_echoed() {
    let app = test_app();

    let resp = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let generated = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("request id header");
    assert_eq!(generated.len(), 36);

    let resp = app
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "upstream-123")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(
        resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("upstream-123")
    );
}

#[tokio::test]
async fn test_session_cookie_flags() {
    let mut client = TestClient::new(test_app());

    let resp = client.post_form("/cart/add", "product_id=1").await;
    let cookie = resp.header("set-cookie").expect("session cookie");
    assert!(cookie.starts_with("kp_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.contains("Secure"));
    // Idle sessions expire instead of living until the browser closes
    assert!(cookie.contains("Max-Age=") || cookie.contains("Expires="));
}

#[tokio::test]
async fn test_secure_cookie_behind_https_base_url() {
    let app = test_app_with(|key| {
        (key == "STOREFRONT_BASE_URL").then(|| "https://kidsplay.example".to_string())
    });
    let mut client = TestClient::new(app);

    let resp = client.post_form("/cart/add", "product_id=1").await;
    let cookie = resp.header("set-cookie").expect("session cookie");
    assert!(cookie.contains("Secure"));
}

// ============================================================================
// Page Chrome
// ============================================================================

#[tokio::test]
async fn test_home_page_shows_store_contacts() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("КидсПлей"));
    assert!(resp.body.contains(r#"href="tel:89185636222""#));
    assert!(resp.body.contains("info@kidsplay.ru"));
    assert!(resp.body.contains("Детские Площадки"));
    assert!(resp.body.contains("Все права защищены"));
    assert!(!resp.body.contains("Скачать полный каталог"));
}

#[tokio::test]
async fn test_page_fits_content_security_policy() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/").await;
    let csp = resp.header("content-security-policy").expect("csp header");
    assert!(csp.contains("style-src 'self'"));
    // htmx must not inject its inline indicator stylesheet
    assert!(resp.body.contains(r#""includeIndicatorStyles": false"#));
    assert!(!resp.body.contains("<style"));
    assert!(!resp.body.contains(" style=\""));
}

#[tokio::test]
async fn test_store_settings_come_from_configuration() {
    let app = test_app_with(|key| match key {
        "STORE_NAME" => Some("Весёлый Двор".to_string()),
        "STOREFRONT_CATALOG_PDF_URL" => Some("https://cdn.poehali.dev/catalog.pdf".to_string()),
        _ => None,
    });
    let mut client = TestClient::new(app);

    let resp = client.get("/").await;
    assert!(resp.body.contains("Весёлый Двор"));
    assert!(resp.body.contains("Скачать полный каталог"));
    assert!(resp.body.contains("https://cdn.poehali.dev/catalog.pdf"));
}
