//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Each intent re-renders the cart drawer, fires a `cart-updated` event so
//! the header badge refreshes, and attaches the toast for that intent as an
//! out-of-band swap. The toast only exists on that one response.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use kidsplay_core::{CartIntent, CartState, Notification, NotificationKind, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::config::StoreInfo;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    /// Effective unit price.
    pub price: String,
    pub line_price: String,
    /// Quantity the minus button submits.
    pub decrement_to: u32,
    /// Quantity the plus button submits.
    pub increment_to: u32,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Russian plural form of "item" for the current count.
    #[must_use]
    pub fn item_count_label(&self) -> &'static str {
        let n = self.item_count;
        match (n % 10, n % 100) {
            (1, rem) if rem != 11 => "товар",
            (2..=4, rem) if !matches!(rem, 12..=14) => "товара",
            _ => "товаров",
        }
    }
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemView {
                    id: line.id().as_i32(),
                    name: line.product.name.clone(),
                    image: line.product.image.clone(),
                    quantity: line.quantity,
                    price: line.effective_price().to_string(),
                    line_price: line.line_total().to_string(),
                    decrement_to: line.quantity.saturating_sub(1).max(1),
                    increment_to: line.quantity.saturating_add(1),
                })
                .collect(),
            subtotal: cart.total_price().to_string(),
            item_count: cart.total_items(),
        }
    }
}

/// Transient acknowledgement shown after a cart intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastView {
    pub title: &'static str,
    pub description: String,
    /// Rendered in the warning style.
    pub destructive: bool,
}

impl From<&Notification> for ToastView {
    fn from(notification: &Notification) -> Self {
        let name = notification.product_name.as_deref().unwrap_or("Товар");
        match notification.kind {
            NotificationKind::Added => Self {
                title: "Добавлено в корзину!",
                description: format!("{name} добавлен в вашу корзину."),
                destructive: false,
            },
            NotificationKind::Updated => Self {
                title: "Количество обновлено!",
                description: format!("{name} уже в корзине. Увеличили количество."),
                destructive: false,
            },
            NotificationKind::Removed => Self {
                title: "Удалено из корзины",
                description: "Товар удален из вашей корзины.".to_string(),
                destructive: true,
            },
            NotificationKind::Cleared => Self {
                title: "Корзина очищена",
                description: "Все товары удалены из корзины.".to_string(),
                destructive: false,
            },
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart drawer fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_drawer.html")]
pub struct CartDrawerTemplate {
    pub cart: CartView,
    pub toast: Option<ToastView>,
    pub store: StoreInfo,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Display the cart drawer contents.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartDrawerTemplate> {
    let controller = state.sessions().current(&session).await?;
    Ok(CartDrawerTemplate {
        cart: CartView::from(controller.cart()),
        toast: None,
        store: state.config().store.clone(),
    })
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<CartCountTemplate> {
    let controller = state.sessions().current(&session).await?;
    Ok(CartCountTemplate {
        count: controller.cart().total_items(),
    })
}

/// Add one unit of a catalog product (HTMX).
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .product(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?
        .clone();

    let id = form.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));

    apply(&state, &session, CartIntent::Add(product)).await
}

/// Update cart line quantity (HTMX).
///
/// Quantities below 1 are stored as 1. Unknown ids leave the cart unchanged.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    apply(
        &state,
        &session,
        CartIntent::SetQuantity {
            id: form.product_id,
            quantity: form.quantity,
        },
    )
    .await
}

/// Remove a cart line (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = form.product_id.to_string();
    add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));

    apply(&state, &session, CartIntent::Remove(form.product_id)).await
}

/// Empty the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Response> {
    add_breadcrumb("cart", "Cleared cart", None);

    apply(&state, &session, CartIntent::Clear).await
}

/// Dispatch one intent against the session's cart and render the result.
///
/// The session's controller stays locked from dispatch until the views are
/// built, so parallel intents from one browser apply in turn.
async fn apply(state: &AppState, session: &Session, intent: CartIntent) -> Result<Response> {
    let shared = state.sessions().get_or_create(session).await?;
    let mut controller = shared.lock().await;

    if let CartIntent::SetQuantity { id, .. } = &intent {
        if !controller.cart().contains(*id) {
            tracing::debug!(product_id = %id, "Quantity update for product not in cart");
        }
    }

    let update = controller.dispatch(intent);
    let toast = update.notification.as_ref().map(ToastView::from);
    let cart = CartView::from(update.cart);
    drop(controller);

    tracing::info!(
        items = cart.item_count,
        lines = cart.items.len(),
        "Cart updated"
    );

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartDrawerTemplate {
            cart,
            toast,
            store: state.config().store.clone(),
        },
    )
        .into_response())
}
