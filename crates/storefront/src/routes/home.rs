//! Home page route handler.
//!
//! The storefront is a single page: header with the cart drawer, hero,
//! catalog grid, call-to-action and footer. Filter and sort may be passed as
//! query parameters so the page also works without JavaScript.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tower_sessions::Session;
use tracing::instrument;

use crate::config::StoreInfo;
use crate::error::Result;
use crate::filters;
use crate::routes::cart::{CartView, ToastView};
use crate::routes::catalog::{CatalogQuery, CatalogView, select_and_render};
use crate::state::AppState;

// =============================================================================
// Hero Configuration (Static content)
// =============================================================================

/// A selling point shown under the hero headline.
#[derive(Clone)]
pub struct HeroFeature {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

/// Hero banner content.
#[derive(Clone)]
pub struct HeroContent {
    pub title: &'static str,
    /// Second headline line, in the accent colour.
    pub highlight: &'static str,
    pub subtitle: &'static str,
    pub features: Vec<HeroFeature>,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            title: "Детские Площадки",
            highlight: "Мечты!",
            subtitle: "Создаём радость и веселье для ваших детей! \
                       Безопасные, яркие и невероятно интересные игровые комплексы.",
            features: vec![
                HeroFeature {
                    icon: "🛡️",
                    title: "Безопасность",
                    text: "Сертифицированные материалы",
                },
                HeroFeature {
                    icon: "🎨",
                    title: "Яркий дизайн",
                    text: "Красочные и современные",
                },
                HeroFeature {
                    icon: "⚡",
                    title: "Быстрая доставка",
                    text: "По всей России",
                },
            ],
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub hero: HeroContent,
    pub catalog: CatalogView,
    pub catalog_pdf_url: Option<String>,
    pub cart: CartView,
    pub toast: Option<ToastView>,
    pub store: StoreInfo,
}

/// Display the storefront page.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> Result<HomeTemplate> {
    let catalog = select_and_render(&state, &session, &query).await?;
    let controller = state.sessions().current(&session).await?;

    Ok(HomeTemplate {
        hero: HeroContent::default(),
        catalog,
        catalog_pdf_url: state.config().catalog_pdf_url.clone(),
        cart: CartView::from(controller.cart()),
        toast: None,
        store: state.config().store.clone(),
    })
}
