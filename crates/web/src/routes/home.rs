//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::auth::Identity;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

use super::{RecipeCardView, card_views};

/// Number of featured recipes on the home page.
const FEATURED_COUNT: u32 = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user: Option<Identity>,
    pub recipes: Vec<RecipeCardView>,
    pub featured: Option<RecipeCardView>,
    pub sample_notice: bool,
}

/// Display the home page: a grid of popular recipes and one random
/// featured recipe.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>, OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    let popular = state
        .recipes()
        .search("", None, None, FEATURED_COUNT, 0)
        .await;
    let random = state.recipes().random(1).await;

    let sample_notice = popular.is_sample() || random.is_sample();

    let recipes = card_views(&popular.data().results, &state);
    let featured = random
        .data()
        .first()
        .map(|r| RecipeCardView::from_summary(r, &state));

    HomeTemplate {
        user,
        recipes,
        featured,
        sample_notice,
    }
}
