//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page (featured + random recipe)
//! GET  /health                  - Health check
//!
//! # Discovery
//! GET  /search                  - Recipe search with filters and pagination
//! GET  /categories              - Category listing
//! GET  /categories/{slug}       - Recipes in a category
//! GET  /recipes/{id}            - Recipe detail
//!
//! # Auth
//! GET  /login                   - Login page
//! POST /login                   - Login action
//! POST /logout                  - Logout action
//!
//! # Favorites (require auth)
//! GET  /favorites               - Favorites list with filter/sort
//! POST /favorites/add           - Add a recipe to favorites
//! POST /favorites/{id}/remove   - Remove from favorites
//! POST /favorites/{id}/rating   - Update rating
//! POST /favorites/{id}/notes    - Update notes
//! ```

pub mod auth;
pub mod categories;
pub mod favorites;
pub mod home;
pub mod recipes;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::spoonacular::types::RecipeSummary;
use crate::state::AppState;

/// Fallback image shown when a recipe has none.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x300";

/// Recipe card display data for templates.
#[derive(Clone)]
pub struct RecipeCardView {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub summary_text: String,
    pub is_favorite: bool,
}

impl RecipeCardView {
    /// Build a card from a recipe summary, marking favorites.
    #[must_use]
    pub fn from_summary(summary: &RecipeSummary, state: &AppState) -> Self {
        Self {
            id: summary.id.as_i64(),
            title: summary.title.clone(),
            image: summary
                .image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            ready_in_minutes: summary.ready_in_minutes,
            servings: summary.servings,
            summary_text: summary.summary.clone().unwrap_or_default(),
            is_favorite: state.favorites().is_favorite(summary.id),
        }
    }
}

/// Build cards for a list of summaries.
#[must_use]
pub fn card_views(summaries: &[RecipeSummary], state: &AppState) -> Vec<RecipeCardView> {
    summaries
        .iter()
        .map(|s| RecipeCardView::from_summary(s, state))
        .collect()
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the favorites routes router.
pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::index))
        .route("/add", post(favorites::add))
        .route("/{id}/remove", post(favorites::remove))
        .route("/{id}/rating", post(favorites::update_rating))
        .route("/{id}/notes", post(favorites::update_notes))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Discovery
        .route("/search", get(search::search_page))
        .route("/categories", get(categories::index))
        .route("/categories/{slug}", get(categories::show))
        .route("/recipes/{id}", get(recipes::show))
        // Favorites
        .nest("/favorites", favorites_routes())
        // Auth
        .merge(auth_routes())
}
