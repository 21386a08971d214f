//! Favorites route handlers.
//!
//! Every handler here requires an authenticated session via the
//! [`RequireAuth`] extractor.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use forkful_core::{Rating, RecipeId};

use crate::auth::Identity;
use crate::error::{AppError, Result};
use crate::favorites::{FavoriteRecipe, FavoriteSort, filter_favorites, sort_favorites};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::PLACEHOLDER_IMAGE;

/// Favorites page query parameters.
#[derive(Debug, Deserialize)]
pub struct FavoritesQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub min_rating: u8,
    #[serde(default)]
    pub sort: String,
}

/// A saved recipe ready for display.
pub struct FavoriteView {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub rating: u8,
    pub stars: String,
    pub notes: String,
    pub date_added: String,
}

impl FavoriteView {
    fn from_favorite(favorite: &FavoriteRecipe) -> Self {
        Self {
            id: favorite.id.as_i64(),
            title: favorite.title.clone(),
            image: favorite
                .image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            ready_in_minutes: favorite.ready_in_minutes,
            servings: favorite.servings,
            rating: favorite.rating.value(),
            stars: "\u{2605}".repeat(usize::from(favorite.rating.value())),
            notes: favorite.notes.clone(),
            date_added: favorite.date_added.format("%b %-d, %Y").to_string(),
        }
    }
}

/// Favorites page template.
#[derive(Template, WebTemplate)]
#[template(path = "favorites.html")]
pub struct FavoritesTemplate {
    pub user: Option<Identity>,
    pub favorites: Vec<FavoriteView>,
    pub total_count: usize,
    pub average_rating: String,
    pub notes_count: usize,
    pub query: String,
    pub min_rating: u8,
    pub sort: &'static str,
}

/// Mean rating over rated entries, one decimal. Empty when nothing is rated.
fn average_rating(favorites: &[FavoriteRecipe]) -> String {
    let rated: Vec<u8> = favorites
        .iter()
        .filter(|f| f.rating.is_rated())
        .map(|f| f.rating.value())
        .collect();

    if rated.is_empty() {
        return String::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = f64::from(rated.iter().map(|r| u32::from(*r)).sum::<u32>()) / rated.len() as f64;
    format!("{mean:.1}")
}

/// List the current user's favorites with filtering and sorting.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<FavoritesQuery>,
) -> impl IntoResponse {
    let all = state.favorites().all();
    let total_count = all.len();
    let average_rating = average_rating(&all);
    let notes_count = all.iter().filter(|f| !f.notes.is_empty()).count();

    let sort = FavoriteSort::from_param(&query.sort);
    let min_rating = Rating::new(query.min_rating);

    let mut shown = filter_favorites(&all, query.q.trim(), min_rating);
    sort_favorites(&mut shown, sort);

    FavoritesTemplate {
        user: Some(user),
        favorites: shown.iter().map(FavoriteView::from_favorite).collect(),
        total_count,
        average_rating,
        notes_count,
        query: query.q,
        min_rating: min_rating.value(),
        sort: sort.as_param(),
    }
}

/// Add form: the recipe to save.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub id: i64,
}

/// Save a recipe to favorites.
///
/// The full detail is fetched again so the stored snapshot carries
/// instructions and ingredients, not just the card data.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<AddForm>,
) -> Result<Redirect> {
    let id = RecipeId::new(form.id);
    let detail = state
        .recipes()
        .detail(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("recipe {id}")))?;
    let detail = detail.into_data();

    state
        .favorites()
        .add(detail.summary_view(), detail.extended_ingredients);

    Ok(Redirect::to(&format!("/recipes/{}", form.id)))
}

/// Shared form for actions that redirect back to a caller-chosen page.
#[derive(Debug, Deserialize)]
pub struct ReturnTo {
    #[serde(default)]
    pub next: Option<String>,
}

/// Remove a recipe from favorites.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<ReturnTo>,
) -> Redirect {
    state.favorites().remove(RecipeId::new(id));
    redirect_back(form.next.as_deref(), "/favorites")
}

/// Rating form field.
#[derive(Debug, Deserialize)]
pub struct RatingForm {
    pub rating: u8,
    #[serde(default)]
    pub next: Option<String>,
}

/// Set the star rating on a favorite.
#[instrument(skip(state))]
pub async fn update_rating(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<RatingForm>,
) -> Redirect {
    state
        .favorites()
        .update_rating(RecipeId::new(id), Rating::new(form.rating));
    redirect_back(form.next.as_deref(), "/favorites")
}

/// Notes form field.
#[derive(Debug, Deserialize)]
pub struct NotesForm {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// Replace the notes on a favorite.
#[instrument(skip(state, form))]
pub async fn update_notes(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<NotesForm>,
) -> Redirect {
    state
        .favorites()
        .update_notes(RecipeId::new(id), form.notes.trim());
    redirect_back(form.next.as_deref(), "/favorites")
}

/// Redirect to a same-site `next` target, or the fallback.
fn redirect_back(next: Option<&str>, fallback: &str) -> Redirect {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => Redirect::to(path),
        _ => Redirect::to(fallback),
    }
}
