//! Search route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::auth::Identity;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

use super::{RecipeCardView, card_views};

/// Results per page.
const PAGE_SIZE: u32 = 12;

/// Search page query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub diet: String,
    #[serde(default, rename = "type")]
    pub meal_type: String,
    pub page: Option<u32>,
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub user: Option<Identity>,
    pub query: String,
    pub diet: String,
    pub meal_type: String,
    pub recipes: Vec<RecipeCardView>,
    pub total_results: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub has_searched: bool,
    pub sample_notice: bool,
}

/// Full search page with filters and pagination.
#[instrument(skip(state))]
pub async fn search_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<SearchQuery>,
) -> SearchTemplate {
    let q = query.q.trim().to_string();
    let diet = query.diet.trim().to_string();
    let meal_type = query.meal_type.trim().to_string();
    let has_searched = !q.is_empty() || !diet.is_empty() || !meal_type.is_empty();

    if !has_searched {
        return SearchTemplate {
            user,
            query: q,
            diet,
            meal_type,
            recipes: Vec::new(),
            total_results: 0,
            current_page: 1,
            total_pages: 0,
            has_searched,
            sample_notice: false,
        };
    }

    let current_page = query.page.unwrap_or(1).max(1);
    let offset = page_offset(current_page);

    let page = state
        .recipes()
        .search(
            &q,
            filter_param(&diet),
            filter_param(&meal_type),
            PAGE_SIZE,
            offset,
        )
        .await;

    let sample_notice = page.is_sample();
    let page = page.into_data();

    // Fallback results are a single page regardless of the requested offset
    let (current_page, total_pages) = if sample_notice {
        (1, 1)
    } else {
        (current_page, total_pages_for(page.total_results))
    };

    SearchTemplate {
        user,
        query: q,
        diet,
        meal_type,
        recipes: card_views(&page.results, &state),
        total_results: page.total_results,
        current_page,
        total_pages,
        has_searched,
        sample_notice,
    }
}

fn filter_param(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

/// Offset of the first result on `page`.
///
/// The page number comes straight from the query string, so the arithmetic
/// saturates instead of overflowing on absurd values.
fn page_offset(page: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE)
}

#[allow(clippy::cast_possible_truncation)]
fn total_pages_for(total_results: u64) -> u32 {
    total_results.div_ceil(u64::from(PAGE_SIZE)).min(u64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, SpoonacularConfig};
    use secrecy::SecretString;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(2), 12);
        assert_eq!(page_offset(8), 84);
    }

    #[test]
    fn test_page_offset_saturates_on_extreme_pages() {
        assert_eq!(page_offset(0), 0);
        assert_eq!(page_offset(u32::MAX), u32::MAX);
    }

    #[tokio::test]
    async fn test_extreme_page_number_is_served_not_panicked() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            data_dir: dir.path().to_path_buf(),
            spoonacular: SpoonacularConfig {
                // Reserved TEST-NET-1 address; connections fail fast
                base_url: "http://192.0.2.1:9".to_string(),
                api_key: SecretString::from("offline"),
                timeout_secs: 1,
            },
        })
        .unwrap();

        let template = search_page(
            State(state),
            OptionalAuth(None),
            Query(SearchQuery {
                q: "pasta".to_string(),
                diet: String::new(),
                meal_type: String::new(),
                page: Some(u32::MAX),
            }),
        )
        .await;

        // Fallback results collapse to a single page
        assert_eq!(template.current_page, 1);
        assert!(template.sample_notice);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages_for(0), 0);
        assert_eq!(total_pages_for(12), 1);
        assert_eq!(total_pages_for(13), 2);
        assert_eq!(total_pages_for(86), 8);
    }

    #[test]
    fn test_filter_param_empty_is_none() {
        assert_eq!(filter_param(""), None);
        assert_eq!(filter_param("vegetarian"), Some("vegetarian"));
    }
}
