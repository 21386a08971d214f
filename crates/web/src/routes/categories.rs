//! Category browsing route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::auth::Identity;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

use super::{RecipeCardView, card_views};

/// Recipes fetched per category page.
const CATEGORY_PAGE_SIZE: u32 = 12;

/// A browsable recipe category.
///
/// Each category maps to a fixed diet or meal-type filter on the
/// upstream search API.
pub struct Category {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// `diet` search filter, if the category is diet-based.
    pub diet: Option<&'static str>,
    /// `type` search filter, if the category is meal-based.
    pub meal_type: Option<&'static str>,
}

/// The fixed category catalogue.
pub const CATEGORIES: &[Category] = &[
    Category {
        slug: "vegetarian",
        name: "Vegetarian",
        description: "Meat-free dishes full of flavor",
        diet: Some("vegetarian"),
        meal_type: None,
    },
    Category {
        slug: "vegan",
        name: "Vegan",
        description: "Entirely plant-based recipes",
        diet: Some("vegan"),
        meal_type: None,
    },
    Category {
        slug: "breakfast",
        name: "Breakfast",
        description: "Start the day right",
        diet: None,
        meal_type: Some("breakfast"),
    },
    Category {
        slug: "lunch",
        name: "Lunch",
        description: "Quick and satisfying midday meals",
        diet: None,
        meal_type: Some("main course"),
    },
    Category {
        slug: "dinner",
        name: "Dinner",
        description: "Hearty mains for the evening",
        diet: None,
        meal_type: Some("main course"),
    },
    Category {
        slug: "dessert",
        name: "Dessert",
        description: "Sweet treats and baked goods",
        diet: None,
        meal_type: Some("dessert"),
    },
    Category {
        slug: "keto",
        name: "Keto",
        description: "Low-carb, high-fat recipes",
        diet: Some("ketogenic"),
        meal_type: None,
    },
    Category {
        slug: "gluten-free",
        name: "Gluten Free",
        description: "Recipes without gluten",
        diet: Some("gluten free"),
        meal_type: None,
    },
];

/// Look up a category by its URL slug.
#[must_use]
pub fn find_category(slug: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.slug == slug)
}

/// Category listing template.
#[derive(Template, WebTemplate)]
#[template(path = "categories.html")]
pub struct CategoriesTemplate {
    pub user: Option<Identity>,
    pub categories: &'static [Category],
}

/// Single category template.
#[derive(Template, WebTemplate)]
#[template(path = "category.html")]
pub struct CategoryTemplate {
    pub user: Option<Identity>,
    pub name: String,
    pub description: String,
    pub recipes: Vec<RecipeCardView>,
    pub sample_notice: bool,
}

/// List all categories.
#[instrument]
pub async fn index(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    CategoriesTemplate {
        user,
        categories: CATEGORIES,
    }
}

/// Show the recipes in one category.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let category =
        find_category(&slug).ok_or_else(|| AppError::NotFound(format!("category {slug}")))?;

    let page = state
        .recipes()
        .by_category(category.diet, category.meal_type, CATEGORY_PAGE_SIZE)
        .await;
    let sample_notice = page.is_sample();
    let page = page.into_data();

    Ok(CategoryTemplate {
        user,
        name: category.name.to_string(),
        description: category.description.to_string(),
        recipes: card_views(&page.results, &state),
        sample_notice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_filter() {
        for category in CATEGORIES {
            assert!(
                category.diet.is_some() || category.meal_type.is_some(),
                "category {} has no search filter",
                category.slug
            );
        }
    }

    #[test]
    fn test_find_category() {
        assert_eq!(find_category("keto").map(|c| c.diet), Some(Some("ketogenic")));
        assert_eq!(
            find_category("gluten-free").map(|c| c.diet),
            Some(Some("gluten free"))
        );
        assert!(find_category("unknown").is_none());
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<_> = CATEGORIES.iter().map(|c| c.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), CATEGORIES.len());
    }
}
