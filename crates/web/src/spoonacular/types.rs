//! Domain types for the recipe API.
//!
//! Field names map to the camelCase wire format; the same types are reused
//! for the local sample dataset so fallback results are structurally
//! indistinguishable from remote ones.

use serde::{Deserialize, Serialize};

use forkful_core::{IngredientId, RecipeId};

/// A recipe as returned by search, category, and random listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    /// Stable identifier from the recipe source.
    pub id: RecipeId,
    pub title: String,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    /// Short description; may contain HTML markup.
    #[serde(default)]
    pub summary: Option<String>,
}

/// A single recipe ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<IngredientId>,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
}

/// Full recipe detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    /// May contain HTML markup.
    #[serde(default)]
    pub summary: Option<String>,
    /// Preparation steps; HTML or plain text.
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<Ingredient>,
}

impl RecipeDetail {
    /// The listing-shaped view of this recipe.
    #[must_use]
    pub fn summary_view(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            title: self.title.clone(),
            image: self.image.clone(),
            ready_in_minutes: self.ready_in_minutes,
            servings: self.servings,
            summary: self.summary.clone(),
        }
    }
}

/// Response shape of the `complexSearch` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<RecipeSummary>,
    #[serde(default)]
    pub total_results: u64,
}

/// Response shape of the `random` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomResponse {
    #[serde(default)]
    pub recipes: Vec<RecipeSummary>,
}
