//! Fixed sample recipe dataset.
//!
//! Substituted for remote results whenever the recipe API is unavailable, so
//! the site keeps working without a network or a valid API key. Results from
//! here are structurally identical to remote ones; only the "showing sample
//! data" notice differs.

use std::sync::LazyLock;

use forkful_core::{IngredientId, RecipeId};

use crate::spoonacular::types::{Ingredient, RecipeDetail, RecipeSummary};

/// Placeholder instructions for sample recipes, which ship without any.
pub const PLACEHOLDER_INSTRUCTIONS: &str =
    "1. Prep ingredients.\n2. Cook properly.\n3. Season and serve!";

static SAMPLE_RECIPES: LazyLock<Vec<RecipeSummary>> = LazyLock::new(|| {
    vec![
        summary(
            1,
            "Spicy Thai Basil Chicken",
            "https://images.unsplash.com/photo-1569718212165-3a8278d5f624?w=300",
            20,
            4,
            "A delicious and aromatic Thai dish with fresh basil and spicy chilies.",
        ),
        summary(
            2,
            "Creamy Mushroom Risotto",
            "https://images.unsplash.com/photo-1476124369491-e7addf5db371?w=300",
            35,
            6,
            "Rich and creamy risotto with wild mushrooms and parmesan cheese.",
        ),
        summary(
            3,
            "Grilled Salmon with Herbs",
            "https://images.unsplash.com/photo-1467003909585-2f8a72700288?w=300",
            25,
            2,
            "Fresh Atlantic salmon grilled to perfection with aromatic herbs.",
        ),
        summary(
            4,
            "Classic Caesar Salad",
            "https://images.unsplash.com/photo-1512852939750-1305098529bf?w=300",
            15,
            4,
            "Crisp romaine lettuce with homemade caesar dressing and croutons.",
        ),
        summary(
            5,
            "Chocolate Lava Cake",
            "https://images.unsplash.com/photo-1563805042-7684c019e1cb?w=300",
            30,
            4,
            "Decadent chocolate cake with a molten center, served warm.",
        ),
        summary(
            6,
            "Mediterranean Quinoa Bowl",
            "https://images.unsplash.com/photo-1512058564366-18510be2db19?w=300",
            25,
            3,
            "Healthy quinoa bowl with vegetables, feta cheese, and olive oil.",
        ),
    ]
});

fn summary(
    id: i64,
    title: &str,
    image: &str,
    ready_in_minutes: u32,
    servings: u32,
    summary: &str,
) -> RecipeSummary {
    RecipeSummary {
        id: RecipeId::new(id),
        title: title.to_string(),
        image: Some(image.to_string()),
        ready_in_minutes: Some(ready_in_minutes),
        servings: Some(servings),
        summary: Some(summary.to_string()),
    }
}

/// The full sample recipe list.
#[must_use]
pub fn recipes() -> &'static [RecipeSummary] {
    &SAMPLE_RECIPES
}

/// Look up a sample recipe by id and expand it to a full detail record.
///
/// Sample records carry no instructions or ingredients, so both are
/// synthesized - every recipe ends up with non-empty instructions and
/// ingredients regardless of source.
#[must_use]
pub fn detail(id: RecipeId) -> Option<RecipeDetail> {
    let summary = recipes().iter().find(|r| r.id == id)?;

    Some(RecipeDetail {
        id: summary.id,
        title: summary.title.clone(),
        image: summary.image.clone(),
        ready_in_minutes: summary.ready_in_minutes,
        servings: summary.servings,
        summary: summary.summary.clone(),
        instructions: Some(PLACEHOLDER_INSTRUCTIONS.to_string()),
        extended_ingredients: vec![
            Ingredient {
                id: Some(IngredientId::new(1)),
                name: "Ingredient A".to_string(),
                amount: 2.0,
                unit: "cups".to_string(),
            },
            Ingredient {
                id: Some(IngredientId::new(2)),
                name: "Ingredient B".to_string(),
                amount: 1.0,
                unit: "tbsp".to_string(),
            },
        ],
    })
}
