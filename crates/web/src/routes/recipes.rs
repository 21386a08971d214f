//! Recipe detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use forkful_core::RecipeId;

use crate::auth::Identity;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::spoonacular::types::Ingredient;
use crate::state::AppState;

use super::PLACEHOLDER_IMAGE;

/// An ingredient line ready for display.
pub struct IngredientView {
    pub name: String,
    pub measure: String,
}

impl IngredientView {
    fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            measure: format_measure(ingredient.amount, &ingredient.unit),
        }
    }
}

/// Recipe detail template.
#[derive(Template, WebTemplate)]
#[template(path = "recipe.html")]
pub struct RecipeTemplate {
    pub user: Option<Identity>,
    pub id: i64,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub summary: String,
    pub steps: Vec<String>,
    pub ingredients: Vec<IngredientView>,
    pub is_favorite: bool,
    pub rating: u8,
    pub notes: String,
    pub sample_notice: bool,
}

/// Show one recipe in full.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let id = RecipeId::new(id);
    let detail = state
        .recipes()
        .detail(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("recipe {id}")))?;

    let sample_notice = detail.is_sample();
    let detail = detail.into_data();

    let favorite = state.favorites().get(id);
    let (rating, notes) = favorite.as_ref().map_or((0, String::new()), |f| {
        (f.rating.value(), f.notes.clone())
    });

    Ok(RecipeTemplate {
        user,
        id: id.as_i64(),
        title: detail.title.clone(),
        image: detail
            .image
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        ready_in_minutes: detail.ready_in_minutes,
        servings: detail.servings,
        summary: detail.summary.clone().unwrap_or_default(),
        steps: instruction_steps(detail.instructions.as_deref().unwrap_or_default()),
        ingredients: detail
            .extended_ingredients
            .iter()
            .map(IngredientView::from_ingredient)
            .collect(),
        is_favorite: favorite.is_some(),
        rating,
        notes,
        sample_notice,
    })
}

/// Split an instructions blob into display steps.
///
/// Upstream instructions arrive either as numbered lines or as a single
/// HTML paragraph. Lines are split first; leading step numbers are
/// stripped since the template numbers the list itself.
fn instruction_steps(instructions: &str) -> Vec<String> {
    instructions
        .lines()
        .map(|line| strip_step_number(line.trim()).to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Strip a leading "1." or "1)" step marker.
///
/// A bare digit run is kept: a line like "2 eggs, beaten" is content, not
/// numbering.
fn strip_step_number(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return line;
    }

    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        Some(body) => body.trim_start(),
        None => line,
    }
}

/// Render an amount/unit pair as a compact measure string.
#[allow(clippy::cast_possible_truncation)]
fn format_measure(amount: f64, unit: &str) -> String {
    let amount = if (amount.fract()).abs() < f64::EPSILON {
        format!("{}", amount as i64)
    } else {
        format!("{amount:.2}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    };
    if unit.is_empty() {
        amount
    } else {
        format!("{amount} {unit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_steps_strips_numbering() {
        let steps = instruction_steps("1. Prep ingredients.\n2. Cook properly.\n3. Season and serve!");
        assert_eq!(
            steps,
            vec!["Prep ingredients.", "Cook properly.", "Season and serve!"]
        );
    }

    #[test]
    fn test_instruction_steps_keeps_plain_text() {
        let steps = instruction_steps("Whisk the eggs.\n\nFry gently.");
        assert_eq!(steps, vec!["Whisk the eggs.", "Fry gently."]);
    }

    #[test]
    fn test_instruction_steps_keeps_leading_quantities() {
        let steps = instruction_steps("2 eggs, beaten\n1. Whisk them.\n3) Fry gently.");
        assert_eq!(steps, vec!["2 eggs, beaten", "Whisk them.", "Fry gently."]);
    }

    #[test]
    fn test_instruction_steps_empty() {
        assert!(instruction_steps("").is_empty());
    }

    #[test]
    fn test_format_measure() {
        assert_eq!(format_measure(2.0, "cups"), "2 cups");
        assert_eq!(format_measure(0.5, "tsp"), "0.5 tsp");
        assert_eq!(format_measure(3.0, ""), "3");
        assert_eq!(format_measure(1.25, "lb"), "1.25 lb");
    }
}
