//! Shared newtype wrappers.

mod id;
mod rating;

pub use id::{IngredientId, RecipeId};
pub use rating::Rating;
