//! Cache types for recipe API responses.

use crate::spoonacular::types::{RecipeDetail, SearchResponse};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Search(SearchResponse),
    Detail(Box<RecipeDetail>),
}
