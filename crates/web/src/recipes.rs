//! Fallback-driven recipe fetching.
//!
//! Every read operation follows the same two-step policy: attempt the remote
//! call, and on any failure substitute the fixed sample dataset with the same
//! query semantics applied locally. The branch taken is explicit in the
//! [`Sourced`] result rather than hidden in error interception, so handlers
//! can render a passive "showing sample data" notice without ever surfacing
//! the remote error as a failure.

use rand::seq::SliceRandom;

use forkful_core::RecipeId;

use crate::sample;
use crate::spoonacular::types::{RecipeDetail, RecipeSummary};
use crate::spoonacular::{RecipeApiClient, SearchParams, SpoonacularError};

/// A result that records where its data came from.
#[derive(Debug)]
pub enum Sourced<T> {
    /// Data from the remote recipe API.
    Remote(T),
    /// Sample data substituted after a remote failure.
    Sample(T, SpoonacularError),
}

impl<T> Sourced<T> {
    /// Borrow the data regardless of source.
    pub const fn data(&self) -> &T {
        match self {
            Self::Remote(data) | Self::Sample(data, _) => data,
        }
    }

    /// Take the data regardless of source.
    pub fn into_data(self) -> T {
        match self {
            Self::Remote(data) | Self::Sample(data, _) => data,
        }
    }

    /// Whether this is fallback data.
    pub const fn is_sample(&self) -> bool {
        matches!(self, Self::Sample(..))
    }

    /// The remote error that caused the fallback, if any.
    pub const fn fallback_reason(&self) -> Option<&SpoonacularError> {
        match self {
            Self::Remote(_) => None,
            Self::Sample(_, reason) => Some(reason),
        }
    }
}

/// A page of search or category results.
#[derive(Debug, Clone, Default)]
pub struct RecipePage {
    pub results: Vec<RecipeSummary>,
    pub total_results: u64,
}

/// Recipe read operations with sample-data fallback.
///
/// Methods here never fail: the worst outcome is sample data.
#[derive(Clone)]
pub struct RecipeService {
    client: RecipeApiClient,
}

impl RecipeService {
    #[must_use]
    pub const fn new(client: RecipeApiClient) -> Self {
        Self { client }
    }

    /// Search recipes by free text with optional diet/meal-type filters.
    ///
    /// Fallback semantics: case-insensitive substring match of the query
    /// against sample titles and summaries; if nothing matches, the full
    /// sample set is returned rather than an empty page.
    pub async fn search(
        &self,
        query: &str,
        diet: Option<&str>,
        meal_type: Option<&str>,
        number: u32,
        offset: u32,
    ) -> Sourced<RecipePage> {
        let params = SearchParams {
            query,
            diet,
            meal_type,
            number,
            offset,
        };

        match self.client.search(params).await {
            Ok(response) => Sourced::Remote(RecipePage {
                results: response.results,
                total_results: response.total_results,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Search failed, falling back to sample data");
                Sourced::Sample(sample_search(query), e)
            }
        }
    }

    /// Fetch recipe detail by id.
    ///
    /// Returns `None` only when the recipe exists neither upstream nor in
    /// the sample set. A remote failure for an id present in the samples
    /// yields a sample detail with synthesized instructions and ingredients.
    pub async fn detail(&self, id: RecipeId) -> Option<Sourced<RecipeDetail>> {
        match self.client.get_by_id(id).await {
            Ok(detail) => Some(Sourced::Remote(detail)),
            Err(e) => {
                tracing::warn!(error = %e, %id, "Detail fetch failed, trying sample data");
                sample::detail(id).map(|detail| Sourced::Sample(detail, e))
            }
        }
    }

    /// Fetch random recipes.
    ///
    /// Fallback semantics: uniform random picks from the sample set.
    pub async fn random(&self, count: u32) -> Sourced<Vec<RecipeSummary>> {
        match self.client.get_random(count).await {
            Ok(recipes) => Sourced::Remote(recipes),
            Err(e) => {
                tracing::warn!(error = %e, "Random fetch failed, falling back to sample data");
                let mut picks = sample::recipes().to_vec();
                picks.shuffle(&mut rand::rng());
                picks.truncate(count as usize);
                Sourced::Sample(picks, e)
            }
        }
    }

    /// Browse recipes by category (diet and/or meal type).
    ///
    /// Fallback semantics: a fixed category-to-subset mapping over the
    /// sample set.
    pub async fn by_category(
        &self,
        diet: Option<&str>,
        meal_type: Option<&str>,
        number: u32,
    ) -> Sourced<RecipePage> {
        let params = SearchParams {
            query: "",
            diet,
            meal_type,
            number,
            offset: 0,
        };

        match self.client.search(params).await {
            Ok(response) => Sourced::Remote(RecipePage {
                results: response.results,
                total_results: response.total_results,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Category fetch failed, falling back to sample data");
                Sourced::Sample(sample_category(diet, meal_type), e)
            }
        }
    }
}

/// Apply search semantics to the sample set.
fn sample_search(query: &str) -> RecipePage {
    let recipes = sample::recipes();

    let filtered: Vec<RecipeSummary> = if query.is_empty() {
        recipes.to_vec()
    } else {
        let needle = query.to_lowercase();
        recipes
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.summary
                        .as_ref()
                        .is_some_and(|s| s.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    };

    // No matches: show the whole sample set instead of an empty page
    let results = if filtered.is_empty() {
        recipes.to_vec()
    } else {
        filtered
    };

    let total_results = results.len() as u64;
    RecipePage {
        results,
        total_results,
    }
}

/// Apply the fixed category-to-subset mapping to the sample set.
fn sample_category(diet: Option<&str>, meal_type: Option<&str>) -> RecipePage {
    let recipes = sample::recipes();

    let results: Vec<RecipeSummary> = if meal_type == Some("dessert") {
        // Chocolate Lava Cake
        vec![recipes[4].clone()]
    } else if diet == Some("vegetarian") {
        // Risotto, Caesar Salad, Quinoa Bowl
        vec![recipes[1].clone(), recipes[3].clone(), recipes[5].clone()]
    } else {
        recipes[..4].to_vec()
    };

    let total_results = results.len() as u64;
    RecipePage {
        results,
        total_results,
    }
}
