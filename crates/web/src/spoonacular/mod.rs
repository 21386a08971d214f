//! Recipe API client (Spoonacular-compatible).
//!
//! Uses `reqwest` for HTTP with typed JSON responses. Search and detail
//! responses are cached using `moka` (5-minute TTL); random picks are never
//! cached. The API key is sent as a query parameter on every request.
//!
//! Callers are expected to treat every error here as an entry into the
//! sample-data fallback path - see [`crate::recipes`].

mod cache;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use forkful_core::RecipeId;

use crate::config::SpoonacularConfig;
use cache::CacheValue;
use types::{RandomResponse, RecipeDetail, RecipeSummary, SearchResponse};

/// Errors that can occur when calling the recipe API.
#[derive(Debug, thiserror::Error)]
pub enum SpoonacularError {
    /// HTTP request failed (network, timeout, invalid URL).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Query parameters for a recipe search.
#[derive(Debug, Clone, Default)]
pub struct SearchParams<'a> {
    /// Free-text query; empty means "everything".
    pub query: &'a str,
    /// Diet filter (e.g. "vegetarian").
    pub diet: Option<&'a str>,
    /// Meal type filter (e.g. "dessert").
    pub meal_type: Option<&'a str>,
    /// Page size.
    pub number: u32,
    /// Result offset for pagination.
    pub offset: u32,
}

/// Client for the recipe API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct RecipeApiClient {
    inner: Arc<RecipeApiClientInner>,
}

struct RecipeApiClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    cache: Cache<String, CacheValue>,
}

impl RecipeApiClient {
    /// Create a new recipe API client.
    #[must_use]
    pub fn new(config: &SpoonacularConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            inner: Arc::new(RecipeApiClientInner {
                client,
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone(),
                cache,
            }),
        }
    }

    /// Execute a GET request and parse the JSON body.
    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, SpoonacularError> {
        let url = format!("{}/{path}", self.inner.base_url);

        let response = self
            .inner
            .client
            .get(&url)
            .query(&[("apiKey", self.inner.api_key.expose_secret())])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %response_text.chars().take(200).collect::<String>(),
                "Recipe API returned non-success status"
            );
            return Err(SpoonacularError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    body = %response_text.chars().take(200).collect::<String>(),
                    "Failed to parse recipe API response"
                );
                Err(SpoonacularError::Parse(e))
            }
        }
    }

    /// Search recipes with optional diet and meal-type filters.
    ///
    /// A well-formed empty result set is a success, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API returns a non-success
    /// status, or the payload is malformed.
    #[instrument(skip(self), fields(query = %params.query))]
    pub async fn search(
        &self,
        params: SearchParams<'_>,
    ) -> Result<SearchResponse, SpoonacularError> {
        let cache_key = format!(
            "search:{}:{}:{}:{}:{}",
            params.query,
            params.diet.unwrap_or(""),
            params.meal_type.unwrap_or(""),
            params.number,
            params.offset
        );

        // Check cache (only for browse-style queries without search text)
        if params.query.is_empty()
            && let Some(CacheValue::Search(response)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for search");
            return Ok(response);
        }

        let mut query_params = vec![
            ("query", params.query.to_string()),
            ("number", params.number.to_string()),
            ("offset", params.offset.to_string()),
            ("addRecipeInformation", "true".to_string()),
            ("fillIngredients", "true".to_string()),
        ];
        if let Some(diet) = params.diet {
            query_params.push(("diet", diet.to_string()));
        }
        if let Some(meal_type) = params.meal_type {
            query_params.push(("type", meal_type.to_string()));
        }

        let response: SearchResponse = self.execute("complexSearch", &query_params).await?;

        if params.query.is_empty() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Search(response.clone()))
                .await;
        }

        Ok(response)
    }

    /// Get full detail for a recipe by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the recipe does not exist
    /// upstream, or the payload is malformed.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_by_id(&self, id: RecipeId) -> Result<RecipeDetail, SpoonacularError> {
        let cache_key = format!("recipe:{id}");

        if let Some(CacheValue::Detail(detail)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for recipe detail");
            return Ok(*detail);
        }

        let detail: RecipeDetail = self
            .execute(
                &format!("{id}/information"),
                &[("includeNutrition", "false".to_string())],
            )
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Detail(Box::new(detail.clone())))
            .await;

        Ok(detail)
    }

    /// Get random recipes (not cached - each call should differ).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is malformed.
    #[instrument(skip(self))]
    pub async fn get_random(&self, count: u32) -> Result<Vec<RecipeSummary>, SpoonacularError> {
        let response: RandomResponse = self
            .execute("random", &[("number", count.to_string())])
            .await?;

        Ok(response.recipes)
    }
}
