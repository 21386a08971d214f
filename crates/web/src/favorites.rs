//! Favorites collection management.
//!
//! Owns the insertion-ordered favorites collection, uniquely keyed by recipe
//! id, and mirrors every mutation to the snapshot store as a whole-collection
//! snapshot. Derived filter/sort views are pure functions over a snapshot and
//! never touch state or storage.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forkful_core::{Rating, RecipeId};

use crate::spoonacular::types::{Ingredient, RecipeSummary};
use crate::store::{SnapshotStore, keys};

/// A favorited recipe: the saved summary plus user-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// User rating, 0 (unrated) to 5 stars.
    #[serde(default)]
    pub rating: Rating,
    /// Free-text user notes.
    #[serde(default)]
    pub notes: String,
    /// Set once at insertion, never mutated afterwards.
    pub date_added: DateTime<Utc>,
}

impl FavoriteRecipe {
    fn from_summary(summary: RecipeSummary, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            image: summary.image,
            ready_in_minutes: summary.ready_in_minutes,
            servings: summary.servings,
            summary: summary.summary,
            instructions: None,
            ingredients,
            rating: Rating::unrated(),
            notes: String::new(),
            date_added: Utc::now(),
        }
    }
}

/// Sort order for the favorites view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteSort {
    /// Most recently added first.
    #[default]
    Recent,
    /// Oldest first.
    Oldest,
    /// Highest rated first.
    Rating,
    /// Title, lexicographic.
    Title,
}

impl FavoriteSort {
    /// Parse the query-string value; unknown values mean `Recent`.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "oldest" => Self::Oldest,
            "rating" => Self::Rating,
            "title" => Self::Title,
            _ => Self::Recent,
        }
    }

    /// The query-string value for this sort.
    #[must_use]
    pub const fn as_param(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Oldest => "oldest",
            Self::Rating => "rating",
            Self::Title => "title",
        }
    }
}

/// Owns the favorites collection and mirrors it to the snapshot store.
pub struct FavoritesManager {
    store: SnapshotStore,
    favorites: RwLock<Vec<FavoriteRecipe>>,
}

impl FavoritesManager {
    /// Create a manager, restoring any persisted collection.
    ///
    /// A missing or malformed snapshot (anything that is not a sequence of
    /// favorites) is discarded and the collection starts empty - it is never
    /// partially adopted.
    #[must_use]
    pub fn new(store: SnapshotStore) -> Self {
        let favorites: Vec<FavoriteRecipe> =
            store.load(keys::FAVORITES).unwrap_or_default();
        if !favorites.is_empty() {
            tracing::info!(count = favorites.len(), "Restored persisted favorites");
        }

        Self {
            store,
            favorites: RwLock::new(favorites),
        }
    }

    /// Whether a recipe is in the collection.
    #[must_use]
    pub fn is_favorite(&self, id: RecipeId) -> bool {
        self.read().iter().any(|f| f.id == id)
    }

    /// A snapshot of the current collection, in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<FavoriteRecipe> {
        self.read().clone()
    }

    /// Look up one favorite by id.
    #[must_use]
    pub fn get(&self, id: RecipeId) -> Option<FavoriteRecipe> {
        self.read().iter().find(|f| f.id == id).cloned()
    }

    /// Number of favorites.
    #[must_use]
    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Add a recipe to the favorites.
    ///
    /// No-op if the id is already present - re-adding never resets the
    /// existing rating, notes, or date added.
    pub fn add(&self, summary: RecipeSummary, ingredients: Vec<Ingredient>) {
        let mut favorites = self.write();
        if favorites.iter().any(|f| f.id == summary.id) {
            return;
        }

        favorites.push(FavoriteRecipe::from_summary(summary, ingredients));
        self.persist(&favorites);
    }

    /// Remove a recipe from the favorites. No-op if absent.
    pub fn remove(&self, id: RecipeId) {
        let mut favorites = self.write();
        let before = favorites.len();
        favorites.retain(|f| f.id != id);

        if favorites.len() != before {
            self.persist(&favorites);
        }
    }

    /// Replace the notes on a favorite. No-op if the id is not a member -
    /// annotation never creates an entry.
    pub fn update_notes(&self, id: RecipeId, notes: &str) {
        let mut favorites = self.write();
        let Some(favorite) = favorites.iter_mut().find(|f| f.id == id) else {
            return;
        };

        favorite.notes = notes.to_string();
        self.persist(&favorites);
    }

    /// Replace the rating on a favorite. No-op if the id is not a member.
    pub fn update_rating(&self, id: RecipeId, rating: Rating) {
        let mut favorites = self.write();
        let Some(favorite) = favorites.iter_mut().find(|f| f.id == id) else {
            return;
        };

        favorite.rating = rating;
        self.persist(&favorites);
    }

    /// Persist the entire collection snapshot. Storage failures are logged
    /// and never surfaced - the in-memory state stays authoritative.
    fn persist(&self, favorites: &[FavoriteRecipe]) {
        if let Err(e) = self.store.save(keys::FAVORITES, &favorites) {
            tracing::warn!(error = %e, "Failed to persist favorites");
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<FavoriteRecipe>> {
        self.favorites
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<FavoriteRecipe>> {
        self.favorites
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

// =============================================================================
// Derived views (pure functions over a snapshot)
// =============================================================================

/// Filter by free-text match against title or notes (case-insensitive
/// substring) and by minimum rating.
#[must_use]
pub fn filter_favorites(
    favorites: &[FavoriteRecipe],
    query: &str,
    min_rating: Rating,
) -> Vec<FavoriteRecipe> {
    let needle = query.to_lowercase();

    favorites
        .iter()
        .filter(|f| {
            needle.is_empty()
                || f.title.to_lowercase().contains(&needle)
                || f.notes.to_lowercase().contains(&needle)
        })
        .filter(|f| f.rating >= min_rating)
        .cloned()
        .collect()
}

/// Sort a favorites view. All orders are stable: entries that compare equal
/// keep their insertion order.
pub fn sort_favorites(favorites: &mut [FavoriteRecipe], sort: FavoriteSort) {
    match sort {
        FavoriteSort::Recent => favorites.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
        FavoriteSort::Oldest => favorites.sort_by(|a, b| a.date_added.cmp(&b.date_added)),
        FavoriteSort::Rating => favorites.sort_by(|a, b| b.rating.cmp(&a.rating)),
        FavoriteSort::Title => favorites.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn manager(dir: &std::path::Path) -> FavoritesManager {
        FavoritesManager::new(SnapshotStore::open(dir).unwrap())
    }

    fn summary(id: i64, title: &str) -> RecipeSummary {
        RecipeSummary {
            id: RecipeId::new(id),
            title: title.to_string(),
            image: None,
            ready_in_minutes: None,
            servings: None,
            summary: None,
        }
    }

    #[test]
    fn test_add_remove_maintains_unique_id_set() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = manager(dir.path());

        favorites.add(summary(1, "One"), vec![]);
        favorites.add(summary(2, "Two"), vec![]);
        favorites.add(summary(1, "One again"), vec![]);
        favorites.remove(RecipeId::new(2));
        favorites.add(summary(3, "Three"), vec![]);

        let ids: Vec<i64> = favorites.all().iter().map(|f| f.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(favorites.is_favorite(RecipeId::new(1)));
        assert!(!favorites.is_favorite(RecipeId::new(2)));
    }

    #[test]
    fn test_re_add_never_resets_annotations() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = manager(dir.path());

        favorites.add(summary(1, "Risotto"), vec![]);
        favorites.update_rating(RecipeId::new(1), Rating::new(4));
        favorites.update_notes(RecipeId::new(1), "less stock next time");
        let before = favorites.get(RecipeId::new(1)).unwrap();

        favorites.add(summary(1, "Risotto"), vec![]);

        let after = favorites.get(RecipeId::new(1)).unwrap();
        assert_eq!(after.rating, Rating::new(4));
        assert_eq!(after.notes, "less stock next time");
        assert_eq!(after.date_added, before.date_added);
    }

    #[test]
    fn test_annotating_non_member_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = manager(dir.path());

        favorites.add(summary(1, "One"), vec![]);
        favorites.update_rating(RecipeId::new(99), Rating::new(5));
        favorites.update_notes(RecipeId::new(99), "ghost entry");

        assert_eq!(favorites.count(), 1);
        assert!(favorites.get(RecipeId::new(99)).is_none());
    }

    #[test]
    fn test_remove_missing_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = manager(dir.path());

        favorites.add(summary(1, "One"), vec![]);
        favorites.remove(RecipeId::new(99));

        assert_eq!(favorites.count(), 1);
    }

    #[test]
    fn test_collection_roundtrips_through_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let favorites = manager(dir.path());
            favorites.add(summary(1, "One"), vec![]);
            favorites.add(summary(2, "Two"), vec![]);
            favorites.update_rating(RecipeId::new(2), Rating::new(3));
            favorites.update_notes(RecipeId::new(2), "weeknight staple");
        }

        let restored = manager(dir.path());
        assert_eq!(restored.count(), 2);
        let two = restored.get(RecipeId::new(2)).unwrap();
        assert_eq!(two.rating, Rating::new(3));
        assert_eq!(two.notes, "weeknight staple");
    }

    #[test]
    fn test_corrupt_snapshot_yields_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("favorites.json"), b"{\"not\": \"a list\"}").unwrap();

        let favorites = manager(dir.path());
        assert_eq!(favorites.count(), 0);
    }

    #[test]
    fn test_sort_by_rating_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = manager(dir.path());

        for (id, title, rating) in [(1, "A", 3), (2, "B", 0), (3, "C", 5), (4, "D", 3)] {
            favorites.add(summary(id, title), vec![]);
            favorites.update_rating(RecipeId::new(id), Rating::new(rating));
        }

        let mut view = favorites.all();
        sort_favorites(&mut view, FavoriteSort::Rating);

        let ids: Vec<i64> = view.iter().map(|f| f.id.as_i64()).collect();
        // 5 first, then both 3s in insertion order, then 0
        assert_eq!(ids, vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_sort_by_title() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = manager(dir.path());

        favorites.add(summary(1, "Quinoa Bowl"), vec![]);
        favorites.add(summary(2, "Caesar Salad"), vec![]);
        favorites.add(summary(3, "Lava Cake"), vec![]);

        let mut view = favorites.all();
        sort_favorites(&mut view, FavoriteSort::Title);

        let titles: Vec<&str> = view.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Caesar Salad", "Lava Cake", "Quinoa Bowl"]);
    }

    #[test]
    fn test_filter_by_min_rating() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = manager(dir.path());

        for (id, rating) in [(1, 3), (2, 0), (3, 5), (4, 3)] {
            favorites.add(summary(id, &format!("Recipe {id}")), vec![]);
            favorites.update_rating(RecipeId::new(id), Rating::new(rating));
        }

        let view = filter_favorites(&favorites.all(), "", Rating::new(4));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, RecipeId::new(3));
    }

    #[test]
    fn test_filter_matches_title_or_notes() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = manager(dir.path());

        favorites.add(summary(1, "Grilled Salmon"), vec![]);
        favorites.add(summary(2, "Caesar Salad"), vec![]);
        favorites.update_notes(RecipeId::new(2), "great with salmon on top");

        let view = filter_favorites(&favorites.all(), "SALMON", Rating::unrated());
        assert_eq!(view.len(), 2);

        let view = filter_favorites(&favorites.all(), "caesar", Rating::unrated());
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_views_do_not_mutate_state() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = manager(dir.path());

        favorites.add(summary(1, "B"), vec![]);
        favorites.add(summary(2, "A"), vec![]);

        let mut view = favorites.all();
        sort_favorites(&mut view, FavoriteSort::Title);
        let _ = filter_favorites(&view, "a", Rating::unrated());

        // Insertion order unchanged in the manager
        let ids: Vec<i64> = favorites.all().iter().map(|f| f.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_sort_param_roundtrip() {
        for sort in [
            FavoriteSort::Recent,
            FavoriteSort::Oldest,
            FavoriteSort::Rating,
            FavoriteSort::Title,
        ] {
            assert_eq!(FavoriteSort::from_param(sort.as_param()), sort);
        }
        assert_eq!(FavoriteSort::from_param("bogus"), FavoriteSort::Recent);
    }
}
