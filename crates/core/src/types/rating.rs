//! Recipe rating type.

use serde::{Deserialize, Serialize};

/// Maximum rating value (five stars).
pub const MAX_RATING: u8 = 5;

/// A user rating for a favorite recipe, from 0 (unrated) to 5 stars.
///
/// Values outside the range are clamped on construction, and out-of-range
/// persisted values are clamped on deserialization, so a `Rating` in memory
/// is always valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Create a rating, clamping to the 0..=5 range.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > MAX_RATING {
            Self(MAX_RATING)
        } else {
            Self(value)
        }
    }

    /// The unrated state (zero stars).
    #[must_use]
    pub const fn unrated() -> Self {
        Self(0)
    }

    /// Get the rating value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Whether the user has rated at all.
    #[must_use]
    pub const fn is_rated(&self) -> bool {
        self.0 > 0
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for Rating {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_clamps() {
        assert_eq!(Rating::new(9).value(), 5);
        assert_eq!(Rating::new(5).value(), 5);
        assert_eq!(Rating::new(0).value(), 0);
    }

    #[test]
    fn test_rating_default_is_unrated() {
        assert_eq!(Rating::default(), Rating::unrated());
        assert!(!Rating::default().is_rated());
        assert!(Rating::new(1).is_rated());
    }

    #[test]
    fn test_rating_deserialize_clamps() {
        let rating: Rating = serde_json::from_str("7").unwrap();
        assert_eq!(rating.value(), 5);
    }

    #[test]
    fn test_rating_ordering() {
        assert!(Rating::new(5) > Rating::new(3));
        assert!(Rating::new(3) >= Rating::new(3));
    }
}
