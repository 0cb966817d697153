//! Scoring weights and match threshold.
//!
//! The defaults are hand-tuned and have no derivation beyond product
//! judgement. They can be overridden from a JSON file, for example:
//!
//! ```json
//! { "advertising": 0.5, "match_threshold": 0.2 }
//! ```
//!
//! Fields left out keep their default value.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::CoreError;
use crate::entities::EntityCategory;

pub const DEFAULT_ADVERTISING_WEIGHT: f64 = 0.4;
pub const DEFAULT_ZONING_WEIGHT: f64 = 0.3;
pub const DEFAULT_SETBACK_WEIGHT: f64 = 0.25;
pub const DEFAULT_OTHER_WEIGHT: f64 = 0.15;
pub const DEFAULT_HIGH_TIER_BONUS: f64 = 0.1;
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.15;

/// Per-category entity weights, tier bonus and match cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringWeights {
    pub advertising: f64,
    pub zoning: f64,
    /// Setbacks and floor/height limits.
    pub setback: f64,
    /// Construction terms, dimensions, and anything unclassified.
    pub other: f64,
    /// Added once when the regulation's tier is `Alta`.
    pub high_tier_bonus: f64,
    /// A regulation matches only when its score is strictly above this.
    pub match_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            advertising: DEFAULT_ADVERTISING_WEIGHT,
            zoning: DEFAULT_ZONING_WEIGHT,
            setback: DEFAULT_SETBACK_WEIGHT,
            other: DEFAULT_OTHER_WEIGHT,
            high_tier_bonus: DEFAULT_HIGH_TIER_BONUS,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl ScoringWeights {
    /// Load weights from a JSON file, filling missing fields with defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::WeightsNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let weights: Self = serde_json::from_str(&raw)?;
        weights.validate()?;
        info!(path = %path.display(), ?weights, "loaded scoring weights");
        Ok(weights)
    }

    /// Weight contributed by one matching entity of the given category.
    pub fn weight_for(&self, category: Option<EntityCategory>) -> f64 {
        match category {
            Some(EntityCategory::Advertising) => self.advertising,
            Some(EntityCategory::Zoning) => self.zoning,
            Some(EntityCategory::Setback) => self.setback,
            Some(EntityCategory::Construction | EntityCategory::Dimension) | None => self.other,
        }
    }

    /// Reject negative or non-finite values; scores rely on non-negative
    /// contributions to stay monotonic.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("advertising", self.advertising),
            ("zoning", self.zoning),
            ("setback", self.setback),
            ("other", self.other),
            ("high_tier_bonus", self.high_tier_bonus),
            ("match_threshold", self.match_threshold),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}
