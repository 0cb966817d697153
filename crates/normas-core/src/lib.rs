pub mod config;
pub mod entities;
mod error;
pub mod regulation;
pub mod scoring;
pub mod snippet;

pub use config::ScoringWeights;
pub use entities::{EntityCategory, EntitySet, extract_entities};
pub use error::CoreError;
pub use regulation::{Regulation, RelevanceTier, UnknownTier};
pub use scoring::{ScoredRegulation, rank, score_regulation};
pub use snippet::SnippetOutcome;
