//! Regulation records as loaded from the municipal regulation table.

use std::fmt;
use std::str::FromStr;

/// Coarse priority label attached to each regulation (`relevancia` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelevanceTier {
    Alta,
    Media,
    Baixa,
}

impl RelevanceTier {
    /// Label as written in the source table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alta => "Alta",
            Self::Media => "Média",
            Self::Baixa => "Baixa",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Self::Alta)
    }
}

impl fmt::Display for RelevanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Unrecognised `relevancia` value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relevance tier: {0:?}")]
pub struct UnknownTier(pub String);

impl FromStr for RelevanceTier {
    type Err = UnknownTier;

    /// Accepts any case, with or without the accent on `Média`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alta" => Ok(Self::Alta),
            "média" | "media" => Ok(Self::Media),
            "baixa" => Ok(Self::Baixa),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}

/// One municipal ordinance or zoning rule.
///
/// Immutable once loaded; the table it came from is read-only for the
/// lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct Regulation {
    pub name: String,
    pub number: String,
    pub subject: String,
    pub url: String,
    /// Free-text keyword list, usually comma separated.
    pub keywords: String,
    pub tier: RelevanceTier,
}

impl Regulation {
    /// Lowercase `name subject keywords` haystack used for entity matching.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.subject, self.keywords).to_lowercase()
    }
}
