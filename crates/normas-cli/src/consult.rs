//! Consultation pipeline: entities → scores → ranked matches → snippets.

use normas_core::{Regulation, ScoringWeights, SnippetOutcome, extract_entities, rank};
use normas_fetch::SnippetClient;
use normas_store::RegulationStore;
use tracing::info;

/// One relevant regulation for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub regulation: &'a Regulation,
    pub score: f64,
    /// `None` when snippet fetching was disabled.
    pub snippet: Option<SnippetOutcome>,
}

/// Rank the store against `query` and, when a client is given, fetch one
/// snippet per match.
///
/// Snippets are fetched one at a time in rank order; each request finishes
/// before the next starts. `limit` caps the number of matches (and so the
/// number of requests).
pub async fn consult<'a>(
    store: &'a RegulationStore,
    snippets: Option<&SnippetClient>,
    query: &str,
    weights: &ScoringWeights,
    limit: Option<usize>,
) -> Vec<MatchResult<'a>> {
    let entities = extract_entities(query);
    info!(entities = ?entities, "extracted entities");

    let mut ranked = rank(store.regulations(), &entities, weights);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    info!(matches = ranked.len(), "ranked regulations");

    let mut results = Vec::with_capacity(ranked.len());
    for scored in ranked {
        let snippet = match snippets {
            Some(client) => Some(client.snippet(&scored.regulation.url, query).await),
            None => None,
        };
        results.push(MatchResult {
            regulation: scored.regulation,
            score: scored.score,
            snippet,
        });
    }
    results
}
