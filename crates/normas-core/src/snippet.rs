//! Best-sentence selection from a regulation's page text.
//!
//! The page text is split into sentence-like segments on `.`, `!` and `?`.
//! Each segment longer than [`MIN_SEGMENT_CHARS`] is scored by how many
//! whitespace-separated query tokens it contains (case-insensitive substring
//! test; repeated tokens count again). The highest-scoring segment wins and
//! ties keep the first one seen. A winner must share at least one token.

/// Segments must be strictly longer than this many characters to qualify.
pub const MIN_SEGMENT_CHARS: usize = 20;
/// Snippets are cut to this many characters before the ellipsis.
pub const MAX_SNIPPET_CHARS: usize = 400;
pub const ELLIPSIS: &str = "...";

/// Shown when the regulation page could not be fetched.
pub const NETWORK_FAILURE_FALLBACK: &str = "Não foi possível carregar o texto da norma.";
/// Shown when the page has no sentence related to the query.
pub const NO_MATCH_FALLBACK: &str = "Consulte a norma completa.";

/// Result of trying to extract a snippet for one regulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetOutcome {
    /// Capitalised, truncated sentence ending in [`ELLIPSIS`].
    Found(String),
    /// Fetch failed for any reason (transport, timeout, status, decoding).
    NetworkFailure,
    /// The page had no qualifying segment sharing a token with the query.
    NoQualifyingSegment,
}

impl SnippetOutcome {
    /// Text to show the user, collapsing failures to fixed fallback strings.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Found(text) => text,
            Self::NetworkFailure => NETWORK_FAILURE_FALLBACK,
            Self::NoQualifyingSegment => NO_MATCH_FALLBACK,
        }
    }

    /// Select a snippet from already-extracted page text.
    pub fn from_page_text(text: &str, query: &str) -> Self {
        match best_segment(text, query) {
            Some(segment) => Self::Found(format_snippet(segment)),
            None => Self::NoQualifyingSegment,
        }
    }
}

/// Number of query tokens contained in `segment`.
pub fn overlap(segment: &str, query_tokens: &[String]) -> usize {
    let segment = segment.to_lowercase();
    query_tokens
        .iter()
        .filter(|token| segment.contains(token.as_str()))
        .count()
}

/// The qualifying segment with the highest overlap, if any overlaps at all.
pub fn best_segment<'t>(text: &'t str, query: &str) -> Option<&'t str> {
    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return None;
    }

    let mut best: Option<(&str, usize)> = None;
    for segment in text.split(['.', '!', '?']).map(str::trim) {
        if segment.chars().count() <= MIN_SEGMENT_CHARS {
            continue;
        }
        let score = overlap(segment, &tokens);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((segment, score));
        }
    }
    best.map(|(segment, _)| segment)
}

/// Truncate to [`MAX_SNIPPET_CHARS`], upper-case the first letter and append
/// [`ELLIPSIS`].
pub fn format_snippet(segment: &str) -> String {
    let truncated: String = segment.chars().take(MAX_SNIPPET_CHARS).collect();
    let mut chars = truncated.chars();
    let mut out = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    out.push_str(ELLIPSIS);
    out
}
