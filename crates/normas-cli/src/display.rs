//! Terminal and JSON rendering of consultation results.

use normas_core::{EntityCategory, EntitySet, Regulation};
use normas_store::RegulationStore;
use serde::Serialize;

use crate::consult::MatchResult;

const LABEL_WIDTH: usize = 10;
const MAX_SUBJECT_CHARS: usize = 70;

/// JSON shape of one match; the snippet is already collapsed to display text.
#[derive(Debug, Serialize)]
pub struct MatchView<'a> {
    pub name: &'a str,
    pub number: &'a str,
    pub subject: &'a str,
    pub url: &'a str,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<&'a str>,
}

impl<'a> From<&'a MatchResult<'a>> for MatchView<'a> {
    fn from(m: &'a MatchResult<'a>) -> Self {
        Self {
            name: &m.regulation.name,
            number: &m.regulation.number,
            subject: &m.regulation.subject,
            url: &m.regulation.url,
            score: m.score,
            snippet: m.snippet.as_ref().map(|s| s.display_text()),
        }
    }
}

pub fn print_loaded(store: &RegulationStore) {
    println!("{} normas carregadas", store.len());
    println!();
}

/// Print each match as a card, best first.
pub fn print_matches(results: &[MatchResult<'_>]) {
    if results.is_empty() {
        println!("Nenhuma norma relevante encontrada para este projeto.");
        return;
    }
    for (i, m) in results.iter().enumerate() {
        print_match_card(i + 1, m);
    }
}

fn print_match_card(rank: usize, m: &MatchResult<'_>) {
    let reg = m.regulation;
    println!("=== {rank}. {} ===", reg.name);
    print_field("número", &reg.number);
    print_field("assunto", &reg.subject);
    print_field("relevância", &format!("{:.0}% ({})", m.score * 100.0, reg.tier));
    if let Some(snippet) = &m.snippet {
        print_field("trecho", snippet.display_text());
    }
    print_field("fonte", &reg.url);
    println!();
}

pub fn print_matches_json(results: &[MatchResult<'_>]) -> anyhow::Result<()> {
    let views: Vec<MatchView<'_>> = results.iter().map(MatchView::from).collect();
    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}

pub fn print_entities(entities: &EntitySet) {
    if entities.is_empty() {
        println!("Nenhuma entidade reconhecida.");
        return;
    }
    for entity in entities {
        let category = EntityCategory::classify(entity)
            .map(|c| c.label())
            .unwrap_or("-");
        println!("  {entity:<24} {category}");
    }
}

pub fn print_regulations<'a>(regulations: impl Iterator<Item = &'a Regulation>) {
    for reg in regulations {
        println!(
            "  {:<6} {:<40} {:<6} {}",
            reg.number,
            reg.name,
            reg.tier,
            shorten(&reg.subject, MAX_SUBJECT_CHARS)
        );
    }
}

fn print_field(label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    println!("  {label:<width$} {value}", width = LABEL_WIDTH);
}

fn shorten(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}
