//! Entity extraction from free-text project descriptions.
//!
//! Five fixed categories of terms are recognised, each by a single
//! case-insensitive pattern run over the whole text:
//!
//! - **Advertising** — signage and out-of-home media: `OOH`, `LED`, `painel`,
//!   `outdoor`, `letreiro`, `totem`, ...
//! - **Zoning** — zone codes and zoning vocabulary: `ZR-3`, `ZR4`, `ZC`,
//!   `zoneamento`, ...
//! - **Setback** — setbacks and floor/height limits: `recuo`, `afastamento`,
//!   `pavimentos`, `gabarito`, ...
//! - **Construction** — building works: `construção`, `reforma`, `alvará`, ...
//! - **Dimension** — measurements: `25m²`, `3,5 m`, `12 metros`, ...
//!
//! Every match is lowercased and collected into a deduplicated [`EntitySet`].

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Lowercase, deduplicated entities extracted from a query.
///
/// Callers must not rely on iteration order; a `BTreeSet` is used only so
/// that output is reproducible.
pub type EntitySet = BTreeSet<String>;

/// Pattern category an entity was recognised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Advertising,
    Zoning,
    Setback,
    Construction,
    Dimension,
}

impl EntityCategory {
    /// All categories, in classification precedence order.
    pub const ALL: [EntityCategory; 5] = [
        Self::Advertising,
        Self::Zoning,
        Self::Setback,
        Self::Construction,
        Self::Dimension,
    ];

    fn pattern(self) -> &'static str {
        match self {
            Self::Advertising => {
                r"(?i)\b(?:d?ooh|led|painel|painéis|paineis|outdoors?|publicidade|publicitári[oa]s?|anúncios?|anuncios?|letreiros?|placas?|totem|totens|empenas?|front-?light|back-?light|m[ií]dia exterior)\b"
            }
            Self::Zoning => {
                r"(?i)\b(?:z[a-z]{1,3}-?\d{1,2}|zr-oc|zc|zuc|zum|zoneamento|zonas?)\b"
            }
            Self::Setback => {
                r"(?i)\b(?:recuos?|afastamentos?|pavimentos?|andar|andares|gabarito|altura máxima|taxa de ocupação|coeficiente de aproveitamento)\b"
            }
            Self::Construction => {
                r"(?i)\b(?:construção|construções|construir|edificação|edificações|edifício|edificio|prédio|predio|obras?|reforma|ampliação|demolição|alvará|alvara|habite-se|fachadas?)\b"
            }
            Self::Dimension => {
                r"(?i)\b\d+(?:[.,]\d+)?\s?(?:m²|m³|(?:m2|m3|metros?\s+quadrados|metros?|cm|km|m)\b)"
            }
        }
    }

    // PATTERNS is built from ALL, whose order matches the discriminants.
    fn regex(self) -> &'static Regex {
        &PATTERNS[self as usize]
    }

    /// Category whose pattern matches the whole of `entity`, if any.
    ///
    /// Categories are tried in [`ALL`](Self::ALL) order, so a term that
    /// satisfies several patterns gets the highest-weighted one.
    pub fn classify(entity: &str) -> Option<EntityCategory> {
        Self::ALL.into_iter().find(|category| {
            category
                .regex()
                .find(entity)
                .is_some_and(|m| m.start() == 0 && m.end() == entity.len())
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Advertising => "publicidade",
            Self::Zoning => "zoneamento",
            Self::Setback => "recuo/pavimentos",
            Self::Construction => "construção",
            Self::Dimension => "dimensão",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    EntityCategory::ALL
        .iter()
        .map(|c| Regex::new(c.pattern()).expect("entity patterns are valid regexes"))
        .collect()
});

/// Extract the entity set from a project description.
///
/// Never fails; text without any category term (including the empty
/// string) yields an empty set.
pub fn extract_entities(text: &str) -> EntitySet {
    let mut entities = EntitySet::new();
    for category in EntityCategory::ALL {
        for m in category.regex().find_iter(text) {
            entities.insert(m.as_str().to_lowercase());
        }
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> EntitySet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn all_patterns_compile() {
        assert_eq!(PATTERNS.len(), EntityCategory::ALL.len());
    }

    #[test]
    fn reference_project_description() {
        let entities = extract_entities("painel LED OOH 25m² Av Batel ZR-3");
        assert_eq!(entities, set(&["25m²", "led", "ooh", "painel", "zr-3"]));
    }

    #[test]
    fn empty_input_yields_empty_set() {
        assert!(extract_entities("").is_empty());
        assert!(extract_entities("   \n\t").is_empty());
    }

    #[test]
    fn text_without_category_terms_yields_empty_set() {
        assert!(extract_entities("uma cafeteria pequena no centro").is_empty());
    }

    #[test]
    fn matches_are_lowercased_and_deduplicated() {
        let entities = extract_entities("LED led Led painel PAINEL");
        assert_eq!(entities, set(&["led", "painel"]));
    }

    #[test]
    fn terms_inside_words_are_not_entities() {
        // "led" inside "ledger", "zona" inside "zonal", "obra" inside "sobrado"
        let entities = extract_entities("ledger zonal sobrado");
        assert!(entities.is_empty(), "got {entities:?}");
    }

    #[test]
    fn setback_and_construction_terms() {
        let entities = extract_entities("Reforma com recuo frontal e 4 pavimentos, alvará pendente");
        assert!(entities.contains("reforma"));
        assert!(entities.contains("recuo"));
        assert!(entities.contains("pavimentos"));
        assert!(entities.contains("alvará"));
    }

    #[test]
    fn dimension_expressions() {
        let entities = extract_entities("área de 3,5 m e 120 metros quadrados, altura 12m, placa 2m2");
        assert!(entities.contains("3,5 m"), "{entities:?}");
        assert!(entities.contains("120 metros quadrados"), "{entities:?}");
        assert!(entities.contains("12m"), "{entities:?}");
        assert!(entities.contains("2m2"), "{entities:?}");
    }

    #[test]
    fn bare_numbers_are_not_dimensions() {
        assert!(extract_entities("lote 42 quadra 7").is_empty());
    }

    #[test]
    fn zoning_codes_in_several_spellings() {
        let entities = extract_entities("Terreno em ZR4, vizinho à ZR-OC e ZC, conforme zoneamento");
        assert!(entities.contains("zr4"));
        assert!(entities.contains("zr-oc"));
        assert!(entities.contains("zc"));
        assert!(entities.contains("zoneamento"));
    }

    #[test]
    fn every_extracted_entity_is_classifiable() {
        let text = "Outdoor LED de 9m² com recuo de 5 metros na ZR-2, obra nova com 3 andares";
        for entity in extract_entities(text) {
            assert!(
                EntityCategory::classify(&entity).is_some(),
                "{entity:?} has no category"
            );
        }
    }

    #[test]
    fn classify_picks_expected_category() {
        assert_eq!(EntityCategory::classify("ooh"), Some(EntityCategory::Advertising));
        assert_eq!(EntityCategory::classify("zr-3"), Some(EntityCategory::Zoning));
        assert_eq!(EntityCategory::classify("recuo"), Some(EntityCategory::Setback));
        assert_eq!(EntityCategory::classify("pavimentos"), Some(EntityCategory::Setback));
        assert_eq!(EntityCategory::classify("reforma"), Some(EntityCategory::Construction));
        assert_eq!(EntityCategory::classify("25m²"), Some(EntityCategory::Dimension));
    }

    #[test]
    fn classify_requires_whole_entity_match() {
        assert_eq!(EntityCategory::classify("painel solar"), None);
        assert_eq!(EntityCategory::classify("batel"), None);
        assert_eq!(EntityCategory::classify(""), None);
    }
}
