//! Domain-biased query rewriting.
//!
//! Appends a short disjunction of mycology keywords to queries that do not
//! already speak the domain's vocabulary, and proposes follow-up queries.
//! Everything here is pure: no state, no I/O.

use std::fmt;
use std::str::FromStr;

/// Maximum keywords appended by [`enhance_query`].
const MAX_APPENDED_KEYWORDS: usize = 3;

/// Maximum entries returned by [`suggest_related_queries`].
const MAX_SUGGESTIONS: usize = 5;

/// Generic follow-up modifiers, in suggestion order.
const MODIFIERS: &[&str] = &["latest research", "mechanism", "applications", "review"];

/// Keyword category of the enhancement profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    General,
    Taxonomy,
    Medical,
    Agricultural,
    Biochemical,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::General,
        Category::Taxonomy,
        Category::Medical,
        Category::Agricultural,
        Category::Biochemical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Taxonomy => "taxonomy",
            Category::Medical => "medical",
            Category::Agricultural => "agricultural",
            Category::Biochemical => "biochemical",
        }
    }

    /// Keywords in declaration order.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::General => &[
                "fungus",
                "fungi",
                "mycology",
                "mold",
                "yeast",
                "mushroom",
                "mycobiome",
            ],
            Category::Taxonomy => &[
                "Ascomycota",
                "Basidiomycota",
                "Zygomycota",
                "Chytridiomycota",
                "hyphae",
                "mycelium",
                "spore",
            ],
            Category::Medical => &[
                "pathogenic fungi",
                "mycosis",
                "antifungal",
                "fungal infection",
                "aspergillosis",
                "candidiasis",
            ],
            Category::Agricultural => &[
                "plant pathogen",
                "mycorrhiza",
                "biological control",
                "crop disease",
                "phytopathology",
            ],
            Category::Biochemical => &[
                "secondary metabolite",
                "mycotoxin",
                "enzyme",
                "fermentation",
                "antibiotic",
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown query category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// True if `query` already contains any keyword from any category.
pub fn has_domain_terms(query: &str) -> bool {
    let lowered = query.to_lowercase();
    Category::ALL
        .iter()
        .flat_map(|c| c.keywords())
        .any(|term| lowered.contains(&term.to_lowercase()))
}

/// Bias `original` toward the requested categories.
///
/// Queries that already contain a domain keyword (from any category) are
/// returned unchanged. Unknown category names are skipped.
pub fn enhance_query<S: AsRef<str>>(original: &str, categories: &[S]) -> String {
    if has_domain_terms(original) {
        return original.to_string();
    }

    let selected: Vec<&str> = categories
        .iter()
        .filter_map(|name| name.as_ref().parse::<Category>().ok())
        .flat_map(|c| c.keywords().iter().copied())
        .take(MAX_APPENDED_KEYWORDS)
        .collect();

    if selected.is_empty() {
        return original.to_string();
    }
    format!("{original} ({})", selected.join(" OR "))
}

/// [`enhance_query`] with the `general` category.
pub fn enhance_query_default(original: &str) -> String {
    enhance_query(original, &["general"])
}

/// Follow-up queries: category keywords first, then generic modifiers.
pub fn suggest_related_queries(original: &str, main_category: Option<&str>) -> Vec<String> {
    let category_terms = main_category
        .and_then(|name| name.parse::<Category>().ok())
        .map(|c| &c.keywords()[..MAX_APPENDED_KEYWORDS.min(c.keywords().len())])
        .unwrap_or(&[]);

    category_terms
        .iter()
        .chain(MODIFIERS.iter())
        .take(MAX_SUGGESTIONS)
        .map(|suffix| format!("{original} {suffix}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_topic_query_is_unchanged() {
        let q = "Mycelium network signalling";
        assert_eq!(enhance_query(q, &["medical", "agricultural"]), q);
    }

    #[test]
    fn match_is_case_insensitive_and_spans_all_categories() {
        // "ENZYME" is a biochemical term; the request only names general.
        let q = "ENZYME kinetics in soil";
        assert_eq!(enhance_query(q, &["general"]), q);
    }

    #[test]
    fn off_topic_query_gets_general_keywords() {
        assert_eq!(
            enhance_query_default("soil health in vineyards"),
            "soil health in vineyards (fungus OR fungi OR mycology)"
        );
    }

    #[test]
    fn keywords_follow_category_order_and_cap_at_three() {
        assert_eq!(
            enhance_query("crop yields", &["agricultural", "general"]),
            "crop yields (plant pathogen OR mycorrhiza OR biological control)"
        );
    }

    #[test]
    fn keywords_spill_into_next_category() {
        let short = ["doesNotExist", "agricultural"];
        let q = enhance_query("wheat rust", &short);
        assert_eq!(q, "wheat rust (plant pathogen OR mycorrhiza OR biological control)");
    }

    #[test]
    fn unknown_categories_leave_query_unchanged() {
        assert_eq!(enhance_query("wheat rust", &["doesNotExist"]), "wheat rust");
        let none: [&str; 0] = [];
        assert_eq!(enhance_query("wheat rust", &none), "wheat rust");
    }

    #[test]
    fn suggestions_for_medical_are_quota_truncated() {
        let got = suggest_related_queries("q", Some("medical"));
        assert_eq!(
            got,
            vec![
                "q pathogenic fungi",
                "q mycosis",
                "q antifungal",
                "q latest research",
                "q mechanism",
            ]
        );
    }

    #[test]
    fn suggestions_without_category_are_modifiers_only() {
        let got = suggest_related_queries("q", None);
        assert_eq!(
            got,
            vec!["q latest research", "q mechanism", "q applications", "q review"]
        );
        assert_eq!(suggest_related_queries("q", Some("nope")).len(), 4);
    }

    #[test]
    fn category_parses_known_names_only() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>(), Ok(c));
        }
        let err = "General".parse::<Category>().unwrap_err();
        assert_eq!(err, UnknownCategory("General".into()));
        assert_eq!(err.to_string(), "unknown query category: General");
    }
}
