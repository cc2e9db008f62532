//! Concept Stem Tables
//!
//! Literal stems per concept, plus the fixed clitic prefixes of Quranic
//! Arabic. Matching is whole-token only: an optional known prefix followed
//! by the stem, anchored at both ends. A stem occurring as an unexplained
//! substring of a longer token never matches.

use serde::{Deserialize, Serialize};

/// Clitic prefixes that may precede a stem: conjunctions, prepositions, the
/// definite article, and their attested combinations.
pub static CLITIC_PREFIXES: &[&str] = &[
    "و", "ف", "ب", "ك", "ل", "ال", "وال", "فال", "بال", "كال", "لل", "ولل",
    "ت", "س", "وس", "فس",
];

/// A concept label with its literal stems (already in normalized form).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Concept {
    pub label: String,
    pub stems: Vec<String>,
}

/// Ordered collection of concepts to match against the corpus.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConceptStemSet {
    concepts: Vec<Concept>,
}

impl ConceptStemSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from `(label, stems)` pairs, preserving order.
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Self {
        let concepts = pairs
            .iter()
            .map(|(label, stems)| Concept {
                label: label.to_string(),
                stems: stems.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        Self { concepts }
    }

    /// Append a concept.
    pub fn push(&mut self, label: impl Into<String>, stems: Vec<String>) {
        self.concepts.push(Concept {
            label: label.into(),
            stems,
        });
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

/// Whether `token` is exactly `stem`, or a known clitic prefix followed by
/// `stem`.
pub fn token_matches_stem(token: &str, stem: &str) -> bool {
    if token == stem {
        return true;
    }
    CLITIC_PREFIXES
        .iter()
        .any(|prefix| token.strip_prefix(prefix) == Some(stem))
}

/// Concept map used by the conceptual frequency report.
///
/// Stems are written in the normalized form the corpus table stores: bare
/// alef, haa for taa marbuta, yaa for alef maqsura.
pub fn default_concepts() -> ConceptStemSet {
    ConceptStemSet::from_pairs(&[
        ("Man", &["رجل", "رجال"]),
        ("Woman", &["امراه", "نساء"]),
        ("Child", &["ولد", "اولاد", "طفل", "اطفال"]),
        ("Earth", &["ارض"]),
        ("Water", &["ماء"]),
        ("Blood", &["دم", "دماء"]),
        ("Angel", &["ملك", "ملائكه", "ملئكه"]),
        ("Devil", &["شيطن", "شياطين", "ابليس"]),
        ("Allah", &["الله"]),
        ("Prayer", &["صلوه", "صلاه"]),
        ("Almsgiving", &["زكوه", "زكاه"]),
        ("Fasting", &["صوم", "صيام"]),
        ("War", &["حرب", "قتال"]),
        ("Peace", &["سلم", "سلام"]),
        ("Day", &["يوم", "ايام"]),
        ("Month", &["شهر", "اشهر"]),
        ("Year", &["سنه", "عام", "سنين"]),
        ("Heaven", &["سماء", "سموت"]),
        ("Night", &["ليل", "اليل", "ليلا"]),
    ])
}
