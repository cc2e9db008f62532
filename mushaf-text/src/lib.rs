//! Mushaf Text Layer
//!
//! Pure text transforms shared by the whole pipeline:
//! - Normalization into the canonical analysis form
//! - Abjad (letter-value) scoring
//! - The canonical post-normalization alphabet
//! - Whitespace tokenization
//! - Concept stem tables and clitic-prefix matching

mod abjad;
mod alphabet;
mod concepts;
mod normalize;
mod tokenize;

pub use abjad::{AbjadScorer, ABJAD_TABLE};
pub use alphabet::{is_normalized_letter, letter_count, NORMALIZED_ALPHABET};
pub use concepts::{
    default_concepts, token_matches_stem, Concept, ConceptStemSet, CLITIC_PREFIXES,
};
pub use normalize::{is_alef_variant, is_diacritic, normalize, Normalizer};
pub use tokenize::{tokens, word_count};
