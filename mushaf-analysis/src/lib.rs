//! Mushaf Analysis Layer
//!
//! Consumes the read-only corpus table and produces plain data results:
//! aggregated metrics, descending frequency tables, concept match counts,
//! and prime coincidence reports. No formatting or I/O lives here.

mod concepts;
mod frequency;
mod metrics;
mod primes;

pub use concepts::{concept_frequency, ConceptForm, ConceptReport};
pub use frequency::{
    letter_frequency, word_frequency, word_start_frequency, LetterFrequency, WordFrequency,
    WordStartFrequency,
};
pub use metrics::{aggregate, corpus_metrics, surah_metrics, verse_metrics, Metrics};
pub use primes::{detect_primes, is_prime, verse_primes, SurahMetric, SurahPrimes, VerseMetric, VersePrimes};
