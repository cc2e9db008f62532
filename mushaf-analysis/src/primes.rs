//! Prime coincidences across verse and chapter metrics.
//!
//! Each metric is tested independently; a verse or chapter may carry zero
//! to four (resp. five) flags at once.

use crate::{aggregate, verse_metrics, Metrics};
use mushaf_core::VerseRecord;
use serde::{Deserialize, Serialize};

/// Trial division up to sqrt(n), skipping multiples of 2 and 3.
/// 0 and 1 are not prime.
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerseMetric {
    VerseIndex,
    WordCount,
    LetterCount,
    AbjadValue,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SurahMetric {
    SurahIndex,
    VerseCount,
    TotalWordCount,
    TotalLetterCount,
    TotalAbjadValue,
}

/// Prime flags of one verse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersePrimes {
    pub verse_index: u32,
    pub word_count: u64,
    pub letter_count: u64,
    pub abjad_value: u64,
    pub primes_found: Vec<VerseMetric>,
}

/// Prime flags of one chapter, with the flagged verses it contains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurahPrimes {
    pub surah_index: u32,
    pub surah_name_en: String,
    pub metrics: Metrics,
    pub primes_found: Vec<SurahMetric>,
    /// Only verses with at least one prime metric.
    pub prime_verses: Vec<VersePrimes>,
}

/// Evaluate the four verse-level metrics; `primes_found` may be empty.
pub fn verse_primes(record: &VerseRecord) -> VersePrimes {
    let metrics = verse_metrics(record);
    let mut primes_found = Vec::new();
    if is_prime(record.verse_index as u64) {
        primes_found.push(VerseMetric::VerseIndex);
    }
    if is_prime(metrics.word_count) {
        primes_found.push(VerseMetric::WordCount);
    }
    if is_prime(metrics.letter_count) {
        primes_found.push(VerseMetric::LetterCount);
    }
    if is_prime(record.abjad_value) {
        primes_found.push(VerseMetric::AbjadValue);
    }
    VersePrimes {
        verse_index: record.verse_index,
        word_count: metrics.word_count,
        letter_count: metrics.letter_count,
        abjad_value: record.abjad_value,
        primes_found,
    }
}

/// Evaluate every chapter of the table. The chapter aggregate is tested in
/// addition to each constituent verse. Records must be in canonical
/// `(surah_index, verse_index)` order.
pub fn detect_primes(records: &[VerseRecord]) -> Vec<SurahPrimes> {
    records
        .chunk_by(|a, b| a.surah_index == b.surah_index)
        .map(|chapter| {
            let surah_index = chapter[0].surah_index;
            let metrics = aggregate(chapter, |_| true);

            let mut primes_found = Vec::new();
            if is_prime(surah_index as u64) {
                primes_found.push(SurahMetric::SurahIndex);
            }
            if is_prime(metrics.verse_count) {
                primes_found.push(SurahMetric::VerseCount);
            }
            if is_prime(metrics.word_count) {
                primes_found.push(SurahMetric::TotalWordCount);
            }
            if is_prime(metrics.letter_count) {
                primes_found.push(SurahMetric::TotalLetterCount);
            }
            if is_prime(metrics.abjad_sum) {
                primes_found.push(SurahMetric::TotalAbjadValue);
            }

            let prime_verses = chapter
                .iter()
                .map(verse_primes)
                .filter(|v| !v.primes_found.is_empty())
                .collect();

            SurahPrimes {
                surah_index,
                surah_name_en: chapter[0].surah_name_en.clone(),
                metrics,
                primes_found,
                prime_verses,
            }
        })
        .collect()
}
