//! Descending frequency tables.
//!
//! Ordering is strictly descending by count; ties keep first-encountered
//! scan order, which makes reports reproducible run over run.

use mushaf_core::VerseRecord;
use mushaf_text::{is_normalized_letter, tokens};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LetterFrequency {
    pub letter: char,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WordFrequency {
    pub word: String,
    pub count: u64,
    pub percentage: f64,
}

/// Word-start letter table, plus how many tokens were scanned to build it
/// (tokens starting outside the alphabet are scanned but not counted).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WordStartFrequency {
    pub tokens_scanned: u64,
    pub entries: Vec<LetterFrequency>,
}

/// Counter that remembers first-seen order, so that the stable descending
/// sort breaks ties by encounter order rather than alphabetically.
struct OrderedCounter<K> {
    order: Vec<K>,
    counts: HashMap<K, u64>,
}

impl<K: Eq + Hash + Clone + Send> OrderedCounter<K> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }

    fn add(&mut self, key: K) {
        let count = self.counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            self.order.push(key);
        }
        *count += 1;
    }

    /// `(key, count)` pairs sorted descending by count; the sort is stable
    /// over first-seen order.
    fn into_ranked(self) -> (u64, Vec<(K, u64)>) {
        let counts = self.counts;
        let mut ranked: Vec<(K, u64)> = self
            .order
            .into_iter()
            .map(|key| {
                let count = counts[&key];
                (key, count)
            })
            .collect();
        ranked.par_sort_by(|a, b| b.1.cmp(&a.1));
        let total = ranked.iter().map(|(_, count)| count).sum();
        (total, ranked)
    }
}

fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Frequency of every canonical-alphabet letter across the records'
/// normalized text.
pub fn letter_frequency(records: &[VerseRecord]) -> Vec<LetterFrequency> {
    let mut counter = OrderedCounter::new();
    for record in records {
        for ch in record.text_normalized.chars() {
            if is_normalized_letter(ch) {
                counter.add(ch);
            }
        }
    }
    let (total, ranked) = counter.into_ranked();
    ranked
        .into_iter()
        .map(|(letter, count)| LetterFrequency {
            letter,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

/// Frequency of every distinct token across the records.
///
/// Tokenization is per record; verse texts are never concatenated first, so
/// a verse boundary can never merge two words.
pub fn word_frequency(records: &[VerseRecord]) -> Vec<WordFrequency> {
    let mut counter = OrderedCounter::new();
    for record in records {
        for token in tokens(&record.text_normalized) {
            counter.add(token.to_string());
        }
    }
    let (total, ranked) = counter.into_ranked();
    ranked
        .into_iter()
        .map(|(word, count)| WordFrequency {
            word,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

/// Frequency of the first letter of each token.
pub fn word_start_frequency(records: &[VerseRecord]) -> WordStartFrequency {
    let mut counter = OrderedCounter::new();
    let mut tokens_scanned = 0;
    for record in records {
        for token in tokens(&record.text_normalized) {
            tokens_scanned += 1;
            if let Some(first) = token.chars().next() {
                if is_normalized_letter(first) {
                    counter.add(first);
                }
            }
        }
    }
    let (total, ranked) = counter.into_ranked();
    WordStartFrequency {
        tokens_scanned,
        entries: ranked
            .into_iter()
            .map(|(letter, count)| LetterFrequency {
                letter,
                count,
                percentage: percentage(count, total),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mushaf_core::{RecordBuilder, SurahMeta};

    fn records_from(verses: &[&str]) -> Vec<VerseRecord> {
        let builder = RecordBuilder::new();
        let meta = SurahMeta {
            index: 1,
            name_en: "Test".to_string(),
            name_ar: "اختبار".to_string(),
            revelation_place: "Mecca".to_string(),
            revelation_type: "Makkiyah".to_string(),
            juz_boundaries: vec![],
        };
        let pairs: Vec<(String, String)> = verses
            .iter()
            .enumerate()
            .map(|(i, text)| (format!("verse_{}", i + 1), text.to_string()))
            .collect();
        builder.build_chapter(&meta, &pairs)
    }

    #[test]
    fn counts_sum_to_percentage_denominator() {
        let records = records_from(&["بِسْمِ اللَّهِ", "الرَّحْمَنِ"]);
        let table = letter_frequency(&records);
        let total: u64 = table.iter().map(|e| e.count).sum();
        assert_eq!(total, 13);
        let pct_sum: f64 = table.iter().map(|e| e.percentage).sum();
        assert!((pct_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn descending_with_first_encounter_ties() {
        // ب appears once, س appears once; both first seen in that order.
        let records = records_from(&["ب س ب"]);
        let table = letter_frequency(&records);
        assert_eq!(table[0].letter, 'ب');
        assert_eq!(table[0].count, 2);
        assert_eq!(table[1].letter, 'س');
        assert_eq!(table[1].count, 1);

        // Reverse first encounter flips the tie order.
        let records = records_from(&["س ب"]);
        let table = letter_frequency(&records);
        assert_eq!(table[0].letter, 'س');
        assert_eq!(table[1].letter, 'ب');
    }

    #[test]
    fn word_boundaries_never_merge() {
        // Last word of verse 1 and first word of verse 2 stay distinct
        // tokens even though their concatenation would form one.
        let records = records_from(&["ما لك", "يوم الدين"]);
        let table = word_frequency(&records);
        let words: Vec<&str> = table.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words.len(), 4);
        assert!(!words.contains(&"لكيوم"));
    }

    #[test]
    fn two_verse_scenario_end_to_end() {
        let records = records_from(&["بِسْمِ اللَّهِ", "الرَّحْمَنِ الرَّحِيمِ"]);

        let words = word_frequency(&records);
        assert_eq!(words.len(), 4);
        let forms: Vec<&str> = words.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(forms, ["بسم", "الله", "الرحمن", "الرحيم"]);
        assert!(words.iter().all(|e| e.count == 1));

        let letters = letter_frequency(&records);
        assert!(letters
            .iter()
            .all(|e| mushaf_text::is_normalized_letter(e.letter)));
        let total: u64 = letters.iter().map(|e| e.count).sum();
        let expected: u64 = records
            .iter()
            .map(|r| mushaf_text::letter_count(&r.text_normalized))
            .sum();
        assert_eq!(total, expected);
    }

    #[test]
    fn empty_records_yield_empty_tables() {
        let table = letter_frequency(&[]);
        assert!(table.is_empty());
        let starts = word_start_frequency(&[]);
        assert_eq!(starts.tokens_scanned, 0);
        assert!(starts.entries.is_empty());
    }

    #[test]
    fn word_starts_scan_all_tokens() {
        let records = records_from(&["بسم الله الرحمن"]);
        let starts = word_start_frequency(&records);
        assert_eq!(starts.tokens_scanned, 3);
        assert_eq!(starts.entries[0].letter, 'ا');
        assert_eq!(starts.entries[0].count, 2);
    }
}
