//! Text and JSON report writers.

use chrono::{DateTime, Utc};
use mushaf_analysis::{
    ConceptReport, LetterFrequency, Metrics, SurahMetric, SurahPrimes, VerseMetric,
    WordFrequency, WordStartFrequency,
};
use serde::Serialize;
use std::fmt::Write;

/// Group digits in threes, the way the original reports printed counts.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn letter_table(out: &mut String, entries: &[LetterFrequency]) {
    let _ = writeln!(out, "{:<10} | {:<10} | {:<10}", "Letter", "Count", "Percentage");
    let _ = writeln!(out, "{}", "-".repeat(36));
    for entry in entries {
        let _ = writeln!(
            out,
            "'{}'        | {:<10} | {:.2}%",
            entry.letter,
            thousands(entry.count),
            entry.percentage
        );
    }
}

/// Corpus-wide letter frequency report.
pub fn letter_frequency_report(entries: &[LetterFrequency]) -> String {
    let total: u64 = entries.iter().map(|e| e.count).sum();
    let mut out = String::new();
    let _ = writeln!(out, "--- Letter Frequency Analysis ---");
    let _ = writeln!(out, "Total Letters Count: {}", thousands(total));
    let _ = writeln!(out, "Unique Characters Found: {}", entries.len());
    let _ = writeln!(out, "\nLetter Frequency (Descending):");
    letter_table(&mut out, entries);
    out
}

/// Corpus-wide word frequency report, every distinct word ranked.
pub fn word_frequency_report(entries: &[WordFrequency]) -> String {
    let total: u64 = entries.iter().map(|e| e.count).sum();
    let mut out = String::new();
    let _ = writeln!(out, "--- Word Frequency Analysis ---");
    let _ = writeln!(out, "Total Words Count: {}", thousands(total));
    let _ = writeln!(out, "Unique Words Count: {}", thousands(entries.len() as u64));
    let _ = writeln!(out, "\nTop Frequent Words:");
    let _ = writeln!(
        out,
        "{:<6} | {:<20} | {:<10} | {:<10}",
        "Rank", "Word", "Count", "Frequency"
    );
    let _ = writeln!(out, "{}", "-".repeat(55));
    for (rank, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<6} | {:<20} | {:<10} | {:.4}%",
            rank + 1,
            entry.word,
            thousands(entry.count),
            entry.percentage
        );
    }
    out
}

/// Word-start letter frequency report.
pub fn word_start_report(starts: &WordStartFrequency) -> String {
    let counted: u64 = starts.entries.iter().map(|e| e.count).sum();
    let mut out = String::new();
    let _ = writeln!(out, "--- Word Start Letter Frequency ---");
    let _ = writeln!(out, "Total Words Processed: {}", thousands(starts.tokens_scanned));
    let _ = writeln!(out, "Valid Start Letters Counted: {}", thousands(counted));
    let _ = writeln!(out, "\nFrequency by Letter (Descending):");
    letter_table(&mut out, &starts.entries);
    out
}

/// One chapter's letter frequency block.
pub fn surah_letter_report(
    surah_index: u32,
    name_en: &str,
    name_ar: &str,
    verse_count: u64,
    entries: &[LetterFrequency],
) -> String {
    let total: u64 = entries.iter().map(|e| e.count).sum();
    let mut out = String::new();
    let _ = writeln!(out, "SURAH {surah_index}: {name_en} ({name_ar})");
    let _ = writeln!(out, "Total Verses: {verse_count}");
    let _ = writeln!(out, "Total Letters: {}", thousands(total));
    letter_table(&mut out, entries);
    out
}

/// Conceptual frequency report with the top matched forms per concept.
pub fn concepts_report(reports: &[ConceptReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Conceptual Word Frequency Analysis ---");
    let _ = writeln!(out, "Counts based on normalized text, clitic prefixes included\n");
    let _ = writeln!(out, "{:<12} | {:<8} | {}", "Concept", "Count", "Top Forms");
    let _ = writeln!(out, "{}", "-".repeat(80));
    for report in reports {
        let top_forms: Vec<String> = report
            .forms
            .iter()
            .take(5)
            .map(|f| format!("{}({})", f.form, f.count))
            .collect();
        let _ = writeln!(
            out,
            "{:<12} | {:<8} | {}",
            report.concept,
            thousands(report.total),
            top_forms.join(", ")
        );
    }
    out
}

fn verse_metric_name(metric: VerseMetric) -> &'static str {
    match metric {
        VerseMetric::VerseIndex => "verse_index",
        VerseMetric::WordCount => "word_count",
        VerseMetric::LetterCount => "letter_count",
        VerseMetric::AbjadValue => "abjad_value",
    }
}

fn surah_metric_name(metric: SurahMetric) -> &'static str {
    match metric {
        SurahMetric::SurahIndex => "surah_index",
        SurahMetric::VerseCount => "verse_count",
        SurahMetric::TotalWordCount => "total_word_count",
        SurahMetric::TotalLetterCount => "total_letter_count",
        SurahMetric::TotalAbjadValue => "total_abjad_value",
    }
}

fn join_metrics<T: Copy>(metrics: &[T], name: impl Fn(T) -> &'static str) -> String {
    metrics.iter().map(|&m| name(m)).collect::<Vec<_>>().join(", ")
}

/// Primes JSON document, mirroring the plain-data report plus provenance.
#[derive(Debug, Serialize)]
pub struct PrimesDocument<'a> {
    pub metadata: PrimesMetadata,
    pub surahs: &'a [SurahPrimes],
}

#[derive(Debug, Serialize)]
pub struct PrimesMetadata {
    pub description: &'static str,
    pub metrics: Vec<&'static str>,
    pub generated_at: DateTime<Utc>,
}

impl<'a> PrimesDocument<'a> {
    pub fn new(surahs: &'a [SurahPrimes]) -> Self {
        Self {
            metadata: PrimesMetadata {
                description: "Prime number analysis of corpus metrics",
                metrics: vec![
                    "surah_index",
                    "verse_count",
                    "word_count",
                    "letter_count",
                    "abjad_value",
                ],
                generated_at: Utc::now(),
            },
            surahs,
        }
    }
}

/// Human-readable primes summary; chapters with no findings are omitted.
pub fn primes_text_report(surahs: &[SurahPrimes]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Prime Number Analysis Report");
    let _ = writeln!(out, "============================\n");

    for surah in surahs {
        if surah.primes_found.is_empty() && surah.prime_verses.is_empty() {
            continue;
        }
        let _ = writeln!(out, "Surah {}: {}", surah.surah_index, surah.surah_name_en);
        if !surah.primes_found.is_empty() {
            let Metrics {
                verse_count,
                word_count,
                letter_count,
                abjad_sum,
            } = surah.metrics;
            let _ = writeln!(
                out,
                "  - Surah Primes: {}",
                join_metrics(&surah.primes_found, surah_metric_name)
            );
            let _ = writeln!(
                out,
                "    (Verses: {verse_count}, Words: {word_count}, Letters: {letter_count}, Abjad: {abjad_sum})"
            );
        }
        if !surah.prime_verses.is_empty() {
            let _ = writeln!(
                out,
                "  - Prime Verses ({} found):",
                surah.prime_verses.len()
            );
            for verse in &surah.prime_verses {
                let _ = writeln!(
                    out,
                    "    * Verse {}: {} (W: {}, L: {}, A: {})",
                    verse.verse_index,
                    join_metrics(&verse.primes_found, verse_metric_name),
                    verse.word_count,
                    verse.letter_count,
                    verse.abjad_value
                );
            }
        }
        let _ = writeln!(out);
    }
    out
}
