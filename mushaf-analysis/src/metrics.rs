//! Metric aggregation over verse records.

use mushaf_core::VerseRecord;
use mushaf_text::{letter_count, word_count};
use serde::{Deserialize, Serialize};

/// Counts for one scope: a verse, a chapter, or the whole corpus.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metrics {
    pub verse_count: u64,
    pub word_count: u64,
    pub letter_count: u64,
    pub abjad_sum: u64,
}

/// Fold the records matching `scope` into one [`Metrics`].
///
/// Corpus and chapter aggregation are the same fold with different
/// predicates. Zero matching records yields all-zero metrics, not an error.
pub fn aggregate<'a, I, P>(records: I, scope: P) -> Metrics
where
    I: IntoIterator<Item = &'a VerseRecord>,
    P: Fn(&VerseRecord) -> bool,
{
    let mut metrics = Metrics::default();
    for record in records.into_iter().filter(|r| scope(r)) {
        metrics.verse_count += 1;
        metrics.word_count += word_count(&record.text_normalized);
        metrics.letter_count += letter_count(&record.text_normalized);
        metrics.abjad_sum += record.abjad_value;
    }
    metrics
}

/// Whole-corpus metrics.
pub fn corpus_metrics(records: &[VerseRecord]) -> Metrics {
    aggregate(records, |_| true)
}

/// Single-chapter metrics.
pub fn surah_metrics(records: &[VerseRecord], surah_index: u32) -> Metrics {
    aggregate(records, |r| r.surah_index == surah_index)
}

/// Metrics of one verse.
pub fn verse_metrics(record: &VerseRecord) -> Metrics {
    Metrics {
        verse_count: 1,
        word_count: word_count(&record.text_normalized),
        letter_count: letter_count(&record.text_normalized),
        abjad_sum: record.abjad_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mushaf_core::{JuzBoundary, RecordBuilder, SurahMeta};

    fn sample_records() -> Vec<VerseRecord> {
        let builder = RecordBuilder::new();
        let meta = SurahMeta {
            index: 1,
            name_en: "Al-Fatiha".to_string(),
            name_ar: "الفاتحة".to_string(),
            revelation_place: "Mecca".to_string(),
            revelation_type: "Makkiyah".to_string(),
            juz_boundaries: vec![JuzBoundary {
                juz_index: 1,
                start_verse: 1,
                end_verse: 7,
            }],
        };
        let mut records = builder.build_chapter(
            &meta,
            &[
                ("verse_1".to_string(), "بِسْمِ اللَّهِ".to_string()),
                ("verse_2".to_string(), "الرَّحْمَنِ".to_string()),
            ],
        );
        let meta2 = SurahMeta {
            index: 2,
            name_en: "Al-Baqara".to_string(),
            name_ar: "البقرة".to_string(),
            juz_boundaries: vec![],
            ..meta
        };
        records.extend(builder.build_chapter(&meta2, &[("verse_1".to_string(), "الم".to_string())]));
        records
    }

    #[test]
    fn aggregates_counts_and_sums() {
        let records = sample_records();
        let metrics = corpus_metrics(&records);
        assert_eq!(metrics.verse_count, 3);
        // "بسم الله" + "الرحمن" + "الم"
        assert_eq!(metrics.word_count, 4);
        assert_eq!(metrics.letter_count, 7 + 6 + 3);
        assert_eq!(metrics.abjad_sum, 168 + 329 + 71);
    }

    #[test]
    fn chapter_scope_uses_same_fold() {
        let records = sample_records();
        let first = surah_metrics(&records, 1);
        let second = surah_metrics(&records, 2);
        let whole = corpus_metrics(&records);
        assert_eq!(first.verse_count, 2);
        assert_eq!(second.verse_count, 1);
        assert_eq!(
            whole.abjad_sum,
            first.abjad_sum + second.abjad_sum
        );
    }

    #[test]
    fn empty_scope_is_all_zero() {
        let records = sample_records();
        let none = surah_metrics(&records, 99);
        assert_eq!(none, Metrics::default());
        assert_eq!(
            aggregate(std::iter::empty::<&VerseRecord>(), |_| true),
            Metrics::default()
        );
    }

    #[test]
    fn per_verse_letter_counts_sum_to_concatenation() {
        // Whitespace separators are not counted, so concatenating the
        // chapter's normalized text must not change the letter total.
        let records = sample_records();
        let per_verse: u64 = records
            .iter()
            .filter(|r| r.surah_index == 1)
            .map(|r| verse_metrics(r).letter_count)
            .sum();
        let concatenated: String = records
            .iter()
            .filter(|r| r.surah_index == 1)
            .map(|r| r.text_normalized.as_str())
            .collect();
        assert_eq!(per_verse, mushaf_text::letter_count(&concatenated));
    }
}
