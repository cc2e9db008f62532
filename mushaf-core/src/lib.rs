use mushaf_text::{AbjadScorer, Normalizer};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("duplicate verse {verse} in surah {surah}")]
    DuplicateVerse { surah: u32, verse: u32 },
}

/// One juz (reading division) range inside a chapter, verse-inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct JuzBoundary {
    pub juz_index: u8,
    pub start_verse: u32,
    pub end_verse: u32,
}

impl JuzBoundary {
    pub fn contains(&self, verse_index: u32) -> bool {
        self.start_verse <= verse_index && verse_index <= self.end_verse
    }
}

/// Chapter metadata descriptor, validated by the loader before it gets here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurahMeta {
    pub index: u32,
    pub name_en: String,
    pub name_ar: String,
    pub revelation_place: String,
    pub revelation_type: String,
    pub juz_boundaries: Vec<JuzBoundary>,
}

impl SurahMeta {
    /// First boundary whose range contains the verse, scanned in order.
    /// `None` when nothing matches; never a guessed division.
    pub fn juz_for(&self, verse_index: u32) -> Option<u8> {
        self.juz_boundaries
            .iter()
            .find(|boundary| boundary.contains(verse_index))
            .map(|boundary| boundary.juz_index)
    }
}

/// One verse of the unified corpus table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerseRecord {
    pub surah_index: u32,
    pub surah_name_en: String,
    pub surah_name_ar: String,
    pub verse_index: u32,
    /// Original text including diacritics; never mutated.
    pub text_raw: String,
    /// Canonical analysis form; computed once at build time.
    pub text_normalized: String,
    /// Abjad value of `text_raw`; computed once at build time.
    pub abjad_value: u64,
    pub juz_index: Option<u8>,
    pub revelation_place: String,
    pub revelation_type: String,
}

/// Parse a `verse_<n>` position marker. Any other key shape is a
/// chapter-level annotation entry and yields `None`.
pub fn parse_verse_key(key: &str) -> Option<u32> {
    key.strip_prefix("verse_")?.parse().ok()
}

/// Builds the verse records of one chapter from its raw verse map and
/// validated metadata.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    normalizer: Normalizer,
    scorer: AbjadScorer,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce records for every `verse_<n>` entry, in input order.
    /// Non-marker keys are skipped; normalization and scoring run exactly
    /// once per verse, here.
    pub fn build_chapter(&self, meta: &SurahMeta, verses: &[(String, String)]) -> Vec<VerseRecord> {
        verses
            .iter()
            .filter_map(|(key, text)| {
                let verse_index = parse_verse_key(key)?;
                Some(VerseRecord {
                    surah_index: meta.index,
                    surah_name_en: meta.name_en.clone(),
                    surah_name_ar: meta.name_ar.clone(),
                    verse_index,
                    text_raw: text.clone(),
                    text_normalized: self.normalizer.normalize(text),
                    abjad_value: self.scorer.value(text),
                    juz_index: meta.juz_for(verse_index),
                    revelation_place: meta.revelation_place.clone(),
                    revelation_type: meta.revelation_type.clone(),
                })
            })
            .collect()
    }
}

/// The unified corpus table: every verse record, sorted ascending by
/// `(surah_index, verse_index)`, duplicates rejected at construction.
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusTable {
    records: Vec<VerseRecord>,
}

impl CorpusTable {
    pub fn from_records(mut records: Vec<VerseRecord>) -> Result<Self, CorpusError> {
        records.sort_by_key(|r| (r.surah_index, r.verse_index));
        if let Some(dup) = records
            .windows(2)
            .find(|w| w[0].surah_index == w[1].surah_index && w[0].verse_index == w[1].verse_index)
        {
            return Err(CorpusError::DuplicateVerse {
                surah: dup[0].surah_index,
                verse: dup[0].verse_index,
            });
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[VerseRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerseRecord> {
        self.records.iter()
    }

    /// Contiguous slice of one chapter's records. Relies on the canonical
    /// sort order; empty when the chapter is absent.
    pub fn surah_records(&self, surah_index: u32) -> &[VerseRecord] {
        let start = self
            .records
            .partition_point(|r| r.surah_index < surah_index);
        let end = self
            .records
            .partition_point(|r| r.surah_index <= surah_index);
        &self.records[start..end]
    }

    pub fn surah_indices(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self.records.iter().map(|r| r.surah_index).collect();
        indices.dedup();
        indices
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<VerseRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meta() -> SurahMeta {
        SurahMeta {
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
        }
    }

    #[test]
    fn juz_lookup_first_match_or_none() {
        let meta = sample_meta();
        assert_eq!(meta.juz_for(1), Some(1));
        assert_eq!(meta.juz_for(7), Some(1));
        assert_eq!(meta.juz_for(8), None);
        assert_eq!(meta.juz_for(0), None);
    }

    #[test]
    fn parses_verse_markers_only() {
        assert_eq!(parse_verse_key("verse_1"), Some(1));
        assert_eq!(parse_verse_key("verse_0"), Some(0));
        assert_eq!(parse_verse_key("verse_114"), Some(114));
        assert_eq!(parse_verse_key("bismillah"), None);
        assert_eq!(parse_verse_key("verse_"), None);
        assert_eq!(parse_verse_key("verse_x"), None);
    }

    #[test]
    fn builds_records_with_derived_fields() {
        let builder = RecordBuilder::new();
        let verses = vec![
            ("verse_1".to_string(), "بِسْمِ اللَّهِ".to_string()),
            ("bismillah".to_string(), "skipped".to_string()),
            ("verse_2".to_string(), "الرَّحْمَنِ".to_string()),
        ];
        let records = builder.build_chapter(&sample_meta(), &verses);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].verse_index, 1);
        assert_eq!(records[0].text_raw, "بِسْمِ اللَّهِ");
        assert_eq!(records[0].text_normalized, "بسم الله");
        assert_eq!(records[0].abjad_value, 168);
        assert_eq!(records[0].juz_index, Some(1));
        assert_eq!(records[1].text_normalized, "الرحمن");
    }

    #[test]
    fn unmatched_verse_gets_no_division() {
        let builder = RecordBuilder::new();
        let verses = vec![("verse_9".to_string(), "نص".to_string())];
        let records = builder.build_chapter(&sample_meta(), &verses);
        assert_eq!(records[0].juz_index, None);
    }

    #[test]
    fn table_sorts_canonically() {
        let builder = RecordBuilder::new();
        let mut meta = sample_meta();
        let mut records = builder.build_chapter(
            &meta,
            &[
                ("verse_2".to_string(), "ب".to_string()),
                ("verse_1".to_string(), "ا".to_string()),
            ],
        );
        meta.index = 2;
        let mut second = builder.build_chapter(&meta, &[("verse_1".to_string(), "ج".to_string())]);
        second.append(&mut records);

        let table = CorpusTable::from_records(second).unwrap();
        let order: Vec<_> = table
            .iter()
            .map(|r| (r.surah_index, r.verse_index))
            .collect();
        assert_eq!(order, [(1, 1), (1, 2), (2, 1)]);
        assert_eq!(table.surah_indices(), [1, 2]);
        assert_eq!(table.surah_records(1).len(), 2);
        assert_eq!(table.surah_records(2).len(), 1);
        assert!(table.surah_records(3).is_empty());
    }

    #[test]
    fn table_rejects_duplicates() {
        let builder = RecordBuilder::new();
        let verses = vec![("verse_1".to_string(), "ا".to_string())];
        let mut records = builder.build_chapter(&sample_meta(), &verses);
        records.extend(builder.build_chapter(&sample_meta(), &verses));

        let err = CorpusTable::from_records(records).unwrap_err();
        assert!(matches!(
            err,
            CorpusError::DuplicateVerse { surah: 1, verse: 1 }
        ));
    }
}
