//! Raw corpus file parsing.
//!
//! The source ships one descriptor file (`surah.json`) for the whole corpus
//! and one JSON file per chapter (`surah/surah_<n>.json`). Parsing is
//! permissive about value shapes the source is known to vary on (indices as
//! strings or numbers, non-string verse values), strict about required
//! metadata fields.

use crate::StoreError;
use mushaf_core::{parse_verse_key, JuzBoundary};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Index values appear both as zero-padded strings and as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IndexValue {
    Num(u32),
    Text(String),
}

impl IndexValue {
    fn as_u32(&self) -> Option<u32> {
        match self {
            IndexValue::Num(n) => Some(*n),
            IndexValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    index: IndexValue,
    place: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(rename = "titleAr")]
    title_ar: Option<String>,
    #[serde(default)]
    juz: Vec<RawJuz>,
}

#[derive(Debug, Deserialize)]
struct RawJuz {
    index: IndexValue,
    verse: RawJuzRange,
}

#[derive(Debug, Deserialize)]
struct RawJuzRange {
    start: String,
    end: String,
}

/// Validated chapter descriptor, minus what the chapter file provides.
#[derive(Debug, Clone)]
pub struct SurahDescriptor {
    pub name_ar: String,
    pub revelation_place: String,
    pub revelation_type: String,
    pub juz_boundaries: Vec<JuzBoundary>,
}

/// One chapter file: its index, display name, and raw verse map in file
/// order. Non-verse keys are kept here; the record builder skips them.
#[derive(Debug, Clone)]
pub struct ChapterSource {
    pub index: u32,
    pub name_en: String,
    pub verses: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct RawChapter {
    index: IndexValue,
    name: String,
    verse: serde_json::Map<String, serde_json::Value>,
}

fn malformed(chapter: impl Into<String>, field: &'static str) -> StoreError {
    StoreError::MalformedMetadata {
        chapter: chapter.into(),
        field,
    }
}

/// Load and validate every chapter descriptor. Missing required fields are
/// fatal; a silently wrong name or division would corrupt every report.
pub fn load_descriptors(path: &Path) -> Result<HashMap<u32, SurahDescriptor>, StoreError> {
    let reader = BufReader::new(File::open(path)?);
    let raw: Vec<RawDescriptor> = serde_json::from_reader(reader)?;

    let mut descriptors = HashMap::with_capacity(raw.len());
    for entry in raw {
        let index = entry
            .index
            .as_u32()
            .ok_or_else(|| malformed("?", "index"))?;
        let chapter = index.to_string();

        let mut juz_boundaries = Vec::with_capacity(entry.juz.len());
        for j in &entry.juz {
            let juz_index = j
                .index
                .as_u32()
                .ok_or_else(|| malformed(chapter.clone(), "juz.index"))?;
            let start_verse = parse_verse_key(&j.verse.start)
                .ok_or_else(|| malformed(chapter.clone(), "juz.verse.start"))?;
            let end_verse = parse_verse_key(&j.verse.end)
                .ok_or_else(|| malformed(chapter.clone(), "juz.verse.end"))?;
            juz_boundaries.push(JuzBoundary {
                juz_index: juz_index as u8,
                start_verse,
                end_verse,
            });
        }

        let descriptor = SurahDescriptor {
            name_ar: entry.title_ar.ok_or_else(|| malformed(chapter.clone(), "titleAr"))?,
            revelation_place: entry.place.ok_or_else(|| malformed(chapter.clone(), "place"))?,
            revelation_type: entry.kind.ok_or_else(|| malformed(chapter.clone(), "type"))?,
            juz_boundaries,
        };
        descriptors.insert(index, descriptor);
    }
    Ok(descriptors)
}

/// Load one chapter file, keeping the verse map in file order.
pub fn load_chapter(path: &Path) -> Result<ChapterSource, StoreError> {
    let reader = BufReader::new(File::open(path)?);
    let raw: RawChapter = serde_json::from_reader(reader)?;

    let index = raw
        .index
        .as_u32()
        .ok_or_else(|| malformed(path.display().to_string(), "index"))?;

    let verses = raw
        .verse
        .into_iter()
        .map(|(key, value)| {
            // Non-string verse values degrade to empty text, mirroring the
            // normalizer's total-function contract.
            let text = value.as_str().unwrap_or_default().to_string();
            (key, text)
        })
        .collect();

    Ok(ChapterSource {
        index,
        name_en: raw.name,
        verses,
    })
}
