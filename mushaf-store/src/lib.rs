//! Corpus Store
//!
//! Loads the raw per-chapter JSON corpus, builds the unified table, and
//! persists it: JSONL for lossless round-trips, CSV as a one-way export for
//! spreadsheet work. All paths derive from one explicit root; there is no
//! global path state.

mod source;

pub use source::{load_chapter, load_descriptors, ChapterSource, SurahDescriptor};

use mushaf_core::{CorpusError, CorpusTable, RecordBuilder, SurahMeta, VerseRecord};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Fixed number of chapters in the corpus.
pub const CHAPTER_COUNT: u32 = 114;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("chapter {chapter}: descriptor missing required field `{field}`")]
    MalformedMetadata {
        chapter: String,
        field: &'static str,
    },

    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("corpus table {path} not found; run `build` first")]
    TableMissing { path: PathBuf },
}

/// All file locations, derived from one root directory.
#[derive(Debug, Clone)]
pub struct StorePaths {
    root: PathBuf,
}

impl StorePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Corpus-wide chapter descriptor file.
    pub fn metadata_file(&self) -> PathBuf {
        self.root.join("surah.json")
    }

    /// Raw chapter file for one surah.
    pub fn chapter_file(&self, surah_index: u32) -> PathBuf {
        self.root.join("surah").join(format!("surah_{surah_index}.json"))
    }

    /// Unified table, JSONL.
    pub fn table_file(&self) -> PathBuf {
        self.root.join("corpus.jsonl")
    }

    /// Unified table, CSV export.
    pub fn csv_file(&self) -> PathBuf {
        self.root.join("corpus.csv")
    }

    /// Directory for generated reports.
    pub fn results_dir(&self) -> PathBuf {
        self.root.join("results")
    }
}

/// Build the unified corpus table from the raw source files.
///
/// Chapters are independent, so they fan out across a parallel iterator;
/// the table constructor re-sorts into canonical order, which keeps the
/// output identical to a sequential build. A missing chapter file is a
/// warning and a skip; a missing or malformed descriptor is fatal.
pub fn build_corpus(paths: &StorePaths) -> Result<CorpusTable, StoreError> {
    let descriptors = load_descriptors(&paths.metadata_file())?;
    let builder = RecordBuilder::new();

    let chapters: Vec<Vec<VerseRecord>> = (1..=CHAPTER_COUNT)
        .into_par_iter()
        .map(|index| -> Result<Vec<VerseRecord>, StoreError> {
            let path = paths.chapter_file(index);
            if !path.exists() {
                warn!(surah = index, path = %path.display(), "chapter file not found, skipping");
                return Ok(Vec::new());
            }

            let chapter = load_chapter(&path)?;
            let descriptor =
                descriptors
                    .get(&chapter.index)
                    .ok_or_else(|| StoreError::MalformedMetadata {
                        chapter: chapter.index.to_string(),
                        field: "descriptor entry",
                    })?;

            let meta = SurahMeta {
                index: chapter.index,
                name_en: chapter.name_en.clone(),
                name_ar: descriptor.name_ar.clone(),
                revelation_place: descriptor.revelation_place.clone(),
                revelation_type: descriptor.revelation_type.clone(),
                juz_boundaries: descriptor.juz_boundaries.clone(),
            };
            Ok(builder.build_chapter(&meta, &chapter.verses))
        })
        .collect::<Result<_, _>>()?;

    let records: Vec<VerseRecord> = chapters.into_iter().flatten().collect();
    let table = CorpusTable::from_records(records)?;
    info!(verses = table.len(), "corpus table built");
    Ok(table)
}

/// Write the table as JSONL, one record per line. `juz_index: None`
/// serializes as a JSON `null`, so absence round-trips as absence.
pub fn save_table(table: &CorpusTable, path: &Path) -> Result<(), StoreError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for record in table.records() {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    info!(verses = table.len(), path = %path.display(), "corpus table saved");
    Ok(())
}

/// Reload a table persisted by [`save_table`]. Construction re-validates
/// ordering and uniqueness.
pub fn load_table(path: &Path) -> Result<CorpusTable, StoreError> {
    if !path.exists() {
        return Err(StoreError::TableMissing {
            path: path.to_path_buf(),
        });
    }
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(CorpusTable::from_records(records)?)
}

/// One-way CSV export of the table.
pub fn export_csv(table: &CorpusTable, path: &Path) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in table.records() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
