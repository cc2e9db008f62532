use anyhow::Context;
use clap::{Parser, Subcommand};
use mushaf_analysis::{
    concept_frequency, detect_primes, letter_frequency, word_frequency, word_start_frequency,
};
use mushaf_cli::report;
use mushaf_core::CorpusTable;
use mushaf_store::{self as store, StorePaths};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "mushaf", about = "Quran corpus metrics and analysis toolkit")]
struct Cli {
    /// Corpus root directory: surah.json, surah/, and generated outputs
    #[arg(long, global = true, env = "MUSHAF_DIR", default_value = "./corpus")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the unified corpus table and persist it (JSONL + CSV)
    Build,
    /// Corpus-wide letter frequency report
    Letters,
    /// Corpus-wide word frequency report
    Words,
    /// Word start-letter frequency report
    WordStarts,
    /// Letter frequency report for a single surah
    Chapter {
        #[arg(long)]
        index: u32,
    },
    /// Letter frequency blocks for every surah in the table
    Chapters,
    /// Conceptual stem frequency report
    Concepts,
    /// Prime coincidence detection (JSON + text report)
    Primes,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let paths = StorePaths::new(&cli.data_dir);

    match cli.command {
        Commands::Build => build(&paths),
        Commands::Letters => letters(&paths),
        Commands::Words => words(&paths),
        Commands::WordStarts => word_starts(&paths),
        Commands::Chapter { index } => chapter(&paths, index),
        Commands::Chapters => chapters(&paths),
        Commands::Concepts => concepts(&paths),
        Commands::Primes => primes(&paths),
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn load(paths: &StorePaths) -> anyhow::Result<CorpusTable> {
    store::load_table(&paths.table_file()).context("loading corpus table")
}

fn write_report(paths: &StorePaths, name: &str, content: &str) -> anyhow::Result<PathBuf> {
    let dir = paths.results_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(name);
    fs::write(&path, content)?;
    info!(path = %path.display(), "report saved");
    Ok(path)
}

fn build(paths: &StorePaths) -> anyhow::Result<()> {
    let table = store::build_corpus(paths)?;
    store::save_table(&table, &paths.table_file())?;
    store::export_csv(&table, &paths.csv_file())?;
    info!(
        verses = table.len(),
        surahs = table.surah_indices().len(),
        "corpus build complete"
    );
    Ok(())
}

fn letters(paths: &StorePaths) -> anyhow::Result<()> {
    let table = load(paths)?;
    let entries = letter_frequency(table.records());
    let out = report::letter_frequency_report(&entries);
    write_report(paths, "letter_frequency_analysis.txt", &out)?;
    println!("{out}");
    Ok(())
}

fn words(paths: &StorePaths) -> anyhow::Result<()> {
    let table = load(paths)?;
    let entries = word_frequency(table.records());
    let total: u64 = entries.iter().map(|e| e.count).sum();
    let out = report::word_frequency_report(&entries);
    write_report(paths, "word_frequency_analysis.txt", &out)?;
    println!("Total Words: {}", report::thousands(total));
    println!("Unique Words: {}", report::thousands(entries.len() as u64));
    Ok(())
}

fn word_starts(paths: &StorePaths) -> anyhow::Result<()> {
    let table = load(paths)?;
    let starts = word_start_frequency(table.records());
    let out = report::word_start_report(&starts);
    write_report(paths, "word_start_letter_frequency.txt", &out)?;
    println!("{out}");
    Ok(())
}

fn chapter(paths: &StorePaths, index: u32) -> anyhow::Result<()> {
    let table = load(paths)?;
    let records = table.surah_records(index);
    anyhow::ensure!(
        !records.is_empty(),
        "surah {index} not found in the corpus table"
    );

    let entries = letter_frequency(records);
    let out = report::surah_letter_report(
        index,
        &records[0].surah_name_en,
        &records[0].surah_name_ar,
        records.len() as u64,
        &entries,
    );
    write_report(paths, &format!("surah_{index}_frequency.txt"), &out)?;
    println!("{out}");
    Ok(())
}

fn chapters(paths: &StorePaths) -> anyhow::Result<()> {
    let table = load(paths)?;
    let mut blocks = Vec::new();
    for index in table.surah_indices() {
        let records = table.surah_records(index);
        let entries = letter_frequency(records);
        blocks.push(report::surah_letter_report(
            index,
            &records[0].surah_name_en,
            &records[0].surah_name_ar,
            records.len() as u64,
            &entries,
        ));
        info!(surah = index, "processed");
    }
    let separator = format!("\n{}\n\n", "=".repeat(40));
    write_report(
        paths,
        "all_surahs_frequency_analysis.txt",
        &blocks.join(&separator),
    )?;
    Ok(())
}

fn concepts(paths: &StorePaths) -> anyhow::Result<()> {
    let table = load(paths)?;
    let set = mushaf_text::default_concepts();
    let reports = concept_frequency(table.records(), &set);
    let out = report::concepts_report(&reports);
    write_report(paths, "conceptual_word_frequency.txt", &out)?;
    println!("{out}");
    Ok(())
}

fn primes(paths: &StorePaths) -> anyhow::Result<()> {
    let table = load(paths)?;
    let surahs = detect_primes(table.records());

    let document = report::PrimesDocument::new(&surahs);
    let json = serde_json::to_string_pretty(&document)?;
    write_report(paths, "prime-numbers.json", &json)?;

    let text = report::primes_text_report(&surahs);
    write_report(paths, "prime-numbers.txt", &text)?;

    let flagged = surahs.iter().filter(|s| !s.primes_found.is_empty()).count();
    info!(
        surahs = surahs.len(),
        flagged,
        "prime analysis complete"
    );
    Ok(())
}
