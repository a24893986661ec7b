//! Shared "analysis pipeline" logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! archive bytes -> member CSV -> clean record set -> analytics
//!
//! The CLI front-end can then focus on presentation.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::analysis::{AnalysisSummary, summarize};
use crate::clean::{CleanSet, RecordFilter, clean_records};
use crate::data::{ArchiveCache, Jurisdiction, LvrClient};
use crate::domain::{AnalysisConfig, Season};
use crate::error::AppError;
use crate::io::read_member;

/// All computed outputs of a single `lvr analyze` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub jurisdiction: Jurisdiction,
    /// Header row of the archive member, for the CSV export.
    pub headers: Vec<String>,
    pub malformed_rows: usize,
    pub clean: CleanSet,
    pub summary: AnalysisSummary,
}

/// Resolve the archive (local file or cached download) and run the analysis.
pub fn run_analysis(config: &AnalysisConfig, cache: &mut ArchiveCache) -> Result<RunOutput, AppError> {
    // Fail on an unknown city before downloading anything.
    Jurisdiction::lookup(&config.city)?;
    let archive = load_archive(config.season, config.archive_path.as_deref(), cache)?;
    run_analysis_with_archive(config, &archive)
}

/// Run the analysis over archive bytes that are already in memory.
pub fn run_analysis_with_archive(config: &AnalysisConfig, archive: &[u8]) -> Result<RunOutput, AppError> {
    let jurisdiction = Jurisdiction::lookup(&config.city)?;
    let table = read_member(archive, &jurisdiction.member_name())?;
    info!(
        city = jurisdiction.name,
        rows = table.records.len(),
        malformed = table.malformed_rows,
        "parsed sales table"
    );

    let filter = RecordFilter::new(config.districts.clone(), config.subject);
    let clean = clean_records(table.records, &filter);
    let summary = summarize(&clean, config)?;

    Ok(RunOutput {
        jurisdiction,
        headers: table.headers,
        malformed_rows: table.malformed_rows,
        clean,
        summary,
    })
}

/// Sorted districts with at least one clean (unfiltered) sales record.
pub fn list_districts(
    season: Season,
    city: &str,
    archive_path: Option<&Path>,
    cache: &mut ArchiveCache,
) -> Result<Vec<String>, AppError> {
    let jurisdiction = Jurisdiction::lookup(city)?;
    let archive = load_archive(season, archive_path, cache)?;
    list_districts_in_archive(jurisdiction, &archive)
}

pub fn list_districts_in_archive(jurisdiction: Jurisdiction, archive: &[u8]) -> Result<Vec<String>, AppError> {
    let table = read_member(archive, &jurisdiction.member_name())?;
    let clean = clean_records(table.records, &RecordFilter::pass_all());
    Ok(clean.districts())
}

fn load_archive(season: Season, path: Option<&Path>, cache: &mut ArchiveCache) -> Result<Arc<[u8]>, AppError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "reading local season archive");
            let bytes = fs::read(path)
                .map_err(|e| AppError::upstream(format!("Failed to read archive '{}': {e}", path.display())))?;
            Ok(Arc::from(bytes))
        }
        None => {
            let client = LvrClient::from_env()?;
            cache.get_or_fetch(season, Utc::now(), &client)
        }
    }
}
