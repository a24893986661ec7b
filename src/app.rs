//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the season archive (local file or cached download)
//! - cleans records and runs the analytics
//! - prints the report and writes optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{AnalyzeArgs, Command, SourceArgs};
use crate::data::{ArchiveCache, JURISDICTIONS};
use crate::domain::AnalysisConfig;
use crate::error::AppError;

pub mod pipeline;

const NO_DATA_HINT: &str = "查無資料，請嘗試放寬篩選條件。";

/// Entry point for the `lvr` binary.
pub fn run() -> Result<(), AppError> {
    crate::logging::init();

    // `lvr` and `lvr -d 斗六市` behave like `lvr analyze ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Districts(args) => handle_districts(args),
        Command::Cities => handle_cities(),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args);
    let mut cache = ArchiveCache::from_env()?;
    let run = pipeline::run_analysis(&config, &mut cache)?;

    if run.clean.is_empty() {
        return Err(AppError::no_data(format!(
            "{NO_DATA_HINT} ({} {}, {} row(s) read, {} outside the filter)",
            run.jurisdiction.name, config.season, run.clean.stats.rows_read, run.clean.stats.filtered_out
        )));
    }

    println!("{}", crate::report::format_report(&run, config.preview_rows));

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::write_clean_csv(path, &run.headers, &run.clean.records)?;
        info!(path = %path.display(), rows = run.clean.len(), "wrote clean record set");
    }
    if let Some(path) = &config.summary_json {
        crate::io::write_summary_json(path, &run.summary)?;
        info!(path = %path.display(), "wrote analysis summary");
    }

    Ok(())
}

fn handle_districts(args: SourceArgs) -> Result<(), AppError> {
    let mut cache = ArchiveCache::from_env()?;
    let districts = pipeline::list_districts(args.season, &args.city, args.archive.as_deref(), &mut cache)?;
    if districts.is_empty() {
        return Err(AppError::no_data(format!(
            "{NO_DATA_HINT} ({} {} has no usable sales records)",
            args.city, args.season
        )));
    }
    for d in districts {
        println!("{d}");
    }
    Ok(())
}

fn handle_cities() -> Result<(), AppError> {
    for j in JURISDICTIONS.iter() {
        println!("{}  {}", j.code, j.name);
    }
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    AnalysisConfig {
        season: args.source.season,
        city: args.source.city.trim().to_string(),
        archive_path: args.source.archive.clone(),
        districts: args
            .districts
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect(),
        subject: args.subject,
        price_band_width: args.price_width,
        total_band_width: args.total_width,
        preview_rows: args.preview,
        export_csv: args.export.clone(),
        summary_json: args.summary_json.clone(),
    }
}

/// Rewrite argv so `lvr` defaults to `lvr analyze`.
///
/// Rules:
/// - `lvr`                      -> `lvr analyze`
/// - `lvr -d 斗六市 ...`         -> `lvr analyze -d 斗六市 ...`
/// - `lvr --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("analyze".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "districts" | "cities");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "analyze".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_analyze() {
        assert_eq!(rewrite_args(argv(&["lvr"])), argv(&["lvr", "analyze"]));
        assert_eq!(
            rewrite_args(argv(&["lvr", "-d", "斗六市"])),
            argv(&["lvr", "analyze", "-d", "斗六市"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(argv(&["lvr", "cities"])), argv(&["lvr", "cities"]));
        assert_eq!(rewrite_args(argv(&["lvr", "--help"])), argv(&["lvr", "--help"]));
    }

    #[test]
    fn config_drops_blank_districts() {
        let cli = crate::cli::Cli::parse_from(argv(&[
            "lvr", "analyze", "-s", "112S4", "-c", " P ", "-d", " 斗六市 ", "-d", "  ", "--subject", "land",
        ]));
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        let config = analysis_config_from_args(&args);
        assert_eq!(config.season.to_string(), "112S4");
        assert_eq!(config.city, "P");
        assert_eq!(config.districts.iter().collect::<Vec<_>>(), vec!["斗六市"]);
        assert_eq!(config.subject, crate::domain::SubjectFilter::Land);
        assert_eq!(config.price_band_width, 5);
        assert_eq!(config.total_band_width, 100);
    }
}
