//! Command-line parsing for the transaction-price analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the cleaning/analytics code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Season, SubjectFilter};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lvr", version, about = "Real-estate actual-price (實價登錄) analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clean a season's sales records and print the market report.
    Analyze(AnalyzeArgs),
    /// List the districts present in a city's sales records.
    Districts(SourceArgs),
    /// List supported cities/counties and their archive codes.
    Cities,
}

/// Where the season archive comes from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Release season, e.g. `113S2` (ROC year 113, Q2).
    #[arg(short = 's', long, default_value = "113S2")]
    pub season: Season,

    /// City/county name (e.g. 雲林縣) or archive code (e.g. P).
    #[arg(short = 'c', long, default_value = "雲林縣")]
    pub city: String,

    /// Read a previously downloaded season ZIP instead of fetching it.
    #[arg(long, value_name = "ZIP")]
    pub archive: Option<PathBuf>,
}

/// Options for `lvr analyze`.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// District(s) to keep; repeat the flag for several. Omit for all districts.
    #[arg(short = 'd', long = "district", value_name = "NAME")]
    pub districts: Vec<String>,

    /// Transaction subject to keep.
    #[arg(long, value_enum, default_value_t = SubjectFilter::BuildingLand)]
    pub subject: SubjectFilter,

    /// Bin width (萬/坪) for the hottest unit-price band.
    #[arg(long, default_value_t = 5)]
    pub price_width: u32,

    /// Bin width (萬元) for the hottest total-price band.
    #[arg(long, default_value_t = 100)]
    pub total_width: u32,

    /// Number of clean rows to preview in the report.
    #[arg(long, default_value_t = 10)]
    pub preview: usize,

    /// Export the clean record set to CSV (UTF-8 with BOM).
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Write the analysis summary to JSON.
    #[arg(long = "summary-json", value_name = "JSON")]
    pub summary_json: Option<PathBuf>,
}
