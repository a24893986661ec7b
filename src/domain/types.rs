//! Shared domain types.
//!
//! This module defines:
//!
//! - request configuration (`AnalysisConfig`, `Season`, `SubjectFilter`)
//! - the record stages of the pipeline (`RawRecord` → `NormalizedRecord` → `CleanRecord`)
//! - analytics outputs (`Interval`, `TrendPoint`)

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which transaction subjects to keep.
///
/// Subject labels are free text and one label can match several substrings
/// (e.g. `房地(土地+建物)` contains both `土地` and `建物`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SubjectFilter {
    /// Labels containing `房地` or `建物`.
    BuildingLand,
    /// Labels containing `土地` but not `房地`.
    Land,
    /// No subject filtering.
    All,
}

impl SubjectFilter {
    pub fn display_name(self) -> &'static str {
        match self {
            SubjectFilter::BuildingLand => "房地",
            SubjectFilter::Land => "土地",
            SubjectFilter::All => "全部",
        }
    }
}

/// A numeric column of the clean record set that analytics can bin over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisColumn {
    /// 萬元/坪
    UnitPrice,
    /// 萬元
    TotalPrice,
}

impl AnalysisColumn {
    pub fn value(self, record: &CleanRecord) -> f64 {
        match self {
            AnalysisColumn::UnitPrice => record.unit_price,
            AnalysisColumn::TotalPrice => record.total_price_major,
        }
    }

    pub fn unit_label(self) -> &'static str {
        match self {
            AnalysisColumn::UnitPrice => "萬/坪",
            AnalysisColumn::TotalPrice => "萬元",
        }
    }
}

/// A quarterly release label such as `113S2` (ROC year 113, second quarter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Season {
    roc_year: u16,
    quarter: u8,
}

impl Season {
    pub fn new(roc_year: u16, quarter: u8) -> Result<Self, AppError> {
        if roc_year == 0 || !(1..=4).contains(&quarter) {
            return Err(AppError::input(format!(
                "Invalid season: ROC year {roc_year}, quarter {quarter} (quarter must be 1-4)."
            )));
        }
        Ok(Self { roc_year, quarter })
    }

    pub fn roc_year(self) -> u16 {
        self.roc_year
    }

    pub fn quarter(self) -> u8 {
        self.quarter
    }
}

impl FromStr for Season {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || AppError::input(format!("Invalid season '{s}'. Expected e.g. `113S2`."));

        let (year, quarter) = s
            .split_once(['S', 's'])
            .ok_or_else(invalid)?;
        if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) || quarter.len() != 1 {
            return Err(invalid());
        }
        let roc_year = year.parse::<u16>().map_err(|_| invalid())?;
        let quarter = quarter.parse::<u8>().map_err(|_| invalid())?;
        Season::new(roc_year, quarter)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}S{}", self.roc_year, self.quarter)
    }
}

impl Serialize for Season {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One transaction row exactly as published; every field is text.
///
/// `row` keeps the full source row (including pass-through columns) so the
/// clean export can reproduce it next to the derived columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub district: String,
    pub subject: String,
    pub transaction_date: String,
    pub completion_date: String,
    pub total_price: String,
    pub unit_price_sqm: String,
    pub building_area_sqm: String,
    pub land_area_sqm: String,
    pub row: Vec<String>,
}

/// A parsed archive member: header names plus data rows.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
    /// Rows the CSV reader could not decode (skipped).
    pub malformed_rows: usize,
}

/// Numeric columns after coercion (unparseable text becomes `0.0`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoercedFields {
    pub total_price: f64,
    /// Published unit price per sqm. Kept for reference only; never used to
    /// derive `CleanRecord::unit_price`.
    pub unit_price_sqm: f64,
    pub building_area_sqm: f64,
    pub land_area_sqm: f64,
}

/// A raw record whose transaction date converted to an absolute year.
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    pub raw: RawRecord,
    pub transaction_year: i32,
    /// `None` when the completion date is missing or malformed.
    pub completion_year: Option<i32>,
    pub numbers: CoercedFields,
}

/// A fully derived record. Immutable once produced.
#[derive(Debug, Clone)]
pub struct CleanRecord {
    pub raw: RawRecord,
    pub transaction_year: i32,
    pub numbers: CoercedFields,
    /// Total price in 萬元 (10 000 NTD).
    pub total_price_major: f64,
    /// Transferred area in 坪.
    pub area_units: f64,
    /// 萬元/坪, recomputed from total price and area.
    pub unit_price: f64,
    pub building_age: u32,
}

impl CleanRecord {
    /// Transaction month key: the transaction date without its day digits
    /// (`1130615` → `11306`).
    pub fn period_key(&self) -> &str {
        let date = self.raw.transaction_date.trim();
        match date.char_indices().rev().nth(1) {
            Some((idx, _)) => &date[..idx],
            None => "",
        }
    }
}

/// A fixed-width bin `[low, high)` with the number of records it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub low: i64,
    pub high: i64,
    pub count: usize,
}

/// Mean unit price and volume for one transaction month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub period: String,
    pub mean_unit_price: f64,
    pub count: usize,
}

/// A full request as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub season: Season,
    /// City/county name as listed by the jurisdiction table (e.g. `雲林縣`).
    pub city: String,
    /// Read this local archive instead of downloading the season.
    pub archive_path: Option<PathBuf>,

    /// Empty means "all districts".
    pub districts: BTreeSet<String>,
    pub subject: SubjectFilter,

    /// Bin width for the hottest unit-price band (萬/坪).
    pub price_band_width: u32,
    /// Bin width for the hottest total-price band (萬元).
    pub total_band_width: u32,

    pub preview_rows: usize,
    pub export_csv: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}
