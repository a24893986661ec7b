//! Analytics over the clean record set.
//!
//! Everything here needs the full, materialized set: hottest ranges,
//! monthly trend, KPIs, age bands and district spreads.

pub mod interval;
pub mod stats;
pub mod summary;
pub mod trend;

pub use interval::*;
pub use summary::*;
pub use trend::*;

use serde::Serialize;

use crate::clean::CleanSet;
use crate::domain::{AnalysisColumn, AnalysisConfig, Interval, Season, SubjectFilter, TrendPoint};
use crate::error::AppError;

/// Everything the report and the JSON summary show for one request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub season: Season,
    pub city: String,
    pub subject: SubjectFilter,
    pub districts: Vec<String>,
    pub kpis: Option<Kpis>,
    pub hottest_unit_price: Option<Interval>,
    pub hottest_total_price: Option<Interval>,
    pub trend: Vec<TrendPoint>,
    pub age_bands: Vec<AgeBandStats>,
    pub district_stats: Vec<DistrictStats>,
}

pub fn summarize(set: &CleanSet, config: &AnalysisConfig) -> Result<AnalysisSummary, AppError> {
    let records = &set.records;
    Ok(AnalysisSummary {
        season: config.season,
        city: config.city.clone(),
        subject: config.subject,
        districts: config.districts.iter().cloned().collect(),
        kpis: kpis(records),
        hottest_unit_price: hottest_interval(records, AnalysisColumn::UnitPrice, config.price_band_width)?,
        hottest_total_price: hottest_interval(records, AnalysisColumn::TotalPrice, config.total_band_width)?,
        trend: monthly_trend(records),
        age_bands: age_bands(records),
        district_stats: district_stats(records),
    })
}
