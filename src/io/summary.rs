//! Write the analysis summary as JSON.
//!
//! The schema is `analysis::AnalysisSummary`: request parameters, KPIs,
//! hottest ranges, monthly trend, age bands and district spreads.

use std::fs::File;
use std::path::Path;

use crate::analysis::AnalysisSummary;
use crate::error::AppError;

pub fn write_summary_json(path: &Path, summary: &AnalysisSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::upstream(format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::upstream(format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}
