//! Reporting utilities: formatted terminal output for a run.

pub mod format;

pub use format::*;

use crate::app::pipeline::RunOutput;

/// The full `lvr analyze` report, section by section.
pub fn format_report(run: &RunOutput, preview_rows: usize) -> String {
    let summary = &run.summary;
    let mut sections = vec![
        format_run_summary(summary, &run.clean.stats, run.malformed_rows),
        format_trend(&summary.trend),
        format_age_bands(&summary.age_bands),
        format_district_table(&summary.district_stats),
    ];
    let preview = format_preview(&run.clean.records, preview_rows);
    if !preview.is_empty() {
        sections.push(preview);
    }
    sections.join("\n")
}
