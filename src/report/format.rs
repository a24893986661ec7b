//! Plain-text terminal report.
//!
//! Formatting lives here so the cleaning/analytics code stays free of
//! presentation concerns.

use crate::analysis::{AgeBandStats, AnalysisSummary, DistrictStats, Kpis};
use crate::clean::PipelineStats;
use crate::domain::{AnalysisColumn, CleanRecord, Interval, TrendPoint};

/// Header, row accounting, KPIs and hottest ranges.
pub fn format_run_summary(summary: &AnalysisSummary, stats: &PipelineStats, malformed_rows: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== lvr - {} {} 市場分析報告 ===\n",
        summary.city, summary.season
    ));
    let districts = if summary.districts.is_empty() {
        "全部行政區".to_string()
    } else {
        summary.districts.join("、")
    };
    out.push_str(&format!(
        "Scope: {districts} | 交易標的: {}\n",
        summary.subject.display_name()
    ));
    out.push_str(&format!(
        "Rows: read={} | bad date={} | filtered={} | outliers={} | used={}",
        stats.rows_read, stats.invalid_date, stats.filtered_out, stats.outliers, stats.rows_used
    ));
    if malformed_rows > 0 {
        out.push_str(&format!(" | malformed={malformed_rows}"));
    }
    out.push_str("\n\n");

    if let Some(k) = &summary.kpis {
        out.push_str(&format_kpis(k));
        out.push('\n');
    }

    out.push_str("Hottest ranges:\n");
    out.push_str(&format_hot_range(
        "單價帶",
        summary.hottest_unit_price.as_ref(),
        AnalysisColumn::UnitPrice,
    ));
    out.push_str(&format_hot_range(
        "總價帶",
        summary.hottest_total_price.as_ref(),
        AnalysisColumn::TotalPrice,
    ));

    out
}

fn format_kpis(k: &Kpis) -> String {
    format!(
        "成交筆數 {} 筆 | 平均單價 {:.1} 萬/坪 | 單價中位數 {:.1} 萬/坪 | 平均總價 {:.0} 萬元\n",
        k.count, k.mean_unit_price, k.median_unit_price, k.mean_total_price
    )
}

fn format_hot_range(label: &str, interval: Option<&Interval>, column: AnalysisColumn) -> String {
    match interval {
        Some(i) => format!(
            "- {label}: {} ~ {} {} ({} 筆)\n",
            i.low,
            i.high,
            column.unit_label(),
            i.count
        ),
        None => format!("- {label}: -\n"),
    }
}

/// Monthly volume and mean unit price.
pub fn format_trend(trend: &[TrendPoint]) -> String {
    let mut out = String::new();
    out.push_str("Monthly trend:\n");
    out.push_str(&format!("{:<8} {:>8} {:>12}\n", "period", "count", "mean_price"));
    out.push_str(&format!("{:-<8} {:-<8} {:-<12}\n", "", "", ""));
    for p in trend {
        out.push_str(&format!("{:<8} {:>8} {:>12.2}\n", p.period, p.count, p.mean_unit_price));
    }
    out
}

pub fn format_age_bands(bands: &[AgeBandStats]) -> String {
    let mut out = String::new();
    out.push_str("Building age vs unit price:\n");
    for b in bands {
        out.push_str(&format!(
            "- {}: {} 筆, median {}\n",
            b.band.display_name(),
            b.count,
            fmt_opt(b.median_unit_price)
        ));
    }
    out
}

pub fn format_district_table(stats: &[DistrictStats]) -> String {
    let mut out = String::new();
    out.push_str("Unit price by district (萬/坪):\n");
    out.push_str(
        format!(
            "{:<10} {:>6} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "district", "count", "min", "q1", "median", "q3", "max"
        )
        .trim_end(),
    );
    out.push('\n');
    for s in stats {
        out.push_str(&format!(
            "{:<10} {:>6} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}\n",
            truncate(&s.district, 10),
            s.count,
            s.min,
            s.q1,
            s.median,
            s.q3,
            s.max
        ));
    }
    out
}

/// First `limit` clean rows.
pub fn format_preview(records: &[CleanRecord], limit: usize) -> String {
    let mut out = String::new();
    if limit == 0 {
        return out;
    }
    out.push_str(&format!("First {} row(s):\n", limit.min(records.len())));
    out.push_str(&format!(
        "{:<10} {:<9} {:>4} {:>10} {:>10} {:>8}\n",
        "district", "date", "age", "unit", "total", "area"
    ));
    for r in records.iter().take(limit) {
        out.push_str(&format!(
            "{:<10} {:<9} {:>4} {:>10.2} {:>10.0} {:>8.2}\n",
            truncate(r.raw.district.trim(), 10),
            r.raw.transaction_date.trim(),
            r.building_age,
            r.unit_price,
            r.total_price_major,
            r.area_units
        ));
    }
    out
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}"),
        _ => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
