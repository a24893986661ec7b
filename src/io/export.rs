//! Export the clean record set to CSV.
//!
//! The export keeps every published column (as text) and appends the derived
//! columns. It is written as UTF-8 with a BOM so spreadsheet tools on Windows
//! detect the encoding of the Chinese headers.

use std::fs;
use std::path::Path;

use crate::domain::CleanRecord;
use crate::error::AppError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Names of the appended derived columns, in output order.
pub const DERIVED_COLUMNS: [&str; 5] = ["交易年_西元", "總價_萬元", "面積_坪", "單價_萬元_坪", "屋齡"];

/// Encode the clean set as BOM-prefixed CSV bytes.
pub fn encode_clean_csv(headers: &[String], records: &[CleanRecord]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::WriterBuilder::new().from_writer(UTF8_BOM.to_vec());

    let header_row = headers
        .iter()
        .map(String::as_str)
        .chain(DERIVED_COLUMNS.iter().copied());
    writer
        .write_record(header_row)
        .map_err(|e| AppError::upstream(format!("Failed to write export CSV header: {e}")))?;

    for r in records {
        let mut row: Vec<String> = r.raw.row.clone();
        row.resize(headers.len(), String::new());
        row.push(r.transaction_year.to_string());
        row.push(format!("{:.4}", r.total_price_major));
        row.push(format!("{:.4}", r.area_units));
        row.push(format!("{:.4}", r.unit_price));
        row.push(r.building_age.to_string());

        writer
            .write_record(&row)
            .map_err(|e| AppError::upstream(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::upstream(format!("Failed to flush export CSV: {e}")))
}

/// Write the clean set to `path`.
pub fn write_clean_csv(path: &Path, headers: &[String], records: &[CleanRecord]) -> Result<(), AppError> {
    let bytes = encode_clean_csv(headers, records)?;
    fs::write(path, bytes)
        .map_err(|e| AppError::upstream(format!("Failed to write export CSV '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CoercedFields, RawRecord};

    fn record() -> CleanRecord {
        CleanRecord {
            raw: RawRecord {
                district: "斗六市".to_string(),
                row: vec!["斗六市".to_string(), "房地(土地+建物)".to_string()],
                ..RawRecord::default()
            },
            transaction_year: 2024,
            numbers: CoercedFields::default(),
            total_price_major: 3000.0,
            area_units: 30.25,
            unit_price: 3000.0 / 30.25,
            building_age: 13,
        }
    }

    #[test]
    fn export_starts_with_bom_and_appends_derived_columns() {
        let headers = vec!["鄉鎮市區".to_string(), "交易標的".to_string()];
        let bytes = encode_clean_csv(&headers, &[record()]).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "鄉鎮市區,交易標的,交易年_西元,總價_萬元,面積_坪,單價_萬元_坪,屋齡"
        );
        assert_eq!(
            lines.next().unwrap(),
            "斗六市,房地(土地+建物),2024,3000.0000,30.2500,99.1736,13"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn short_rows_are_padded_to_the_header_width() {
        let headers = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let bytes = encode_clean_csv(&headers, &[record()]).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("斗六市,房地(土地+建物),,2024,"));
    }
}
