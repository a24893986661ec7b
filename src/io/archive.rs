//! Season archive extraction and CSV parsing.
//!
//! A season archive is a ZIP holding one CSV per jurisdiction and transaction
//! kind. Each CSV has two header rows:
//!
//! 1. Chinese column names (used as the header)
//! 2. English column labels (discarded)
//!
//! Parsing is strict about the schema (missing member or column is an error)
//! and lenient about values (everything stays text until `clean` coerces it).

use std::collections::HashMap;
use std::io::{Cursor, Read};

use csv::StringRecord;
use tracing::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::domain::{RawRecord, RawTable};
use crate::error::AppError;

pub const COL_DISTRICT: &str = "鄉鎮市區";
pub const COL_SUBJECT: &str = "交易標的";
pub const COL_TRANSACTION_DATE: &str = "交易年月日";
pub const COL_COMPLETION_DATE: &str = "建築完成年月";
pub const COL_TOTAL_PRICE: &str = "總價元";
pub const COL_UNIT_PRICE_SQM: &str = "單價元平方公尺";
pub const COL_BUILDING_AREA: &str = "建物移轉總面積平方公尺";
pub const COL_LAND_AREA: &str = "土地移轉總面積平方公尺";

const REQUIRED_COLUMNS: [&str; 8] = [
    COL_DISTRICT,
    COL_SUBJECT,
    COL_TRANSACTION_DATE,
    COL_COMPLETION_DATE,
    COL_TOTAL_PRICE,
    COL_UNIT_PRICE_SQM,
    COL_BUILDING_AREA,
    COL_LAND_AREA,
];

/// Column positions of the fields the pipeline reads.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    district: usize,
    subject: usize,
    transaction_date: usize,
    completion_date: usize,
    total_price: usize,
    unit_price_sqm: usize,
    building_area: usize,
    land_area: usize,
}

impl ColumnIndex {
    fn resolve(header_map: &HashMap<String, usize>) -> Result<Self, AppError> {
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| !header_map.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::input(format!(
                "Missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let at = |name: &str| header_map[name];
        Ok(Self {
            district: at(COL_DISTRICT),
            subject: at(COL_SUBJECT),
            transaction_date: at(COL_TRANSACTION_DATE),
            completion_date: at(COL_COMPLETION_DATE),
            total_price: at(COL_TOTAL_PRICE),
            unit_price_sqm: at(COL_UNIT_PRICE_SQM),
            building_area: at(COL_BUILDING_AREA),
            land_area: at(COL_LAND_AREA),
        })
    }
}

/// Extract `member` from the archive bytes and parse it.
pub fn read_member(archive: &[u8], member: &str) -> Result<RawTable, AppError> {
    let mut zip = ZipArchive::new(Cursor::new(archive))
        .map_err(|e| AppError::input(format!("Failed to open season archive: {e}")))?;

    let file = zip.by_name(member).map_err(|e| match e {
        ZipError::FileNotFound => AppError::input(format!("Archive has no member '{member}'.")),
        other => AppError::input(format!("Failed to read archive member '{member}': {other}")),
    })?;

    debug!(member, size = file.size(), "reading archive member");
    parse_table(file)
}

/// Parse a two-header-row transaction CSV.
pub fn parse_table<R: Read>(reader: R) -> Result<RawTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let columns = ColumnIndex::resolve(&header_map)?;

    let mut records = Vec::new();
    let mut malformed_rows = 0usize;

    // The first record is the English label row.
    for (idx, result) in reader.records().enumerate().skip(1) {
        match result {
            Ok(record) => records.push(to_raw_record(&record, &columns)),
            Err(e) => {
                // +2: header row, then 1-based lines.
                warn!(line = idx + 2, error = %e, "skipping malformed CSV row");
                malformed_rows += 1;
            }
        }
    }

    Ok(RawTable {
        headers: headers.iter().map(normalize_header_name).collect(),
        records,
        malformed_rows,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // The portal exports UTF-8 with a BOM; without stripping it the first
    // column ("鄉鎮市區") would never match.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn to_raw_record(record: &StringRecord, columns: &ColumnIndex) -> RawRecord {
    let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
    RawRecord {
        district: field(columns.district),
        subject: field(columns.subject),
        transaction_date: field(columns.transaction_date),
        completion_date: field(columns.completion_date),
        total_price: field(columns.total_price),
        unit_price_sqm: field(columns.unit_price_sqm),
        building_area_sqm: field(columns.building_area),
        land_area_sqm: field(columns.land_area),
        row: record.iter().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const CSV: &str = "\u{feff}鄉鎮市區,交易標的,土地位置建物門牌,交易年月日,建築完成年月,總價元,單價元平方公尺,建物移轉總面積平方公尺,土地移轉總面積平方公尺\n\
The villages and towns urban district,transaction sign,land sector position building sector house number plate,transaction year month and day,construction to complete the years,total price NTD,the unit price (NTD / square meter),building shifting total area,land shifting total area square meter\n\
斗六市,房地(土地+建物),雲林縣斗六市大學路,1130615,1000101,30000000,99173,100,20\n\
虎尾鎮,土地,虎尾段,1130520,,10000000,,0,200\n";

    fn zip_with(member: &str, body: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            zip.start_file(member, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf
    }

    #[test]
    fn parses_rows_and_drops_english_label_row() {
        let table = parse_table(CSV.as_bytes()).unwrap();
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.headers[0], "鄉鎮市區");
        assert_eq!(table.malformed_rows, 0);

        let first = &table.records[0];
        assert_eq!(first.district, "斗六市");
        assert_eq!(first.subject, "房地(土地+建物)");
        assert_eq!(first.transaction_date, "1130615");
        assert_eq!(first.completion_date, "1000101");
        assert_eq!(first.total_price, "30000000");
        assert_eq!(first.building_area_sqm, "100");
        assert_eq!(first.row.len(), 9);
        assert_eq!(first.row[2], "雲林縣斗六市大學路");

        assert_eq!(table.records[1].completion_date, "");
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let csv = "鄉鎮市區,交易標的\nlabels,labels\n斗六市,土地\n";
        let err = parse_table(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), AppError::INPUT);
        assert!(err.message().contains(COL_TRANSACTION_DATE));
    }

    #[test]
    fn reads_named_member_from_zip() {
        let bytes = zip_with("P_lvr_land_A.csv", CSV);
        let table = read_member(&bytes, "P_lvr_land_A.csv").unwrap();
        assert_eq!(table.records.len(), 2);
    }

    #[test]
    fn missing_member_is_a_schema_error() {
        let bytes = zip_with("P_lvr_land_A.csv", CSV);
        let err = read_member(&bytes, "A_lvr_land_A.csv").unwrap_err();
        assert_eq!(err.exit_code(), AppError::INPUT);
        assert!(err.message().contains("A_lvr_land_A.csv"));
    }

    #[test]
    fn garbage_bytes_are_not_an_archive() {
        let err = read_member(b"not a zip", "P_lvr_land_A.csv").unwrap_err();
        assert_eq!(err.exit_code(), AppError::INPUT);
    }
}
