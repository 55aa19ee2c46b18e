//! Wide-CSV parsing
//!
//! The source schema is four identifier columns followed by one column per
//! calendar date:
//!
//! ```text
//! Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,...
//! ```
//!
//! Cell values are non-negative integer cumulative counts. Anything that
//! does not fit this contract is a hard parse error; there is no partial
//! recovery, matching the all-or-nothing behavior of the dashboard.

use chrono::NaiveDate;

use super::{SourceError, SourceResult};

/// Identifier columns expected in the header, in order
const ID_COLUMNS: [&str; 4] = ["Province/State", "Country/Region", "Lat", "Long"];

/// Date formats seen in the source headers. JHU uses `1/22/20`; the
/// fallbacks cover four-digit years and ISO dates.
const DATE_FORMATS: [&str; 3] = ["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

/// A fully parsed wide-format table
#[derive(Debug, Clone)]
pub struct WideTable {
    /// Dates parsed from the header, in column order (ascending per the
    /// source contract)
    pub dates: Vec<NaiveDate>,
    /// One row per location
    pub rows: Vec<WideRow>,
}

/// One location's row: identifiers plus one cumulative count per date
#[derive(Debug, Clone)]
pub struct WideRow {
    pub province: Option<String>,
    pub country: String,
    pub lat: f64,
    pub long: f64,
    /// Cumulative counts, aligned with [`WideTable::dates`]
    pub values: Vec<i64>,
}

/// Parse the wide-format CSV into a [`WideTable`].
///
/// Fails with [`SourceError::Schema`] if an identifier column is absent
/// and [`SourceError::Parse`] if a date header or cell does not parse.
pub fn parse_wide_csv(data: &str) -> SourceResult<WideTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());

    let headers = reader.headers()?.clone();

    // The four identifier columns must lead the header, in order
    for (i, expected) in ID_COLUMNS.iter().enumerate() {
        match headers.get(i) {
            Some(actual) if actual == *expected => {}
            _ => return Err(SourceError::Schema(expected.to_string())),
        }
    }

    let dates = headers
        .iter()
        .skip(ID_COLUMNS.len())
        .map(parse_date_header)
        .collect::<SourceResult<Vec<_>>>()?;

    let mut rows = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let record = result?;
        let line = line_num + 2; // 1-based, after the header row

        let province = match record.get(0) {
            Some("") | None => None,
            Some(p) => Some(p.to_string()),
        };
        let country = record
            .get(1)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| SourceError::Parse(format!("Line {}: empty country name", line)))?
            .to_string();
        let lat = parse_coord(record.get(2), "Lat", line)?;
        let long = parse_coord(record.get(3), "Long", line)?;

        let mut values = Vec::with_capacity(dates.len());
        for i in 0..dates.len() {
            let cell = record.get(ID_COLUMNS.len() + i).unwrap_or("");
            let value: i64 = cell.trim().parse().map_err(|_| {
                SourceError::Parse(format!(
                    "Line {}: non-numeric cell {:?} in date column {}",
                    line, cell, i
                ))
            })?;
            if value < 0 {
                return Err(SourceError::Parse(format!(
                    "Line {}: negative cumulative count {} in date column {}",
                    line, value, i
                )));
            }
            values.push(value);
        }

        rows.push(WideRow {
            province,
            country,
            lat,
            long,
            values,
        });
    }

    Ok(WideTable { dates, rows })
}

/// Parse a date column header, trying each known format
fn parse_date_header(header: &str) -> SourceResult<NaiveDate> {
    let trimmed = header.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }
    Err(SourceError::Parse(format!(
        "Could not parse date column header: {:?}",
        header
    )))
}

/// Parse a latitude/longitude cell. Empty coordinates appear for a few
/// locations in the source; they default to 0.0 since nothing downstream
/// plots them.
fn parse_coord(cell: Option<&str>, name: &str, line: usize) -> SourceResult<f64> {
    match cell.map(str::trim) {
        Some("") | None => Ok(0.0),
        Some(s) => s.parse().map_err(|_| {
            SourceError::Parse(format!("Line {}: invalid {} value {:?}", line, name, s))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20
Hubei,China,30.97,112.27,444,444,549
,Australia,-33.86,151.2,0,0,3
";

    #[test]
    fn test_parse_sample() {
        let table = parse_wide_csv(SAMPLE).unwrap();

        assert_eq!(table.dates.len(), 3);
        assert_eq!(
            table.dates[0],
            NaiveDate::from_ymd_opt(2020, 1, 22).unwrap()
        );

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].province.as_deref(), Some("Hubei"));
        assert_eq!(table.rows[0].country, "China");
        assert_eq!(table.rows[0].values, vec![444, 444, 549]);
        assert_eq!(table.rows[1].province, None);
        assert_eq!(table.rows[1].values, vec![0, 0, 3]);
    }

    #[test]
    fn test_missing_identifier_column() {
        let data = "Province/State,Country,Lat,Long,1/22/20\nHubei,China,30.97,112.27,444\n";
        let err = parse_wide_csv(data).unwrap_err();
        assert!(matches!(err, SourceError::Schema(col) if col == "Country/Region"));
    }

    #[test]
    fn test_bad_date_header() {
        let data = "Province/State,Country/Region,Lat,Long,not-a-date\n,X,0,0,1\n";
        let err = parse_wide_csv(data).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_non_numeric_cell() {
        let data = "Province/State,Country/Region,Lat,Long,1/22/20\n,X,0,0,abc\n";
        let err = parse_wide_csv(data).unwrap_err();
        assert!(matches!(err, SourceError::Parse(msg) if msg.contains("non-numeric")));
    }

    #[test]
    fn test_negative_cell_rejected() {
        let data = "Province/State,Country/Region,Lat,Long,1/22/20\n,X,0,0,-5\n";
        let err = parse_wide_csv(data).unwrap_err();
        assert!(matches!(err, SourceError::Parse(msg) if msg.contains("negative")));
    }

    #[test]
    fn test_iso_date_headers_accepted() {
        let data = "Province/State,Country/Region,Lat,Long,2020-01-22\n,X,0,0,7\n";
        let table = parse_wide_csv(data).unwrap();
        assert_eq!(
            table.dates[0],
            NaiveDate::from_ymd_opt(2020, 1, 22).unwrap()
        );
        assert_eq!(table.rows[0].values, vec![7]);
    }

    #[test]
    fn test_empty_coordinates_default() {
        let data = "Province/State,Country/Region,Lat,Long,1/22/20\n,Unknown Location,,,2\n";
        let table = parse_wide_csv(data).unwrap();
        assert_eq!(table.rows[0].lat, 0.0);
        assert_eq!(table.rows[0].long, 0.0);
    }
}
