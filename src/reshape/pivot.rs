//! Wide-to-long unpivot
//!
//! Converts the wide source table (one column per date) into long-format
//! rows, one per (location, date) observation.

use super::LongRecord;
use crate::source::WideTable;

/// Unpivot a wide table into long-format rows.
///
/// Produces exactly `rows * date_columns` records: every cell of every date
/// column becomes one [`LongRecord`] carrying its row's identifiers. Output
/// is sorted by (date, country) ascending, provinces of the same country
/// keeping a stable order within a date.
pub fn reshape_to_long(table: &WideTable) -> Vec<LongRecord> {
    let mut records = Vec::with_capacity(table.rows.len() * table.dates.len());

    for row in &table.rows {
        for (i, date) in table.dates.iter().enumerate() {
            records.push(LongRecord {
                province: row.province.clone(),
                country: row.country.clone(),
                date: *date,
                cumulative: row.values[i],
            });
        }
    }

    records.sort_by(|a, b| (a.date, &a.country).cmp(&(b.date, &b.country)));
    records
}
