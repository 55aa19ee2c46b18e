//! Per-country aggregation
//!
//! Collapses provinces into their country and converts the series to the
//! requested display mode. This is a pure function over the long table:
//! the same inputs always produce the same output, and nothing upstream
//! is mutated.

use std::collections::BTreeMap;

use super::{CasePoint, DisplayMode, LongRecord, ReshapeError};

/// Aggregate long-format rows into one series per selected country.
///
/// Rows are restricted to `countries`, cumulative counts are summed across
/// provinces per (country, date), and in [`DisplayMode::Daily`] the summed
/// series is first-differenced per country. The first date of each country's
/// series has no predecessor; its daily value is defined as the cumulative
/// value itself (the day before the series start counts as zero). Downward
/// corrections in the source produce negative daily values and are passed
/// through unmodified.
///
/// Output contains exactly one row per (selected country present in the
/// data, date), sorted by (country, date).
///
/// Fails with [`ReshapeError::EmptySelection`] when `countries` is empty;
/// callers surface that as a blocking warning rather than rendering an
/// empty chart.
pub fn aggregate(
    records: &[LongRecord],
    countries: &[String],
    mode: DisplayMode,
) -> Result<Vec<CasePoint>, ReshapeError> {
    if countries.is_empty() {
        return Err(ReshapeError::EmptySelection);
    }

    // Sum provinces into their country. BTreeMap keeps (country, date)
    // ascending, which is exactly the required output order.
    let mut sums: BTreeMap<(String, chrono::NaiveDate), i64> = BTreeMap::new();
    for rec in records {
        if !countries.iter().any(|c| c == &rec.country) {
            continue;
        }
        *sums
            .entry((rec.country.clone(), rec.date))
            .or_insert(0) += rec.cumulative;
    }

    let mut points = Vec::with_capacity(sums.len());
    let mut prev: Option<(&str, i64)> = None;

    for ((country, date), cumulative) in &sums {
        let cases = match mode {
            DisplayMode::Cumulative => *cumulative,
            DisplayMode::Daily => match prev {
                Some((prev_country, prev_cum)) if prev_country == country => {
                    cumulative - prev_cum
                }
                // First date for this country: the day before the series
                // start is treated as zero, so the delta is the cumulative
                // value itself.
                _ => *cumulative,
            },
        };

        prev = Some((country.as_str(), *cumulative));
        points.push(CasePoint {
            country: country.clone(),
            date: *date,
            cases,
        });
    }

    Ok(points)
}
