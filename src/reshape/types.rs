//! Core row types for the reshape pipeline
//!
//! The pipeline works on three shapes of data: the wide source table
//! (see [`crate::source::WideTable`]), the normalized long-format rows
//! defined here, and the aggregated per-country output rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One long-format observation: a single (location, date, value) triple
/// produced by unpivoting the wide source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongRecord {
    /// Sub-national region, if the source row has one (e.g. "Hubei")
    pub province: Option<String>,
    /// Country or region name (e.g. "US", "China")
    pub country: String,
    /// Observation date
    pub date: NaiveDate,
    /// Cumulative confirmed cases up to and including `date`
    pub cumulative: i64,
}

impl LongRecord {
    pub fn new(
        province: Option<String>,
        country: impl Into<String>,
        date: NaiveDate,
        cumulative: i64,
    ) -> Self {
        Self {
            province,
            country: country.into(),
            date,
            cumulative,
        }
    }
}

/// One aggregated output row: provinces collapsed into their country,
/// value already converted to the requested display mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasePoint {
    pub country: String,
    pub date: NaiveDate,
    /// Case count under the chosen mode. Daily mode may legitimately go
    /// negative when the source issues a downward correction.
    pub cases: i64,
}

/// How case counts are presented: running totals or day-over-day deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Cumulative,
    Daily,
}

impl DisplayMode {
    /// Human-readable label, used in chart titles
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Cumulative => "Cumulative",
            DisplayMode::Daily => "Daily",
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cumulative" => Ok(DisplayMode::Cumulative),
            "daily" => Ok(DisplayMode::Daily),
            other => Err(format!(
                "Invalid display mode: {}. Use cumulative or daily",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mode_labels() {
        assert_eq!(DisplayMode::Cumulative.to_string(), "Cumulative");
        assert_eq!(DisplayMode::Daily.to_string(), "Daily");
    }

    #[test]
    fn test_display_mode_parse() {
        assert_eq!(
            "cumulative".parse::<DisplayMode>().unwrap(),
            DisplayMode::Cumulative
        );
        assert_eq!("Daily".parse::<DisplayMode>().unwrap(), DisplayMode::Daily);
        assert!("weekly".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn test_display_mode_serde() {
        let mode: DisplayMode = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(mode, DisplayMode::Daily);
        assert_eq!(
            serde_json::to_string(&DisplayMode::Cumulative).unwrap(),
            "\"cumulative\""
        );
    }
}
