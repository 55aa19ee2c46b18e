//! End-to-end pipeline tests: raw wide CSV string -> parse -> reshape ->
//! aggregate, exercising the same path the server takes minus the network.

use epidash::dataset::Dataset;
use epidash::reshape::{aggregate, reshape_to_long, DisplayMode, ReshapeError};
use epidash::source::{parse_wide_csv, SourceError};

const SAMPLE: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20,1/25/20
Hubei,China,30.97,112.27,444,444,549,761
Beijing,China,40.18,116.41,14,22,36,41
,US,37.09,-95.71,1,1,2,2
,Italy,41.87,12.56,0,0,0,0
";

#[test]
fn wide_csv_round_trips_into_long_records() {
    let table = parse_wide_csv(SAMPLE).unwrap();
    let long = reshape_to_long(&table);

    // 4 locations x 4 dates
    assert_eq!(long.len(), 16);

    // Spot-check a cell: Hubei on 1/24/20
    let hubei = long
        .iter()
        .find(|r| r.province.as_deref() == Some("Hubei") && r.date.to_string() == "2020-01-24")
        .unwrap();
    assert_eq!(hubei.cumulative, 549);
}

#[test]
fn cumulative_series_sums_provinces_per_date() {
    let dataset = Dataset::from_csv(SAMPLE).unwrap();
    let selection = vec!["China".to_string()];

    let series = aggregate(&dataset.records, &selection, DisplayMode::Cumulative).unwrap();

    let cases: Vec<i64> = series.iter().map(|p| p.cases).collect();
    assert_eq!(cases, vec![458, 466, 585, 802]);
    assert!(series.iter().all(|p| p.country == "China"));
}

#[test]
fn daily_series_first_differences_the_summed_series() {
    let dataset = Dataset::from_csv(SAMPLE).unwrap();
    let selection = vec!["China".to_string()];

    let series = aggregate(&dataset.records, &selection, DisplayMode::Daily).unwrap();

    let cases: Vec<i64> = series.iter().map(|p| p.cases).collect();
    // First value equals the first cumulative sum, then deltas
    assert_eq!(cases, vec![458, 8, 119, 217]);
}

#[test]
fn multi_country_selection_keeps_series_independent() {
    let dataset = Dataset::from_csv(SAMPLE).unwrap();
    let selection = vec!["US".to_string(), "Italy".to_string()];

    let series = aggregate(&dataset.records, &selection, DisplayMode::Daily).unwrap();

    // One row per (country, date)
    assert_eq!(series.len(), 8);

    let us: Vec<i64> = series
        .iter()
        .filter(|p| p.country == "US")
        .map(|p| p.cases)
        .collect();
    assert_eq!(us, vec![1, 0, 1, 0]);

    let italy: Vec<i64> = series
        .iter()
        .filter(|p| p.country == "Italy")
        .map(|p| p.cases)
        .collect();
    assert_eq!(italy, vec![0, 0, 0, 0]);
}

#[test]
fn aggregation_is_pure_over_the_dataset() {
    let dataset = Dataset::from_csv(SAMPLE).unwrap();
    let selection = vec!["China".to_string(), "US".to_string()];

    let before = dataset.records.clone();
    let first = aggregate(&dataset.records, &selection, DisplayMode::Daily).unwrap();
    let second = aggregate(&dataset.records, &selection, DisplayMode::Daily).unwrap();

    assert_eq!(first, second);
    assert_eq!(dataset.records, before, "inputs must not be mutated");
}

#[test]
fn empty_selection_blocks_before_touching_data() {
    let dataset = Dataset::from_csv(SAMPLE).unwrap();

    let err = aggregate(&dataset.records, &[], DisplayMode::Cumulative).unwrap_err();
    assert!(matches!(err, ReshapeError::EmptySelection));
}

#[test]
fn malformed_source_fails_loudly() {
    let missing_column = "State,Country/Region,Lat,Long,1/22/20\nHubei,China,30.97,112.27,444\n";
    assert!(matches!(
        parse_wide_csv(missing_column).unwrap_err(),
        SourceError::Schema(_)
    ));

    let bad_header = "Province/State,Country/Region,Lat,Long,soon\n,US,0,0,1\n";
    assert!(matches!(
        parse_wide_csv(bad_header).unwrap_err(),
        SourceError::Parse(_)
    ));

    let bad_cell = "Province/State,Country/Region,Lat,Long,1/22/20\n,US,0,0,many\n";
    assert!(matches!(
        parse_wide_csv(bad_cell).unwrap_err(),
        SourceError::Parse(_)
    ));
}
