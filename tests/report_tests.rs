/// Report builder tests
mod common;

use cta_ridership::chart::Chart;
use cta_ridership::error::{Error, LookupError};
use cta_ridership::model::Period;
use cta_ridership::report::{self, BreakdownKind, YearRange};
use std::collections::HashSet;

fn lookup(err: Error) -> LookupError {
    match err {
        Error::Lookup(l) => l,
        other => panic!("expected lookup error, got {other:?}"),
    }
}

// ==================== General Stats Tests ====================

#[test]
fn test_general_stats_weekday_share() {
    let store = common::sample_store();
    let stats = report::general_stats(&store).unwrap();

    assert_eq!(stats.stations, 5);
    assert_eq!(stats.total_riders, 1_000_000);
    let labels: Vec<_> = stats.day_types.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["Weekday", "Saturday", "Sunday/holiday"]);
    assert_eq!(stats.day_types[0].riders, 700_000);
    assert!((stats.day_types[0].percentage - 70.0).abs() < 1e-9);
}

#[test]
fn test_general_stats_percentages_sum_to_100() {
    let store = common::sample_store();
    let stats = report::general_stats(&store).unwrap();
    let sum: f64 = stats.day_types.iter().map(|s| s.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

// ==================== Station Lookup Tests ====================

#[test]
fn test_find_stations_howard() {
    let store = common::sample_store();
    let stations = report::find_stations(&store, "Howard").unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].id, 40900);
}

#[test]
fn test_find_stations_no_match() {
    let store = common::sample_store();
    let err = report::find_stations(&store, "Nowhere%").unwrap_err();
    assert_eq!(lookup(err), LookupError::NoStations);
}

#[test]
fn test_resolve_station_outcomes() {
    let store = common::sample_store();

    let howard = report::resolve_station(&store, "how%").unwrap();
    assert_eq!(howard.name, "Howard");

    let err = report::resolve_station(&store, "Jackson%").unwrap_err();
    assert_eq!(lookup(err), LookupError::MultipleStations);

    let err = report::resolve_station(&store, "Nowhere").unwrap_err();
    assert_eq!(lookup(err), LookupError::NoStation);
}

// ==================== Breakdown Tests ====================

#[test]
fn test_all_stations_breakdown() {
    let store = common::sample_store();
    let b = report::breakdown(&store, BreakdownKind::AllStations).unwrap();

    assert_eq!(b.title, "** ridership all stations **");
    assert_eq!(b.rows.len(), 5);
    let howard = b.rows.iter().find(|r| r.label == "Howard").unwrap();
    assert_eq!(howard.riders, 300_000);
    assert!((howard.percentage - 30.0).abs() < 1e-9);

    let sum: f64 = b.rows.iter().map(|r| r.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

#[test]
fn test_busiest_and_least_busy_do_not_overlap() {
    let store = common::ranked_store(24);
    let top = report::breakdown(&store, BreakdownKind::Busiest).unwrap();
    let least = report::breakdown(&store, BreakdownKind::LeastBusy).unwrap();

    assert_eq!(top.rows.len(), 10);
    assert_eq!(least.rows.len(), 10);
    assert_eq!(top.rows[0].label, "Station 24");
    assert_eq!(least.rows[0].label, "Station 01");

    let top_names: HashSet<_> = top.rows.iter().map(|r| r.label.as_str()).collect();
    assert!(least.rows.iter().all(|r| !top_names.contains(r.label.as_str())));

    assert!(top.rows.windows(2).all(|w| w[0].riders >= w[1].riders));
    assert!(least.rows.windows(2).all(|w| w[0].riders <= w[1].riders));
}

#[test]
fn test_busiest_with_fewer_than_ten_stations() {
    let store = common::sample_store();
    let top = report::breakdown(&store, BreakdownKind::Busiest).unwrap();
    assert_eq!(top.title, "** top-10 stations **");
    assert_eq!(top.rows.len(), 4);
}

// ==================== Period Tests ====================

#[test]
fn test_year_report_uses_configured_range() {
    let store = common::sample_store();
    let all = report::period_report(&store, Period::Year, YearRange::default()).unwrap();
    assert_eq!(all.rows.len(), 2);
    assert_eq!(all.title(), "** ridership by year **");

    let narrow = YearRange {
        first: 2021,
        last: 2021,
    };
    let only = report::period_report(&store, Period::Year, narrow).unwrap();
    assert_eq!(only.rows.len(), 1);
    assert_eq!(only.rows[0].bucket, "2021");
}

#[test]
fn test_month_report_chart() {
    let store = common::sample_store();
    let months = report::period_report(&store, Period::Month, YearRange::default()).unwrap();
    let Chart::Line(chart) = months.to_chart() else {
        panic!("expected line chart");
    };
    assert_eq!(chart.title, "monthly ridership");
    assert_eq!(chart.series.len(), 1);
    assert_eq!(chart.series[0].points[0], (1.0, 300_000.0));
    assert_eq!(chart.series[0].points[3], (12.0, 160_000.0));
}

// ==================== Comparison Tests ====================

#[test]
fn test_compare_stations() {
    let store = common::sample_store();
    let first = report::resolve_station(&store, "Howard").unwrap();
    let second = report::resolve_station(&store, "Clark%").unwrap();
    let cmp = report::compare_stations(&store, "2021", first, second).unwrap();

    assert_eq!(cmp.first.days.len(), 12);
    assert_eq!(cmp.first.head().len(), 5);
    assert_eq!(cmp.first.tail().len(), 5);

    // 少于 10 行时首尾重叠
    assert_eq!(cmp.second.days.len(), 3);
    assert_eq!(cmp.second.head(), cmp.second.tail());

    let Chart::Line(chart) = cmp.to_chart() else {
        panic!("expected line chart");
    };
    assert_eq!(chart.title, "riders each day of 2021");
    assert_eq!(chart.series[0].name.as_deref(), Some("Howard"));
    assert_eq!(chart.series[0].points.len(), 12);
    assert_eq!(chart.series[1].points.len(), 3);
    assert_eq!(chart.x_domain(), Some((1.0, 12.0)));
}

#[test]
fn test_compare_stations_year_without_data() {
    let store = common::sample_store();
    let first = report::resolve_station(&store, "Howard").unwrap();
    let second = report::resolve_station(&store, "Clark/Lake").unwrap();
    let cmp = report::compare_stations(&store, "1999", first, second).unwrap();
    assert!(cmp.first.days.is_empty());
    assert!(cmp.to_chart().is_empty());
}

// ==================== Line Tests ====================

#[test]
fn test_line_stops_unknown_line() {
    let store = common::sample_store();
    let err = report::line_stops(&store, "Chartreuse").unwrap_err();
    assert_eq!(lookup(err), LookupError::NoSuchLine);
}

#[test]
fn test_line_map_purple_express() {
    let store = common::sample_store();
    let map = report::line_map(&store, "purple-express").unwrap();
    assert_eq!(map.stations.len(), 1);
    assert_eq!(map.marker_color(), "Purple");
}

#[test]
fn test_line_map_unknown_line() {
    let store = common::sample_store();
    let err = report::line_map(&store, "Chartreuse").unwrap_err();
    assert_eq!(lookup(err), LookupError::NoSuchLine);
}
