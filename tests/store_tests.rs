/// Query layer tests
mod common;

use chrono::NaiveDate;
use cta_ridership::error::{DatabaseError, Error};
use cta_ridership::model::{DayType, Period};
use cta_ridership::store::{RidershipStore, StationOrder};

// ==================== Counts Tests ====================

#[test]
fn test_table_counts() {
    let store = common::sample_store();
    assert_eq!(store.count_stations().unwrap(), 5);
    assert_eq!(store.count_stops().unwrap(), 4);
    assert_eq!(store.count_ride_entries().unwrap(), 19);
}

#[test]
fn test_date_range() {
    let store = common::sample_store();
    let range = store.date_range().unwrap();
    assert_eq!(
        range,
        Some((
            NaiveDate::from_ymd_opt(2020, 3, 2).unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 7).unwrap()
        ))
    );
}

#[test]
fn test_empty_database_totals() {
    let store = RidershipStore::from_connection(common::empty_connection());
    assert_eq!(store.total_riders().unwrap(), 0);
    assert_eq!(store.riders_on(DayType::Weekday).unwrap(), 0);
    assert_eq!(store.date_range().unwrap(), None);
}

#[test]
fn test_riders_by_day_type() {
    let store = common::sample_store();
    assert_eq!(store.total_riders().unwrap(), 1_000_000);
    assert_eq!(store.riders_on(DayType::Weekday).unwrap(), 700_000);
    assert_eq!(store.riders_on(DayType::Saturday).unwrap(), 200_000);
    assert_eq!(store.riders_on(DayType::SundayHoliday).unwrap(), 100_000);
}

// ==================== Station Search Tests ====================

#[test]
fn test_stations_like_is_case_insensitive() {
    let store = common::sample_store();
    let stations = store.stations_like("howard").unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].id, 40900);
    assert_eq!(stations[0].name, "Howard");
}

#[test]
fn test_stations_like_orders_by_name() {
    let store = common::sample_store();
    let names: Vec<_> = store
        .stations_like("%a%")
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), 5);
}

#[test]
fn test_stations_like_underscore_wildcard() {
    let store = common::sample_store();
    let stations = store.stations_like("Jackson_State").unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].name, "Jackson/State");
}

// ==================== Station Totals Tests ====================

#[test]
fn test_station_totals_by_name_includes_zero_rows() {
    let store = common::sample_store();
    let totals = store.station_totals(StationOrder::Name, None).unwrap();
    assert_eq!(totals.len(), 5);
    assert_eq!(totals[0].name, "Clark/Lake");
    let unused = totals.iter().find(|t| t.name == "UIC-Halsted").unwrap();
    assert_eq!(unused.riders, 0);
}

#[test]
fn test_station_totals_descending_with_limit() {
    let store = common::sample_store();
    let totals = store
        .station_totals(StationOrder::MostRiders, Some(2))
        .unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].name, "Howard");
    assert_eq!(totals[0].riders, 300_000);
    assert_eq!(totals[1].name, "Jackson/Dearborn");
}

#[test]
fn test_station_totals_ascending_skips_stations_without_rides() {
    let store = common::sample_store();
    let totals = store
        .station_totals(StationOrder::FewestRiders, None)
        .unwrap();
    assert_eq!(totals.len(), 4);
    assert_eq!(totals[0].name, "Jackson/State");
    assert_eq!(totals[0].riders, 160_000);
}

// ==================== Line Tests ====================

#[test]
fn test_line_stops_for_color() {
    let store = common::sample_store();
    let stops = store.line_stops("RED").unwrap();
    let names: Vec<_> = stops.iter().map(|s| s.stop_name.as_str()).collect();
    assert_eq!(
        names,
        ["Howard (Northbound)", "Howard (Southbound)", "Jackson/State (Red)"]
    );
    assert_eq!(stops[1].direction, "S");
    assert!(stops[0].accessible);
}

#[test]
fn test_line_stops_unknown_color_is_empty() {
    let store = common::sample_store();
    assert!(store.line_stops("Chartreuse").unwrap().is_empty());
}

#[test]
fn test_line_stations_are_distinct() {
    let store = common::sample_store();
    let stations = store.line_stations("red").unwrap();
    let names: Vec<_> = stations.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Howard", "Jackson/State"]);
    assert!((stations[0].latitude - 42.019_063).abs() < 1e-9);
    assert!((stations[0].longitude + 87.672_892).abs() < 1e-9);
}

// ==================== Period Tests ====================

#[test]
fn test_month_totals() {
    let store = common::sample_store();
    let rows = store.period_totals(Period::Month, "01", "12").unwrap();
    let pairs: Vec<_> = rows.iter().map(|r| (r.bucket.as_str(), r.riders)).collect();
    assert_eq!(
        pairs,
        [("01", 300_000), ("02", 260_000), ("03", 280_000), ("12", 160_000)]
    );
}

#[test]
fn test_year_totals_respect_range() {
    let store = common::sample_store();
    let rows = store.period_totals(Period::Year, "2001", "2021").unwrap();
    let pairs: Vec<_> = rows.iter().map(|r| (r.bucket.as_str(), r.riders)).collect();
    assert_eq!(pairs, [("2020", 440_000), ("2021", 560_000)]);

    let only_2021 = store.period_totals(Period::Year, "2021", "2021").unwrap();
    assert_eq!(only_2021.len(), 1);
}

// ==================== Daily Riders Tests ====================

#[test]
fn test_daily_riders_ordered_by_date() {
    let store = common::sample_store();
    let days = store.daily_riders("Howard", "2021").unwrap();
    assert_eq!(days.len(), 12);
    assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
    assert_eq!(days[11].date, NaiveDate::from_ymd_opt(2021, 1, 12).unwrap());
    assert!(days.iter().all(|d| d.riders == 25_000));
}

#[test]
fn test_daily_riders_other_year_is_empty() {
    let store = common::sample_store();
    assert!(store.daily_riders("Howard", "2019").unwrap().is_empty());
}

// ==================== Open Tests ====================

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = RidershipStore::open(dir.path().join("missing.db")).unwrap_err();
    assert!(matches!(
        err,
        Error::Database(DatabaseError::OpenFailed { .. })
    ));
}

#[test]
fn test_open_existing_file_read_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ridership.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE Stations (Station_ID INTEGER, Station_Name TEXT);")
        .unwrap();
    drop(conn);

    let store = RidershipStore::open(&path).unwrap();
    assert_eq!(store.count_stations().unwrap(), 0);
}

#[test]
fn test_query_failure_names_query() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let store = RidershipStore::from_connection(conn);
    let err = store.count_stations().unwrap_err();
    assert!(err.to_string().contains("count stations"));
}
