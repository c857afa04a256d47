//! 测试夹具：内存 SQLite 客流数据库
#![allow(dead_code)]

use cta_ridership::chart::{Chart, ChartRenderer};
use cta_ridership::error::Result;
use cta_ridership::store::RidershipStore;
use rusqlite::{Connection, params};
use std::path::PathBuf;

const SCHEMA: &str = "
    CREATE TABLE Stations (Station_ID INTEGER PRIMARY KEY, Station_Name TEXT NOT NULL);
    CREATE TABLE Stops (
        Stop_ID INTEGER PRIMARY KEY,
        Station_ID INTEGER NOT NULL,
        Stop_Name TEXT NOT NULL,
        ADA INTEGER NOT NULL,
        Latitude REAL NOT NULL,
        Longitude REAL NOT NULL
    );
    CREATE TABLE Lines (Line_ID INTEGER PRIMARY KEY, Color TEXT NOT NULL);
    CREATE TABLE StopDetails (Stop_ID INTEGER NOT NULL, Line_ID INTEGER NOT NULL, Direction TEXT NOT NULL);
    CREATE TABLE Ridership (
        Station_ID INTEGER NOT NULL,
        Ride_Date TEXT NOT NULL,
        Type_Of_Day TEXT NOT NULL,
        Num_Riders INTEGER NOT NULL
    );
";

pub fn empty_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch(SCHEMA).expect("create schema");
    conn
}

fn ride(conn: &Connection, station: i64, date: &str, day_type: &str, riders: i64) {
    conn.execute(
        "INSERT INTO Ridership VALUES (?1, ?2, ?3, ?4)",
        params![station, date, day_type, riders],
    )
    .expect("insert ridership");
}

/// 小型数据集
///
/// 总客流 1,000,000：工作日 700,000、周六 200,000、周日/节假日 100,000。
/// 各站合计：Howard 300,000、Jackson/Dearborn 280,000、Clark/Lake 260,000、
/// Jackson/State 160,000、UIC-Halsted 0。
pub fn sample_connection() -> Connection {
    let conn = empty_connection();
    conn.execute_batch(
        "
        INSERT INTO Stations VALUES (40900, 'Howard');
        INSERT INTO Stations VALUES (40070, 'Jackson/Dearborn');
        INSERT INTO Stations VALUES (40560, 'Jackson/State');
        INSERT INTO Stations VALUES (40380, 'Clark/Lake');
        INSERT INTO Stations VALUES (40350, 'UIC-Halsted');

        INSERT INTO Stops VALUES (30173, 40900, 'Howard (Northbound)', 1, 42.019063, -87.672892);
        INSERT INTO Stops VALUES (30174, 40900, 'Howard (Southbound)', 1, 42.019063, -87.672892);
        INSERT INTO Stops VALUES (30110, 40560, 'Jackson/State (Red)', 1, 41.878153, -87.627596);
        INSERT INTO Stops VALUES (30074, 40380, 'Clark/Lake (Inner Loop)', 0, 41.885737, -87.630886);

        INSERT INTO Lines VALUES (1, 'Red');
        INSERT INTO Lines VALUES (2, 'Blue');
        INSERT INTO Lines VALUES (3, 'Purple-Express');

        INSERT INTO StopDetails VALUES (30173, 1, 'N');
        INSERT INTO StopDetails VALUES (30174, 1, 'S');
        INSERT INTO StopDetails VALUES (30110, 1, 'N');
        INSERT INTO StopDetails VALUES (30173, 3, 'N');
        INSERT INTO StopDetails VALUES (30074, 2, 'E');
        ",
    )
    .expect("insert reference data");

    // Howard: 2021-01-01 .. 2021-01-12，每天 25,000（工作日）
    for day in 1..=12 {
        ride(&conn, 40900, &format!("2021-01-{day:02} 00:00:00.000"), "W", 25_000);
    }

    ride(&conn, 40380, "2021-02-01 00:00:00.000", "W", 120_000);
    ride(&conn, 40380, "2021-02-06 00:00:00.000", "A", 100_000);
    ride(&conn, 40380, "2021-02-07 00:00:00.000", "U", 40_000);

    ride(&conn, 40070, "2020-03-02 00:00:00.000", "W", 180_000);
    ride(&conn, 40070, "2020-03-07 00:00:00.000", "A", 100_000);

    ride(&conn, 40560, "2020-12-01 00:00:00.000", "W", 100_000);
    ride(&conn, 40560, "2020-12-06 00:00:00.000", "U", 60_000);

    conn
}

pub fn sample_store() -> RidershipStore {
    RidershipStore::from_connection(sample_connection())
}

/// `n` 个站点，第 i 个站点总客流为 i * 1000
pub fn ranked_store(n: i64) -> RidershipStore {
    let conn = empty_connection();
    for i in 1..=n {
        conn.execute(
            "INSERT INTO Stations VALUES (?1, ?2)",
            params![i, format!("Station {i:02}")],
        )
        .expect("insert station");
        ride(&conn, i, "2019-06-01", "W", i * 1000);
    }
    RidershipStore::from_connection(conn)
}

/// 记录收到的图表，不做实际绘制
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub charts: Vec<Chart>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, chart: &Chart) -> Result<Option<PathBuf>> {
        self.charts.push(chart.clone());
        Ok(Some(PathBuf::from(format!("charts/{}.png", chart.file_stem()))))
    }

    fn name(&self) -> &str {
        "recording"
    }
}
