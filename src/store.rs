//! 查询层 - 对只读客流数据库的参数化查询
//!
//! 所有查询均返回有序结果集；结果为空不是错误，由报表层决定如何处理。
use crate::error::{DatabaseError, Error, Result};
use crate::model::{
    DailyRiders, DayType, LineStation, LineStop, Period, PeriodTotal, Station, StationTotal,
};
use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::types::FromSql;
use rusqlite::{Connection, OpenFlags, Params, Row};
use std::path::Path;

const COUNT_STATIONS_SQL: &str = "SELECT count(*) FROM Stations";
const COUNT_STOPS_SQL: &str = "SELECT count(*) FROM Stops";
const COUNT_RIDE_ENTRIES_SQL: &str = "SELECT count(*) FROM Ridership";
const DATE_RANGE_SQL: &str = "SELECT min(date(Ride_Date)), max(date(Ride_Date)) FROM Ridership";
const TOTAL_RIDERS_SQL: &str = "SELECT COALESCE(sum(Num_Riders), 0) FROM Ridership";
const DAY_TYPE_RIDERS_SQL: &str =
    "SELECT COALESCE(sum(Num_Riders), 0) FROM Ridership WHERE Type_Of_Day = ?1";

const STATIONS_LIKE_SQL: &str = "
    SELECT min(Station_ID), Station_Name
    FROM Stations
    WHERE Station_Name LIKE ?1
    GROUP BY Station_Name
    ORDER BY Station_Name ASC";

const STATION_TOTALS_BY_NAME_SQL: &str = "
    SELECT Stations.Station_Name, COALESCE(sum(Ridership.Num_Riders), 0) AS Total
    FROM Stations LEFT JOIN Ridership ON Stations.Station_ID = Ridership.Station_ID
    GROUP BY Stations.Station_Name
    ORDER BY Stations.Station_Name ASC
    LIMIT ?1";

const STATION_TOTALS_DESC_SQL: &str = "
    SELECT Stations.Station_Name, sum(Ridership.Num_Riders) AS Total
    FROM Stations INNER JOIN Ridership ON Stations.Station_ID = Ridership.Station_ID
    GROUP BY Stations.Station_Name
    ORDER BY Total DESC
    LIMIT ?1";

const STATION_TOTALS_ASC_SQL: &str = "
    SELECT Stations.Station_Name, sum(Ridership.Num_Riders) AS Total
    FROM Stations INNER JOIN Ridership ON Stations.Station_ID = Ridership.Station_ID
    GROUP BY Stations.Station_Name
    ORDER BY Total ASC
    LIMIT ?1";

const LINE_STOPS_SQL: &str = "
    SELECT Stops.Stop_Name, StopDetails.Direction, Stops.ADA
    FROM Stops
    INNER JOIN StopDetails ON Stops.Stop_ID = StopDetails.Stop_ID
    INNER JOIN Lines ON StopDetails.Line_ID = Lines.Line_ID
    WHERE Lines.Color LIKE ?1
    ORDER BY Stops.Stop_Name ASC";

const MONTH_TOTALS_SQL: &str = "
    SELECT strftime('%m', Ride_Date) AS Bucket, sum(Num_Riders)
    FROM Ridership
    WHERE strftime('%m', Ride_Date) >= ?1 AND strftime('%m', Ride_Date) <= ?2
    GROUP BY Bucket
    ORDER BY Bucket ASC";

const YEAR_TOTALS_SQL: &str = "
    SELECT strftime('%Y', Ride_Date) AS Bucket, sum(Num_Riders)
    FROM Ridership
    WHERE strftime('%Y', Ride_Date) >= ?1 AND strftime('%Y', Ride_Date) <= ?2
    GROUP BY Bucket
    ORDER BY Bucket ASC";

const DAILY_RIDERS_SQL: &str = "
    SELECT date(Ride_Date), Num_Riders
    FROM Ridership INNER JOIN Stations ON Ridership.Station_ID = Stations.Station_ID
    WHERE Stations.Station_Name = ?1 AND strftime('%Y', Ride_Date) LIKE ?2
    ORDER BY Ride_Date ASC";

const LINE_STATIONS_SQL: &str = "
    SELECT DISTINCT Stations.Station_Name, Stops.Latitude, Stops.Longitude
    FROM Stations
    INNER JOIN Stops ON Stations.Station_ID = Stops.Station_ID
    INNER JOIN StopDetails ON Stops.Stop_ID = StopDetails.Stop_ID
    INNER JOIN Lines ON StopDetails.Line_ID = Lines.Line_ID
    WHERE Lines.Color LIKE ?1
    ORDER BY Stations.Station_Name ASC";

/// 站点汇总的排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationOrder {
    /// 全部站点（含无客流站点）按名称升序
    Name,
    /// 有客流站点按总客流降序
    MostRiders,
    /// 有客流站点按总客流升序
    FewestRiders,
}

impl StationOrder {
    fn sql(self) -> &'static str {
        match self {
            Self::Name => STATION_TOTALS_BY_NAME_SQL,
            Self::MostRiders => STATION_TOTALS_DESC_SQL,
            Self::FewestRiders => STATION_TOTALS_ASC_SQL,
        }
    }

    fn query_name(self) -> &'static str {
        match self {
            Self::Name => "station totals by name",
            Self::MostRiders => "station totals descending",
            Self::FewestRiders => "station totals ascending",
        }
    }
}

fn query_failed(query: &'static str) -> impl Fn(rusqlite::Error) -> Error {
    move |source| Error::Database(DatabaseError::QueryFailed { query, source })
}

/// 客流数据库句柄，进程内唯一、只读
#[derive(Debug)]
pub struct RidershipStore {
    conn: Connection,
}

impl RidershipStore {
    /// 以只读方式打开数据库文件
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::Database(DatabaseError::OpenFailed {
                path: path.to_path_buf(),
                reason: "file does not exist".to_string(),
            }));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            Error::Database(DatabaseError::OpenFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        })?;

        info!("Opened ridership database: {}", path.display());
        Ok(Self { conn })
    }

    /// 使用已有连接（测试中为内存数据库）
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn scalar<T: FromSql, P: Params>(&self, query: &'static str, sql: &str, params: P) -> Result<T> {
        self.conn
            .query_row(sql, params, |row| row.get(0))
            .map_err(query_failed(query))
    }

    fn collect<T, P, F>(&self, query: &'static str, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare_cached(sql).map_err(query_failed(query))?;
        let rows = stmt
            .query_map(params, map)
            .map_err(query_failed(query))?
            .collect::<rusqlite::Result<Vec<T>>>()
            .map_err(query_failed(query))?;
        debug!("{query}: {} row(s)", rows.len());
        Ok(rows)
    }

    pub fn count_stations(&self) -> Result<i64> {
        self.scalar("count stations", COUNT_STATIONS_SQL, [])
    }

    pub fn count_stops(&self) -> Result<i64> {
        self.scalar("count stops", COUNT_STOPS_SQL, [])
    }

    pub fn count_ride_entries(&self) -> Result<i64> {
        self.scalar("count ride entries", COUNT_RIDE_ENTRIES_SQL, [])
    }

    /// 最早与最晚的乘车日期；无记录时为 None
    pub fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let (first, last): (Option<NaiveDate>, Option<NaiveDate>) = self
            .conn
            .query_row(DATE_RANGE_SQL, [], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(query_failed("date range"))?;
        Ok(first.zip(last))
    }

    /// 全部客流总数（百分比的分母）
    pub fn total_riders(&self) -> Result<i64> {
        self.scalar("total riders", TOTAL_RIDERS_SQL, [])
    }

    pub fn riders_on(&self, day_type: DayType) -> Result<i64> {
        self.scalar("riders by day type", DAY_TYPE_RIDERS_SQL, [day_type.code()])
    }

    /// 按名称模式查找站点（`_` 与 `%` 通配，大小写不敏感），同名站点合并为一行
    pub fn stations_like(&self, pattern: &str) -> Result<Vec<Station>> {
        self.collect("stations like", STATIONS_LIKE_SQL, [pattern], |row| {
            Ok(Station {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
    }

    /// 按站点汇总客流；`limit` 为 None 时返回全部
    pub fn station_totals(&self, order: StationOrder, limit: Option<usize>) -> Result<Vec<StationTotal>> {
        // SQLite 中 LIMIT -1 表示不限制
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
        self.collect(order.query_name(), order.sql(), [limit], |row| {
            Ok(StationTotal {
                name: row.get(0)?,
                riders: row.get(1)?,
            })
        })
    }

    /// 线路颜色（大小写不敏感）上的停靠点
    pub fn line_stops(&self, color: &str) -> Result<Vec<LineStop>> {
        self.collect("line stops", LINE_STOPS_SQL, [color], |row| {
            Ok(LineStop {
                stop_name: row.get(0)?,
                direction: row.get(1)?,
                accessible: row.get::<_, i64>(2)? != 0,
            })
        })
    }

    /// 按月或按年汇总客流，仅包含 `[low, high]` 范围内的分组
    pub fn period_totals(&self, period: Period, low: &str, high: &str) -> Result<Vec<PeriodTotal>> {
        let (query, sql) = match period {
            Period::Month => ("month totals", MONTH_TOTALS_SQL),
            Period::Year => ("year totals", YEAR_TOTALS_SQL),
        };
        self.collect(query, sql, [low, high], |row| {
            Ok(PeriodTotal {
                bucket: row.get(0)?,
                riders: row.get(1)?,
            })
        })
    }

    /// 某站点在指定年份（LIKE 模式）内按日期排序的每日客流
    pub fn daily_riders(&self, station_name: &str, year: &str) -> Result<Vec<DailyRiders>> {
        self.collect("daily riders", DAILY_RIDERS_SQL, [station_name, year], |row| {
            Ok(DailyRiders {
                date: row.get(0)?,
                riders: row.get(1)?,
            })
        })
    }

    /// 线路颜色经过的不同站点及坐标
    pub fn line_stations(&self, color: &str) -> Result<Vec<LineStation>> {
        self.collect("line stations", LINE_STATIONS_SQL, [color], |row| {
            Ok(LineStation {
                name: row.get(0)?,
                latitude: row.get(1)?,
                longitude: row.get(2)?,
            })
        })
    }
}
