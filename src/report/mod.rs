/// Report 模块 - 每个命令的报表构建逻辑
///
/// 报表构建器只接收已解析好的参数并返回结构化结果，
/// 不做任何控制台交互（提示与读取由 dispatcher 负责）。
///
/// - `breakdown`：按站点汇总（全部 / Top-10 / Least-10）
/// - `period`：按月、按年汇总
/// - `comparison`：两站点逐日对比
/// - `line`：线路停靠点与线路地图
use crate::error::{LookupError, Result};
use crate::model::{DayType, Station};
use crate::store::RidershipStore;
use chrono::NaiveDate;
use log::debug;

mod breakdown;
mod comparison;
mod line;
mod period;

pub use breakdown::{Breakdown, BreakdownKind, breakdown};
pub use comparison::{StationComparison, StationSeries, compare_stations};
pub use line::{LineMap, line_map, line_stops};
pub use period::{PeriodReport, YearRange, period_report};

/// `part` 占 `total` 的百分比；总数为 0 时返回 0
pub fn percentage_of(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// 某一类别的客流及其占总客流的百分比
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub riders: i64,
    pub percentage: f64,
}

impl Share {
    pub fn of_total(label: impl Into<String>, riders: i64, grand_total: i64) -> Self {
        Self {
            label: label.into(),
            riders,
            percentage: percentage_of(riders, grand_total),
        }
    }
}

/// 启动时输出的总体统计
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralStats {
    pub stations: i64,
    pub stops: i64,
    pub ride_entries: i64,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub total_riders: i64,
    /// 工作日 / 周六 / 周日及节假日，分母均为总客流
    pub day_types: Vec<Share>,
}

pub fn general_stats(store: &RidershipStore) -> Result<GeneralStats> {
    let total_riders = store.total_riders()?;
    let day_types = DayType::ALL
        .iter()
        .map(|&dt| Ok(Share::of_total(dt.label(), store.riders_on(dt)?, total_riders)))
        .collect::<Result<Vec<_>>>()?;

    Ok(GeneralStats {
        stations: store.count_stations()?,
        stops: store.count_stops()?,
        ride_entries: store.count_ride_entries()?,
        date_range: store.date_range()?,
        total_riders,
        day_types,
    })
}

/// 按名称模式查找站点，至少需要一个匹配
pub fn find_stations(store: &RidershipStore, pattern: &str) -> Result<Vec<Station>> {
    let stations = store.stations_like(pattern)?;
    if stations.is_empty() {
        return Err(LookupError::NoStations.into());
    }
    Ok(stations)
}

/// 按名称模式解析唯一站点
pub fn resolve_station(store: &RidershipStore, pattern: &str) -> Result<Station> {
    let mut stations = store.stations_like(pattern)?;
    debug!("Pattern '{pattern}' matched {} station name(s)", stations.len());
    match stations.len() {
        0 => Err(LookupError::NoStation.into()),
        1 => Ok(stations.remove(0)),
        _ => Err(LookupError::MultipleStations.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_of() {
        assert!((percentage_of(700_000, 1_000_000) - 70.0).abs() < 1e-9);
        assert!((percentage_of(1, 3) - 33.333_333).abs() < 1e-4);
    }

    #[test]
    fn test_percentage_of_zero_total() {
        assert!(percentage_of(0, 0).abs() < f64::EPSILON);
    }
}
