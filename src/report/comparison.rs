use crate::chart::{Chart, LineChart, Series};
use crate::constants::EDGE_ROWS;
use crate::error::Result;
use crate::model::{DailyRiders, Station};
use crate::store::RidershipStore;

/// 一个站点在某年的逐日客流
#[derive(Debug, Clone, PartialEq)]
pub struct StationSeries {
    pub station: Station,
    pub days: Vec<DailyRiders>,
}

impl StationSeries {
    /// 前 5 行
    pub fn head(&self) -> &[DailyRiders] {
        &self.days[..self.days.len().min(EDGE_ROWS)]
    }

    /// 后 5 行；不足 10 行时与 `head` 有重叠，重叠行会输出两次
    pub fn tail(&self) -> &[DailyRiders] {
        &self.days[self.days.len().saturating_sub(EDGE_ROWS)..]
    }

    fn riders(&self) -> Vec<i64> {
        self.days.iter().map(|d| d.riders).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationComparison {
    /// 年份（作为 LIKE 模式匹配）
    pub year: String,
    pub first: StationSeries,
    pub second: StationSeries,
}

/// 两个已解析站点在同一年的逐日客流对比
pub fn compare_stations(
    store: &RidershipStore,
    year: &str,
    first: Station,
    second: Station,
) -> Result<StationComparison> {
    let first_days = store.daily_riders(&first.name, year)?;
    let second_days = store.daily_riders(&second.name, year)?;

    Ok(StationComparison {
        year: year.to_string(),
        first: StationSeries {
            station: first,
            days: first_days,
        },
        second: StationSeries {
            station: second,
            days: second_days,
        },
    })
}

impl StationComparison {
    /// x 轴为日序号 1..N（N 为较长序列的天数），图例为站点名称
    pub fn to_chart(&self) -> Chart {
        Chart::Line(LineChart {
            title: format!("riders each day of {}", self.year),
            x_label: "day".to_string(),
            y_label: "number of riders".to_string(),
            series: vec![
                Series::by_day_index(self.first.station.name.clone(), &self.first.riders()),
                Series::by_day_index(self.second.station.name.clone(), &self.second.riders()),
            ],
        })
    }
}
