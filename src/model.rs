//! 数据模型 - 只读引用数据的行类型
use chrono::NaiveDate;

/// 站点（名称不唯一）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: i64,
    pub name: String,
}

/// 客流记录的日期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    Weekday,
    Saturday,
    SundayHoliday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [Self::Weekday, Self::Saturday, Self::SundayHoliday];

    /// `Ridership.Type_Of_Day` 中的编码
    pub fn code(self) -> &'static str {
        match self {
            Self::Weekday => "W",
            Self::Saturday => "A",
            Self::SundayHoliday => "U",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Weekday => "Weekday",
            Self::Saturday => "Saturday",
            Self::SundayHoliday => "Sunday/holiday",
        }
    }
}

/// 按站点汇总的客流
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationTotal {
    pub name: String,
    pub riders: i64,
}

/// 时间分组
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Month,
    Year,
}

/// 按月或按年汇总的客流，`bucket` 为 `01`..`12` 或四位年份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTotal {
    pub bucket: String,
    pub riders: i64,
}

/// 线路上的一个停靠点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStop {
    pub stop_name: String,
    pub direction: String,
    pub accessible: bool,
}

/// 线路经过的站点及坐标
#[derive(Debug, Clone, PartialEq)]
pub struct LineStation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// 单日客流
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRiders {
    pub date: NaiveDate,
    pub riders: i64,
}
