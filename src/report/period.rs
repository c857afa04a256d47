use crate::chart::{Chart, LineChart, Series};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::model::{Period, PeriodTotal};
use crate::store::RidershipStore;
use log::debug;

/// 按年汇总时包含的年份范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub first: u16,
    pub last: u16,
}

impl From<&ReportConfig> for YearRange {
    fn from(cfg: &ReportConfig) -> Self {
        Self {
            first: cfg.min_year,
            last: cfg.max_year,
        }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub period: Period,
    pub rows: Vec<PeriodTotal>,
}

pub fn period_report(store: &RidershipStore, period: Period, years: YearRange) -> Result<PeriodReport> {
    let rows = match period {
        Period::Month => store.period_totals(period, "01", "12")?,
        Period::Year => store.period_totals(
            period,
            &format!("{:04}", years.first),
            &format!("{:04}", years.last),
        )?,
    };
    Ok(PeriodReport { period, rows })
}

impl PeriodReport {
    pub fn title(&self) -> &'static str {
        match self.period {
            Period::Month => "** ridership by month **",
            Period::Year => "** ridership by year **",
        }
    }

    /// 以月份或年份数值为 x 轴的折线图
    pub fn to_chart(&self) -> Chart {
        let (title, x_label) = match self.period {
            Period::Month => ("monthly ridership", "month"),
            Period::Year => ("yearly ridership", "year"),
        };
        let points = self
            .rows
            .iter()
            .filter_map(|r| match r.bucket.parse::<u16>() {
                Ok(x) => Some((f64::from(x), r.riders as f64)),
                Err(e) => {
                    debug!("Skipping bucket {:?} in {title}: {e}", r.bucket);
                    None
                }
            })
            .collect();

        Chart::Line(LineChart {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: "number of riders".to_string(),
            series: vec![Series::new(points)],
        })
    }
}
