use super::Share;
use crate::constants::RANKED_LIMIT;
use crate::error::Result;
use crate::store::{RidershipStore, StationOrder};

/// 按站点汇总的报表种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownKind {
    /// 全部站点，按名称排序，无客流的站点显示 0
    AllStations,
    /// 客流最多的 10 个站点
    Busiest,
    /// 客流最少的 10 个站点
    LeastBusy,
}

struct BreakdownSpec {
    title: &'static str,
    order: StationOrder,
    limit: Option<usize>,
}

impl BreakdownKind {
    fn spec(self) -> BreakdownSpec {
        match self {
            Self::AllStations => BreakdownSpec {
                title: "** ridership all stations **",
                order: StationOrder::Name,
                limit: None,
            },
            Self::Busiest => BreakdownSpec {
                title: "** top-10 stations **",
                order: StationOrder::MostRiders,
                limit: Some(RANKED_LIMIT),
            },
            Self::LeastBusy => BreakdownSpec {
                title: "** least-10 stations **",
                order: StationOrder::FewestRiders,
                limit: Some(RANKED_LIMIT),
            },
        }
    }

    pub fn title(self) -> &'static str {
        self.spec().title
    }
}

/// 按站点汇总的结果；同客流站点之间的顺序取决于数据库，不保证稳定
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub title: &'static str,
    pub rows: Vec<Share>,
}

pub fn breakdown(store: &RidershipStore, kind: BreakdownKind) -> Result<Breakdown> {
    let spec = kind.spec();
    let grand_total = store.total_riders()?;
    let rows = store
        .station_totals(spec.order, spec.limit)?
        .into_iter()
        .map(|t| Share::of_total(t.name, t.riders, grand_total))
        .collect();

    Ok(Breakdown {
        title: spec.title,
        rows,
    })
}
