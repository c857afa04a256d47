use crate::chart::{Chart, GeoExtent, MapChart, MapPoint};
use crate::error::{LookupError, Result};
use crate::model::{LineStation, LineStop};
use crate::store::RidershipStore;

/// 线路颜色上的所有停靠点
pub fn line_stops(store: &RidershipStore, color: &str) -> Result<Vec<LineStop>> {
    let stops = store.line_stops(color)?;
    if stops.is_empty() {
        return Err(LookupError::NoSuchLine.into());
    }
    Ok(stops)
}

/// 线路经过的站点（含坐标）
#[derive(Debug, Clone, PartialEq)]
pub struct LineMap {
    /// 用户输入的线路颜色
    pub color: String,
    pub stations: Vec<LineStation>,
}

pub fn line_map(store: &RidershipStore, color: &str) -> Result<LineMap> {
    let stations = store.line_stations(color)?;
    if stations.is_empty() {
        return Err(LookupError::NoSuchLine.into());
    }
    Ok(LineMap {
        color: color.to_string(),
        stations,
    })
}

impl LineMap {
    /// 标记颜色；Purple-Express 线使用紫色
    pub fn marker_color(&self) -> &str {
        if self.color.eq_ignore_ascii_case("purple-express") {
            "Purple"
        } else {
            &self.color
        }
    }

    pub fn to_chart(&self, extent: GeoExtent) -> Chart {
        Chart::Map(MapChart {
            title: format!("{} line", self.color),
            marker_color: self.marker_color().to_string(),
            points: self
                .stations
                .iter()
                .map(|s| MapPoint {
                    label: s.name.clone(),
                    longitude: s.longitude,
                    latitude: s.latitude,
                })
                .collect(),
            extent,
        })
    }
}
