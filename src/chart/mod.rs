/// Chart 模块 - 图表描述与渲染接口
///
/// 报表层只构造 [`Chart`] 描述（已归约好的 (x, y) 序列），
/// 具体绘制由 [`ChartRenderer`] 实现完成：
/// - `png`（feature = "chart"）：使用 plotters 输出 PNG 文件
/// - 未启用 chart 特性时仅记录日志
use crate::config::ChartConfig;
use crate::constants::MAP_EXTENT;
use crate::error::Result;
use std::fmt::Debug;
use std::path::PathBuf;

#[cfg(feature = "chart")]
mod png;

#[cfg(feature = "chart")]
pub use png::PngRenderer;

/// 一条数据序列
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// 图例名称（单序列图表可省略）
    pub name: Option<String>,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { name: None, points }
    }

    pub fn named(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: Some(name.into()),
            points,
        }
    }

    /// 以日序号 1..=N 作为 x 轴
    pub fn by_day_index(name: impl Into<String>, values: &[i64]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(idx, &v)| ((idx + 1) as f64, v as f64))
            .collect();
        Self::named(name, points)
    }
}

/// 折线图（单序列或带图例的多序列）
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl LineChart {
    /// 所有序列共享的 x 轴范围；较短的序列在右侧留白
    pub fn x_domain(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(x, _)| x))
            .fold(None, |acc, x| match acc {
                None => Some((x, x)),
                Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
            })
    }

    pub fn y_max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, y)| y))
            .fold(0.0, f64::max)
    }

    pub fn has_legend(&self) -> bool {
        self.series.iter().any(|s| s.name.is_some())
    }
}

/// 地理范围（经度为 x，纬度为 y）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoExtent {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl GeoExtent {
    /// 芝加哥底图的固定范围
    pub const CHICAGO: GeoExtent = GeoExtent {
        min_lon: MAP_EXTENT.0,
        max_lon: MAP_EXTENT.1,
        min_lat: MAP_EXTENT.2,
        max_lat: MAP_EXTENT.3,
    };
}

/// 地图上带标注的点
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub label: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// 底图上的散点图
#[derive(Debug, Clone, PartialEq)]
pub struct MapChart {
    pub title: String,
    /// 标记颜色名称（线路颜色）
    pub marker_color: String,
    pub points: Vec<MapPoint>,
    pub extent: GeoExtent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Line(LineChart),
    Map(MapChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Self::Line(c) => &c.title,
            Self::Map(c) => &c.title,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Line(c) => c.series.iter().all(|s| s.points.is_empty()),
            Self::Map(c) => c.points.is_empty(),
        }
    }

    /// 由标题生成的文件名（不含扩展名）
    pub fn file_stem(&self) -> String {
        let mut stem = String::with_capacity(self.title().len());
        for ch in self.title().chars() {
            if ch.is_ascii_alphanumeric() {
                stem.push(ch.to_ascii_lowercase());
            } else if !stem.ends_with('-') {
                stem.push('-');
            }
        }
        let stem = stem.trim_matches('-');
        if stem.is_empty() {
            "chart".to_string()
        } else {
            stem.to_string()
        }
    }
}

/// 图表渲染接口；实现可以阻塞直到图表展示完毕
pub trait ChartRenderer: Debug {
    /// 渲染图表，若写出了文件则返回其路径
    fn render(&mut self, chart: &Chart) -> Result<Option<PathBuf>>;

    /// 渲染器名称 (用于日志记录)
    fn name(&self) -> &str;
}

/// 未启用 chart 特性时使用的渲染器
#[cfg(not(feature = "chart"))]
#[derive(Debug, Default)]
pub struct DisabledRenderer;

#[cfg(not(feature = "chart"))]
impl ChartRenderer for DisabledRenderer {
    fn render(&mut self, chart: &Chart) -> Result<Option<PathBuf>> {
        log::warn!(
            "Charting disabled (built without the `chart` feature), skipping '{}'",
            chart.title()
        );
        Ok(None)
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

/// 根据配置创建默认渲染器
pub fn renderer_from_config(config: &ChartConfig) -> Box<dyn ChartRenderer> {
    #[cfg(feature = "chart")]
    {
        Box::new(PngRenderer::from_config(config))
    }
    #[cfg(not(feature = "chart"))]
    {
        let _ = config;
        Box::new(DisabledRenderer)
    }
}
