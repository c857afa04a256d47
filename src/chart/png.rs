use super::{Chart, ChartRenderer, LineChart, MapChart};
use crate::chart_error;
use crate::config::ChartConfig;
use crate::error::Result;
use log::{info, warn};
use plotters::backend::RGBPixel;
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};

type DrawResult = std::result::Result<(), Box<dyn Error>>;

/// PNG 渲染器 - 使用 plotters 将图表写入输出目录
#[derive(Debug)]
pub struct PngRenderer {
    output_dir: PathBuf,
    base_map: PathBuf,
    size: (u32, u32),
}

impl PngRenderer {
    pub fn new(output_dir: PathBuf, base_map: PathBuf, size: (u32, u32)) -> Self {
        Self {
            output_dir,
            base_map,
            size,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(
            PathBuf::from(config.output_dir()),
            PathBuf::from(config.base_map()),
            (config.width, config.height),
        )
    }

    fn output_path(&self, chart: &Chart) -> PathBuf {
        self.output_dir.join(format!("{}.png", chart.file_stem()))
    }
}

impl ChartRenderer for PngRenderer {
    fn render(&mut self, chart: &Chart) -> Result<Option<PathBuf>> {
        if chart.is_empty() {
            return Err(chart_error!(Empty {
                title: chart.title().to_string(),
            }));
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            chart_error!(RenderFailed {
                path: self.output_dir.clone(),
                reason: e.to_string(),
            })
        })?;

        let path = self.output_path(chart);
        let drawn = match chart {
            Chart::Line(line) => draw_line_chart(&path, self.size, line),
            Chart::Map(map) => draw_map_chart(&path, self.size, map, &self.base_map),
        };
        drawn.map_err(|e| {
            chart_error!(RenderFailed {
                path: path.clone(),
                reason: e.to_string(),
            })
        })?;

        info!("Chart written: {}", path.display());
        Ok(Some(path))
    }

    fn name(&self) -> &str {
        "png"
    }
}

/// 避免零宽坐标范围
fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

fn draw_line_chart(path: &Path, size: (u32, u32), line: &LineChart) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = line.x_domain().map_or((0.0, 1.0), |(lo, hi)| widen(lo, hi));
    let y_max = line.y_max().max(1.0) * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption(&line.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(line.x_label.as_str())
        .y_desc(line.y_label.as_str())
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    for (idx, series) in line.series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let drawn = chart.draw_series(LineSeries::new(series.points.iter().copied(), &color))?;
        if let Some(name) = &series.name {
            drawn
                .label(name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
    }

    if line.has_legend() {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn draw_map_chart(path: &Path, size: (u32, u32), map: &MapChart, base_map: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let extent = map.extent;
    let mut chart = ChartBuilder::on(&root)
        .caption(&map.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(extent.min_lon..extent.max_lon, extent.min_lat..extent.max_lat)?;

    chart.configure_mesh().disable_mesh().draw()?;

    let (width, height) = chart.plotting_area().dim_in_pixel();
    match load_base_map(base_map, width, height) {
        Ok(pixels) => {
            if let Some(background) = BitMapElement::<_, RGBPixel>::with_owned_buffer(
                (extent.min_lon, extent.max_lat),
                (width, height),
                pixels,
            ) {
                chart.draw_series(std::iter::once(background))?;
            }
        }
        Err(e) => warn!(
            "Base map {} unavailable, drawing without background: {e}",
            base_map.display()
        ),
    }

    let color = marker_color(&map.marker_color);
    chart.draw_series(
        map.points
            .iter()
            .map(|p| Circle::new((p.longitude, p.latitude), 5, color.filled())),
    )?;
    chart.draw_series(map.points.iter().map(|p| {
        Text::new(
            p.label.clone(),
            (p.longitude, p.latitude),
            ("sans-serif", 12).into_font(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// 读取底图并缩放到绘图区大小，返回 RGB 像素
fn load_base_map(path: &Path, width: u32, height: u32) -> std::result::Result<Vec<u8>, Box<dyn Error>> {
    let image = image::open(path)?.to_rgb8();
    let resized = image::imageops::resize(&image, width, height, image::imageops::FilterType::Triangle);
    Ok(resized.into_raw())
}

/// CTA 线路颜色
fn marker_color(name: &str) -> RGBColor {
    match name.to_ascii_lowercase().as_str() {
        "red" => RGBColor(198, 12, 48),
        "blue" => RGBColor(0, 161, 222),
        "brown" => RGBColor(98, 54, 27),
        "green" => RGBColor(0, 155, 58),
        "orange" => RGBColor(249, 70, 28),
        "pink" => RGBColor(226, 126, 166),
        "purple" => RGBColor(82, 35, 152),
        "yellow" => RGBColor(249, 227, 0),
        _ => BLACK,
    }
}
