use log::info;

use cta_ridership::config::Config;
use cta_ridership::error::Result;
use cta_ridership::store::RidershipStore;
use std::path::Path;

/// 验证配置文件以及其指向的数据库
pub fn handle_validate(cfg: &Config) -> Result<()> {
    info!("配置验证已在 main 中完成");

    info!("数据库: {}", cfg.database.path());
    info!("日志级别: {}", cfg.logging.level());
    info!("日志文件: {}", cfg.logging.file());
    info!(
        "年份范围: {} - {}",
        cfg.report.min_year, cfg.report.max_year
    );
    info!(
        "图表输出: {} ({}x{})",
        cfg.chart.output_dir(),
        cfg.chart.width,
        cfg.chart.height
    );

    if !Path::new(cfg.chart.base_map()).exists() {
        log::warn!(
            "Base map {} not found, line maps will be drawn without background",
            cfg.chart.base_map()
        );
    }

    // 打开数据库并确认各表可查询
    let store = RidershipStore::open(cfg.database.path())?;
    let stations = store.count_stations()?;
    let stops = store.count_stops()?;
    let entries = store.count_ride_entries()?;
    let lines = store.line_stops("%")?.len();

    eprintln!("Configuration validation passed");
    eprintln!("  Database:     {}", cfg.database.path());
    eprintln!("  Stations:     {stations}");
    eprintln!("  Stops:        {stops}");
    eprintln!("  Line stops:   {lines}");
    eprintln!("  Ride entries: {entries}");

    Ok(())
}
