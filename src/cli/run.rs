use cta_ridership::chart::{self, GeoExtent};
use cta_ridership::config::Config;
use cta_ridership::dispatcher::{Console, Session, SessionSettings};
use cta_ridership::error::Result;
use cta_ridership::report::YearRange;
use cta_ridership::store::RidershipStore;
use log::info;
use std::io;
use std::time::Instant;

/// 运行交互式会话（单线程、单连接）
pub fn handle_run(cfg: &Config) -> Result<()> {
    let started = Instant::now();
    info!("Starting interactive session");

    // 数据库句柄在整个会话期间唯一持有，函数返回（含出错）时释放
    let store = RidershipStore::open(cfg.database.path())?;

    let mut renderer = chart::renderer_from_config(&cfg.chart);
    info!("Using chart renderer: {}", renderer.name());

    let settings = SessionSettings {
        years: YearRange::from(&cfg.report),
        map_extent: GeoExtent::CHICAGO,
    };

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut session = Session::new(&store, console, renderer.as_mut(), settings);
    session.run()?;

    info!(
        "Session finished after {:.1} seconds",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
