//! 公共常量
//! 提供：
//! - 合法日志级别常量 LOG_LEVELS
//! - 交互提示文本与命令令牌
//! - 报表参数（Top-N 行数、首尾行数、地图经纬度范围）

/// 合法的日志级别（统一来源）
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// 退出令牌
pub const EXIT_TOKEN: &str = "x";

/// 接受绘图的回答
pub const PLOT_TOKENS: &[&str] = &["y", "yes"];

pub const WELCOME_BANNER: &str = "** Welcome to CTA L analysis app **";
pub const COMMAND_PROMPT: &str = "Please enter a command (1-9, x to exit): ";
pub const PLOT_PROMPT: &str = "Plot? (y/n) ";
pub const STATION_PATTERN_PROMPT: &str = "Enter partial station name (wildcards _ and %): ";
pub const LINE_COLOR_PROMPT: &str = "Enter a line color (e.g. Red or Yellow): ";
pub const YEAR_PROMPT: &str = "Year to compare against? ";
pub const UNKNOWN_COMMAND_MESSAGE: &str = "**Error, unknown command, try again...";

/// Top-N / Bottom-N 报表行数
pub const RANKED_LIMIT: usize = 10;

/// 逐日对比时每个序列打印的首尾行数
pub const EDGE_ROWS: usize = 5;

/// 数据集合理年份范围（默认值）
pub const DEFAULT_MIN_YEAR: u16 = 2001;
pub const DEFAULT_MAX_YEAR: u16 = 2021;

/// 芝加哥底图覆盖的经纬度范围: (min_lon, max_lon, min_lat, max_lat)
pub const MAP_EXTENT: (f64, f64, f64, f64) = (-87.9277, -87.5569, 41.7012, 42.0868);
