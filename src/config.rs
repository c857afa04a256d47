use crate::constants::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, LOG_LEVELS};
use crate::error::{ConfigError, Error, Result};
use crate::config_error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 年份合法边界
const YEAR_BOUNDS: std::ops::RangeInclusive<u16> = 1900..=2100;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::Config(ConfigError::NotFound(path.to_path_buf())))?;
        Self::from_str(&content, path.to_path_buf())
    }

    /// 从字符串解析配置
    pub fn from_str(content: &str, path: PathBuf) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| {
            Error::Config(ConfigError::ParseFailed {
                path,
                reason: e.to_string(),
            })
        })?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        self.database.validate()?;
        self.logging.validate()?;
        self.report.validate()?;
        self.chart.validate()?;
        Ok(())
    }
}

/// 客流数据库配置
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite 数据库文件路径（只读打开）
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "CTA2_L_daily_ridership.db".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(config_error!(InvalidValue {
                field: "database.path".to_string(),
                value: self.path.clone(),
                reason: "Database path cannot be empty".to_string(),
            }));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// 应用日志输出文件路径
    #[serde(default = "default_log_file")]
    pub file: String,
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_log_file() -> String {
    "logs/cta-ridership.log".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// 获取日志输出文件路径
    pub fn file(&self) -> &str {
        &self.file
    }

    /// 获取日志级别
    pub fn level(&self) -> &str {
        &self.level
    }

    /// 验证日志级别是否有效
    pub fn validate(&self) -> Result<()> {
        if self.file.trim().is_empty() {
            return Err(config_error!(InvalidValue {
                field: "logging.file".to_string(),
                value: self.file.clone(),
                reason: "Log file path cannot be empty".to_string(),
            }));
        }

        if !LOG_LEVELS
            .iter()
            .any(|&l| l.eq_ignore_ascii_case(self.level.as_str()))
        {
            return Err(Error::Config(ConfigError::InvalidLogLevel {
                level: self.level.clone(),
                valid_levels: LOG_LEVELS.iter().map(|s| (*s).to_string()).collect(),
            }));
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_level(),
        }
    }
}

/// 报表参数
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ReportConfig {
    /// 按年汇总时包含的最早年份
    #[serde(default = "default_min_year")]
    pub min_year: u16,
    /// 按年汇总时包含的最晚年份
    #[serde(default = "default_max_year")]
    pub max_year: u16,
}

fn default_min_year() -> u16 {
    DEFAULT_MIN_YEAR
}

fn default_max_year() -> u16 {
    DEFAULT_MAX_YEAR
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<()> {
        for (field, year) in [("report.min_year", self.min_year), ("report.max_year", self.max_year)] {
            if !YEAR_BOUNDS.contains(&year) {
                return Err(config_error!(InvalidValue {
                    field: field.to_string(),
                    value: year.to_string(),
                    reason: format!(
                        "Year must be between {} and {}",
                        YEAR_BOUNDS.start(),
                        YEAR_BOUNDS.end()
                    ),
                }));
            }
        }

        if self.min_year > self.max_year {
            return Err(config_error!(InvalidValue {
                field: "report.min_year".to_string(),
                value: self.min_year.to_string(),
                reason: format!("min_year must not exceed max_year ({})", self.max_year),
            }));
        }

        Ok(())
    }
}

/// 图表输出配置
#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    /// PNG 输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// 线路地图的底图
    #[serde(default = "default_base_map")]
    pub base_map: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_output_dir() -> String {
    "charts".to_string()
}

fn default_base_map() -> String {
    "chicago.png".to_string()
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    768
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            base_map: default_base_map(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl ChartConfig {
    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn base_map(&self) -> &str {
        &self.base_map
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_dir.trim().is_empty() {
            return Err(config_error!(InvalidValue {
                field: "chart.output_dir".to_string(),
                value: self.output_dir.clone(),
                reason: "Chart output directory cannot be empty".to_string(),
            }));
        }

        for (field, size) in [("chart.width", self.width), ("chart.height", self.height)] {
            if size == 0 {
                return Err(config_error!(InvalidValue {
                    field: field.to_string(),
                    value: size.to_string(),
                    reason: "Chart size must be greater than 0".to_string(),
                }));
            }
        }

        Ok(())
    }
}
