use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration related error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File operation error
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Chart rendering error
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    /// Lookup produced no usable match; the message is shown to the user as-is
    #[error("{0}")]
    Lookup(#[from] LookupError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Configuration file parse failed
    #[error("Failed to parse configuration file {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    /// Invalid log level
    #[error("Invalid log level '{level}', valid values: {}", valid_levels.join(", "))]
    InvalidLogLevel {
        level: String,
        valid_levels: Vec<String>,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value {field} = '{value}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// File already exists
    #[error("File already exists: {path} (use --force to replace)")]
    AlreadyExists { path: PathBuf },

    /// File write failed
    #[error("Failed to write file {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// Create directory failed
    #[error("Failed to create directory {path}: {reason}")]
    CreateDirectoryFailed { path: PathBuf, reason: String },
}

/// 数据库错误
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Database file missing or cannot be opened
    #[error("Failed to open database {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    /// A query failed to prepare or execute
    #[error("Query '{query}' failed: {source}")]
    QueryFailed {
        query: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

/// 图表错误
#[derive(Debug, Error)]
pub enum ChartError {
    /// Drawing or encoding the chart failed
    #[error("Failed to render chart {path}: {reason}")]
    RenderFailed { path: PathBuf, reason: String },

    /// Chart has nothing to draw
    #[error("Chart '{title}' has no data points")]
    Empty { title: String },
}

/// 查找错误（可恢复，命令中止后返回提示符）
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// Station search matched nothing
    #[error("**No stations found...")]
    NoStations,

    /// Exactly-one station lookup matched nothing
    #[error("**No station found...")]
    NoStation,

    /// Exactly-one station lookup matched more than one name
    #[error("**Multiple stations found...")]
    MultipleStations,

    /// Line color matched nothing
    #[error("**No such line...")]
    NoSuchLine,
}

/// 应用程序 Result 类型别名
pub type Result<T> = std::result::Result<T, Error>;

// 辅助宏，用于快速创建错误
#[macro_export]
macro_rules! config_error {
    ($variant:ident { $($field:ident: $value:expr),+ $(,)? }) => {
        $crate::error::Error::Config($crate::error::ConfigError::$variant {
            $($field: $value),+
        })
    };
}

#[macro_export]
macro_rules! file_error {
    ($variant:ident { $($field:ident: $value:expr),+ $(,)? }) => {
        $crate::error::Error::File($crate::error::FileError::$variant {
            $($field: $value),+
        })
    };
}

#[macro_export]
macro_rules! chart_error {
    ($variant:ident { $($field:ident: $value:expr),+ $(,)? }) => {
        $crate::error::Error::Chart($crate::error::ChartError::$variant {
            $($field: $value),+
        })
    };
}
