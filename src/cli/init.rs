use log::{debug, error, info, warn};

use cta_ridership::error::Result;
use cta_ridership::file_error;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# CTA L 客流分析工具配置文件

[database]
# 客流 SQLite 数据库（只读打开）
path = "CTA2_L_daily_ridership.db"

[logging]
# 应用日志输出路径
file = "logs/cta-ridership.log"
# 日志级别: trace, debug, info, warn, error
level = "info"

[report]
# 按年汇总时包含的年份范围
min_year = 2001
max_year = 2021

[chart]
# PNG 图表输出目录
output_dir = "charts"
# 线路地图底图
base_map = "chicago.png"
width = 1024
height = 768
"#;

/// 生成默认配置文件
pub fn handle_init(output_path: &str, force: bool) -> Result<()> {
    let path = Path::new(output_path);

    info!("准备生成配置文件: {output_path}");

    // 检查文件是否已存在
    if path.exists() && !force {
        error!("配置文件已存在: {output_path}");
        info!("提示: 使用 --force 参数强制覆盖");
        return Err(file_error!(AlreadyExists {
            path: path.to_path_buf(),
        }));
    }

    if path.exists() && force {
        warn!("将覆盖已存在的配置文件");
    }

    // 创建目录（如果需要）
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        info!("创建目录: {}", parent.display());
        fs::create_dir_all(parent).map_err(|e| {
            file_error!(CreateDirectoryFailed {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })
        })?;
    }

    debug!("写入配置文件...");
    fs::write(path, DEFAULT_CONFIG).map_err(|e| {
        file_error!(WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })?;

    info!("配置文件已生成: {output_path}");
    info!("下一步:");
    info!("  1. 编辑配置文件: {output_path}");
    info!("  2. 验证配置: cta-ridership validate -c {output_path}");
    info!("  3. 开始分析: cta-ridership run -c {output_path}");

    Ok(())
}
