//! 日志初始化
//!
//! 基于 `tracing-subscriber` 安装全局订阅者。`RUST_LOG` 优先于配置中的日志级别。

use crate::config::LoggingConfig;
use crate::core::error::StarfieldResult;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// 初始化日志系统
///
/// 返回是否成功安装了订阅者；已有全局订阅者时（例如测试中重复调用）返回 `false`。
///
/// # 错误
///
/// 启用文件日志且日志文件无法打开时返回 IO 错误。
pub fn init_logging(config: &LoggingConfig) -> StarfieldResult<bool> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_filter_directive()));

    let installed = if config.log_to_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file_path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .is_ok()
    } else if config.log_to_console {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .is_ok()
    } else {
        false
    };

    if installed {
        tracing::info!(target: "starfield", "Logging initialized at {:?}", config.level);
    }
    Ok(installed)
}
