//! 核心模块
//!
//! 包含粒子场核心的基础设施：
//! - `error` - 错误类型定义
//! - `logging` - 日志初始化
//! - `macros` - 配置默认值宏

pub mod error;
pub mod logging;
#[macro_use]
pub mod macros;

// 重新导出错误类型
pub use error::{
    ColorError, ColorResult, SamplerError, SamplerResult, StarfieldError, StarfieldResult,
};
pub use logging::init_logging;
