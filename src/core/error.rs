//! 统一错误处理模块
//!
//! 提供粒子场核心范围内的错误类型定义
//!
//! ## 错误类型分层
//!
//! - **采样错误** (`SamplerError`): 分布参数非法（粒子数为零、半径非正）
//! - **颜色错误** (`ColorError`): 十六进制颜色字符串无法解析
//! - **配置错误** (`config::ConfigError`): 配置文件读取、解析与校验
//!
//! 所有错误都在构造阶段（帧循环开始之前）产生，`StarfieldError` 汇总全部类型。
//! 帧循环内部没有可失败的操作：异常的帧间隔会被钳制为零而不是返回错误。

use crate::config::ConfigError;
use thiserror::Error;

/// 粒子场核心错误类型
#[derive(Error, Debug)]
pub enum StarfieldError {
    #[error("Sampler error: {0}")]
    Sampler(#[from] SamplerError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    #[error("Duplicate layer name: {0}")]
    DuplicateLayer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 采样器错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplerError {
    #[error("Particle count must be positive, got {0}")]
    InvalidCount(u32),

    #[error("Distribution radius must be a positive finite number, got {0}")]
    InvalidRadius(f32),
}

/// 颜色解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid hex color '{0}', expected #RRGGBB")]
    InvalidHex(String),
}

/// 结果类型别名
pub type StarfieldResult<T> = Result<T, StarfieldError>;
pub type SamplerResult<T> = Result<T, SamplerError>;
pub type ColorResult<T> = Result<T, ColorError>;
