//! 指数平滑
//!
//! `value ← value + f · (target − value)`。固定系数 `f` 的收敛速度随帧率变化；
//! `Responsive` 模式使用 `f = 1 − exp(−k·dt)`，任意帧率下单位时间的收敛量相同。

use crate::config::{ConfigError, ConfigResult};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 平滑方式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Smoothing {
    /// 每帧固定系数，仅在固定帧率下与时间无关
    Fixed { factor: f32 },
    /// 与帧率无关的响应速度（1/秒）
    Responsive { responsiveness: f32 },
}

impl Smoothing {
    /// 标定参考帧率
    pub const REFERENCE_FPS: f32 = 60.0;

    /// 构造一个在 `reference_fps` 下与固定系数 `factor` 等价的帧率无关平滑
    pub fn calibrated(factor: f32, reference_fps: f32) -> Self {
        if factor >= 1.0 {
            return Self::Fixed { factor: 1.0 };
        }
        Self::Responsive {
            responsiveness: -(1.0 - factor).ln() * reference_fps,
        }
    }

    /// 本帧使用的插值系数，范围 [0, 1]
    #[inline]
    pub fn factor(&self, delta_time: f32) -> f32 {
        match *self {
            Self::Fixed { factor } => factor,
            Self::Responsive { responsiveness } => 1.0 - (-responsiveness * delta_time).exp(),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        match *self {
            Self::Fixed { factor } if !(factor > 0.0 && factor <= 1.0) => Err(
                ConfigError::ValidationError(format!("Smoothing factor {} not in (0, 1]", factor)),
            ),
            Self::Responsive { responsiveness }
                if !(responsiveness.is_finite() && responsiveness > 0.0) =>
            {
                Err(ConfigError::ValidationError(format!(
                    "Smoothing responsiveness {} must be positive",
                    responsiveness
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::calibrated(0.05, Self::REFERENCE_FPS)
    }
}

#[inline]
pub fn damp(current: f32, target: f32, factor: f32) -> f32 {
    current + factor * (target - current)
}

#[inline]
pub fn damp_vec3(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current + (target - current) * factor
}

/// 固定系数下残差降到 `tolerance` 以内所需的帧数
pub fn ticks_to_converge(factor: f32, tolerance: f32) -> u32 {
    if factor >= 1.0 {
        return 1;
    }
    (tolerance.ln() / (1.0 - factor).ln()).ceil() as u32
}
