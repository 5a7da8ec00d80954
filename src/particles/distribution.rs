//! 粒子分布描述

use crate::core::error::{SamplerError, SamplerResult};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// 分布类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    /// 实心球内均匀体密度
    #[default]
    UniformVolume,
    /// 球面（所有点距中心恰为半径）
    SphereShell,
    /// 半边长为半径的立方体内均匀分布
    UniformCube,
}

/// 闪烁相位取值范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseRange {
    /// [0, π)
    #[default]
    HalfTurn,
    /// [0, 2π)
    FullTurn,
}

impl PhaseRange {
    /// 区间上界（不含）
    pub const fn upper(&self) -> f32 {
        match self {
            Self::HalfTurn => PI,
            Self::FullTurn => TAU,
        }
    }
}

/// 采样器输入：只在构建图层时使用一次
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSpec {
    /// 粒子数
    pub count: u32,
    /// 分布半径
    pub radius: f32,
    /// 分布类型
    pub kind: DistributionKind,
    /// 相位范围
    pub phase: PhaseRange,
}

impl DistributionSpec {
    pub fn new(count: u32, radius: f32) -> Self {
        Self {
            count,
            radius,
            kind: DistributionKind::default(),
            phase: PhaseRange::default(),
        }
    }

    pub fn with_kind(mut self, kind: DistributionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_phase(mut self, phase: PhaseRange) -> Self {
        self.phase = phase;
        self
    }

    /// 校验参数（在分配缓冲区之前调用）
    pub fn validate(&self) -> SamplerResult<()> {
        if self.count == 0 {
            return Err(SamplerError::InvalidCount(self.count));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(SamplerError::InvalidRadius(self.radius));
        }
        Ok(())
    }
}
