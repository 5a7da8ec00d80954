use super::{ConfigError, ConfigResult};
use crate::animation::{MotionParams, ParallaxParams, PulseParams};
use crate::particles::{DistributionKind, DistributionSpec, PhaseRange};
use crate::render::{BlendMode, Color, FogRange, ShadingParams};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 粒子图层配置
///
/// 构建期静态配置，缺省字段取 [`LayerConfig::default`] 中的值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// 图层名称（场景内唯一）
    pub name: String,

    /// 粒子数
    pub count: u32,

    /// 分布半径
    pub radius: f32,

    /// 分布类型
    pub distribution: DistributionKind,

    /// 闪烁相位范围
    pub phase: PhaseRange,

    /// 色调
    pub color: Color,

    /// 基础点大小
    pub base_size: f32,

    /// 闪烁角速度
    pub twinkle_rate: f32,

    /// 点大小下限系数
    pub size_floor: f32,

    /// 点大小振幅系数
    pub size_amplitude: f32,

    /// 每轴旋转角速度（弧度/秒）
    pub rotation_rate: Vec3,

    /// 指针视差
    pub parallax: Option<ParallaxParams>,

    /// 缩放脉动
    pub pulse: Option<PulseParams>,

    /// 不透明度
    pub opacity: f32,

    /// 混合模式
    pub blend_mode: BlendMode,

    /// 图层基准位置
    pub position: Vec3,
}

impl Default for LayerConfig {
    fn default() -> Self {
        let shading = ShadingParams::default();
        Self {
            name: "stars".to_string(),
            count: 1000,
            radius: 10.0,
            distribution: DistributionKind::default(),
            phase: PhaseRange::default(),
            color: Color::WHITE,
            base_size: shading.base_size,
            twinkle_rate: shading.twinkle_rate,
            size_floor: shading.size_floor,
            size_amplitude: shading.size_amplitude,
            rotation_rate: Vec3::ZERO,
            parallax: None,
            pulse: None,
            opacity: 1.0,
            blend_mode: BlendMode::Additive,
            position: Vec3::ZERO,
        }
    }
}

impl LayerConfig {
    pub fn new(name: impl Into<String>, count: u32, radius: f32) -> Self {
        Self {
            name: name.into(),
            count,
            radius,
            ..Default::default()
        }
    }

    pub fn with_distribution(mut self, distribution: DistributionKind) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// 设置点大小与闪烁速度
    pub fn with_twinkle(mut self, base_size: f32, twinkle_rate: f32) -> Self {
        self.base_size = base_size;
        self.twinkle_rate = twinkle_rate;
        self
    }

    pub fn with_rotation_rate(mut self, rate: Vec3) -> Self {
        self.rotation_rate = rate;
        self
    }

    pub fn with_parallax(mut self, parallax: ParallaxParams) -> Self {
        self.parallax = Some(parallax);
        self
    }

    pub fn with_pulse(mut self, amplitude: f32, rate: f32) -> Self {
        self.pulse = Some(PulseParams { amplitude, rate });
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// 采样器输入
    pub fn distribution_spec(&self) -> DistributionSpec {
        DistributionSpec::new(self.count, self.radius)
            .with_kind(self.distribution)
            .with_phase(self.phase)
    }

    /// 着色常量
    pub fn shading_params(&self, fog: Option<FogRange>) -> ShadingParams {
        ShadingParams {
            base_size: self.base_size,
            twinkle_rate: self.twinkle_rate,
            size_floor: self.size_floor,
            size_amplitude: self.size_amplitude,
            opacity: self.opacity,
            fog,
        }
    }

    /// 运动参数
    pub fn motion(&self) -> MotionParams {
        MotionParams {
            rotation_rate: self.rotation_rate,
            parallax: self.parallax,
            pulse: self.pulse,
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |reason: String| {
            ConfigError::ValidationError(format!("Layer '{}': {}", self.name, reason))
        };

        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Layer name must not be empty".to_string(),
            ));
        }
        self.distribution_spec()
            .validate()
            .map_err(|e| invalid(e.to_string()))?;
        if !self.color.is_normalized() {
            return Err(invalid(format!("color {:?} outside [0, 1]", self.color)));
        }
        if !(self.base_size.is_finite() && self.base_size > 0.0) {
            return Err(invalid(format!("base size {} must be positive", self.base_size)));
        }
        let finite = [
            self.twinkle_rate,
            self.size_floor,
            self.size_amplitude,
            self.rotation_rate.x,
            self.rotation_rate.y,
            self.rotation_rate.z,
            self.position.x,
            self.position.y,
            self.position.z,
        ];
        if !finite.iter().all(|v| v.is_finite()) {
            return Err(invalid("rates and position must be finite".to_string()));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(invalid(format!("opacity {} not in [0, 1]", self.opacity)));
        }
        if let Some(parallax) = &self.parallax {
            parallax.validate().map_err(|e| invalid(e.to_string()))?;
        }
        if let Some(pulse) = &self.pulse {
            pulse.validate().map_err(|e| invalid(e.to_string()))?;
        }
        Ok(())
    }
}
