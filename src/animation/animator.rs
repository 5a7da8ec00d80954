//! 帧动画器
//!
//! 每帧对一个图层执行：
//!
//! 1. `time += dt`（驱动着色器闪烁）
//! 2. 匀速旋转 `rotation += dt * rotation_rate`，每轴按 2π 取模（朝向不变，长时间运行不丢精度）
//! 3. 视差 `offset ← offset + f · (target − offset)`，目标由指针与视口决定
//! 4. 脉动 `scale = 1 + A · sin(elapsed * rate)`
//!
//! `advance` 不分配内存，只原地修改已有状态，可以无限期逐帧调用。

use super::clock::{sanitize_delta, sanitize_pointer};
use super::smoothing::{damp_vec3, Smoothing};
use crate::config::{ConfigError, ConfigResult};
use crate::render::camera::Viewport;
use crate::render::shading::ShaderUniforms;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::f32::consts::TAU;
use serde::{Deserialize, Serialize};

/// 图层的逐帧可变状态，仅由该图层的帧动画器修改
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerState {
    /// 欧拉角（弧度，XYZ 顺序）
    pub rotation: Vec3,
    /// 视差偏移
    pub offset: Vec3,
    /// 统一缩放
    pub scale: f32,
    /// 累计运行时间（秒）
    pub elapsed_time: f32,
}

impl_default_and_new!(LayerState {
    rotation: Vec3::ZERO,
    offset: Vec3::ZERO,
    scale: 1.0,
    elapsed_time: 0.0,
});

impl LayerState {
    /// 模型矩阵：平移(base + offset) · 旋转 · 缩放
    pub fn model_matrix(&self, base_position: Vec3) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            base_position + self.offset,
        )
    }
}

/// 视差参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallaxParams {
    /// 目标偏移 = 指针 × 视口尺寸 / divisor
    pub divisor: f32,
    #[serde(default)]
    pub smoothing: Smoothing,
}

impl ParallaxParams {
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.divisor.is_finite() && self.divisor > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "Parallax divisor {} must be positive",
                self.divisor
            )));
        }
        self.smoothing.validate()
    }
}

/// 脉动参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseParams {
    /// 振幅，[0, 1)
    pub amplitude: f32,
    /// 角速度
    pub rate: f32,
}

impl PulseParams {
    /// 给定时间的缩放，位于 [1 - A, 1 + A]
    #[inline]
    pub fn scale_at(&self, elapsed_time: f32) -> f32 {
        1.0 + self.amplitude * (elapsed_time * self.rate).sin()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.amplitude >= 0.0 && self.amplitude < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "Pulse amplitude {} not in [0, 1)",
                self.amplitude
            )));
        }
        if !self.rate.is_finite() {
            return Err(ConfigError::ValidationError(
                "Pulse rate must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// 角度折回 [0, 2π)
///
/// `rem_euclid` 对极小的负数可能舍入为 2π 本身，这里归零。
#[inline]
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// 图层运动参数
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionParams {
    /// 每轴旋转角速度（弧度/秒，可为负）
    pub rotation_rate: Vec3,
    pub parallax: Option<ParallaxParams>,
    pub pulse: Option<PulseParams>,
}

/// 帧动画器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAnimator {
    pub motion: MotionParams,
    viewport: Viewport,
}

impl FrameAnimator {
    pub fn new(motion: MotionParams, viewport: Viewport) -> Self {
        Self { motion, viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// 画布尺寸变化后更新视口
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// 指针对应的视差目标；未启用视差时为原点
    pub fn parallax_target(&self, pointer: Vec2) -> Vec3 {
        match self.motion.parallax {
            Some(parallax) => {
                let pointer = sanitize_pointer(pointer);
                Vec3::new(
                    pointer.x * self.viewport.width / parallax.divisor,
                    pointer.y * self.viewport.height / parallax.divisor,
                    0.0,
                )
            }
            None => Vec3::ZERO,
        }
    }

    /// 推进一帧
    ///
    /// 间隔被清洗为零（停滞帧、负值、NaN）时不修改任何状态，返回 `false`。
    pub fn advance(
        &self,
        state: &mut LayerState,
        uniforms: &mut ShaderUniforms,
        delta_time: f32,
        pointer: Vec2,
    ) -> bool {
        let dt = sanitize_delta(delta_time);
        if dt == 0.0 {
            return false;
        }

        uniforms.time += dt;
        state.elapsed_time += dt;
        let rotation = state.rotation + self.motion.rotation_rate * dt;
        state.rotation = Vec3::new(
            wrap_angle(rotation.x),
            wrap_angle(rotation.y),
            wrap_angle(rotation.z),
        );

        if let Some(parallax) = self.motion.parallax {
            let target = self.parallax_target(pointer);
            state.offset = damp_vec3(state.offset, target, parallax.smoothing.factor(dt));
        }

        if let Some(pulse) = self.motion.pulse {
            state.scale = pulse.scale_at(state.elapsed_time);
        }

        true
    }
}
