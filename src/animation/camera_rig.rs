//! 相机跟随
//!
//! 相机在 xy 平面上平滑跟随指针（保持 z 不变），并始终注视固定点。

use super::clock::{sanitize_delta, sanitize_pointer};
use super::smoothing::{damp_vec3, Smoothing};
use crate::config::{ConfigError, ConfigResult};
use crate::render::camera::CameraState;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// 相机跟随参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    /// 指针到相机位移的比例
    pub follow_scale: f32,
    #[serde(default = "default_rig_smoothing")]
    pub smoothing: Smoothing,
    /// 注视点
    #[serde(default)]
    pub look_at: Vec3,
}

fn default_rig_smoothing() -> Smoothing {
    Smoothing::calibrated(0.02, Smoothing::REFERENCE_FPS)
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            follow_scale: 0.5,
            smoothing: default_rig_smoothing(),
            look_at: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.follow_scale.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "Camera rig follow scale {} must be finite",
                self.follow_scale
            )));
        }
        if !self.look_at.is_finite() {
            return Err(ConfigError::ValidationError(
                "Camera rig look-at point must be finite".to_string(),
            ));
        }
        self.smoothing.validate()
    }

    /// 推进一帧；停滞帧不修改相机
    pub fn advance(&self, camera: &mut CameraState, delta_time: f32, pointer: Vec2) {
        let dt = sanitize_delta(delta_time);
        if dt == 0.0 {
            return;
        }
        let pointer = sanitize_pointer(pointer);
        let target = Vec3::new(
            pointer.x * self.follow_scale,
            pointer.y * self.follow_scale,
            camera.position.z,
        );
        camera.position = damp_vec3(camera.position, target, self.smoothing.factor(dt));
        camera.target = self.look_at;
    }
}
