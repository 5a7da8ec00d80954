use super::{ConfigError, ConfigResult};
use crate::render::{CameraState, FogRange};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 画布尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
}

impl_default!(SurfaceConfig {
    width: 1920,
    height: 1080,
});

impl SurfaceConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ValidationError(
                "Invalid surface size".to_string(),
            ));
        }
        Ok(())
    }
}

/// 相机配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// 相机位置
    pub position: Vec3,
    /// 注视点
    pub look_at: Vec3,
    /// 垂直视场角（度）
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl_default!(CameraConfig {
    position: Vec3::new(0.0, 0.0, 8.0),
    look_at: Vec3::ZERO,
    fov_degrees: 60.0,
    near: 0.1,
    far: 1000.0,
});

impl CameraConfig {
    /// 构建相机状态
    pub fn to_state(&self, surface: &SurfaceConfig) -> CameraState {
        let mut camera = CameraState {
            position: self.position,
            target: self.look_at,
            up: Vec3::Y,
            fov_y: self.fov_degrees.to_radians(),
            aspect: 1.0,
            near: self.near,
            far: self.far,
        };
        camera.set_surface_size(surface.width, surface.height);
        camera
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::ValidationError(format!(
                "Camera fov {} not in (0, 180)",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(ConfigError::ValidationError(
                "Camera clip planes must satisfy 0 < near < far".to_string(),
            ));
        }
        if !self.position.is_finite() || !self.look_at.is_finite() {
            return Err(ConfigError::ValidationError(
                "Camera position must be finite".to_string(),
            ));
        }
        if self.position.distance(self.look_at) <= f32::EPSILON {
            return Err(ConfigError::ValidationError(
                "Camera position coincides with look-at point".to_string(),
            ));
        }
        Ok(())
    }
}

/// 深度雾配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogConfig {
    pub near: f32,
    pub far: f32,
}

impl FogConfig {
    pub fn range(&self) -> FogRange {
        FogRange {
            near: self.near,
            far: self.far,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.near >= 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(ConfigError::ValidationError(
                "Fog range must satisfy 0 <= near < far".to_string(),
            ));
        }
        Ok(())
    }
}
