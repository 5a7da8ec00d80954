//! 相机状态与视口
//!
//! 相机的 GPU 资源归宿主所有；这里只保存计算视图/投影矩阵所需的参数，
//! 并推导出焦平面上可见的世界空间视口尺寸（视差目标依赖该尺寸）。

use glam::{Mat4, Vec3};

/// 相机状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// 相机位置
    pub position: Vec3,
    /// 注视点
    pub target: Vec3,
    /// 上方向
    pub up: Vec3,
    /// 垂直视场角（弧度）
    pub fov_y: f32,
    /// 宽高比
    pub aspect: f32,
    /// 近裁剪面
    pub near: f32,
    /// 远裁剪面
    pub far: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 8.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 60f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraState {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// 相机到注视点的距离
    pub fn focal_distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// 焦平面上的可见视口
    pub fn viewport(&self) -> Viewport {
        Viewport::at_distance(self.fov_y, self.aspect, self.focal_distance())
    }

    /// 根据画布像素尺寸更新宽高比
    pub fn set_surface_size(&mut self, width_px: u32, height_px: u32) {
        if width_px > 0 && height_px > 0 {
            self.aspect = width_px as f32 / height_px as f32;
        }
    }
}

/// 世界空间视口尺寸
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// 透视相机在给定距离处可见的视口
    pub fn at_distance(fov_y: f32, aspect: f32, distance: f32) -> Self {
        let height = 2.0 * (fov_y * 0.5).tan() * distance;
        Self {
            width: height * aspect,
            height,
        }
    }
}
