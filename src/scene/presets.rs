//! 预设场景
//!
//! - `space_scene`：白色主星层、靛蓝远景层、青色点缀层与脉动星云
//! - `space_background`：球壳上的闪烁星空，相机跟随指针

use crate::animation::{CameraRig, ParallaxParams, Smoothing};
use crate::config::{CameraConfig, LayerConfig, LoggingConfig, SceneConfig, SurfaceConfig};
use crate::particles::{DistributionKind, PhaseRange};
use crate::render::{BlendMode, Color};
use glam::Vec3;

/// 预设名称
pub const PRESET_NAMES: [&str; 2] = ["space_scene", "space_background"];

/// 按名称查找预设
pub fn by_name(name: &str) -> Option<SceneConfig> {
    match name {
        "space_scene" => Some(space_scene()),
        "space_background" => Some(space_background()),
        _ => None,
    }
}

fn group_parallax() -> ParallaxParams {
    ParallaxParams {
        divisor: 20.0,
        smoothing: Smoothing::calibrated(0.05, Smoothing::REFERENCE_FPS),
    }
}

/// 完整星空场景
pub fn space_scene() -> SceneConfig {
    let group_rotation = Vec3::new(0.02, 0.03, 0.0);

    let stars = LayerConfig::new("stars", 3000, 10.0)
        .with_distribution(DistributionKind::UniformCube)
        .with_color(Color::WHITE)
        .with_twinkle(40.0, 2.0)
        .with_opacity(0.8)
        .with_rotation_rate(group_rotation)
        .with_parallax(group_parallax());

    let distant = LayerConfig::new("distant_stars", 2000, 15.0)
        .with_distribution(DistributionKind::UniformCube)
        .with_color(Color::INDIGO)
        .with_twinkle(21.0, 0.5)
        .with_opacity(0.4)
        .with_rotation_rate(group_rotation)
        .with_parallax(group_parallax());

    let accent = LayerConfig {
        size_amplitude: 0.0,
        ..LayerConfig::new("accent_stars", 200, 12.0)
            .with_color(Color::CYAN)
            .with_twinkle(12.0, 0.0)
            .with_opacity(0.9)
            .with_rotation_rate(Vec3::new(0.0, 0.0, -0.01))
    };

    let nebula = LayerConfig {
        phase: PhaseRange::FullTurn,
        ..LayerConfig::new("nebula_glow", 400, 5.0)
            .with_color(Color::INDIGO)
            .with_twinkle(120.0, 0.5)
            .with_opacity(0.15)
            .with_pulse(0.1, 0.5)
            .with_position(Vec3::new(0.0, 0.0, -10.0))
    };

    SceneConfig {
        seed: None,
        surface: SurfaceConfig::default(),
        camera: CameraConfig {
            position: Vec3::new(0.0, 0.0, 8.0),
            fov_degrees: 60.0,
            ..CameraConfig::default()
        },
        camera_rig: None,
        fog: None,
        layers: vec![stars, distant, accent, nebula],
        logging: LoggingConfig::default(),
    }
}

/// 背景星空
///
/// 15000 颗星分布在半径 100 的球壳上，相机位于壳内并随指针缓慢移动。
pub fn space_background() -> SceneConfig {
    let stars = LayerConfig::new("twinkling_stars", 15000, 100.0)
        .with_distribution(DistributionKind::SphereShell)
        .with_color(Color::WHITE)
        .with_twinkle(40.0, 2.0)
        .with_blend_mode(BlendMode::Additive);

    SceneConfig {
        seed: None,
        surface: SurfaceConfig::default(),
        camera: CameraConfig {
            position: Vec3::new(0.0, 0.0, 12.0),
            fov_degrees: 45.0,
            ..CameraConfig::default()
        },
        camera_rig: Some(CameraRig::default()),
        fog: None,
        layers: vec![stars],
        logging: LoggingConfig::default(),
    }
}
