//! 图层合成器
//!
//! 按注册顺序持有图层，宿主每帧调用一次 [`LayerCompositor::tick`]。
//! 增删图层只能在帧循环之外进行（`&mut self`）。

use super::layer::{DrawableDescriptor, ParticleLayer};
use crate::animation::{CameraRig, FrameClock};
use crate::config::{LayerConfig, SceneConfig, SurfaceConfig};
use crate::core::error::{StarfieldError, StarfieldResult};
use crate::render::{CameraState, FogRange};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 单帧统计
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// 帧序号（从 1 开始）
    pub frame_index: u64,
    /// 清洗后的帧间隔
    pub delta: f32,
    /// 全部图层的粒子总数
    pub particle_count: usize,
    /// 本帧状态发生变化的图层数
    pub layers_advanced: usize,
}

/// 图层合成器
#[derive(Debug, Clone)]
pub struct LayerCompositor {
    layers: Vec<ParticleLayer>,
    camera: CameraState,
    camera_rig: Option<CameraRig>,
    fog: Option<FogRange>,
    surface: SurfaceConfig,
    clock: FrameClock,
    particle_count: usize,
}

impl LayerCompositor {
    /// 创建空合成器
    pub fn new(camera: CameraState, surface: SurfaceConfig) -> Self {
        Self {
            layers: Vec::new(),
            camera,
            camera_rig: None,
            fog: None,
            surface,
            clock: FrameClock::new(),
            particle_count: 0,
        }
    }

    /// 按场景配置构建（有种子时可复现）
    pub fn from_config(config: &SceneConfig) -> StarfieldResult<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::from_config_with(config, &mut rng)
    }

    /// 按场景配置构建，使用注入的随机源
    pub fn from_config_with<R: Rng + ?Sized>(
        config: &SceneConfig,
        rng: &mut R,
    ) -> StarfieldResult<Self> {
        config.validate()?;

        let mut compositor = Self::new(config.camera.to_state(&config.surface), config.surface);
        compositor.camera_rig = config.camera_rig;
        compositor.fog = config.fog.map(|fog| fog.range());

        for layer in &config.layers {
            compositor.add_layer(layer, rng)?;
        }

        tracing::info!(
            target: "scene",
            layers = compositor.layers.len(),
            particles = compositor.particle_count,
            seeded = config.seed.is_some(),
            "Scene composed"
        );
        Ok(compositor)
    }

    /// 设置相机跟随
    pub fn set_camera_rig(&mut self, rig: Option<CameraRig>) {
        self.camera_rig = rig;
    }

    /// 设置深度雾（只影响之后添加的图层）
    pub fn set_fog(&mut self, fog: Option<FogRange>) {
        self.fog = fog;
    }

    /// 按配置采样并追加一个图层
    pub fn add_layer<R: Rng + ?Sized>(
        &mut self,
        config: &LayerConfig,
        rng: &mut R,
    ) -> StarfieldResult<()> {
        if self.layer(&config.name).is_some() {
            return Err(StarfieldError::DuplicateLayer(config.name.clone()));
        }
        let layer = ParticleLayer::build(config, self.camera.viewport(), self.fog, rng)?;
        self.push_layer(layer)
    }

    /// 追加一个已构建的图层
    pub fn push_layer(&mut self, mut layer: ParticleLayer) -> StarfieldResult<()> {
        if self.layer(layer.name()).is_some() {
            return Err(StarfieldError::DuplicateLayer(layer.name().to_string()));
        }
        layer.set_viewport(self.camera.viewport());
        self.particle_count += layer.buffer().count();
        self.layers.push(layer);
        Ok(())
    }

    /// 按名称移除图层
    pub fn remove_layer(&mut self, name: &str) -> Option<ParticleLayer> {
        let index = self.layers.iter().position(|layer| layer.name() == name)?;
        let layer = self.layers.remove(index);
        self.particle_count -= layer.buffer().count();
        tracing::debug!(target: "scene", layer = name, "Removed particle layer");
        Some(layer)
    }

    pub fn layer(&self, name: &str) -> Option<&ParticleLayer> {
        self.layers.iter().find(|layer| layer.name() == name)
    }

    pub fn layers(&self) -> &[ParticleLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn camera_rig(&self) -> Option<&CameraRig> {
        self.camera_rig.as_ref()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn surface(&self) -> SurfaceConfig {
        self.surface
    }

    /// 画布尺寸变化：更新相机宽高比与每个图层的视口
    ///
    /// 零尺寸被忽略（最小化窗口时宿主可能传入 0）。
    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        if width_px == 0 || height_px == 0 {
            return;
        }
        self.surface = SurfaceConfig {
            width: width_px,
            height: height_px,
        };
        self.camera.set_surface_size(width_px, height_px);
        let viewport = self.camera.viewport();
        for layer in &mut self.layers {
            layer.set_viewport(viewport);
        }
        tracing::debug!(
            target: "scene",
            width_px,
            height_px,
            viewport_width = viewport.width,
            viewport_height = viewport.height,
            "Surface resized"
        );
    }

    /// 推进一帧
    ///
    /// 每个图层按注册顺序恰好推进一次，随后推进相机跟随。不分配内存。
    pub fn tick(&mut self, delta_time: f32, pointer: Vec2) -> FrameStats {
        let delta = self.clock.tick(delta_time);

        let mut layers_advanced = 0;
        for layer in &mut self.layers {
            if layer.advance(delta, pointer) {
                layers_advanced += 1;
            }
        }
        if let Some(rig) = &self.camera_rig {
            rig.advance(&mut self.camera, delta, pointer);
        }

        FrameStats {
            frame_index: self.clock.frame_index,
            delta,
            particle_count: self.particle_count,
            layers_advanced,
        }
    }

    /// 按注册顺序返回绘制描述
    pub fn drawables(&self) -> impl Iterator<Item = DrawableDescriptor<'_>> + '_ {
        self.layers.iter().map(ParticleLayer::drawable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{ParallaxParams, Smoothing};
    use crate::config::CameraConfig;
    use glam::Vec3;

    fn two_layer_config() -> SceneConfig {
        SceneConfig {
            seed: Some(7),
            surface: SurfaceConfig {
                width: 1600,
                height: 900,
            },
            camera: CameraConfig::default(),
            camera_rig: None,
            fog: None,
            layers: vec![
                LayerConfig::new("near", 300, 10.0)
                    .with_rotation_rate(Vec3::new(0.02, 0.03, 0.0))
                    .with_parallax(ParallaxParams {
                        divisor: 20.0,
                        smoothing: Smoothing::Fixed { factor: 0.05 },
                    }),
                LayerConfig::new("far", 200, 15.0).with_opacity(0.4),
            ],
            logging: Default::default(),
        }
    }

    #[test]
    fn test_build_from_config() {
        let compositor = LayerCompositor::from_config(&two_layer_config()).unwrap();
        assert_eq!(compositor.len(), 2);
        assert_eq!(compositor.particle_count(), 500);
        assert!((compositor.camera().aspect - 16.0 / 9.0).abs() < 1e-6);
        let names: Vec<_> = compositor.drawables().map(|d| d.name).collect();
        assert_eq!(names, ["near", "far"]);
    }

    #[test]
    fn test_seeded_build_is_reproducible() {
        let a = LayerCompositor::from_config(&two_layer_config()).unwrap();
        let b = LayerCompositor::from_config(&two_layer_config()).unwrap();
        assert_eq!(a.layers()[0].buffer(), b.layers()[0].buffer());
    }

    #[test]
    fn test_tick_advances_every_layer_once() {
        let mut compositor = LayerCompositor::from_config(&two_layer_config()).unwrap();
        let stats = compositor.tick(0.5, Vec2::ZERO);
        assert_eq!(stats.frame_index, 1);
        assert_eq!(stats.layers_advanced, 2);
        assert_eq!(stats.particle_count, 500);
        for drawable in compositor.drawables() {
            assert_eq!(drawable.uniforms.time, 0.5);
        }
        let near = compositor.layer("near").unwrap();
        assert!((near.state().rotation.x - 0.01).abs() < 1e-6);
        assert_eq!(compositor.layer("far").unwrap().state().rotation, Vec3::ZERO);
    }

    #[test]
    fn test_degenerate_tick_leaves_layers_untouched() {
        let mut compositor = LayerCompositor::from_config(&two_layer_config()).unwrap();
        compositor.tick(0.016, Vec2::new(1.0, 0.0));
        let before: Vec<_> = compositor.layers().iter().map(|l| *l.state()).collect();

        let stats = compositor.tick(-5.0, Vec2::new(-1.0, 1.0));
        assert_eq!(stats.delta, 0.0);
        assert_eq!(stats.layers_advanced, 0);
        assert_eq!(stats.frame_index, 2);
        let after: Vec<_> = compositor.layers().iter().map(|l| *l.state()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_add_and_remove_layers() {
        let mut compositor = LayerCompositor::from_config(&two_layer_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let err = compositor
            .add_layer(&LayerConfig::new("near", 10, 1.0), &mut rng)
            .unwrap_err();
        assert!(matches!(err, StarfieldError::DuplicateLayer(name) if name == "near"));

        compositor
            .add_layer(&LayerConfig::new("dust", 10, 1.0), &mut rng)
            .unwrap();
        assert_eq!(compositor.particle_count(), 510);

        let removed = compositor.remove_layer("near").unwrap();
        assert_eq!(removed.name(), "near");
        assert_eq!(compositor.particle_count(), 210);
        assert!(compositor.remove_layer("near").is_none());
        let names: Vec<_> = compositor.layers().iter().map(|l| l.name()).collect();
        assert_eq!(names, ["far", "dust"]);
    }

    #[test]
    fn test_resize_updates_viewports() {
        let mut compositor = LayerCompositor::from_config(&two_layer_config()).unwrap();
        let before = compositor.layer("near").unwrap().animator().viewport();

        compositor.resize(900, 900);
        let after = compositor.layer("near").unwrap().animator().viewport();
        assert_eq!(compositor.camera().aspect, 1.0);
        assert_eq!(after.height, before.height);
        assert!(after.width < before.width);

        compositor.resize(0, 900);
        assert_eq!(compositor.surface().width, 900);
    }

    #[test]
    fn test_camera_rig_follows_pointer() {
        let mut config = two_layer_config();
        config.camera_rig = Some(CameraRig::default());
        let mut compositor = LayerCompositor::from_config(&config).unwrap();
        for _ in 0..600 {
            compositor.tick(1.0 / 60.0, Vec2::new(1.0, 1.0));
        }
        let position = compositor.camera().position;
        assert!((position.x - 0.5).abs() < 0.01);
        assert!((position.y - 0.5).abs() < 0.01);
        assert_eq!(position.z, 8.0);
    }

    #[test]
    fn test_fog_applies_to_layers_added_afterwards() {
        let mut compositor = LayerCompositor::from_config(&two_layer_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        compositor.set_fog(Some(FogRange { near: 8.0, far: 30.0 }));
        compositor
            .add_layer(&LayerConfig::new("misty", 10, 1.0), &mut rng)
            .unwrap();

        assert!(compositor.layer("near").unwrap().program().params.fog.is_none());
        let misty = compositor.drawables().last().unwrap();
        assert_eq!(misty.name, "misty");
        assert_eq!(misty.star_uniforms().fog_enabled, 1.0);
        assert_eq!(misty.star_uniforms().fog_far, 30.0);
    }

    #[test]
    fn test_camera_rig_can_be_detached() {
        let mut compositor = LayerCompositor::from_config(&two_layer_config()).unwrap();
        compositor.set_camera_rig(Some(CameraRig::default()));
        compositor.tick(1.0 / 60.0, Vec2::new(1.0, 0.0));
        let moved = compositor.camera().position;
        assert!(moved.x > 0.0);

        compositor.set_camera_rig(None);
        assert!(compositor.camera_rig().is_none());
        compositor.tick(1.0 / 60.0, Vec2::new(1.0, 0.0));
        assert_eq!(compositor.camera().position, moved);
    }
}
