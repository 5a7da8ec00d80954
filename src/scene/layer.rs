//! 粒子图层
//!
//! 一个图层拥有自己的属性缓冲区、逐帧状态、uniform 与着色常量，图层之间没有耦合。

use crate::animation::{FrameAnimator, LayerState};
use crate::config::LayerConfig;
use crate::core::error::StarfieldResult;
use crate::particles::{ParticleBuffer, Sampler};
use crate::render::{
    BlendMode, CameraState, FogRange, GpuCameraUniforms, GpuStarUniforms, ShaderUniforms,
    ShadingParams, ShadingProgram, Viewport,
};
use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

/// 粒子图层
#[derive(Debug, Clone)]
pub struct ParticleLayer {
    name: String,
    buffer: ParticleBuffer,
    state: LayerState,
    uniforms: ShaderUniforms,
    animator: FrameAnimator,
    program: ShadingProgram,
    blend_mode: BlendMode,
    position: Vec3,
}

impl ParticleLayer {
    /// 按配置构建图层（校验、采样）
    ///
    /// # 错误
    ///
    /// 配置非法时返回错误，不会生成缓冲区。
    pub fn build<R: Rng + ?Sized>(
        config: &LayerConfig,
        viewport: Viewport,
        fog: Option<FogRange>,
        rng: &mut R,
    ) -> StarfieldResult<Self> {
        config.validate()?;
        let buffer = Sampler::generate_with(&config.distribution_spec(), rng)?;

        tracing::debug!(
            target: "scene",
            layer = %config.name,
            count = config.count,
            "Built particle layer"
        );

        Ok(Self {
            name: config.name.clone(),
            buffer,
            state: LayerState::new(),
            uniforms: ShaderUniforms::new(config.color.to_vec3()),
            animator: FrameAnimator::new(config.motion(), viewport),
            program: ShadingProgram::new(config.shading_params(fog)),
            blend_mode: config.blend_mode,
            position: config.position,
        })
    }

    /// 推进一帧，返回状态是否发生变化
    #[inline]
    pub fn advance(&mut self, delta_time: f32, pointer: Vec2) -> bool {
        self.animator
            .advance(&mut self.state, &mut self.uniforms, delta_time, pointer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn state(&self) -> &LayerState {
        &self.state
    }

    pub fn uniforms(&self) -> &ShaderUniforms {
        &self.uniforms
    }

    pub fn animator(&self) -> &FrameAnimator {
        &self.animator
    }

    pub fn program(&self) -> &ShadingProgram {
        &self.program
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.animator.set_viewport(viewport);
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.state.model_matrix(self.position)
    }

    /// 交给宿主的绘制描述（借用，不复制缓冲区）
    pub fn drawable(&self) -> DrawableDescriptor<'_> {
        DrawableDescriptor {
            name: &self.name,
            positions: self.buffer.positions(),
            phases: self.buffer.phases(),
            uniforms: &self.uniforms,
            shading: &self.program.params,
            blend_mode: self.blend_mode,
            point_size_base: self.program.params.base_size,
            model_matrix: self.model_matrix(),
            opacity: self.program.params.opacity,
        }
    }
}

/// 绘制描述
#[derive(Debug, Clone, Copy)]
pub struct DrawableDescriptor<'a> {
    pub name: &'a str,
    /// `[x, y, z]` 按粒子排列
    pub positions: &'a [f32],
    pub phases: &'a [f32],
    pub uniforms: &'a ShaderUniforms,
    pub shading: &'a ShadingParams,
    pub blend_mode: BlendMode,
    pub point_size_base: f32,
    pub model_matrix: Mat4,
    pub opacity: f32,
}

impl DrawableDescriptor<'_> {
    /// 实例数（每个粒子一个实例）
    pub fn instance_count(&self) -> u32 {
        self.phases.len() as u32
    }

    /// 星点 uniform 块
    pub fn star_uniforms(&self) -> GpuStarUniforms {
        self.uniforms.to_gpu(self.shading)
    }

    /// 相机 uniform 块
    pub fn camera_uniforms(&self, camera: &CameraState, viewport_px: [f32; 2]) -> GpuCameraUniforms {
        GpuCameraUniforms::new(camera, self.model_matrix, viewport_px)
    }
}
