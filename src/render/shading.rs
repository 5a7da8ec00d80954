//! 闪烁星点着色程序
//!
//! 两个阶段由宿主的图形管线对每个粒子逐帧执行：
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Stage 1 (vertex)                                          │
//! │   twinkle   = sin(time * twinkle_rate + phase)            │
//! │   pointSize = base_size / depth * (floor + amp * twinkle) │
//! │   vAlpha    = 0.5 + 0.5 * twinkle                          │
//! ├──────────────────────────────────────────────────────────┤
//! │ Stage 2 (fragment)                                        │
//! │   |coord| > 0.5 → discard（圆形点）                         │
//! │   alpha = vAlpha * (1 - 2|coord|)^3 * opacity * fog        │
//! │   color = tint，按 alpha 加法混合                           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! [`STAR_POINT_SHADER`] 是交给宿主的 WGSL 契约；[`ShadingProgram`] 用同一套数学在 CPU 上
//! 求值，便于测试和无 GPU 预览。着色程序本身不持有状态，所有时间相关状态都在 `time` uniform 中。

use crate::render::camera::CameraState;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// 星点 WGSL 着色器
///
/// 实例化绘制：每个粒子一个实例（`position`、`phase` 按实例步进），每个实例 6 个顶点组成
/// 屏幕对齐的方形，片元阶段裁成圆形。
pub const STAR_POINT_SHADER: &str = r#"
struct Camera {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    model: mat4x4<f32>,
    viewport_px: vec2<f32>,
    _pad: vec2<f32>,
};

struct StarUniforms {
    color: vec3<f32>,
    time: f32,
    base_size: f32,
    twinkle_rate: f32,
    size_floor: f32,
    size_amplitude: f32,
    opacity: f32,
    fog_near: f32,
    fog_far: f32,
    fog_enabled: f32,
};

@group(0) @binding(0) var<uniform> camera: Camera;
@group(0) @binding(1) var<uniform> star: StarUniforms;

struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) coord: vec2<f32>,
    @location(1) v_alpha: f32,
    @location(2) depth: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vid: u32,
    @location(0) position: vec3<f32>,
    @location(1) phase: f32,
) -> VsOut {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5), vec2<f32>(0.5, -0.5), vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, -0.5), vec2<f32>(0.5, 0.5), vec2<f32>(-0.5, 0.5),
    );
    let corner = corners[vid % 6u];

    let mv = camera.view * camera.model * vec4<f32>(position, 1.0);
    let depth = -mv.z;
    let twinkle = sin(star.time * star.twinkle_rate + phase);

    var size = 0.0;
    if (depth > 0.0001) {
        size = star.base_size / depth * (star.size_floor + star.size_amplitude * twinkle);
    }

    let clip = camera.projection * mv;
    let offset = corner * size * 2.0 / camera.viewport_px * clip.w;

    var out: VsOut;
    out.clip = vec4<f32>(clip.xy + offset, clip.zw);
    out.coord = corner;
    out.v_alpha = 0.5 + 0.5 * twinkle;
    out.depth = depth;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let d = length(in.coord);
    if (d > 0.5) {
        discard;
    }
    var alpha = in.v_alpha * pow(1.0 - 2.0 * d, 3.0) * star.opacity;
    if (star.fog_enabled > 0.5) {
        alpha = alpha * (1.0 - smoothstep(star.fog_near, star.fog_far, in.depth));
    }
    return vec4<f32>(star.color, alpha);
}
"#;

/// 粒子在相机平面之后（或贴近相机）时视为被裁剪
pub const MIN_VIEW_DEPTH: f32 = 1e-4;

/// 线性雾范围
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogRange {
    pub near: f32,
    pub far: f32,
}

impl FogRange {
    /// 雾浓度（0 = 无雾，1 = 完全被雾遮挡）
    pub fn factor(&self, depth: f32) -> f32 {
        smoothstep(self.near, self.far, depth)
    }
}

/// 着色常量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingParams {
    /// 基础点大小（像素 × 深度）
    pub base_size: f32,
    /// 闪烁角速度
    pub twinkle_rate: f32,
    /// 闪烁时点大小的下限系数
    pub size_floor: f32,
    /// 闪烁时点大小的振幅系数
    pub size_amplitude: f32,
    /// 图层不透明度
    pub opacity: f32,
    /// 可选的深度雾
    pub fog: Option<FogRange>,
}

impl_default!(ShadingParams {
    base_size: 40.0,
    twinkle_rate: 2.0,
    size_floor: 0.8,
    size_amplitude: 0.5,
    opacity: 1.0,
    fog: None,
});

/// uniform 值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
}

/// 着色器 uniform
///
/// 由图层拥有：帧动画器每帧写入一次 `time`，着色程序在同一帧的绘制时读取。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderUniforms {
    /// 单调递增的着色时间（秒）
    pub time: f32,
    /// 图层色调
    pub color: Vec3,
}

impl ShaderUniforms {
    pub const NAMES: [&'static str; 2] = ["time", "color"];

    pub fn new(color: Vec3) -> Self {
        Self { time: 0.0, color }
    }

    /// 按名称查找 uniform
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        match name {
            "time" => Some(UniformValue::Float(self.time)),
            "color" => Some(UniformValue::Vec3(self.color)),
            _ => None,
        }
    }

    /// 打包为 GPU uniform 块
    pub fn to_gpu(&self, params: &ShadingParams) -> GpuStarUniforms {
        let (fog_near, fog_far, fog_enabled) = match params.fog {
            Some(fog) => (fog.near, fog.far, 1.0),
            None => (0.0, 0.0, 0.0),
        };
        GpuStarUniforms {
            color: self.color.to_array(),
            time: self.time,
            base_size: params.base_size,
            twinkle_rate: params.twinkle_rate,
            size_floor: params.size_floor,
            size_amplitude: params.size_amplitude,
            opacity: params.opacity,
            fog_near,
            fog_far,
            fog_enabled,
        }
    }
}

impl Default for ShaderUniforms {
    fn default() -> Self {
        Self::new(Vec3::ONE)
    }
}

/// 星点 uniform 块（对应 WGSL `StarUniforms`）
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuStarUniforms {
    pub color: [f32; 3],
    pub time: f32,
    pub base_size: f32,
    pub twinkle_rate: f32,
    pub size_floor: f32,
    pub size_amplitude: f32,
    pub opacity: f32,
    pub fog_near: f32,
    pub fog_far: f32,
    pub fog_enabled: f32,
}

/// 相机 uniform 块（对应 WGSL `Camera`）
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuCameraUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub viewport_px: [f32; 2],
    pub _pad: [f32; 2],
}

impl GpuCameraUniforms {
    pub fn new(camera: &CameraState, model: Mat4, viewport_px: [f32; 2]) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            viewport_px,
            _pad: [0.0; 2],
        }
    }
}

/// 顶点阶段输出
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput {
    /// 裁剪空间位置
    pub clip_position: Vec4,
    /// 视空间深度（到相机平面的距离）
    pub depth: f32,
    /// 闪烁项 `sin(time * rate + phase)`
    pub twinkle: f32,
    /// 屏幕空间点大小（像素）
    pub point_size: f32,
    /// 传给片元阶段的亮度
    pub alpha: f32,
}

/// 片元阶段输出
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentOutput {
    pub color: Vec3,
    pub alpha: f32,
}

impl FragmentOutput {
    /// 色调 × alpha，加法混合时写入帧缓冲的贡献
    pub fn premultiplied(&self) -> Vec3 {
        self.color * self.alpha
    }
}

/// 着色程序（CPU 求值）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShadingProgram {
    pub params: ShadingParams,
}

impl ShadingProgram {
    pub fn new(params: ShadingParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn twinkle(&self, time: f32, phase: f32) -> f32 {
        (time * self.params.twinkle_rate + phase).sin()
    }

    /// 点大小；深度不为正时返回 0
    #[inline]
    pub fn point_size(&self, depth: f32, twinkle: f32) -> f32 {
        if depth <= MIN_VIEW_DEPTH {
            return 0.0;
        }
        self.params.base_size / depth
            * (self.params.size_floor + self.params.size_amplitude * twinkle)
    }

    /// 顶点阶段
    pub fn vertex(
        &self,
        position: Vec3,
        phase: f32,
        model: Mat4,
        camera: &CameraState,
        time: f32,
    ) -> VertexOutput {
        let mv = camera.view_matrix() * model * position.extend(1.0);
        let depth = -mv.z;
        let twinkle = self.twinkle(time, phase);
        VertexOutput {
            clip_position: camera.projection_matrix() * mv,
            depth,
            twinkle,
            point_size: self.point_size(depth, twinkle),
            alpha: 0.5 + 0.5 * twinkle,
        }
    }

    /// 片元阶段
    ///
    /// `coord` 是片元相对粒子中心的偏移（[-0.5, 0.5]²）；落在圆外时返回 `None`（丢弃）。
    pub fn fragment(&self, coord: Vec2, vertex: &VertexOutput, tint: Vec3) -> Option<FragmentOutput> {
        let distance = coord.length();
        if distance > 0.5 {
            return None;
        }
        let mut alpha = vertex.alpha * falloff(distance) * self.params.opacity;
        if let Some(fog) = self.params.fog {
            alpha *= 1.0 - fog.factor(vertex.depth);
        }
        Some(FragmentOutput { color: tint, alpha })
    }
}

/// 立方衰减 `(1 - 2d)^3`
#[inline]
pub fn falloff(distance: f32) -> f32 {
    let strength = (1.0 - distance * 2.0).max(0.0);
    strength * strength * strength
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn camera() -> CameraState {
        CameraState {
            position: Vec3::new(0.0, 0.0, 10.0),
            ..CameraState::default()
        }
    }

    #[test]
    fn test_point_size_scales_with_depth() {
        let program = ShadingProgram::default();
        // time = 0, phase = 0 → twinkle = 0
        let near = program.vertex(Vec3::new(0.0, 0.0, 5.0), 0.0, Mat4::IDENTITY, &camera(), 0.0);
        let far = program.vertex(Vec3::ZERO, 0.0, Mat4::IDENTITY, &camera(), 0.0);

        assert!((near.depth - 5.0).abs() < 1e-4);
        assert!((near.point_size - 40.0 / 5.0 * 0.8).abs() < 1e-3);
        assert!((far.point_size - 40.0 / 10.0 * 0.8).abs() < 1e-3);
        assert!((near.alpha - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_twinkle_peak() {
        let program = ShadingProgram::default();
        let out = program.vertex(Vec3::ZERO, FRAC_PI_2, Mat4::IDENTITY, &camera(), 0.0);
        assert!((out.twinkle - 1.0).abs() < 1e-6);
        assert!((out.alpha - 1.0).abs() < 1e-6);
        assert!((out.point_size - 4.0 * 1.3).abs() < 1e-3);
    }

    #[test]
    fn test_particle_behind_camera_is_culled() {
        let program = ShadingProgram::default();
        let out = program.vertex(Vec3::new(0.0, 0.0, 20.0), 0.0, Mat4::IDENTITY, &camera(), 0.0);
        assert!(out.depth < 0.0);
        assert_eq!(out.point_size, 0.0);
    }

    #[test]
    fn test_fragment_discards_outside_circle() {
        let program = ShadingProgram::default();
        let vertex = program.vertex(Vec3::ZERO, 0.0, Mat4::IDENTITY, &camera(), 0.0);

        assert!(program.fragment(Vec2::new(0.5, 0.5), &vertex, Vec3::ONE).is_none());
        assert!(program.fragment(Vec2::new(0.5, 0.0), &vertex, Vec3::ONE).is_some());

        let centre = program.fragment(Vec2::ZERO, &vertex, Vec3::ONE).unwrap();
        assert!((centre.alpha - 0.5).abs() < 1e-6);

        let edge = program.fragment(Vec2::new(0.25, 0.0), &vertex, Vec3::ONE).unwrap();
        assert!((edge.alpha - 0.5 * 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_fragment_colour_is_tint_times_alpha() {
        let program = ShadingProgram::default();
        let vertex = program.vertex(Vec3::ZERO, 0.0, Mat4::IDENTITY, &camera(), 0.0);
        let tint = Vec3::new(1.0, 0.5, 0.25);

        let out = program.fragment(Vec2::ZERO, &vertex, tint).unwrap();
        assert_eq!(out.color, tint);
        assert!((out.premultiplied() - tint * 0.5).length() < 1e-6);
    }

    #[test]
    fn test_fog_fades_distant_particles() {
        let program = ShadingProgram::new(ShadingParams {
            fog: Some(FogRange { near: 8.0, far: 30.0 }),
            ..ShadingParams::default()
        });
        let cam = camera();
        let close = program.vertex(Vec3::new(0.0, 0.0, 5.0), 0.0, Mat4::IDENTITY, &cam, 0.0);
        let distant = program.vertex(Vec3::new(0.0, 0.0, -25.0), 0.0, Mat4::IDENTITY, &cam, 0.0);

        let a = program.fragment(Vec2::ZERO, &close, Vec3::ONE).unwrap();
        let b = program.fragment(Vec2::ZERO, &distant, Vec3::ONE).unwrap();
        assert!((a.alpha - 0.5).abs() < 1e-6);
        assert_eq!(b.alpha, 0.0);
    }

    #[test]
    fn test_uniform_lookup_and_packing() {
        let mut uniforms = ShaderUniforms::new(Vec3::new(0.1, 0.2, 0.3));
        uniforms.time = 4.5;

        assert_eq!(uniforms.get("time"), Some(UniformValue::Float(4.5)));
        assert!(uniforms.get("resolution").is_none());
        for name in ShaderUniforms::NAMES {
            assert!(uniforms.get(name).is_some(), "uniform {} not resolvable", name);
        }

        let gpu = uniforms.to_gpu(&ShadingParams::default());
        assert_eq!(std::mem::size_of::<GpuStarUniforms>(), 48);
        assert_eq!(gpu.time, 4.5);
        assert_eq!(gpu.fog_enabled, 0.0);
        assert_eq!(bytemuck::bytes_of(&gpu).len(), 48);
    }

    #[test]
    fn test_shader_source_declares_entry_points() {
        assert!(STAR_POINT_SHADER.contains("fn vs_main"));
        assert!(STAR_POINT_SHADER.contains("fn fs_main"));
        assert!(STAR_POINT_SHADER.contains("discard"));
        assert_eq!(std::mem::size_of::<GpuCameraUniforms>(), 208);
    }
}
