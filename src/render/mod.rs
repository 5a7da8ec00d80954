//! 渲染契约模块
//!
//! 本 crate 不持有 GPU 资源；这里定义交给宿主的着色器源码、uniform 布局、相机参数与混合模式，
//! 以及与 GPU 路径一致的 CPU 端着色求值。

pub mod blend;
pub mod camera;
pub mod color;
pub mod shading;

pub use blend::{BlendEquation, BlendFactor, BlendMode};
pub use camera::{CameraState, Viewport};
pub use color::Color;
pub use shading::{
    falloff, FogRange, FragmentOutput, GpuCameraUniforms, GpuStarUniforms, ShaderUniforms,
    ShadingParams, ShadingProgram, UniformValue, VertexOutput, STAR_POINT_SHADER,
};
