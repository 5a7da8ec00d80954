//! 帧动画模块
//!
//! 由宿主每帧驱动的状态更新：着色时间、匀速旋转、指针视差、缩放脉动与相机跟随。
//!
//! ## 功能特性
//!
//! - 帧间隔清洗（NaN / 负值按零处理）
//! - 固定系数或帧率无关的指数平滑
//! - 无分配的逐帧更新
//!
//! ## 使用示例
//!
//! ```rust
//! use starfield::animation::{FrameAnimator, LayerState, MotionParams, ParallaxParams, Smoothing};
//! use starfield::render::{ShaderUniforms, Viewport};
//! use glam::{Vec2, Vec3};
//!
//! let animator = FrameAnimator::new(
//!     MotionParams {
//!         rotation_rate: Vec3::new(0.02, 0.03, 0.0),
//!         parallax: Some(ParallaxParams { divisor: 20.0, smoothing: Smoothing::Fixed { factor: 0.05 } }),
//!         pulse: None,
//!     },
//!     Viewport::new(16.0, 9.0),
//! );
//!
//! let mut state = LayerState::new();
//! let mut uniforms = ShaderUniforms::default();
//! animator.advance(&mut state, &mut uniforms, 0.016, Vec2::new(1.0, 0.0));
//! assert!(state.offset.x > 0.0);
//! ```

pub mod animator;
pub mod camera_rig;
pub mod clock;
pub mod smoothing;


pub use animator::{FrameAnimator, LayerState, MotionParams, ParallaxParams, PulseParams};
pub use camera_rig::CameraRig;
pub use clock::{sanitize_delta, sanitize_pointer, FrameClock};
pub use smoothing::{damp, damp_vec3, ticks_to_converge, Smoothing};
