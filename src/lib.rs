//! # Starfield
//!
//! A procedural particle-field animation core for decorative star backgrounds.
//!
//! ## Features
//!
//! - **Sampling**: uniform-volume, spherical-shell and cube point clouds with per-particle twinkle phases
//! - **Shading Contract**: WGSL point shader source plus CPU evaluation with identical math
//! - **Frame Animation**: rotation, pointer parallax, scale pulsing and camera follow with delta-aware smoothing
//! - **Layer Composition**: independently configured layers driven by one `tick` per frame
//! - **Configuration**: TOML/JSON scene files with environment overrides and eager validation
//!
//! ## Architecture Design
//!
//! The crate owns no GPU resources and runs no loop of its own:
//! - **Config**: static data validated before the first frame
//! - **State**: per-layer buffers, transform state and uniforms
//! - **Host**: an external driver calls [`scene::LayerCompositor::tick`] once per refresh
//!   and reads borrowed [`scene::DrawableDescriptor`]s
//!
//! ### Example
//!
//! ```rust
//! use starfield::config::SceneConfig;
//! use starfield::scene::LayerCompositor;
//! use glam::Vec2;
//!
//! let mut config = starfield::scene::presets::space_scene();
//! config.seed = Some(42);
//! let mut compositor = LayerCompositor::from_config(&config).unwrap();
//!
//! let stats = compositor.tick(1.0 / 60.0, Vec2::new(0.2, -0.1));
//! assert_eq!(stats.frame_index, 1);
//! for drawable in compositor.drawables() {
//!     assert!(drawable.instance_count() > 0);
//! }
//! # let _ = SceneConfig::default();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Errors, logging and helper macros
//! - [`config`]: Scene and layer configuration
//! - [`particles`]: Point cloud sampling
//! - [`render`]: Shading contract, camera and blending
//! - [`animation`]: Per-frame state updates
//! - [`scene`]: Layers, compositor and presets

/// Errors, logging initialisation and helper macros
#[macro_use]
pub mod core;
/// Configuration system
pub mod config;
/// Point cloud sampling
pub mod particles;
/// Shading contract, camera and blending
pub mod render;
/// Frame animation
pub mod animation;
/// Layer composition and presets
pub mod scene;

pub use crate::core::error::{StarfieldError, StarfieldResult};
pub use config::{LayerConfig, SceneConfig};
pub use scene::{DrawableDescriptor, FrameStats, LayerCompositor};
