//! 场景合成
//!
//! 图层、合成器与预设场景。

pub mod compositor;
pub mod layer;
pub mod presets;

pub use compositor::{FrameStats, LayerCompositor};
pub use layer::{DrawableDescriptor, ParticleLayer};
