//! 粒子采样模块
//!
//! 在图层构建时一次性生成不可变的属性缓冲区（位置与闪烁相位）。
//!
//! ## 使用示例
//!
//! ```rust
//! use starfield::particles::{generate, DistributionKind, DistributionSpec, Sampler};
//!
//! // 球内均匀分布
//! let stars = generate(1000, 10.0).unwrap();
//! assert_eq!(stars.count(), 1000);
//!
//! // 固定种子的球面分布
//! let spec = DistributionSpec::new(200, 12.0).with_kind(DistributionKind::SphereShell);
//! let shell = Sampler::generate_seeded(&spec, 7).unwrap();
//! assert_eq!(shell.positions().len(), 600);
//! ```

pub mod buffer;
pub mod distribution;
pub mod sampler;

pub use buffer::ParticleBuffer;
pub use distribution::{DistributionKind, DistributionSpec, PhaseRange};
pub use sampler::{generate, sample_point, Sampler};
