//! 粒子采样器
//!
//! 球内均匀采样使用球坐标：
//!
//! - 方位角 `θ = 2π·u1`
//! - 极角 `φ = acos(2·u2 − 1)`，保证角向均匀而不在两极聚集
//! - 半径 `r = R·cbrt(u3)`，立方根抵消球壳体积随 r² 增长，得到均匀体密度
//!
//! 随机源以参数注入，测试可用固定种子复现。

use super::buffer::ParticleBuffer;
use super::distribution::{DistributionKind, DistributionSpec};
use crate::core::error::SamplerResult;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// 采样服务
pub struct Sampler;

impl Sampler {
    /// 使用注入的随机源生成粒子缓冲区
    ///
    /// # 错误
    ///
    /// 粒子数为零或半径非正时返回错误，此时不会分配缓冲区。
    pub fn generate_with<R: Rng + ?Sized>(
        spec: &DistributionSpec,
        rng: &mut R,
    ) -> SamplerResult<ParticleBuffer> {
        spec.validate()?;

        let count = spec.count as usize;
        let phase_upper = spec.phase.upper();
        let mut positions = Vec::with_capacity(count * 3);
        let mut phases = Vec::with_capacity(count);

        for _ in 0..count {
            let p = sample_point(spec.kind, spec.radius, rng);
            positions.extend_from_slice(&[p.x, p.y, p.z]);
            phases.push(rng.gen::<f32>() * phase_upper);
        }

        tracing::debug!(
            target: "sampler",
            count = spec.count,
            radius = spec.radius,
            kind = ?spec.kind,
            "Generated particle buffer"
        );

        Ok(ParticleBuffer::from_parts(positions, phases))
    }

    /// 使用固定种子生成（可复现）
    pub fn generate_seeded(spec: &DistributionSpec, seed: u64) -> SamplerResult<ParticleBuffer> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate_with(spec, &mut rng)
    }
}

/// 在实心球内均匀生成 `count` 个粒子，使用线程本地随机源
pub fn generate(count: u32, radius: f32) -> SamplerResult<ParticleBuffer> {
    Sampler::generate_with(&DistributionSpec::new(count, radius), &mut rand::thread_rng())
}

/// 按分布类型采样单个点
pub fn sample_point<R: Rng + ?Sized>(kind: DistributionKind, radius: f32, rng: &mut R) -> Vec3 {
    match kind {
        DistributionKind::UniformVolume => {
            let direction = sample_direction(rng);
            direction * (radius * rng.gen::<f32>().cbrt())
        }
        DistributionKind::SphereShell => sample_direction(rng) * radius,
        DistributionKind::UniformCube => Vec3::new(
            rng.gen_range(-radius..radius),
            rng.gen_range(-radius..radius),
            rng.gen_range(-radius..radius),
        ),
    }
}

/// 单位球面上的均匀方向
fn sample_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = TAU * rng.gen::<f32>();
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SamplerError;
    use crate::particles::distribution::PhaseRange;
    use std::f32::consts::PI;

    #[test]
    fn test_generate_count_and_bounds() {
        let buffer = generate(1000, 10.0).unwrap();
        assert_eq!(buffer.count(), 1000);
        assert_eq!(buffer.positions().len(), 3000);
        assert_eq!(buffer.phases().len(), 1000);
        for (p, _) in buffer.iter() {
            assert!(p.length() <= 10.0001, "norm {} exceeds radius", p.length());
        }
    }

    #[test]
    fn test_invalid_spec_fails_fast() {
        assert_eq!(generate(0, 10.0).unwrap_err(), SamplerError::InvalidCount(0));
        assert_eq!(
            generate(10, -1.0).unwrap_err(),
            SamplerError::InvalidRadius(-1.0)
        );
    }

    #[test]
    fn test_volume_density_is_uniform() {
        // (r/R)^3 在均匀体密度下服从 [0,1) 均匀分布
        const BINS: usize = 10;
        const COUNT: u32 = 20_000;
        let spec = DistributionSpec::new(COUNT, 5.0);
        let buffer = Sampler::generate_seeded(&spec, 42).unwrap();

        let mut histogram = [0usize; BINS];
        for (p, _) in buffer.iter() {
            let fraction = (p.length() / 5.0).powi(3);
            let bin = ((fraction * BINS as f32) as usize).min(BINS - 1);
            histogram[bin] += 1;
        }

        let expected = COUNT as f32 / BINS as f32;
        for (i, &n) in histogram.iter().enumerate() {
            let deviation = (n as f32 - expected).abs() / expected;
            assert!(deviation < 0.15, "bin {} has {} samples", i, n);
        }
    }

    #[test]
    fn test_angular_distribution_has_no_pole_clustering() {
        let spec = DistributionSpec::new(20_000, 1.0).with_kind(DistributionKind::SphereShell);
        let buffer = Sampler::generate_seeded(&spec, 7).unwrap();

        // 球面均匀分布时 z 在 [-1, 1] 上均匀
        let polar_caps = buffer.iter().filter(|(p, _)| p.z.abs() > 0.8).count();
        let fraction = polar_caps as f32 / 20_000.0;
        assert!((fraction - 0.2).abs() < 0.02, "polar fraction {}", fraction);
    }

    #[test]
    fn test_shell_points_lie_on_surface() {
        let spec = DistributionSpec::new(500, 100.0).with_kind(DistributionKind::SphereShell);
        let buffer = Sampler::generate_seeded(&spec, 1).unwrap();
        for (p, _) in buffer.iter() {
            assert!((p.length() - 100.0).abs() < 1e-2);
        }
    }

    #[test]
    fn test_cube_points_stay_in_box() {
        let spec = DistributionSpec::new(500, 15.0).with_kind(DistributionKind::UniformCube);
        let buffer = Sampler::generate_seeded(&spec, 3).unwrap();
        for &c in buffer.positions() {
            assert!((-15.0..15.0).contains(&c));
        }
    }

    #[test]
    fn test_phase_ranges() {
        let half = Sampler::generate_seeded(&DistributionSpec::new(2000, 1.0), 11).unwrap();
        assert!(half.phases().iter().all(|&p| (0.0..PI).contains(&p)));

        let full_spec = DistributionSpec::new(2000, 1.0).with_phase(PhaseRange::FullTurn);
        let full = Sampler::generate_seeded(&full_spec, 11).unwrap();
        assert!(full.phases().iter().all(|&p| (0.0..TAU).contains(&p)));
        assert!(full.phases().iter().any(|&p| p > PI));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let spec = DistributionSpec::new(64, 2.0);
        let a = Sampler::generate_seeded(&spec, 99).unwrap();
        let b = Sampler::generate_seeded(&spec, 99).unwrap();
        let c = Sampler::generate_seeded(&spec, 100).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a.positions().as_ptr(), b.positions().as_ptr());
    }
}
