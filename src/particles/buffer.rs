//! 粒子属性缓冲区

use glam::Vec3;

/// 单个图层的点云
///
/// `positions` 按 `[x0, y0, z0, x1, ...]` 排列，长度恒为 `3 * count`；`phases` 每个粒子一个值。
/// 两者创建后不可变，也不会改变长度。
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBuffer {
    positions: Box<[f32]>,
    phases: Box<[f32]>,
}

impl ParticleBuffer {
    pub(crate) fn from_parts(positions: Vec<f32>, phases: Vec<f32>) -> Self {
        debug_assert_eq!(positions.len(), phases.len() * 3);
        Self {
            positions: positions.into_boxed_slice(),
            phases: phases.into_boxed_slice(),
        }
    }

    /// 粒子数
    #[inline]
    pub fn count(&self) -> usize {
        self.phases.len()
    }

    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[inline]
    pub fn phases(&self) -> &[f32] {
        &self.phases
    }

    /// 第 `index` 个粒子的位置
    pub fn position(&self, index: usize) -> Option<Vec3> {
        let start = index.checked_mul(3)?;
        let end = start.checked_add(3)?;
        self.positions.get(start..end).map(Vec3::from_slice)
    }

    /// 遍历 `(位置, 相位)`
    pub fn iter(&self) -> impl Iterator<Item = (Vec3, f32)> + '_ {
        self.positions
            .chunks_exact(3)
            .map(Vec3::from_slice)
            .zip(self.phases.iter().copied())
    }

    /// 位置缓冲区的字节视图（上传顶点缓冲用）
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// 相位缓冲区的字节视图
    pub fn phase_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.phases)
    }

    /// 离原点最远的粒子距离
    pub fn bounding_radius(&self) -> f32 {
        self.iter()
            .map(|(p, _)| p.length())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let buffer = ParticleBuffer::from_parts(
            vec![1.0, 0.0, 0.0, 0.0, 3.0, 4.0],
            vec![0.5, 1.5],
        );
        assert_eq!(buffer.count(), 2);
        assert_eq!(buffer.position(1), Some(Vec3::new(0.0, 3.0, 4.0)));
        assert_eq!(buffer.position(2), None);
        assert_eq!(buffer.bounding_radius(), 5.0);
        assert_eq!(buffer.position_bytes().len(), 24);
        assert_eq!(buffer.phase_bytes().len(), 8);

        let phases: Vec<f32> = buffer.iter().map(|(_, phase)| phase).collect();
        assert_eq!(phases, vec![0.5, 1.5]);
    }

    #[test]
    fn test_position_out_of_range_index() {
        let buffer = ParticleBuffer::from_parts(vec![1.0, 2.0, 3.0], vec![0.0]);
        assert_eq!(buffer.position(usize::MAX / 2), None);
        assert_eq!(buffer.position(usize::MAX), None);
        assert_eq!(buffer.position(0), Some(Vec3::new(1.0, 2.0, 3.0)));
    }
}
