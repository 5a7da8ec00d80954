//! 帧时钟与输入清洗
//!
//! 宿主时钟异常（NaN、无穷、负值）时该帧按零间隔处理，累计的旋转和时间状态不受污染。

use glam::Vec2;

/// 清洗帧间隔：非有限值与负值返回 0
#[inline]
pub fn sanitize_delta(delta_time: f32) -> f32 {
    if delta_time.is_finite() && delta_time > 0.0 {
        delta_time
    } else {
        0.0
    }
}

/// 清洗指针坐标：NaN 分量视为 0，并钳制到 [-1, 1]²
#[inline]
pub fn sanitize_pointer(pointer: Vec2) -> Vec2 {
    let clean = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
    Vec2::new(clean(pointer.x), clean(pointer.y))
}

/// 帧计数器
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    /// 已处理的帧数（含停滞帧）
    pub frame_index: u64,
    /// 累计时间（秒）
    pub elapsed: f64,
    /// 间隔被钳制为零的帧数
    pub stalled_frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一帧，返回清洗后的间隔
    pub fn tick(&mut self, raw_delta: f32) -> f32 {
        let delta = sanitize_delta(raw_delta);
        self.frame_index += 1;
        if delta == 0.0 {
            self.stalled_frames += 1;
            if raw_delta != 0.0 {
                tracing::debug!(
                    target: "animation",
                    raw_delta,
                    frame = self.frame_index,
                    "Clamped degenerate frame delta to zero"
                );
            }
        } else {
            self.elapsed += delta as f64;
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_delta() {
        assert_eq!(sanitize_delta(0.016), 0.016);
        assert_eq!(sanitize_delta(-5.0), 0.0);
        assert_eq!(sanitize_delta(f32::NAN), 0.0);
        assert_eq!(sanitize_delta(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_sanitize_pointer() {
        assert_eq!(sanitize_pointer(Vec2::new(2.0, -3.0)), Vec2::new(1.0, -1.0));
        assert_eq!(sanitize_pointer(Vec2::new(f32::NAN, 0.5)), Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_clock_counts_stalls() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(0.5), 0.5);
        assert_eq!(clock.tick(-1.0), 0.0);
        assert_eq!(clock.tick(f32::NAN), 0.0);
        assert_eq!(clock.frame_index, 3);
        assert_eq!(clock.stalled_frames, 2);
        assert!((clock.elapsed - 0.5).abs() < 1e-9);
    }
}
