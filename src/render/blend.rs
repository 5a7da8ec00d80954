//! 粒子混合模式

use serde::{Deserialize, Serialize};

/// 混合因子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// 颜色混合方程 `src * src_factor + dst * dst_factor`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendEquation {
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
}

/// 粒子层混合模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// 加法混合：重叠粒子叠加变亮，无需排序
    #[default]
    Additive,
    /// 常规 alpha 混合：后绘制的粒子遮挡先绘制的
    Alpha,
}

impl BlendMode {
    /// 宿主管线使用的颜色混合方程
    pub const fn equation(&self) -> BlendEquation {
        match self {
            Self::Additive => BlendEquation {
                src_factor: BlendFactor::SrcAlpha,
                dst_factor: BlendFactor::One,
            },
            Self::Alpha => BlendEquation {
                src_factor: BlendFactor::SrcAlpha,
                dst_factor: BlendFactor::OneMinusSrcAlpha,
            },
        }
    }

    /// 按混合方程在 CPU 上合成一个像素（用于预览和测试）
    pub fn composite(&self, dst: [f32; 3], src: [f32; 3], src_alpha: f32) -> [f32; 3] {
        let eq = self.equation();
        let factor = |f: BlendFactor| match f {
            BlendFactor::One => 1.0,
            BlendFactor::SrcAlpha => src_alpha,
            BlendFactor::OneMinusSrcAlpha => 1.0 - src_alpha,
        };
        let (fs, fd) = (factor(eq.src_factor), factor(eq.dst_factor));
        [
            src[0] * fs + dst[0] * fd,
            src[1] * fs + dst[1] * fd,
            src[2] * fs + dst[2] * fd,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_brightens_overlap() {
        let once = BlendMode::Additive.composite([0.0; 3], [1.0, 1.0, 1.0], 0.4);
        let twice = BlendMode::Additive.composite(once, [1.0, 1.0, 1.0], 0.4);
        assert!((twice[0] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_alpha_occludes() {
        let out = BlendMode::Alpha.composite([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], 1.0);
        assert_eq!(out, [0.0, 0.0, 1.0]);
    }
}
