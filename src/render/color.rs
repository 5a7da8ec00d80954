//! 颜色类型
//!
//! 配置文件中颜色以 `#RRGGBB` 书写，内部以 0-1 范围的 RGB 分量存储。

use crate::core::error::{ColorError, ColorResult};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGB 颜色（sRGB 分量，0-1）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// 靛蓝 `#6366F1`
    pub const INDIGO: Self = Self::rgb(99.0 / 255.0, 102.0 / 255.0, 241.0 / 255.0);
    /// 青色 `#06B6D4`
    pub const CYAN: Self = Self::rgb(6.0 / 255.0, 182.0 / 255.0, 212.0 / 255.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// 解析 `#RRGGBB` 或 `#RGB`（`#` 可省略）
    pub fn from_hex(hex: &str) -> ColorResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || ColorError::InvalidHex(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channels: [u8; 3] = match digits.len() {
            6 => {
                let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                [(value >> 16) as u8, (value >> 8) as u8, value as u8]
            }
            3 => {
                let value = u16::from_str_radix(digits, 16).map_err(|_| invalid())?;
                let expand = |nibble: u16| (nibble as u8 & 0xF) * 17;
                [expand(value >> 8), expand(value >> 4), expand(value)]
            }
            _ => return Err(invalid()),
        };

        Ok(Self::rgb(
            channels[0] as f32 / 255.0,
            channels[1] as f32 / 255.0,
            channels[2] as f32 / 255.0,
        ))
    }

    /// 输出 `#rrggbb`
    pub fn to_hex(&self) -> String {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            quantize(self.r),
            quantize(self.g),
            quantize(self.b)
        )
    }

    /// 所有分量都是 0-1 范围内的有限值
    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// sRGB 转线性空间，供使用 sRGB 帧缓冲的宿主写入 uniform
    pub fn to_linear(&self) -> Self {
        fn channel(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        Self::rgb(channel(self.r), channel(self.g), channel(self.b))
    }

    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Self::rgb(v.x, v.y, v.z)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
