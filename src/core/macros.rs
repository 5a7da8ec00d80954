//! 核心宏定义
//!
//! 配置结构体的默认值统一通过宏声明，避免手写重复的 `Default` 实现。

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use starfield::impl_default;
///
/// struct PulseSettings {
///     amplitude: f32,
///     rate: f32,
/// }
///
/// impl_default!(PulseSettings {
///     amplitude: 0.1,
///     rate: 0.5,
/// });
///
/// let settings = PulseSettings::default();
/// assert_eq!(settings.rate, 0.5);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}

/// 同时实现Default和new()的宏
///
/// `new()` 直接委托给 `default()`。
#[macro_export]
macro_rules! impl_default_and_new {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }

        impl $struct_name {
            pub fn new() -> Self {
                Self::default()
            }
        }
    };
}
