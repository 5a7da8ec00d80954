/// 统一配置系统
///
/// 提供TOML/JSON配置文件、环境变量覆盖与构建期校验。所有校验在帧循环开始前完成。
use crate::animation::CameraRig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub mod camera;
pub mod layer;

pub use camera::{CameraConfig, FogConfig, SurfaceConfig};
pub use layer::LayerConfig;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 场景配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// 采样随机种子（None = 每次启动随机）
    pub seed: Option<u64>,

    /// 画布尺寸
    pub surface: SurfaceConfig,

    /// 相机
    pub camera: CameraConfig,

    /// 相机跟随
    pub camera_rig: Option<CameraRig>,

    /// 深度雾
    pub fog: Option<FogConfig>,

    /// 图层（按绘制顺序）
    pub layers: Vec<LayerConfig>,

    /// 日志配置
    pub logging: LoggingConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        crate::scene::presets::space_scene()
    }
}

impl SceneConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 按扩展名加载（`.json` 为 JSON，其余按 TOML）
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("STARFIELD_SEED") {
            if let Ok(seed) = val.parse() {
                self.seed = Some(seed);
            }
        }
        if let Ok(val) = env::var("STARFIELD_SURFACE_WIDTH") {
            if let Ok(width) = val.parse() {
                self.surface.width = width;
            }
        }
        if let Ok(val) = env::var("STARFIELD_SURFACE_HEIGHT") {
            if let Ok(height) = val.parse() {
                self.surface.height = height;
            }
        }
        if let Ok(val) = env::var("STARFIELD_LOG_LEVEL") {
            if let Ok(level) = val.parse() {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.surface.validate()?;
        self.camera.validate()?;
        if let Some(rig) = &self.camera_rig {
            rig.validate()?;
        }
        if let Some(fog) = &self.fog {
            fog.validate()?;
        }

        let mut names = HashSet::new();
        for layer in &self.layers {
            layer.validate()?;
            if !names.insert(layer.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate layer name '{}'",
                    layer.name
                )));
            }
        }
        Ok(())
    }

    /// 配置文件查找顺序
    ///
    /// 1. `<dir>/starfield.toml`
    /// 2. `<dir>/starfield.json`
    /// 3. `<home>/.config/starfield/starfield.toml`
    pub fn search_paths(dir: &Path, home: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = vec![dir.join("starfield.toml"), dir.join("starfield.json")];
        if let Some(home) = home {
            paths.push(
                home.join(".config")
                    .join("starfield")
                    .join("starfield.toml"),
            );
        }
        paths
    }

    /// 按查找顺序返回第一个存在的配置文件
    ///
    /// 文件不存在时继续查找；文件存在但无法读取或解析时返回错误，而不是静默回退到默认配置。
    pub fn discover_in(dir: &Path, home: Option<&Path>) -> ConfigResult<Option<(PathBuf, Self)>> {
        for path in Self::search_paths(dir, home) {
            match Self::from_file(&path) {
                Ok(config) => return Ok(Some((path, config))),
                Err(ConfigError::FileError(e)) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(ConfigError::ParseError(message)) => {
                    return Err(ConfigError::ParseError(format!(
                        "{}: {}",
                        path.display(),
                        message
                    )))
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// 在当前目录与 `$HOME` 下查找配置文件
    pub fn discover() -> ConfigResult<Option<(PathBuf, Self)>> {
        let home = env::var_os("HOME").map(PathBuf::from);
        Self::discover_in(Path::new("."), home.as_deref())
    }

    /// 自动查找并加载配置文件，找不到或无法解析时使用默认配置
    pub fn load_or_default() -> Self {
        match Self::discover() {
            Ok(Some((path, config))) => {
                tracing::info!(target: "config", "Loaded config from {:?}", path);
                config
            }
            Ok(None) => {
                tracing::info!(target: "config", "Using default configuration");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(
                    target: "config",
                    error = %e,
                    "Config file could not be loaded, using default configuration"
                );
                Self::default()
            }
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,

    /// 是否输出到文件
    pub log_to_file: bool,

    /// 日志文件路径
    pub log_file_path: String,

    /// 是否输出到控制台
    pub log_to_console: bool,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    log_to_file: false,
    log_file_path: "starfield.log".to_string(),
    log_to_console: true,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    /// `EnvFilter` 指令
    pub fn as_filter_directive(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::ParseError(format!("Unknown log level '{}'", other))),
        }
    }
}
