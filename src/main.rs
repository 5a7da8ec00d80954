use glam::Vec2;
use starfield::config::SceneConfig;
use starfield::core::init_logging;
use starfield::scene::{presets, LayerCompositor};
use starfield::StarfieldResult;
use std::path::Path;

const DEFAULT_FRAMES: u32 = 600;
const FRAME_DELTA: f32 = 1.0 / 60.0;

/// 无窗口预览：加载配置或预设，按固定步长推进若干帧并输出统计
///
/// 用法：`starfield-preview [config.toml|config.json|preset] [frames]`
fn main() {
    if let Err(e) = run() {
        eprintln!("Starfield preview failed: {}", e);
        std::process::exit(1);
    }
}

/// 加载配置，同时返回来源描述（日志初始化之后再输出）
///
/// 查找到的配置文件无法解析时直接报错，不回退到默认预设。
fn load_config(source: Option<&str>) -> StarfieldResult<(SceneConfig, String)> {
    let loaded = match source {
        None => match SceneConfig::discover()? {
            Some((path, config)) => (config, path.display().to_string()),
            None => (SceneConfig::default(), "default preset".to_string()),
        },
        Some(name) => match presets::by_name(name) {
            Some(preset) => (preset, format!("preset {}", name)),
            None => (SceneConfig::from_file(Path::new(name))?, name.to_string()),
        },
    };
    Ok(loaded)
}

fn run() -> StarfieldResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let frames = args
        .get(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let (mut config, source) = load_config(args.first().map(String::as_str))?;
    config.apply_env_overrides();
    config.validate()?;
    init_logging(&config.logging)?;
    tracing::info!(target: "config", source = %source, "Loaded scene configuration");

    let mut compositor = LayerCompositor::from_config(&config)?;
    tracing::info!(
        target: "starfield",
        layers = compositor.len(),
        particles = compositor.particle_count(),
        frames,
        "Starting headless preview"
    );

    // 指针沿圆周缓慢移动
    let mut last = None;
    for frame in 0..frames {
        let angle = frame as f32 * FRAME_DELTA * 0.5;
        let pointer = Vec2::new(angle.cos(), angle.sin()) * 0.8;
        last = Some(compositor.tick(FRAME_DELTA, pointer));
    }

    if let Some(stats) = last {
        tracing::info!(
            target: "starfield",
            frame = stats.frame_index,
            elapsed = compositor.clock().elapsed,
            "Preview finished"
        );
    }
    for drawable in compositor.drawables() {
        let rotation = drawable.model_matrix.to_scale_rotation_translation().1;
        tracing::info!(
            target: "starfield",
            layer = drawable.name,
            instances = drawable.instance_count(),
            time = drawable.uniforms.time,
            blend = ?drawable.blend_mode,
            rotation = ?rotation,
            "Layer summary"
        );
    }
    let camera = compositor.camera();
    tracing::info!(target: "starfield", position = ?camera.position, "Camera summary");

    Ok(())
}
