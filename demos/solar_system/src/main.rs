//! Runs one of the built-in layouts or a scene file.
//!
//! ```text
//! solar_system [classic|shuttle|path/to/scene.ron] [--headless]
//! ```
//!
//! Scene files are resolved relative to the asset root (`ORRERY_ASSET_DIR`,
//! `./assets` by default).

use orrery::{
    Duration,
    config::{Preset, SceneConfig},
    flow,
    layout::SYSTEM_PIVOT,
    render::FrameLog,
};

const HEADLESS_FRAMES: u64 = 600;

fn load_config(arg: Option<&str>) -> anyhow::Result<SceneConfig> {
    match arg {
        None => SceneConfig::preset(Preset::Classic),
        Some(name) if name.ends_with(".ron") => futures::executor::block_on(SceneConfig::load(name)),
        Some(name) => SceneConfig::preset(name.parse()?),
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let headless = args.iter().any(|arg| arg == "--headless");
    let scene = args.iter().find(|arg| !arg.starts_with("--")).map(String::as_str);
    let config = load_config(scene)?;

    if !headless {
        return flow::run(config, FrameLog::default());
    }

    flow::init_logger();
    let mut renderer = FrameLog::new(60);
    let (ctx, animation) = flow::run_headless(
        &config,
        &mut renderer,
        HEADLESS_FRAMES,
        Duration::from_millis(16),
    )?;
    let yaw = ctx
        .graph
        .find_by_name(SYSTEM_PIVOT)
        .map(|node| node.transform.yaw().0)
        .unwrap_or_default();
    log::info!(
        "{}: {} frames, system yaw {:.3} rad",
        config.name,
        animation.frames(),
        yaw
    );
    Ok(())
}
