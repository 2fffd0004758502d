mod common;

use approx::assert_relative_eq;
use common::test_utils::RecordingRenderer;
use orrery::{
    Duration,
    config::{Preset, SceneConfig},
    data_structures::{geometry::Geometry, transform::InstanceRaw},
    flow,
    layout,
    render::{Frame, FrameLog, Renderer},
};

#[test]
fn frame_lists_only_nodes_with_content() {
    let config = SceneConfig::preset(Preset::Classic).unwrap();
    let build = layout::build(&config).unwrap();
    let frame = Frame::collect(&build.context);

    // earth, moon, venus and mars are spheres; the models are still loading
    let names: Vec<&str> = frame.items.iter().map(|item| item.name).collect();
    assert_eq!(names, vec!["venus", "earth", "moon", "mars"]);
    assert!(frame.item(build.body("sun").unwrap().body).is_none());
    assert!(frame.background.is_none());
    assert_eq!(frame.lights.len(), 1);
}

#[test]
fn frame_carries_world_positions() {
    let config = SceneConfig::preset(Preset::Classic).unwrap();
    let build = layout::build(&config).unwrap();
    let frame = Frame::collect(&build.context);

    let earth = frame.item(build.body("earth").unwrap().body).unwrap();
    let p = earth.world_position();
    assert_relative_eq!(p.x, 20.0, epsilon = 1e-5);
    assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
    assert_relative_eq!(p.z, 0.0, epsilon = 1e-5);

    let moon = frame.item(build.body("moon").unwrap().body).unwrap();
    assert_relative_eq!(moon.world_position().x, 22.0, epsilon = 1e-5);
}

#[test]
fn instance_bytes_pack_one_instance_per_item() {
    let config = SceneConfig::preset(Preset::Classic).unwrap();
    let build = layout::build(&config).unwrap();
    let frame = Frame::collect(&build.context);

    let bytes = frame.instance_bytes();
    assert_eq!(bytes.len(), frame.items.len() * std::mem::size_of::<InstanceRaw>());
    assert_eq!(std::mem::size_of::<InstanceRaw>(), (16 + 9 + 1) * 4);
}

#[test]
fn mirrored_scale_flips_handedness() {
    let mut world = orrery::cgmath::Matrix4::from_nonuniform_scale(1.0, 1.0, -1.0);
    assert_eq!(InstanceRaw::from_world(&world).handedness, -1.0);
    world = orrery::cgmath::Matrix4::from_scale(2.0);
    let raw = InstanceRaw::from_world(&world);
    assert_eq!(raw.handedness, 1.0);
    assert_relative_eq!(raw.normal[0][0], 0.5);
}

#[test]
fn sphere_tessellation_counts() {
    let mesh = Geometry::default().tessellate();
    assert_eq!(mesh.vertex_count(), 26 * 26);
    assert_eq!(mesh.triangle_count(), 1200);
    assert_eq!(mesh.normals.len(), mesh.positions.len());
    for normal in &mesh.normals {
        let length = (normal[0].powi(2) + normal[1].powi(2) + normal[2].powi(2)).sqrt();
        assert_relative_eq!(length, 1.0, epsilon = 1e-4);
    }
}

#[test]
fn frame_log_counts_frames_and_sizes() {
    let mut log = FrameLog::new(2);
    let config = SceneConfig::preset(Preset::Classic).unwrap();
    let build = layout::build(&config).unwrap();

    for _ in 0..3 {
        log.render(&Frame::collect(&build.context));
    }
    log.resize(640, 480);

    assert_eq!(log.frames(), 3);
    assert_eq!(log.size(), (640, 480));
}

#[test]
fn headless_run_steps_and_renders_every_frame() {
    let config = SceneConfig::preset(Preset::Shuttle).unwrap();
    let mut renderer = RecordingRenderer::new();

    let (ctx, animation) =
        flow::run_headless(&config, &mut renderer, 11, Duration::from_millis(100)).unwrap();

    assert_eq!(renderer.frames.len(), 11);
    assert_eq!(animation.frames(), 11);

    // 10 intervals of 100ms at 0.0001 rad/ms
    let system = ctx.graph.find_by_name(layout::SYSTEM_PIVOT).unwrap();
    assert_relative_eq!(system.transform.yaw().0, 0.1, epsilon = 1e-5);

    // the shuttle model isn't shipped, so only the spheres are drawn
    let shuttle = ctx.graph.find_by_name("shuttle").unwrap();
    assert!(shuttle.content().is_none());
    assert_eq!(renderer.last().items.len(), 6);
}

#[test]
fn headless_run_with_one_frame_takes_no_time() {
    let config = SceneConfig::preset(Preset::Classic).unwrap();
    let mut renderer = RecordingRenderer::new();

    let (ctx, _) = flow::run_headless(&config, &mut renderer, 1, Duration::from_secs(3600)).unwrap();
    let system = ctx.graph.find_by_name(layout::SYSTEM_PIVOT).unwrap();
    assert_eq!(system.transform.yaw().0, 0.0);

    let (_, animation) = flow::run_headless(&config, &mut renderer, 0, Duration::from_millis(16)).unwrap();
    assert_eq!(animation.frames(), 0);
    assert_eq!(renderer.frames.len(), 1);
}

#[test]
fn headless_run_accumulates_long_frame_times() {
    let config = SceneConfig::preset(Preset::Classic).unwrap();
    let mut renderer = RecordingRenderer::new();

    // 3 intervals of 1000s at 0.001 rad/ms, folded into one turn
    let (ctx, _) = flow::run_headless(&config, &mut renderer, 4, Duration::from_secs(1000)).unwrap();
    let system = ctx.graph.find_by_name(layout::SYSTEM_PIVOT).unwrap();
    let yaw = system.transform.yaw().0;
    assert!(yaw.abs() < std::f32::consts::TAU);
    assert_eq!(renderer.frames.len(), 4);
}
