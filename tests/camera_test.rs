mod common;

use approx::assert_relative_eq;
use common::test_utils::camera_state;
use orrery::{
    camera::{Camera, OrbitController, Projection},
    cgmath::{Deg, Point3},
};

fn assert_point_eq(a: Point3<f32>, b: Point3<f32>) {
    assert_relative_eq!(a.x, b.x, epsilon = 1e-3);
    assert_relative_eq!(a.y, b.y, epsilon = 1e-3);
    assert_relative_eq!(a.z, b.z, epsilon = 1e-3);
}

#[test]
fn update_without_input_keeps_the_camera() {
    for up in [(0.0, 0.0, 1.0), (0.0, 1.0, 0.0)] {
        let mut camera = Camera::new((0.0, 40.0, 60.0), (0.0, 0.0, 0.0), up);
        let before = camera.eye;
        let mut controller = OrbitController::default();
        for _ in 0..10 {
            controller.update(&mut camera);
        }
        assert_point_eq(camera.eye, before);
    }
}

#[test]
fn scrolling_in_moves_closer() {
    let mut state = camera_state();
    let before = state.camera.distance();

    state.controller.handle_scroll(1.0);
    state.controller.update(&mut state.camera);

    assert_relative_eq!(state.camera.distance(), before * 0.95, epsilon = 1e-3);
    assert_point_eq(state.camera.target, Point3::new(0.0, 0.0, 0.0));
}

#[test]
fn zoom_respects_distance_limits() {
    let mut state = camera_state();
    state.controller.min_distance = 45.0;
    state.controller.max_distance = 55.0;

    for _ in 0..50 {
        state.controller.handle_scroll(1.0);
    }
    state.controller.update(&mut state.camera);
    assert_relative_eq!(state.camera.distance(), 45.0, epsilon = 1e-3);

    for _ in 0..50 {
        state.controller.handle_scroll(-1.0);
    }
    state.controller.update(&mut state.camera);
    assert_relative_eq!(state.camera.distance(), 55.0, epsilon = 1e-3);
}

#[test]
fn mouse_motion_only_rotates_while_dragging() {
    let mut camera = Camera::new((0.0, 40.0, 60.0), (0.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    let before = camera.eye;
    let mut controller = OrbitController::new(1.0, 1.0, None);

    controller.handle_mouse(250.0, 0.0);
    controller.update(&mut camera);
    assert_point_eq(camera.eye, before);

    controller.set_dragging(true);
    controller.handle_mouse(250.0, 0.0);
    controller.update(&mut camera);

    // a quarter turn around the up axis keeps height and distance
    assert_relative_eq!(camera.eye.y, before.y, epsilon = 1e-3);
    assert_relative_eq!(camera.distance(), (40.0f32 * 40.0 + 60.0 * 60.0).sqrt(), epsilon = 1e-3);
    assert_relative_eq!(camera.eye.z, 0.0, epsilon = 1e-3);
    assert_relative_eq!(camera.eye.x.abs(), 60.0, epsilon = 1e-3);
}

#[test]
fn damping_spreads_rotation_over_frames() {
    let mut camera = Camera::new((0.0, 0.0, 50.0), (0.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    let mut controller = OrbitController::new(1.0, 1.0, Some(0.5));
    controller.set_dragging(true);
    controller.handle_mouse(100.0, 0.0);

    controller.update(&mut camera);
    let first = camera.eye.x.abs();
    controller.update(&mut camera);
    let second = camera.eye.x.abs();

    assert!(first > 0.0);
    assert!(second > first);
}

#[test]
fn projection_ignores_empty_surfaces() {
    let mut projection = Projection::new(800, 600, Deg(75.0), 0.1, 1000.0);
    assert_relative_eq!(projection.aspect(), 800.0 / 600.0);

    projection.resize(0, 600);
    assert_relative_eq!(projection.aspect(), 800.0 / 600.0);

    projection.resize(1920, 1080);
    assert_relative_eq!(projection.aspect(), 1920.0 / 1080.0);
}
