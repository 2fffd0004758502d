//! Camera, projection and orbit controls.
//!
//! The controller orbits the camera's eye around its target on a sphere,
//! measured relative to the camera's `up` vector, so a Z-up camera behaves
//! the same as a Y-up one.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Matrix4, Point3, Quaternion, Rad, Vector3};
use winit::event::{MouseScrollDelta, WindowEvent};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>, T: Into<Point3<f32>>, U: Into<Vector3<f32>>>(
        eye: P,
        target: T,
        up: U,
    ) -> Self {
        Self {
            eye: eye.into(),
            target: target.into(),
            up: up.into(),
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.target).magnitude()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Zero sized surfaces (minimized windows) keep the previous aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Orbit controls with optional damping.
///
/// Input only accumulates deltas; `update` applies them. With damping the
/// deltas decay by the `damping` factor per update instead of being consumed at once.
#[derive(Clone, Debug)]
pub struct OrbitController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub damping: Option<f32>,
    pub min_distance: f32,
    pub max_distance: f32,
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
    dragging: bool,
}

impl OrbitController {
    pub fn new(rotate_speed: f32, zoom_speed: f32, damping: Option<f32>) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            damping,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
            dragging: false,
        }
    }

    /// Pointer motion in pixels while the rotate button is held.
    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        if !self.dragging {
            return;
        }
        // a full drag over 1000px is one full turn
        let per_pixel = 2.0 * PI / 1000.0 * self.rotate_speed;
        self.theta_delta -= dx as f32 * per_pixel;
        self.phi_delta -= dy as f32 * per_pixel;
    }

    /// Positive deltas zoom in.
    pub fn handle_scroll(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        let factor = 0.95f32.powf(self.zoom_speed * delta.abs());
        if delta > 0.0 {
            self.scale *= factor;
        } else {
            self.scale /= factor;
        }
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == winit::event::MouseButton::Left {
                    self.set_dragging(state.is_pressed());
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.handle_scroll(lines);
            }
            _ => {}
        }
    }

    pub fn update(&mut self, camera: &mut Camera) {
        let to_y_up = Quaternion::from_arc(camera.up.normalize(), Vector3::unit_y(), None);
        let from_y_up = to_y_up.conjugate();

        let offset = to_y_up * (camera.eye - camera.target);
        let radius = offset.magnitude();
        if radius < EPS {
            return;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let (theta_step, phi_step) = match self.damping {
            Some(factor) => (self.theta_delta * factor, self.phi_delta * factor),
            None => (self.theta_delta, self.phi_delta),
        };
        theta += theta_step;
        phi = (phi + phi_step).clamp(EPS, PI - EPS);
        let radius = (radius * self.scale).clamp(self.min_distance.max(EPS), self.max_distance);

        let offset = Vector3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.eye = camera.target + from_y_up * offset;

        match self.damping {
            Some(factor) => {
                self.theta_delta *= 1.0 - factor;
                self.phi_delta *= 1.0 - factor;
            }
            None => {
                self.theta_delta = 0.0;
                self.phi_delta = 0.0;
            }
        }
        self.scale = 1.0;
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(1.0, 1.0, Some(0.05))
    }
}

/// Everything the scene knows about its point of view.
#[derive(Clone, Debug)]
pub struct CameraState {
    pub camera: Camera,
    pub projection: Projection,
    pub controller: OrbitController,
}

impl CameraState {
    pub fn view_proj(&self) -> Matrix4<f32> {
        self.projection.calc_matrix() * self.camera.view_matrix()
    }
}
