//! Local node transformation and its GPU-side representation.
//!
//! A [`Transform`] is what every scene node carries relative to its parent:
//! a translation, an Euler rotation (x = pitch, y = yaw, z = roll) and a
//! non-uniform scale. World transforms are never stored; they are composed
//! as matrices while walking the graph.

use std::f32::consts::TAU;

use cgmath::{Euler, Matrix, Matrix3, Matrix4, Quaternion, Rad, SquareMatrix, Vector3};

/// Position, rotation and scale of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Euler<Rad<f32>>,
    pub scale: Vector3<f32>,
}

impl Transform {
    /// Identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    pub fn yaw(&self) -> Rad<f32> {
        self.rotation.y
    }

    /// Advances the yaw angle by `delta` radians.
    ///
    /// The angle is only folded back once it has gone a full turn, so small
    /// accumulated values stay bit-exact.
    pub fn rotate_yaw(&mut self, delta: f32) {
        let yaw = self.rotation.y.0 + delta;
        self.rotation.y = Rad(if yaw.abs() >= TAU { yaw % TAU } else { yaw });
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(Quaternion::from(self.rotation))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vector3<f32>> for Transform {
    fn from(position: Vector3<f32>) -> Self {
        Self::from_position(position)
    }
}

/// Translation part of a world matrix.
pub fn world_position(world: &Matrix4<f32>) -> Vector3<f32> {
    world.w.truncate()
}

/**
 * The raw instance is what a GPU backend uploads per drawn node: the world matrix,
 * the normal matrix (inverse transpose of the upper 3x3) and the handedness of the
 * world matrix so mirrored scales can flip their tangent frame.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
    pub handedness: f32,
}

impl InstanceRaw {
    pub fn from_world(world: &Matrix4<f32>) -> Self {
        let upper = Matrix3::from_cols(world.x.truncate(), world.y.truncate(), world.z.truncate());
        let det = upper.determinant();
        // degenerate scales (e.g. a zero axis) fall back to the identity normal matrix
        let normal = upper
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix3::identity);
        Self {
            model: (*world).into(),
            normal: normal.into(),
            handedness: if det < 0.0 { -1.0 } else { 1.0 },
        }
    }
}
