use cgmath::Vector3;

use crate::data_structures::material::Colour;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Point {
        colour: Colour,
        intensity: f32,
        position: Vector3<f32>,
        cast_shadow: bool,
    },
    Ambient {
        colour: Colour,
        intensity: f32,
    },
}

impl Light {
    pub fn intensity(&self) -> f32 {
        match self {
            Light::Point { intensity, .. } | Light::Ambient { intensity, .. } => *intensity,
        }
    }

    pub fn casts_shadow(&self) -> bool {
        matches!(self, Light::Point { cast_shadow: true, .. })
    }
}
