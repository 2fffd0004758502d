use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing curves for tweens. All of them map 0 to 0 and 1 to 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicInOut,
    SineInOut,
}

impl Easing {
    /// Maps linear progress `p` (clamped to `[0, 1]`) onto the curve.
    pub fn apply(self, p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Easing::Linear => p,
            Easing::QuadIn => p * p,
            Easing::QuadOut => 1.0 - (1.0 - p) * (1.0 - p),
            Easing::QuadInOut => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicInOut => {
                if p < 0.5 {
                    4.0 * p * p * p
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((PI * p).cos() - 1.0) / 2.0,
        }
    }
}
