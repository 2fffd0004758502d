//! Scene descriptions with RON persistence.
//!
//! A [`SceneConfig`] is the whole declarative layout of a scene: the spin
//! rate, camera, lights, the ordered body table and the tweens. Two presets
//! ship with the crate; any other layout can be loaded from a `.ron` file.

use std::str::FromStr;

use anyhow::{Context as _, bail};
use serde::{Deserialize, Serialize};

use crate::{
    animation::{
        easing::Easing,
        tween::{Axis, Channel, Repeat},
    },
    data_structures::{geometry::Geometry, material::Colour},
    light::Light,
};

const CLASSIC: &str = include_str!("../assets/scenes/classic.ron");
const SHUTTLE: &str = include_str!("../assets/scenes/shuttle.ron");

/// The built-in layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Sun, four planets and three moons, spinning at 0.001 rad/ms.
    Classic,
    /// A slower system (0.0001 rad/ms) with an oscillating spaceship and a bobbing camera.
    Shuttle,
}

impl FromStr for Preset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Preset::Classic),
            "shuttle" => Ok(Preset::Shuttle),
            other => bail!("unknown preset {:?}, expected classic or shuttle", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub name: String,
    /// Yaw speed of every spinning node, in radians per millisecond.
    pub rotation_rate: f32,
    /// Whether the system root pivot spins as well.
    pub spin_system: bool,
    pub clear_colour: Colour,
    /// HDR panorama used as background, relative to the asset root.
    pub background: Option<String>,
    pub camera: CameraConfig,
    pub lights: Vec<LightConfig>,
    /// Shared geometry of all `Phong` bodies.
    pub sphere: Geometry,
    pub bodies: Vec<BodyDescriptor>,
    pub tweens: Vec<TweenConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "untitled".to_string(),
            rotation_rate: 0.001,
            spin_system: true,
            clear_colour: Colour::BLACK,
            background: None,
            camera: CameraConfig::default(),
            lights: Vec::new(),
            sphere: Geometry::default(),
            bodies: Vec::new(),
            tweens: Vec::new(),
        }
    }
}

impl SceneConfig {
    pub fn from_ron(text: &str) -> anyhow::Result<Self> {
        let config: SceneConfig = ron::from_str(text)?;
        if !config.rotation_rate.is_finite() {
            bail!("rotation_rate of {} must be finite", config.name);
        }
        Ok(config)
    }

    pub fn to_ron(&self) -> anyhow::Result<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn preset(preset: Preset) -> anyhow::Result<Self> {
        let text = match preset {
            Preset::Classic => CLASSIC,
            Preset::Shuttle => SHUTTLE,
        };
        Self::from_ron(text).with_context(|| format!("built-in preset {:?} is broken", preset))
    }

    /// Reads a scene file through the asset loader (file system or HTTP).
    pub async fn load(file_name: &str) -> anyhow::Result<Self> {
        let text = crate::resources::texture::load_string(file_name).await?;
        Self::from_ron(&text).with_context(|| format!("could not parse scene {}", file_name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Orbit damping factor; `None` applies input immediately.
    pub damping: Option<f32>,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 50.0, 0.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 0.0, 1.0],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            damping: Some(0.05),
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum LightConfig {
    Point {
        colour: Colour,
        intensity: f32,
        #[serde(default)]
        position: [f32; 3],
        #[serde(default)]
        cast_shadow: bool,
    },
    Ambient {
        colour: Colour,
        intensity: f32,
    },
}

impl From<LightConfig> for Light {
    fn from(config: LightConfig) -> Self {
        match config {
            LightConfig::Point {
                colour,
                intensity,
                position,
                cast_shadow,
            } => Light::Point {
                colour,
                intensity,
                position: position.into(),
                cast_shadow,
            },
            LightConfig::Ambient { colour, intensity } => Light::Ambient { colour, intensity },
        }
    }
}

fn one() -> f32 {
    1.0
}

fn yes() -> bool {
    true
}

fn black() -> Colour {
    Colour::BLACK
}

/// What a body looks like.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum Appearance {
    /// Nothing to draw; the body only carries transforms for its children.
    #[default]
    Pivot,
    /// A sphere with a Phong-style material.
    Phong {
        #[serde(default)]
        colour: Option<Colour>,
        #[serde(default = "black")]
        emissive: Colour,
        #[serde(default)]
        albedo_map: Option<String>,
        #[serde(default)]
        normal_map: Option<String>,
        #[serde(default = "yes")]
        cast_shadow: bool,
        #[serde(default = "yes")]
        receive_shadow: bool,
    },
    /// An external glTF model, attached once it has loaded.
    Model { path: String },
}

/// One row of the body table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyDescriptor {
    pub name: String,
    /// Body whose orbit pivot this body hangs off; the system root when absent.
    #[serde(default)]
    pub parent: Option<String>,
    /// Offset of this body's orbit pivot from its parent. Without an orbit the
    /// body sits directly on the parent.
    #[serde(default)]
    pub orbit: Option<[f32; 3]>,
    #[serde(default = "one")]
    pub scale: f32,
    /// Initial Euler rotation of the body in radians.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default = "yes")]
    pub spin_orbit: bool,
    #[serde(default = "yes")]
    pub spin_body: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TweenTargetConfig {
    /// The orbit pivot of a body.
    Pivot { body: String, channel: Channel },
    Body { body: String, channel: Channel },
    Camera { axis: Axis },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TweenConfig {
    pub target: TweenTargetConfig,
    #[serde(default)]
    pub from: Option<f32>,
    pub to: f32,
    pub duration_secs: f32,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub yoyo: bool,
}
