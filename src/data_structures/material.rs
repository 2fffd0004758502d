//! Phong-style surface description for primitive bodies.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data_structures::texture::TextureData;

/// Linear RGB colour, usually written as a `0xRRGGBB` literal in scene files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Colour {
    pub const WHITE: Colour = Colour { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Colour = Colour { r: 0.0, g: 0.0, b: 0.0 };

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| ((c.clamp(0.0, 1.0) * 255.0).round() as u32) & 0xFF;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

impl From<u32> for Colour {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<Colour> for u32 {
    fn from(colour: Colour) -> Self {
        colour.to_hex()
    }
}

/// Which texture map of a material an asynchronous load fills in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Albedo,
    Normal,
}

/// A texture map: the path it comes from and, once loaded, its pixels.
#[derive(Clone, Debug)]
pub struct TextureMap {
    pub path: String,
    pub data: Option<Arc<TextureData>>,
}

impl TextureMap {
    pub fn pending(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            data: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct Material {
    pub colour: Colour,
    pub emissive: Colour,
    pub albedo_map: Option<TextureMap>,
    pub normal_map: Option<TextureMap>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            colour: Colour::WHITE,
            emissive: Colour::BLACK,
            albedo_map: None,
            normal_map: None,
        }
    }
}

impl Material {
    pub fn map(&self, slot: TextureSlot) -> Option<&TextureMap> {
        match slot {
            TextureSlot::Albedo => self.albedo_map.as_ref(),
            TextureSlot::Normal => self.normal_map.as_ref(),
        }
    }

    pub fn map_mut(&mut self, slot: TextureSlot) -> Option<&mut TextureMap> {
        match slot {
            TextureSlot::Albedo => self.albedo_map.as_mut(),
            TextureSlot::Normal => self.normal_map.as_mut(),
        }
    }
}
