//! Decoded image data: surface textures and HDR environment maps.

use std::f32::consts::PI;

use anyhow::Context as _;
use cgmath::{InnerSpace, Vector3};
use image::ImageFormat;

/// An RGBA8 texture decoded on the CPU, waiting for a backend to upload it.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Decodes any format enabled on the `image` crate, guessing from the bytes.
    pub fn from_bytes(bytes: &[u8], label: &str) -> anyhow::Result<Self> {
        let img = image::load_from_memory(bytes)
            .with_context(|| format!("could not decode texture {}", label))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            label: label.to_string(),
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        self.pixels
            .get(offset..offset + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// An equirectangular high dynamic range image used as scene background and
/// environment lighting.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentMap {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub texels: Vec<[f32; 3]>,
}

impl EnvironmentMap {
    pub fn from_hdr_bytes(bytes: &[u8], label: &str) -> anyhow::Result<Self> {
        let img = image::load_from_memory_with_format(bytes, ImageFormat::Hdr)
            .with_context(|| format!("could not decode environment map {}", label))?;
        Ok(Self::from_image(img, label))
    }

    pub fn from_image(img: image::DynamicImage, label: &str) -> Self {
        let rgb = img.to_rgb32f();
        let (width, height) = rgb.dimensions();
        let texels = rgb.pixels().map(|p| p.0).collect();
        Self {
            label: label.to_string(),
            width,
            height,
            texels,
        }
    }

    /// Looks up the radiance seen along `direction` (nearest texel).
    ///
    /// Longitude comes from the xz-plane, latitude from y; the top row of the
    /// image is straight up.
    pub fn sample(&self, direction: Vector3<f32>) -> [f32; 3] {
        if self.texels.is_empty() || direction.magnitude2() == 0.0 {
            return [0.0; 3];
        }
        let dir = direction.normalize();
        let u = dir.z.atan2(dir.x) / (2.0 * PI) + 0.5;
        let v = dir.y.clamp(-1.0, 1.0).asin() / PI + 0.5;
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = (((1.0 - v) * (self.height - 1) as f32).round() as u32).min(self.height - 1);
        self.texels[(y * self.width + x) as usize]
    }
}
