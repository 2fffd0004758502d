//! Frame composition and the renderer seam.
//!
//! Each frame the scene is flattened into a [`Frame`]: a depth-first list of
//! [`DrawItem`]s (every node that currently has content, with its world
//! matrix) plus camera, lights and background. A [`Renderer`] consumes it.
//! Nodes without content, including bodies whose model is still loading,
//! don't show up in the list.

use cgmath::{Matrix4, Point3};
use log::{debug, trace};

use crate::{
    context::Context,
    data_structures::{
        material::Colour,
        model::Content,
        scene_graph::NodeId,
        texture::EnvironmentMap,
        transform::{InstanceRaw, world_position},
    },
    light::Light,
};

pub struct DrawItem<'a> {
    pub node: NodeId,
    pub name: &'a str,
    pub world: Matrix4<f32>,
    pub content: &'a Content,
}

impl DrawItem<'_> {
    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw::from_world(&self.world)
    }

    pub fn world_position(&self) -> cgmath::Vector3<f32> {
        world_position(&self.world)
    }
}

pub struct Frame<'a> {
    pub items: Vec<DrawItem<'a>>,
    pub view_proj: Matrix4<f32>,
    pub eye: Point3<f32>,
    pub lights: &'a [Light],
    pub background: Option<&'a EnvironmentMap>,
    pub clear_colour: Colour,
}

impl<'a> Frame<'a> {
    pub fn collect(ctx: &'a Context) -> Self {
        let worlds = ctx.graph.world_transforms();
        // world_transforms walks in the same depth-first order as iter
        let items = ctx
            .graph
            .iter()
            .zip(worlds)
            .filter_map(|(node, (id, world))| {
                debug_assert_eq!(node.id(), id);
                node.content().map(|content| DrawItem {
                    node: id,
                    name: node.name(),
                    world,
                    content,
                })
            })
            .collect();
        Self {
            items,
            view_proj: ctx.camera.view_proj(),
            eye: ctx.camera.camera.eye,
            lights: &ctx.lights,
            background: ctx.background.as_ref(),
            clear_colour: ctx.clear_colour,
        }
    }

    pub fn item(&self, node: NodeId) -> Option<&DrawItem<'a>> {
        self.items.iter().find(|item| item.node == node)
    }

    /// Per-item instance data packed the way a vertex buffer expects it.
    pub fn instance_bytes(&self) -> Vec<u8> {
        let raw: Vec<InstanceRaw> = self.items.iter().map(DrawItem::to_raw).collect();
        bytemuck::cast_slice(&raw).to_vec()
    }
}

/// The rendering backend.
pub trait Renderer {
    /// Draws one frame. Called exactly once per animation step.
    fn render(&mut self, frame: &Frame<'_>);

    /// The display surface changed size.
    fn resize(&mut self, width: u32, height: u32);
}

/// Renderer that only reports what it would draw.
#[derive(Debug)]
pub struct FrameLog {
    every: u64,
    frames: u64,
    size: (u32, u32),
}

impl FrameLog {
    /// Logs a summary every `every` frames (every frame for 0 or 1).
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
            size: (0, 0),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl Default for FrameLog {
    fn default() -> Self {
        Self::new(120)
    }
}

impl Renderer for FrameLog {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        if self.frames % self.every != 0 {
            return;
        }
        let meshes = frame
            .items
            .iter()
            .filter(|item| matches!(item.content, Content::Mesh(_)))
            .count();
        debug!(
            "frame {}: {} meshes, {} models, {} lights, background {}",
            self.frames,
            meshes,
            frame.items.len() - meshes,
            frame.lights.len(),
            if frame.background.is_some() { "loaded" } else { "pending" },
        );
        for item in &frame.items {
            let p = item.world_position();
            trace!("  {} {} at ({:.2}, {:.2}, {:.2})", item.node, item.name, p.x, p.y, p.z);
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        debug!("surface resized to {}x{}", width, height);
        self.size = (width, height);
    }
}
