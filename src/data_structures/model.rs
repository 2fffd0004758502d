//! Renderable content that can hang off a scene node.

use crate::data_structures::{geometry::Geometry, material::Material};

/// Axis aligned bounds in model space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Bounds {
    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
                self.min[2].min(other.min[2]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
                self.max[2].max(other.max[2]),
            ],
        }
    }
}

/// One glTF mesh, with the vertex and index totals of all its primitives.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelMesh {
    pub name: String,
    pub primitives: usize,
    pub vertex_count: usize,
    pub index_count: usize,
    pub bounds: Option<Bounds>,
}

/// An externally loaded model (a glTF scene) together with its raw buffers.
#[derive(Clone, Debug, Default)]
pub struct ModelContent {
    pub source: String,
    pub meshes: Vec<ModelMesh>,
    pub node_count: usize,
    pub buffers: Vec<Vec<u8>>,
}

impl ModelContent {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertex_count).sum()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.meshes
            .iter()
            .filter_map(|m| m.bounds)
            .reduce(Bounds::union)
    }
}

/// Primitive mesh content: shape, surface and shadow participation.
#[derive(Clone, Debug)]
pub struct MeshContent {
    pub geometry: Geometry,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// Whatever a node draws. Nodes without content are pure pivots.
#[derive(Clone, Debug)]
pub enum Content {
    Mesh(MeshContent),
    Model(ModelContent),
}

impl Content {
    pub fn kind(&self) -> &'static str {
        match self {
            Content::Mesh(_) => "mesh",
            Content::Model(_) => "model",
        }
    }
}
