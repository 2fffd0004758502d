//! Scene data: the node tree, transforms and renderable content.
//!
//! - `scene_graph` holds the node tree and the animated-node registry
//! - `transform` holds local transforms and the raw per-instance GPU layout
//! - `model` holds node content (primitive meshes, loaded models)
//! - `geometry` tessellates primitive shapes
//! - `material` holds colours, materials and texture maps
//! - `texture` holds decoded textures and environment maps

pub mod geometry;
pub mod material;
pub mod model;
pub mod scene_graph;
pub mod texture;
pub mod transform;
