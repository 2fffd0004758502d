//! Asynchronous loading of external assets.
//!
//! Every load is described by an [`AssetRequest`] that names where the
//! result goes. [`fetch`] turns a request into an [`AssetLoaded`] message,
//! which the owner of the scene hands to [`crate::context::Context::apply`]
//! whenever it arrives. Loads never touch the scene themselves.

pub mod model;
pub mod texture;

use crate::data_structures::{
    material::TextureSlot,
    model::ModelContent,
    scene_graph::NodeId,
    texture::{EnvironmentMap, TextureData},
};

#[derive(Clone, Debug, PartialEq)]
pub enum AssetRequest {
    /// A glTF model that becomes the content of `node`.
    Model { node: NodeId, path: String },
    /// An image for one texture map of the mesh on `node`.
    Texture {
        node: NodeId,
        slot: TextureSlot,
        path: String,
    },
    /// An HDR panorama for the scene background.
    Environment { path: String },
}

impl AssetRequest {
    pub fn path(&self) -> &str {
        match self {
            AssetRequest::Model { path, .. }
            | AssetRequest::Texture { path, .. }
            | AssetRequest::Environment { path } => path,
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        match self {
            AssetRequest::Model { node, .. } | AssetRequest::Texture { node, .. } => Some(*node),
            AssetRequest::Environment { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum AssetPayload {
    Model(ModelContent),
    Texture(TextureData),
    Environment(EnvironmentMap),
}

impl AssetPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            AssetPayload::Model(_) => "model",
            AssetPayload::Texture(_) => "texture",
            AssetPayload::Environment(_) => "environment",
        }
    }
}

/// A finished load: the original request and what came of it.
#[derive(Debug)]
pub struct AssetLoaded {
    pub request: AssetRequest,
    pub result: anyhow::Result<AssetPayload>,
}

pub async fn fetch(request: AssetRequest) -> AssetLoaded {
    let result = match &request {
        AssetRequest::Model { path, .. } => {
            model::load_model_gltf(path).await.map(AssetPayload::Model)
        }
        AssetRequest::Texture { path, .. } => {
            texture::load_texture(path).await.map(AssetPayload::Texture)
        }
        AssetRequest::Environment { path } => texture::load_environment(path)
            .await
            .map(AssetPayload::Environment),
    };
    AssetLoaded { request, result }
}

/// Loads all requests concurrently; results keep the order of `requests`.
pub async fn fetch_all(requests: Vec<AssetRequest>) -> Vec<AssetLoaded> {
    futures::future::join_all(requests.into_iter().map(fetch)).await
}
