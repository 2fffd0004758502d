//! The scene context: everything one running scene owns.
//!
//! A [`Context`] is created by the entry point (usually through
//! [`crate::layout::build`]) and handed by reference to the animation loop,
//! the input handlers and the load-completion path. Nothing in the crate
//! keeps scene state in globals.

use log::{debug, warn};

use crate::{
    camera::CameraState,
    data_structures::{
        material::Colour,
        model::Content,
        scene_graph::SceneGraph,
        texture::EnvironmentMap,
    },
    light::Light,
    resources::{AssetLoaded, AssetPayload, AssetRequest},
};

#[derive(Debug)]
pub struct Context {
    pub graph: SceneGraph,
    pub camera: CameraState,
    pub lights: Vec<Light>,
    pub background: Option<EnvironmentMap>,
    pub clear_colour: Colour,
}

impl Context {
    pub fn new(camera: CameraState) -> Self {
        Self {
            graph: SceneGraph::new(),
            camera,
            lights: Vec::new(),
            background: None,
            clear_colour: Colour::BLACK,
        }
    }

    /// Applies a finished asset load to the scene.
    ///
    /// Successful loads attach their payload to the node (or the background)
    /// named by the request. Failed loads are logged and otherwise ignored, so
    /// the node keeps no content. Nothing is retried.
    pub fn apply(&mut self, loaded: AssetLoaded) {
        let AssetLoaded { request, result } = loaded;
        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                warn!("could not load {}: {:#}", request.path(), e);
                return;
            }
        };
        let attached = match (&request, payload) {
            (AssetRequest::Model { node, .. }, AssetPayload::Model(model)) => {
                self.graph.attach_content(*node, Content::Model(model))
            }
            (AssetRequest::Texture { node, slot, .. }, AssetPayload::Texture(texture)) => {
                self.graph.attach_texture(*node, *slot, texture)
            }
            (AssetRequest::Environment { .. }, AssetPayload::Environment(map)) => {
                self.background = Some(map);
                Ok(())
            }
            (request, payload) => Err(anyhow::anyhow!(
                "{} payload does not fit {:?}",
                payload.kind(),
                request
            )),
        };
        match attached {
            Ok(()) => debug!("attached {}", request.path()),
            Err(e) => warn!("dropping loaded {}: {}", request.path(), e),
        }
    }
}
