//! Turns a [`SceneConfig`] into a live scene.
//!
//! The body table is walked once, in order, so the tree is built parent
//! before child. Every body gets an optional orbit pivot and a body node on
//! that pivot's origin; spinning the pivot revolves the body, spinning the
//! body turns it in place. Registration for the spin happens right away,
//! independent of whether the body's model has arrived yet.

use std::collections::HashMap;

use anyhow::{Context as _, anyhow, bail};
use cgmath::{Deg, Euler, Rad, Vector3};
use instant::Duration;
use log::{debug, info};

use crate::{
    animation::{
        AnimationLoop,
        tween::{Tween, TweenTarget, TweenTrack},
    },
    camera::{Camera, CameraState, OrbitController, Projection},
    config::{Appearance, BodyDescriptor, SceneConfig, TweenConfig, TweenTargetConfig},
    context::Context,
    data_structures::{
        material::{Material, TextureMap, TextureSlot},
        model::{Content, MeshContent},
        scene_graph::NodeId,
        transform::Transform,
    },
    resources::AssetRequest,
};

/// Name of the pivot every top level body hangs off.
pub const SYSTEM_PIVOT: &str = "solar_system";

/// The nodes created for one body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyHandles {
    /// The orbit pivot, or `None` if the body sits directly on its parent.
    pub pivot: Option<NodeId>,
    pub body: NodeId,
}

impl BodyHandles {
    /// The node children of this body attach to.
    pub fn anchor(&self) -> NodeId {
        self.pivot.unwrap_or(self.body)
    }
}

#[derive(Debug)]
pub struct SceneBuild {
    pub context: Context,
    pub animation: AnimationLoop,
    /// Loads to start right away; their results go to `Context::apply`.
    pub requests: Vec<AssetRequest>,
    pub system: NodeId,
    pub bodies: HashMap<String, BodyHandles>,
}

impl SceneBuild {
    pub fn body(&self, name: &str) -> Option<BodyHandles> {
        self.bodies.get(name).copied()
    }
}

fn camera_state(config: &SceneConfig) -> CameraState {
    let c = &config.camera;
    let mut controller = OrbitController::new(c.rotate_speed, c.zoom_speed, c.damping);
    controller.min_distance = c.min_distance;
    controller.max_distance = c.max_distance.unwrap_or(f32::INFINITY);
    CameraState {
        camera: Camera::new(c.position, c.target, c.up),
        // the host resizes this as soon as it knows the surface
        projection: Projection::new(16, 9, Deg(c.fov_degrees), c.near, c.far),
        controller,
    }
}

fn mesh_content(config: &SceneConfig, appearance: &Appearance) -> Option<MeshContent> {
    match appearance {
        Appearance::Phong {
            colour,
            emissive,
            albedo_map,
            normal_map,
            cast_shadow,
            receive_shadow,
        } => Some(MeshContent {
            geometry: config.sphere,
            material: Material {
                colour: colour.unwrap_or(Material::default().colour),
                emissive: *emissive,
                albedo_map: albedo_map.as_deref().map(TextureMap::pending),
                normal_map: normal_map.as_deref().map(TextureMap::pending),
            },
            cast_shadow: *cast_shadow,
            receive_shadow: *receive_shadow,
        }),
        _ => None,
    }
}

fn add_body(
    config: &SceneConfig,
    build: &mut SceneBuild,
    body: &BodyDescriptor,
) -> anyhow::Result<()> {
    if build.bodies.contains_key(&body.name) {
        bail!("body {} is declared twice", body.name);
    }
    let parent = match &body.parent {
        None => build.system,
        Some(parent) => build
            .bodies
            .get(parent)
            .map(BodyHandles::anchor)
            .ok_or_else(|| {
                anyhow!(
                    "body {} refers to parent {} which is not declared before it",
                    body.name,
                    parent
                )
            })?,
    };
    let graph = &mut build.context.graph;

    let pivot = match body.orbit {
        Some(offset) => {
            let pivot = graph.add_node(
                parent,
                format!("{}_orbit", body.name),
                Transform::from_position(Vector3::from(offset)),
            )?;
            if body.spin_orbit {
                graph.animate(pivot)?;
            }
            Some(pivot)
        }
        None => None,
    };

    let [x, y, z] = body.rotation;
    let transform = Transform {
        rotation: Euler::new(Rad(x), Rad(y), Rad(z)),
        ..Transform::new().with_uniform_scale(body.scale)
    };
    let id = graph.add_node(pivot.unwrap_or(parent), body.name.clone(), transform)?;
    if body.spin_body {
        graph.animate(id)?;
    }

    match &body.appearance {
        Appearance::Pivot => {}
        Appearance::Model { path } => build.requests.push(AssetRequest::Model {
            node: id,
            path: path.clone(),
        }),
        phong @ Appearance::Phong { .. } => {
            if let Some(mesh) = mesh_content(config, phong) {
                for slot in [TextureSlot::Albedo, TextureSlot::Normal] {
                    if let Some(map) = mesh.material.map(slot) {
                        build.requests.push(AssetRequest::Texture {
                            node: id,
                            slot,
                            path: map.path.clone(),
                        });
                    }
                }
                graph.attach_content(id, Content::Mesh(mesh))?;
            }
        }
    }

    debug!("added body {} as {} (pivot {:?})", body.name, id, pivot);
    build
        .bodies
        .insert(body.name.clone(), BodyHandles { pivot, body: id });
    Ok(())
}

fn resolve_tween(build: &SceneBuild, config: &TweenConfig) -> anyhow::Result<TweenTrack> {
    let lookup = |name: &str| {
        build
            .body(name)
            .ok_or_else(|| anyhow!("tween targets unknown body {}", name))
    };
    let target = match &config.target {
        TweenTargetConfig::Pivot { body, channel } => {
            let handles = lookup(body)?;
            let pivot = handles
                .pivot
                .ok_or_else(|| anyhow!("tween targets the orbit of {}, which has none", body))?;
            TweenTarget::Node(pivot, *channel)
        }
        TweenTargetConfig::Body { body, channel } => TweenTarget::Node(lookup(body)?.body, *channel),
        TweenTargetConfig::Camera { axis } => TweenTarget::Camera(*axis),
    };
    let duration = Duration::try_from_secs_f32(config.duration_secs)
        .with_context(|| format!("tween duration {} is not a valid time", config.duration_secs))?;
    let tween = Tween {
        from: config.from,
        to: config.to,
        duration,
        easing: config.easing,
        repeat: config.repeat,
        yoyo: config.yoyo,
    };
    Ok(TweenTrack::new(target, tween))
}

/// Builds the scene described by `config`.
pub fn build(config: &SceneConfig) -> anyhow::Result<SceneBuild> {
    let mut context = Context::new(camera_state(config));
    context.clear_colour = config.clear_colour;
    context.lights = config.lights.iter().copied().map(Into::into).collect();

    let system = context
        .graph
        .add_node(NodeId::ROOT, SYSTEM_PIVOT, Transform::new())?;
    if config.spin_system {
        context.graph.animate(system)?;
    }

    let mut build = SceneBuild {
        context,
        animation: AnimationLoop::new(config.rotation_rate),
        requests: Vec::new(),
        system,
        bodies: HashMap::new(),
    };
    if let Some(path) = &config.background {
        build
            .requests
            .push(AssetRequest::Environment { path: path.clone() });
    }

    for body in &config.bodies {
        add_body(config, &mut build, body)
            .with_context(|| format!("invalid body table in scene {}", config.name))?;
    }
    for tween in &config.tweens {
        let track = resolve_tween(&build, tween)
            .with_context(|| format!("invalid tween in scene {}", config.name))?;
        build.animation.add_track(track);
    }

    info!(
        "built scene {}: {} nodes, {} spinning, {} pending loads, {} tweens",
        config.name,
        build.context.graph.len(),
        build.context.graph.animated().len(),
        build.requests.len(),
        build.animation.tracks().len()
    );
    Ok(build)
}
