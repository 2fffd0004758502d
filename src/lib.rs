//! orrery
//!
//! A small, cross-platform scene runtime for a stylized solar system that
//! runs natively and in the browser. Bodies orbit a central pivot; the layout
//! is a data table, the motion a per-frame spin plus optional ping-pong
//! tweens. Drawing is left to a pluggable [`render::Renderer`].
//!
//! High-level modules
//! - `animation`: the per-frame step, tweens and easing curves
//! - `camera`: camera, projection and orbit controls
//! - `config`: RON scene descriptions and the built-in presets
//! - `context`: the scene context passed to everything at runtime
//! - `data_structures`: scene graph, transforms and renderable content
//! - `flow`: window/event-loop integration and the headless runner
//! - `layout`: builds a scene context from a config
//! - `light`: light sources
//! - `render`: per-frame draw lists and the renderer trait
//! - `resources`: asynchronous loading of models, textures and environment maps
//!

pub mod animation;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod layout;
pub mod light;
pub mod render;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use instant::{Duration, Instant};
pub use winit::event::{DeviceEvent, WindowEvent};
