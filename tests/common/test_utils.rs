use orrery::{
    camera::{Camera, CameraState, OrbitController, Projection},
    cgmath::{Deg, Vector3},
    context::Context,
    data_structures::{scene_graph::NodeId, transform::Transform},
    render::{Frame, Renderer},
};

/// What a renderer saw in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRecord {
    pub items: Vec<(NodeId, String, Vector3<f32>)>,
    pub background: bool,
}

/// Renderer that remembers every frame it was asked to draw.
#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<FrameRecord>,
    pub resizes: Vec<(u32, u32)>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> &FrameRecord {
        self.frames.last().expect("nothing was rendered")
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames.push(FrameRecord {
            items: frame
                .items
                .iter()
                .map(|item| (item.node, item.name.to_string(), item.world_position()))
                .collect(),
            background: frame.background.is_some(),
        });
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }
}

pub fn camera_state() -> CameraState {
    CameraState {
        camera: Camera::new((0.0, 50.0, 0.0), (0.0, 0.0, 0.0), (0.0, 0.0, 1.0)),
        projection: Projection::new(800, 600, Deg(75.0), 0.1, 1000.0),
        controller: OrbitController::new(1.0, 1.0, None),
    }
}

pub fn empty_context() -> Context {
    Context::new(camera_state())
}

/// A context holding one spinning orbit pivot at `offset`.
pub fn pivot_context(offset: [f32; 3]) -> (Context, NodeId) {
    let mut ctx = empty_context();
    let pivot = ctx
        .graph
        .add_node(NodeId::ROOT, "pivot", Transform::from_position(offset.into()))
        .unwrap();
    ctx.graph.animate(pivot).unwrap();
    (ctx, pivot)
}

pub fn yaw(ctx: &Context, id: NodeId) -> f32 {
    ctx.graph.get(id).unwrap().transform.yaw().0
}
