//! Scene graph and hierarchical scene organization.
//!
//! The graph is a tree of [`Node`]s owned top-down: every node owns its
//! children, and nodes can only be created through [`SceneGraph::add_node`],
//! which keeps the tree acyclic and gives each node exactly one parent.
//! Next to the tree the graph keeps an ordered registry of the nodes that
//! spin every frame.

use std::collections::HashSet;

use anyhow::{anyhow, bail};
use cgmath::{Matrix4, SquareMatrix};
use log::warn;

use crate::data_structures::{
    material::TextureSlot,
    model::Content,
    texture::TextureData,
    transform::Transform,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub struct Node {
    id: NodeId,
    name: String,
    pub transform: Transform,
    children: Vec<Node>,
    content: Option<Content>,
}

impl Node {
    fn new(id: NodeId, name: String, transform: Transform) -> Self {
        Self {
            id,
            name,
            transform,
            children: Vec::new(),
            content: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> Option<&mut Content> {
        self.content.as_mut()
    }

    /// Sets the renderable content and leaves transform and children untouched.
    ///
    /// Returns the content that was attached before, if any.
    pub fn attach_content(&mut self, content: Content) -> Option<Content> {
        self.content.replace(content)
    }

    fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Returns how many nodes of the subtree were turned.
    fn spin(&mut self, animated: &HashSet<NodeId>, delta: f32) -> usize {
        let mut turned = 0;
        if animated.contains(&self.id) {
            self.transform.rotate_yaw(delta);
            turned += 1;
        }
        for child in self.children.iter_mut() {
            turned += child.spin(animated, delta);
        }
        turned
    }

    fn collect_world(&self, parent: &Matrix4<f32>, out: &mut Vec<(NodeId, Matrix4<f32>)>) {
        let world = parent * self.transform.to_matrix();
        out.push((self.id, world));
        for child in &self.children {
            child.collect_world(&world, out);
        }
    }
}

/// Pre-order depth-first iterator over a subtree.
pub struct DepthFirst<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[derive(Debug)]
pub struct SceneGraph {
    root: Node,
    animated: Vec<NodeId>,
    // same ids as `animated`, for lookups during the spin walk
    animated_set: HashSet<NodeId>,
    next_id: u32,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            root: Node::new(NodeId::ROOT, "scene".to_string(), Transform::new()),
            animated: Vec::new(),
            animated_set: HashSet::new(),
            next_id: 1,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Creates a new node as the last child of `parent`.
    pub fn add_node(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
    ) -> anyhow::Result<NodeId> {
        let id = NodeId(self.next_id);
        let node = Node::new(id, name.into(), transform);
        let parent = self
            .root
            .find_mut(parent)
            .ok_or_else(|| anyhow!("cannot add {} under unknown parent {}", node.name, parent))?;
        parent.children.push(node);
        self.next_id += 1;
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.root.find(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.root.find_mut(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.iter().find(|node| node.name == name)
    }

    pub fn iter(&self) -> DepthFirst<'_> {
        DepthFirst {
            stack: vec![&self.root],
        }
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Registers a node for the per-frame yaw rotation.
    pub fn animate(&mut self, id: NodeId) -> anyhow::Result<()> {
        if self.get(id).is_none() {
            bail!("cannot animate unknown node {}", id);
        }
        if !self.animated_set.insert(id) {
            warn!("node {} is already animated, ignoring the second registration", id);
            return Ok(());
        }
        self.animated.push(id);
        Ok(())
    }

    /// The animated nodes in registration order.
    pub fn animated(&self) -> &[NodeId] {
        &self.animated
    }

    pub fn is_animated(&self, id: NodeId) -> bool {
        self.animated_set.contains(&id)
    }

    /// Adds `delta` radians of yaw to every animated node.
    ///
    /// Each node is updated independently, so sibling order doesn't matter.
    /// Returns the number of nodes turned; registered nodes missing from the
    /// tree are skipped with a warning.
    pub fn spin_animated(&mut self, delta: f32) -> usize {
        if self.animated.is_empty() || delta == 0.0 {
            return 0;
        }
        let turned = self.root.spin(&self.animated_set, delta);
        if turned < self.animated.len() {
            warn!(
                "{} of {} animated nodes are not in the tree, skipped them",
                self.animated.len() - turned,
                self.animated.len()
            );
        }
        turned
    }

    pub fn attach_content(&mut self, id: NodeId, content: Content) -> anyhow::Result<()> {
        let node = self
            .get_mut(id)
            .ok_or_else(|| anyhow!("cannot attach {} content to unknown node {}", content.kind(), id))?;
        if let Some(previous) = node.attach_content(content) {
            warn!(
                "node {} ({}) already had {} content, it was replaced",
                id,
                node.name,
                previous.kind()
            );
        }
        Ok(())
    }

    /// Fills in one texture map of a mesh node's material.
    pub fn attach_texture(
        &mut self,
        id: NodeId,
        slot: TextureSlot,
        data: TextureData,
    ) -> anyhow::Result<()> {
        let node = self
            .get_mut(id)
            .ok_or_else(|| anyhow!("cannot attach a texture to unknown node {}", id))?;
        let map = match node.content.as_mut() {
            Some(Content::Mesh(mesh)) => mesh.material.map_mut(slot),
            _ => None,
        };
        match map {
            Some(map) => {
                map.data = Some(std::sync::Arc::new(data));
                Ok(())
            }
            None => bail!("node {} ({}) has no {:?} texture map", id, node.name, slot),
        }
    }

    /// World matrices of all nodes in depth-first order.
    pub fn world_transforms(&self) -> Vec<(NodeId, Matrix4<f32>)> {
        let mut out = Vec::new();
        self.root.collect_world(&Matrix4::identity(), &mut out);
        out
    }

    pub fn world_transform(&self, id: NodeId) -> Option<Matrix4<f32>> {
        self.world_transforms()
            .into_iter()
            .find(|(node, _)| *node == id)
            .map(|(_, world)| world)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
