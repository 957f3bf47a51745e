//! Scene nodes
//!
//! A node is either a container (owning an ordered child list) or a
//! user-supplied [`SceneObject`]. Both kinds share position, depth, flags and
//! the non-owning `ancestor` back-reference.

use std::fmt;

use bitflags::bitflags;

use crate::foundation::collections::{NodeId, TaskId};
use crate::foundation::math::{Bounds, Vec2};

use super::object::{PropertyValue, SceneObject};
use super::sort::SortAxis;

bitflags! {
    /// Per-node traversal and lifecycle flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Participates in visibility (and therefore update/draw)
        const VISIBLE = 1 << 0;
        /// Drawn by the draw pass when in the viewport
        const RENDERABLE = 1 << 1;
        /// Anchored to screen space instead of the container's space
        const FLOATING = 1 << 2;
        /// Survives container teardown
        const PERSISTENT = 1 << 3;
        /// Still updated while the game is paused
        const UPDATE_WHEN_PAUSED = 1 << 4;
        /// Updated even when outside the viewport
        const ALWAYS_UPDATE = 1 << 5;
        /// Domain entity; eligible for property queries
        const ENTITY = 1 << 6;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::RENDERABLE
    }
}

/// Registry and ordering state of a container node
#[derive(Debug, Clone)]
pub struct ContainerState {
    /// Width and height of the container
    pub size: Vec2,
    pub(crate) children: Vec<NodeId>,
    pub(crate) sort_axis: SortAxis,
    pub(crate) auto_sort: bool,
    pub(crate) pending_sort: Option<TaskId>,
    pub(crate) draw_count: usize,
}

impl ContainerState {
    pub(crate) const fn new(size: Vec2, sort_axis: SortAxis, auto_sort: bool) -> Self {
        Self {
            size,
            children: Vec::new(),
            sort_axis,
            auto_sort,
            pending_sort: None,
            draw_count: 0,
        }
    }

    /// Registered children in registry order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Comparator used by deferred sorts
    pub const fn sort_axis(&self) -> SortAxis {
        self.sort_axis
    }

    /// Whether appends schedule a sort automatically
    pub const fn auto_sort(&self) -> bool {
        self.auto_sort
    }

    /// Whether a deferred sort is waiting for the next tick
    pub const fn is_sort_pending(&self) -> bool {
        self.pending_sort.is_some()
    }

    /// Number of children drawn by the last draw pass
    pub const fn draw_count(&self) -> usize {
        self.draw_count
    }

    pub(crate) fn index_of(&self, child: NodeId) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }
}

/// What a node is
pub enum NodeKind {
    /// Nested container
    Container(ContainerState),
    /// User object
    Object(Box<dyn SceneObject>),
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container(state) => f.debug_tuple("Container").field(state).finish(),
            Self::Object(_) => f.write_str("Object(..)"),
        }
    }
}

/// Inert object used by [`Node::empty`]
struct Empty;

impl SceneObject for Empty {}

/// A scene node
///
/// Nodes are built unowned and handed to [`Scene::spawn`](super::Scene::spawn).
#[derive(Debug)]
pub struct Node {
    /// Position in the owning container's local space
    pub position: Vec2,
    /// Depth; higher values sort first
    pub z: f32,
    /// Traversal and lifecycle flags
    pub flags: NodeFlags,
    pub(crate) name: Option<String>,
    pub(crate) ancestor: Option<NodeId>,
    pub(crate) in_viewport: bool,
    pub(crate) kind: NodeKind,
}

impl Node {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            position: Vec2::zeros(),
            z: 0.0,
            flags: NodeFlags::default(),
            name: None,
            ancestor: None,
            in_viewport: false,
            kind,
        }
    }

    /// Wrap a user object
    pub fn object(object: impl SceneObject) -> Self {
        Self::with_kind(NodeKind::Object(Box::new(object)))
    }

    /// Wrap an already boxed user object
    pub fn boxed(object: Box<dyn SceneObject>) -> Self {
        Self::with_kind(NodeKind::Object(object))
    }

    /// Node with no capabilities
    pub fn empty() -> Self {
        Self::object(Empty)
    }

    pub(crate) fn container(size: Vec2, sort_axis: SortAxis, auto_sort: bool) -> Self {
        Self::with_kind(NodeKind::Container(ContainerState::new(size, sort_axis, auto_sort)))
    }

    /// Set the position
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the depth
    #[must_use]
    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    /// Replace all flags
    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Add flags to the current set
    #[must_use]
    pub fn with_flag(mut self, flag: NodeFlags) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Set the name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Node name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Rename the node
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Owning container, if any
    pub const fn ancestor(&self) -> Option<NodeId> {
        self.ancestor
    }

    /// Visibility computed by the most recent update pass
    pub const fn in_viewport(&self) -> bool {
        self.in_viewport
    }

    /// Node kind
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Check for a container node
    pub const fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container(_))
    }

    /// Container state, if this is a container
    pub const fn as_container(&self) -> Option<&ContainerState> {
        match &self.kind {
            NodeKind::Container(state) => Some(state),
            NodeKind::Object(_) => None,
        }
    }

    pub(crate) fn as_container_mut(&mut self) -> Option<&mut ContainerState> {
        match &mut self.kind {
            NodeKind::Container(state) => Some(state),
            NodeKind::Object(_) => None,
        }
    }

    /// User object, if this is an object node
    pub fn as_object(&self) -> Option<&dyn SceneObject> {
        match &self.kind {
            NodeKind::Object(object) => Some(object.as_ref()),
            NodeKind::Container(_) => None,
        }
    }

    /// Mutable user object, if this is an object node
    pub fn as_object_mut(&mut self) -> Option<&mut dyn SceneObject> {
        match &mut self.kind {
            NodeKind::Object(object) => Some(object.as_mut()),
            NodeKind::Container(_) => None,
        }
    }

    /// Take the user object out of a released node
    pub fn into_object(self) -> Option<Box<dyn SceneObject>> {
        match self.kind {
            NodeKind::Object(object) => Some(object),
            NodeKind::Container(_) => None,
        }
    }

    /// Check a flag
    pub const fn has(&self, flag: NodeFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Bounding rectangle in the owning container's local space
    ///
    /// Containers are always boundable; objects only when they report an extent.
    pub fn bounds(&self) -> Option<Bounds> {
        let size = match &self.kind {
            NodeKind::Container(state) => state.size,
            NodeKind::Object(object) => object.extent()?,
        };
        Some(Bounds::new(self.position, size))
    }

    /// Named attribute lookup
    ///
    /// `name`, `x`, `y` and `z` are answered by the node itself; anything else
    /// is forwarded to the object.
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "name" => self.name.clone().map(PropertyValue::Text),
            "x" => Some(self.position.x.into()),
            "y" => Some(self.position.y.into()),
            "z" => Some(self.z.into()),
            _ => self.as_object().and_then(|object| object.property(name)),
        }
    }
}
