//! Scene arena and child registry
//!
//! All nodes live in one slot map owned by [`Scene`]. Membership in a
//! container's child list is the ownership edge; `ancestor` is only a
//! back-reference kept in sync by the operations in this file.

use crate::config::SceneConfig;
use crate::error::{SceneError, SceneResult};
use crate::foundation::collections::{NodeId, SlotMap};
use crate::foundation::math::Vec2;

use super::node::{ContainerState, Node, NodeKind};
use super::scheduler::DeferredScheduler;
use super::services::SceneServices;

/// Scene graph: node arena, root container and injected collaborators
///
/// The frame driver calls [`tick`](Self::tick), [`update`](Self::update) and
/// [`draw`](Self::draw) once per frame. Registry, ordering and query
/// operations take the container's [`NodeId`] as their first argument.
pub struct Scene {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) root: NodeId,
    pub(crate) scheduler: DeferredScheduler,
    pub(crate) services: SceneServices,
    config: SceneConfig,
}

impl Scene {
    /// Create a scene whose root container covers the viewport
    pub fn new(config: SceneConfig, services: SceneServices) -> Self {
        let mut nodes = SlotMap::with_key();
        let size = services.viewport.size();
        let root = nodes.insert(
            Node::container(size, config.sort_axis, config.auto_sort).with_name("world"),
        );
        log::debug!("scene created ({}x{}, sort axis {:?})", size.x, size.y, config.sort_axis);

        Self { nodes, root, scheduler: DeferredScheduler::new(), services, config }
    }

    /// The root ("world") container
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Scene-wide defaults
    pub const fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Injected collaborators
    pub const fn services(&self) -> &SceneServices {
        &self.services
    }

    /// Mutable access to the injected collaborators
    pub fn services_mut(&mut self) -> &mut SceneServices {
        &mut self.services
    }

    /// Insert an unowned node into the arena
    pub fn spawn(&mut self, mut node: Node) -> NodeId {
        node.ancestor = None;
        node.in_viewport = false;
        if let Some(state) = node.as_container_mut() {
            state.children.clear();
            state.pending_sort = None;
            state.draw_count = 0;
        }
        self.nodes.insert(node)
    }

    /// Create an unowned container
    ///
    /// Without an explicit `size` the container takes the viewport size.
    pub fn create_container(&mut self, position: Vec2, size: Option<Vec2>) -> NodeId {
        let size = size.unwrap_or_else(|| self.services.viewport.size());
        let node = Node::container(size, self.config.sort_axis, self.config.auto_sort)
            .with_position(position);
        self.nodes.insert(node)
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node mutably
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether the handle refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes, the root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root container is never released
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes.get(id).ok_or(SceneError::UnknownNode(id))
    }

    pub(crate) fn container_ref(&self, id: NodeId) -> SceneResult<&ContainerState> {
        self.node_ref(id)?.as_container().ok_or(SceneError::NotAContainer(id))
    }

    pub(crate) fn container_mut(&mut self, id: NodeId) -> SceneResult<&mut ContainerState> {
        self.nodes
            .get_mut(id)
            .ok_or(SceneError::UnknownNode(id))?
            .as_container_mut()
            .ok_or(SceneError::NotAContainer(id))
    }

    // -----------------------------------------------------------------------
    // Registry
    // -----------------------------------------------------------------------

    /// Append `child` to `parent` and schedule a deferred sort
    ///
    /// A child owned by another container is detached from it first.
    ///
    /// # Errors
    /// `UnknownNode`, `NotAContainer`, `RootNotAddable` for the root, or
    /// `WouldCycle` when `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.check_insert(parent, child)?;
        self.link(parent, child, None);
        self.schedule_sort(parent);
        Ok(())
    }

    /// Insert `child` into `parent` at `index` without requesting a sort
    ///
    /// # Errors
    /// `IndexOutOfRange` unless `index < len`, plus the `add_child` errors.
    pub fn add_child_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> SceneResult<()> {
        self.check_insert(parent, child)?;
        let len = self.container_ref(parent)?.children.len();
        if index >= len {
            return Err(SceneError::IndexOutOfRange { index, len });
        }
        self.link(parent, child, Some(index));
        Ok(())
    }

    /// Remove `child` from `parent`, tear it down and hand it to the pool
    ///
    /// Object children get their deactivation hook; container children are
    /// destroyed recursively before being released.
    ///
    /// # Errors
    /// `NotAChild` if `child` is not registered in `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.index_in(parent, child)?;
        self.unlink(parent, child);
        if self.node_ref(child)?.is_container() {
            self.destroy(child)?;
        }
        self.release(child);
        Ok(())
    }

    /// Remove `child` from `parent` but keep it alive and unowned
    ///
    /// # Errors
    /// `NotAChild` if `child` is not registered in `parent`.
    pub fn detach_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.index_in(parent, child)?;
        self.unlink(parent, child);
        Ok(())
    }

    /// Child handle at `index`
    ///
    /// # Errors
    /// `IndexOutOfRange` outside `[0, len)`.
    pub fn get_child_at(&self, parent: NodeId, index: usize) -> SceneResult<NodeId> {
        let children = &self.container_ref(parent)?.children;
        children
            .get(index)
            .copied()
            .ok_or(SceneError::IndexOutOfRange { index, len: children.len() })
    }

    /// Registry position of `child`, or `None` when absent
    ///
    /// # Errors
    /// Only when `parent` is not a live container.
    pub fn get_child_index(&self, parent: NodeId, child: NodeId) -> SceneResult<Option<usize>> {
        Ok(self.container_ref(parent)?.index_of(child))
    }

    /// Whether `child` is registered in `parent`
    pub fn has_child(&self, parent: NodeId, child: NodeId) -> bool {
        self.container_ref(parent).is_ok_and(|state| state.index_of(child).is_some())
    }

    /// Owning container of `child`
    pub fn get_parent(&self, child: NodeId) -> Option<NodeId> {
        self.nodes.get(child).and_then(Node::ancestor)
    }

    /// Children of `parent` in registry order
    ///
    /// # Errors
    /// When `parent` is not a live container.
    pub fn children(&self, parent: NodeId) -> SceneResult<&[NodeId]> {
        Ok(self.container_ref(parent)?.children())
    }

    /// Number of children of `parent`
    ///
    /// # Errors
    /// When `parent` is not a live container.
    pub fn child_count(&self, parent: NodeId) -> SceneResult<usize> {
        Ok(self.container_ref(parent)?.children.len())
    }

    /// Exchange the depths and registry slots of two children
    ///
    /// # Errors
    /// `NotAChild` naming both nodes unless both are registered in `parent`.
    pub fn swap_children(&mut self, parent: NodeId, a: NodeId, b: NodeId) -> SceneResult<()> {
        let state = self.container_ref(parent)?;
        let (Some(index_a), Some(index_b)) = (state.index_of(a), state.index_of(b)) else {
            return Err(SceneError::NotAChild { parent, nodes: vec![a, b] });
        };

        let z_a = self.node_ref(a)?.z;
        let z_b = self.node_ref(b)?.z;
        if let Some(node) = self.nodes.get_mut(a) {
            node.z = z_b;
        }
        if let Some(node) = self.nodes.get_mut(b) {
            node.z = z_a;
        }
        self.container_mut(parent)?.children.swap(index_a, index_b);
        log::trace!("swapped {a:?} and {b:?} in {parent:?}");
        Ok(())
    }

    /// Remove a node from the scene entirely
    ///
    /// Owned nodes go through [`remove_child`](Self::remove_child); unowned
    /// containers are destroyed first. The root cannot be despawned.
    ///
    /// # Errors
    /// `UnknownNode` for stale handles.
    pub fn despawn(&mut self, id: NodeId) -> SceneResult<()> {
        let node = self.node_ref(id)?;
        let (ancestor, is_container) = (node.ancestor, node.is_container());
        if id == self.root {
            log::warn!("despawn of the root container ignored");
            return Ok(());
        }
        match ancestor {
            Some(parent) if self.has_child(parent, id) => self.remove_child(parent, id),
            _ => {
                if is_container {
                    self.destroy(id)?;
                }
                self.release(id);
                Ok(())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn index_in(&self, parent: NodeId, child: NodeId) -> SceneResult<usize> {
        self.container_ref(parent)?
            .index_of(child)
            .ok_or_else(|| SceneError::NotAChild { parent, nodes: vec![child] })
    }

    /// Validate an insertion before anything is mutated
    fn check_insert(&self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.container_ref(parent)?;
        self.node_ref(child)?;
        if child == self.root {
            return Err(SceneError::RootNotAddable(child));
        }

        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(SceneError::WouldCycle { parent, child });
            }
            cursor = self.nodes.get(id).and_then(Node::ancestor);
        }
        Ok(())
    }

    /// Register a validated child, re-parenting it if needed
    fn link(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        if let Some(previous) = self.nodes.get(child).and_then(Node::ancestor) {
            self.unlink(previous, child);
        }

        if let Some(state) = self.nodes.get_mut(parent).and_then(Node::as_container_mut) {
            match index {
                Some(index) => state.children.insert(index.min(state.children.len()), child),
                None => state.children.push(child),
            }
        }

        if let Some(node) = self.nodes.get_mut(child) {
            node.ancestor = Some(parent);
            if let NodeKind::Object(object) = &mut node.kind {
                object.on_activate();
            }
        }
        log::trace!("added {child:?} to {parent:?}");
    }

    /// Deregister a child and run its deactivation hook
    ///
    /// Tolerates a stale or inconsistent `parent` so that re-parenting never fails halfway.
    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        if let Some(state) = self.nodes.get_mut(parent).and_then(Node::as_container_mut) {
            if let Some(index) = state.index_of(child) {
                state.children.remove(index);
            }
        }

        if let Some(node) = self.nodes.get_mut(child) {
            node.ancestor = None;
            if let NodeKind::Object(object) = &mut node.kind {
                object.on_deactivate();
            }
        }
        log::trace!("removed {child:?} from {parent:?}");
    }

    /// Take a node out of the arena and hand it to the recycling pool
    ///
    /// Children still registered in a released container become unowned.
    pub(crate) fn release(&mut self, id: NodeId) {
        let Some(mut node) = self.nodes.remove(id) else {
            return;
        };

        if let Some(state) = node.as_container_mut() {
            if let Some(task) = state.pending_sort.take() {
                self.scheduler.cancel(task);
            }
            for orphan in state.children.drain(..) {
                if let Some(child) = self.nodes.get_mut(orphan) {
                    child.ancestor = None;
                }
            }
        }

        node.ancestor = None;
        self.services.pool.push(node);
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .field("pending_sorts", &self.scheduler.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
