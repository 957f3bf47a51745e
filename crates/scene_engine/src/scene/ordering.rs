//! Order maintenance: deferred sorting and relative moves

use std::cmp::Ordering;

use crate::error::SceneResult;
use crate::foundation::collections::NodeId;

use super::registry::Scene;
use super::scheduler::DeferredSort;
use super::sort::SortAxis;

impl Scene {
    /// Request a deferred sort of `container`
    ///
    /// Without `force`, the request is dropped for auto-sorting containers,
    /// which already sort on every append. Requests made while a sort is
    /// pending are coalesced into it.
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn sort(&mut self, container: NodeId, force: bool) -> SceneResult<()> {
        if !force && self.container_ref(container)?.auto_sort {
            log::trace!("sort of {container:?} skipped (auto-sort)");
            return Ok(());
        }
        self.schedule_sort(container);
        Ok(())
    }

    /// Queue a sort unless one is already pending
    pub(crate) fn schedule_sort(&mut self, container: NodeId) {
        let Some(state) = self.nodes.get_mut(container).and_then(|n| n.as_container_mut()) else {
            return;
        };
        if state.pending_sort.is_some() {
            return;
        }
        state.pending_sort = Some(self.scheduler.schedule(container));
        log::debug!("sort of {container:?} scheduled");
    }

    /// Run every deferred sort that was pending when the tick began
    ///
    /// Each sort uses the container's current children and axis, then fires
    /// the repaint signal. Returns the number of sorts executed.
    pub fn tick(&mut self) -> usize {
        let mut executed = 0;
        for (task, DeferredSort { container }) in self.scheduler.drain_due() {
            let Some(state) = self.nodes.get_mut(container).and_then(|n| n.as_container_mut()) else {
                log::warn!("deferred sort target {container:?} no longer exists");
                continue;
            };
            if state.pending_sort != Some(task) {
                continue;
            }

            let axis = state.sort_axis;
            let mut children = std::mem::take(&mut state.children);
            let nodes = &self.nodes;
            children.sort_by(|&a, &b| match (nodes.get(a), nodes.get(b)) {
                (Some(a), Some(b)) => axis.compare(a, b),
                _ => Ordering::Equal,
            });

            if let Ok(state) = self.container_mut(container) {
                state.children = children;
                state.pending_sort = None;
            }
            log::debug!("sorted {container:?} by {axis:?}");
            self.services.repaint.request_repaint();
            executed += 1;
        }
        executed
    }

    /// Whether `container` has a sort waiting for the next tick
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn is_sort_pending(&self, container: NodeId) -> SceneResult<bool> {
        Ok(self.container_ref(container)?.is_sort_pending())
    }

    /// Change the comparator used by future sorts (including a pending one)
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn set_sort_axis(&mut self, container: NodeId, axis: SortAxis) -> SceneResult<()> {
        self.container_mut(container)?.sort_axis = axis;
        Ok(())
    }

    /// Enable or disable automatic sorting on append
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn set_auto_sort(&mut self, container: NodeId, auto_sort: bool) -> SceneResult<()> {
        self.container_mut(container)?.auto_sort = auto_sort;
        Ok(())
    }

    /// Swap `child` with its predecessor in the registry
    ///
    /// No-op for the first child or a node that is not a child.
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn move_up(&mut self, container: NodeId, child: NodeId) -> SceneResult<()> {
        let state = self.container_ref(container)?;
        match state.index_of(child) {
            Some(index) if index > 0 => {
                let previous = state.children[index - 1];
                self.swap_children(container, child, previous)
            }
            _ => Ok(()),
        }
    }

    /// Swap `child` with its successor in the registry
    ///
    /// No-op for the last child or a node that is not a child.
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn move_down(&mut self, container: NodeId, child: NodeId) -> SceneResult<()> {
        let state = self.container_ref(container)?;
        match state.index_of(child) {
            Some(index) if index + 1 < state.children.len() => {
                let next = state.children[index + 1];
                self.swap_children(container, child, next)
            }
            _ => Ok(()),
        }
    }

    /// Move `child` to the first slot, above its new neighbour in depth
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn move_to_top(&mut self, container: NodeId, child: NodeId) -> SceneResult<()> {
        let state = self.container_mut(container)?;
        let Some(index) = state.index_of(child).filter(|&index| index > 0) else {
            return Ok(());
        };
        state.children.remove(index);
        state.children.insert(0, child);
        let neighbour = state.children[1];

        let z = self.node_ref(neighbour)?.z + 1.0;
        if let Some(node) = self.nodes.get_mut(child) {
            node.z = z;
        }
        Ok(())
    }

    /// Move `child` to the last slot, below its new neighbour in depth
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn move_to_bottom(&mut self, container: NodeId, child: NodeId) -> SceneResult<()> {
        let state = self.container_mut(container)?;
        let last = state.children.len().saturating_sub(1);
        let Some(index) = state.index_of(child).filter(|&index| index < last) else {
            return Ok(());
        };
        state.children.remove(index);
        state.children.push(child);
        let neighbour = state.children[last - 1];

        let z = self.node_ref(neighbour)?.z - 1.0;
        if let Some(node) = self.nodes.get_mut(child) {
            node.z = z;
        }
        Ok(())
    }
}
