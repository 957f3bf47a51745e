//! Subtree queries and container teardown

use crate::error::SceneResult;
use crate::foundation::collections::NodeId;
use crate::foundation::math::Bounds;

use super::node::{Node, NodeFlags};
use super::object::{contains_ignore_case, PropertyMatcher, PropertyValue};
use super::registry::Scene;

impl Scene {
    /// Find entities below `container` whose property `name` matches `value`
    ///
    /// Walks the subtree in reverse registry order. Child containers are
    /// searched but never matched themselves; only nodes flagged
    /// [`NodeFlags::ENTITY`] are compared. Text values are matched as a
    /// case-insensitive pattern anchored at the start (see [`PropertyMatcher`]).
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn get_entity_by_prop(
        &self,
        container: NodeId,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> SceneResult<Vec<NodeId>> {
        let matcher = PropertyMatcher::new(value.into());
        let mut found = Vec::new();
        self.collect_entities(container, name, &matcher, &mut found)?;
        log::trace!("{} entities with {name} ~ {} under {container:?}", found.len(), matcher.query());
        Ok(found)
    }

    fn collect_entities(
        &self,
        container: NodeId,
        name: &str,
        matcher: &PropertyMatcher,
        found: &mut Vec<NodeId>,
    ) -> SceneResult<()> {
        for &child in self.container_ref(container)?.children.iter().rev() {
            let Some(node) = self.nodes.get(child) else {
                continue;
            };
            if node.is_container() {
                self.collect_entities(child, name, matcher, found)?;
            } else if node.has(NodeFlags::ENTITY)
                && node.property(name).is_some_and(|value| matcher.matches(&value))
            {
                found.push(child);
            }
        }
        Ok(())
    }

    /// Find descendants of `container` whose name contains `pattern`, ignoring case
    ///
    /// Containers are matched as well as searched. Results follow registry
    /// order, each container before its own descendants.
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn get_child_by_name(&self, container: NodeId, pattern: &str) -> SceneResult<Vec<NodeId>> {
        let mut found = Vec::new();
        self.collect_named(container, pattern, &mut found)?;
        Ok(found)
    }

    fn collect_named(&self, container: NodeId, pattern: &str, found: &mut Vec<NodeId>) -> SceneResult<()> {
        for &child in &self.container_ref(container)?.children {
            let Some(node) = self.nodes.get(child) else {
                continue;
            };
            if node.name().is_some_and(|name| contains_ignore_case(name, pattern)) {
                found.push(child);
            }
            if node.is_container() {
                self.collect_named(child, pattern, found)?;
            }
        }
        Ok(())
    }

    /// Union of the bounds of every boundable child, in the container's space
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn child_bounds(&self, container: NodeId) -> SceneResult<Option<Bounds>> {
        Ok(self
            .container_ref(container)?
            .children
            .iter()
            .filter_map(|&child| self.nodes.get(child).and_then(Node::bounds))
            .reduce(|acc, bounds| acc.union(&bounds)))
    }

    /// Tear down a container's contents
    ///
    /// Cancels a pending sort, then removes every non-persistent child in
    /// reverse registry order as [`remove_child`](Self::remove_child) would.
    /// Persistent children stay registered. The container itself stays alive.
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn destroy(&mut self, container: NodeId) -> SceneResult<()> {
        let state = self.container_mut(container)?;
        if let Some(task) = state.pending_sort.take() {
            self.scheduler.cancel(task);
        }

        let doomed: Vec<NodeId> = self
            .container_ref(container)?
            .children
            .iter()
            .rev()
            .copied()
            .filter(|&child| self.nodes.get(child).is_some_and(|node| !node.has(NodeFlags::PERSISTENT)))
            .collect();
        log::debug!("destroying {container:?}: releasing {} children", doomed.len());

        for child in doomed {
            self.remove_child(container, child)?;
        }
        Ok(())
    }
}
