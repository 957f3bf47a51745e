//! Per-frame update and draw passes
//!
//! The update pass walks children in reverse registry order, recomputes each
//! child's `in_viewport` flag and updates what is visible (or flagged to always
//! update). The draw pass walks in registry order and draws what the update
//! pass marked visible. Both recurse into child containers.
//!
//! Surface discipline: a container translates by its own position before its
//! children and undoes it afterwards, and floating children are bracketed by
//! save/restore. The surface transform is unchanged by a draw call, whether or
//! not a child fails.

use crate::error::{SceneError, SceneResult};
use crate::foundation::collections::NodeId;
use crate::foundation::math::{Bounds, Vec2};

use super::node::{Node, NodeFlags, NodeKind};
use super::registry::Scene;
use super::surface::Surface;

impl Scene {
    /// Run the update pass over the whole scene
    ///
    /// Returns `true` if any updated child reported a visual change.
    pub fn update(&mut self, dt: f32) -> bool {
        let paused = self.services.pause.is_paused();
        let origin = self.nodes.get(self.root).map_or_else(Vec2::zeros, |root| root.position);
        self.update_children(self.root, origin, false, dt, paused)
    }

    /// `origin` is the container's position in world space, or in screen
    /// space when `screen` is set.
    fn update_children(&mut self, container: NodeId, origin: Vec2, screen: bool, dt: f32, paused: bool) -> bool {
        let mut dirty = false;
        let len = self.nodes.get(container).and_then(Node::as_container).map_or(0, |state| state.children.len());

        for index in (0..len).rev() {
            let Some(child) = self.child_at(container, index) else {
                continue;
            };
            let Some(node) = self.nodes.get_mut(child) else {
                continue;
            };
            if paused && !node.has(NodeFlags::UPDATE_WHEN_PAUSED) {
                continue;
            }

            let floating = node.has(NodeFlags::FLOATING);
            let viewport = &self.services.viewport;
            node.in_viewport = node.has(NodeFlags::VISIBLE)
                && (floating
                    || node
                        .bounds()
                        .is_some_and(|bounds| viewport.is_visible(&bounds.translated(origin), screen)));
            if !node.in_viewport && !node.has(NodeFlags::ALWAYS_UPDATE) {
                continue;
            }

            if let NodeKind::Object(object) = &mut node.kind {
                if let Some(updatable) = object.as_updatable() {
                    dirty |= updatable.update(dt);
                }
                continue;
            }

            let (child_origin, child_screen) =
                if floating { (node.position, true) } else { (origin + node.position, screen) };
            dirty |= self.update_children(child, child_origin, child_screen, dt, paused);
        }
        dirty
    }

    /// Run the draw pass over the whole scene
    ///
    /// # Errors
    /// The first failing child draw; traversal stops there.
    pub fn draw(&mut self, surface: &mut dyn Surface, clip: &Bounds) -> SceneResult<()> {
        self.draw_container(self.root, surface, clip)
    }

    /// Draw one container and its visible children
    ///
    /// # Errors
    /// `UnknownNode`/`NotAContainer` for a bad handle, otherwise the first
    /// failing child draw.
    pub fn draw_container(&mut self, container: NodeId, surface: &mut dyn Surface, clip: &Bounds) -> SceneResult<()> {
        let position = self.node_ref(container)?.position;
        self.container_mut(container)?.draw_count = 0;

        surface.translate(position);
        let result = self.draw_children(container, position, surface, clip);
        surface.translate(-position);
        result
    }

    fn draw_children(
        &mut self,
        container: NodeId,
        position: Vec2,
        surface: &mut dyn Surface,
        clip: &Bounds,
    ) -> SceneResult<()> {
        let screen_origin = self.services.viewport.screen_origin();
        let len = self.container_ref(container)?.children.len();

        for index in 0..len {
            let Some(child) = self.child_at(container, index) else {
                continue;
            };
            let Some(node) = self.nodes.get(child) else {
                continue;
            };
            if !node.in_viewport || !node.has(NodeFlags::RENDERABLE) {
                continue;
            }

            let floating = node.has(NodeFlags::FLOATING);
            if floating {
                surface.save();
                surface.translate(screen_origin - position);
            }
            let drawn = self.draw_child(child, surface, clip);
            if floating {
                surface.restore();
            }

            if drawn? {
                self.container_mut(container)?.draw_count += 1;
            }
        }
        Ok(())
    }

    /// Returns whether anything was drawn
    fn draw_child(&mut self, child: NodeId, surface: &mut dyn Surface, clip: &Bounds) -> SceneResult<bool> {
        let node = self.nodes.get_mut(child).ok_or(SceneError::UnknownNode(child))?;
        if node.is_container() {
            self.draw_container(child, surface, clip)?;
            return Ok(true);
        }

        let position = node.position;
        let Some(renderable) = node.as_object_mut().and_then(|object| object.as_renderable()) else {
            return Ok(false);
        };
        renderable.draw(surface, position, clip)?;
        Ok(true)
    }

    /// Children drawn by the last draw of `container`
    ///
    /// # Errors
    /// When `container` is not a live container.
    pub fn draw_count(&self, container: NodeId) -> SceneResult<usize> {
        Ok(self.container_ref(container)?.draw_count)
    }

    fn child_at(&self, container: NodeId, index: usize) -> Option<NodeId> {
        self.nodes.get(container)?.as_container()?.children.get(index).copied()
    }
}
