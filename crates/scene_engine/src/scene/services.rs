//! External collaborators of the scene
//!
//! The scene never reaches for globals. The viewport, the pause flag, the
//! recycling pool and the repaint signal are injected through
//! [`SceneServices`] so that a scene can be driven and inspected in isolation.
//!
//! Every trait has a blanket implementation for `Rc<RefCell<T>>`, which lets
//! the caller keep a handle to a collaborator it also hands to the scene.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::foundation::math::{Bounds, Vec2};

use super::node::Node;

/// Visible region of the world
pub trait Viewport {
    /// Whether world-space `bounds` currently intersect the visible region
    ///
    /// `floating` bounds are already in screen space.
    fn is_visible(&self, bounds: &Bounds, floating: bool) -> bool;

    /// Screen-space origin applied to floating children
    fn screen_origin(&self) -> Vec2;

    /// Size given to containers created without an explicit size
    fn size(&self) -> Vec2;
}

/// Global paused/running state
pub trait PauseState {
    /// Whether the game is paused
    fn is_paused(&self) -> bool;
}

/// Receiver of nodes released by container removal and teardown
pub trait RecyclePool {
    /// Take ownership of a released node
    fn push(&mut self, node: Node);
}

/// Frame driver notification that visual order changed
pub trait RepaintSignal {
    /// Request a repaint
    fn request_repaint(&mut self);
}

/// Collaborators injected into a [`Scene`](super::Scene)
pub struct SceneServices {
    /// Visibility test and screen origin
    pub viewport: Box<dyn Viewport>,
    /// Pause state
    pub pause: Box<dyn PauseState>,
    /// Recycling pool
    pub pool: Box<dyn RecyclePool>,
    /// Repaint trigger
    pub repaint: Box<dyn RepaintSignal>,
}

impl SceneServices {
    /// Bundle the four collaborators
    pub fn new(
        viewport: impl Viewport + 'static,
        pause: impl PauseState + 'static,
        pool: impl RecyclePool + 'static,
        repaint: impl RepaintSignal + 'static,
    ) -> Self {
        Self {
            viewport: Box::new(viewport),
            pause: Box::new(pause),
            pool: Box::new(pool),
            repaint: Box::new(repaint),
        }
    }
}

impl std::fmt::Debug for SceneServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneServices")
            .field("screen_origin", &self.viewport.screen_origin())
            .field("paused", &self.pause.is_paused())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Provided implementations
// ---------------------------------------------------------------------------

/// Axis-aligned camera rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectViewport {
    /// World-space region currently visible
    pub world: Bounds,
    /// Screen-space origin of the view
    pub screen_origin: Vec2,
}

impl RectViewport {
    /// Viewport looking at `size` world units starting at `position`
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { world: Bounds::new(position, size), screen_origin: position }
    }

    /// Move the camera
    pub fn move_to(&mut self, position: Vec2) {
        self.world.position = position;
        self.screen_origin = position;
    }
}

impl Viewport for RectViewport {
    fn is_visible(&self, bounds: &Bounds, floating: bool) -> bool {
        if floating {
            Bounds::new(Vec2::zeros(), self.world.size).intersects(bounds)
        } else {
            self.world.intersects(bounds)
        }
    }

    fn screen_origin(&self) -> Vec2 {
        self.screen_origin
    }

    fn size(&self) -> Vec2 {
        self.world.size
    }
}

impl PauseState for bool {
    fn is_paused(&self) -> bool {
        *self
    }
}

impl PauseState for Rc<Cell<bool>> {
    fn is_paused(&self) -> bool {
        self.get()
    }
}

/// Pool that drops everything it receives
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardPool;

impl RecyclePool for DiscardPool {
    fn push(&mut self, node: Node) {
        log::trace!("discarding released node {:?}", node.name());
    }
}

/// Bounded pool keeping released nodes for reuse
#[derive(Debug, Default)]
pub struct NodePool {
    released: Vec<Node>,
    capacity: Option<usize>,
    total_released: u64,
}

impl NodePool {
    /// Unbounded pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool keeping at most `capacity` nodes; extra nodes are dropped
    pub fn with_capacity(capacity: usize) -> Self {
        Self { released: Vec::with_capacity(capacity), capacity: Some(capacity), total_released: 0 }
    }

    /// Number of nodes currently held
    pub fn len(&self) -> usize {
        self.released.len()
    }

    /// Whether the pool holds no nodes
    pub fn is_empty(&self) -> bool {
        self.released.is_empty()
    }

    /// Number of nodes ever pushed
    pub const fn total_released(&self) -> u64 {
        self.total_released
    }

    /// Nodes currently held, oldest first
    pub fn nodes(&self) -> &[Node] {
        &self.released
    }

    /// Take back the most recently released node matching `predicate`
    pub fn take_where(&mut self, predicate: impl Fn(&Node) -> bool) -> Option<Node> {
        let index = self.released.iter().rposition(predicate)?;
        Some(self.released.remove(index))
    }
}

impl RecyclePool for NodePool {
    fn push(&mut self, mut node: Node) {
        self.total_released += 1;
        if self.capacity.is_some_and(|capacity| self.released.len() >= capacity) {
            log::trace!("node pool full, dropping {:?}", node.name());
            return;
        }
        node.in_viewport = false;
        self.released.push(node);
    }
}

/// Repaint signal that counts requests
#[derive(Debug, Clone, Default)]
pub struct RepaintCounter {
    count: Rc<Cell<u64>>,
}

impl RepaintCounter {
    /// Number of repaints requested so far (shared across clones)
    pub fn count(&self) -> u64 {
        self.count.get()
    }
}

impl RepaintSignal for RepaintCounter {
    fn request_repaint(&mut self) {
        self.count.set(self.count.get() + 1);
    }
}

impl<T: Viewport> Viewport for Rc<RefCell<T>> {
    fn is_visible(&self, bounds: &Bounds, floating: bool) -> bool {
        self.borrow().is_visible(bounds, floating)
    }

    fn screen_origin(&self) -> Vec2 {
        self.borrow().screen_origin()
    }

    fn size(&self) -> Vec2 {
        self.borrow().size()
    }
}

impl<T: RecyclePool> RecyclePool for Rc<RefCell<T>> {
    fn push(&mut self, node: Node) {
        self.borrow_mut().push(node);
    }
}

impl<T: RepaintSignal> RepaintSignal for Rc<RefCell<T>> {
    fn request_repaint(&mut self) {
        self.borrow_mut().request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_viewport_visibility() {
        let viewport = RectViewport::new(Vec2::new(100.0, 0.0), Vec2::new(50.0, 50.0));
        let inside = Bounds::new(Vec2::new(120.0, 10.0), Vec2::new(5.0, 5.0));
        let outside = Bounds::new(Vec2::new(0.0, 10.0), Vec2::new(5.0, 5.0));

        assert!(viewport.is_visible(&inside, false));
        assert!(!viewport.is_visible(&outside, false));
        // Screen-space test ignores the camera position
        assert!(viewport.is_visible(&outside, true));
    }

    #[test]
    fn test_node_pool_capacity() {
        let mut pool = NodePool::with_capacity(1);
        pool.push(Node::empty().with_name("a"));
        pool.push(Node::empty().with_name("b"));

        assert_eq!(pool.len(), 1);
        assert_eq!(pool.total_released(), 2);
        assert_eq!(pool.nodes()[0].name(), Some("a"));
    }

    #[test]
    fn test_node_pool_take_where() {
        let mut pool = NodePool::new();
        pool.push(Node::empty().with_name("bullet"));
        pool.push(Node::empty().with_name("rock"));

        let bullet = pool.take_where(|n| n.name() == Some("bullet"));
        assert!(bullet.is_some());
        assert_eq!(pool.len(), 1);
        assert!(pool.take_where(|n| n.name() == Some("bullet")).is_none());
    }

    #[test]
    fn test_repaint_counter_shared() {
        let counter = RepaintCounter::default();
        let mut handle = counter.clone();
        handle.request_repaint();
        handle.request_repaint();
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn test_shared_pause_flag() {
        let flag = Rc::new(Cell::new(false));
        let services = SceneServices::new(
            RectViewport::new(Vec2::zeros(), Vec2::new(10.0, 10.0)),
            flag.clone(),
            DiscardPool,
            RepaintCounter::default(),
        );
        assert!(!services.pause.is_paused());
        flag.set(true);
        assert!(services.pause.is_paused());
    }
}
