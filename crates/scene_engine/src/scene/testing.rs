//! Shared fixtures for scene tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::SceneConfig;
use crate::error::DrawError;
use crate::foundation::math::{Bounds, Vec2};

use super::object::{PropertyValue, Renderable, SceneObject, Updatable};
use super::registry::Scene;
use super::services::{NodePool, RectViewport, RepaintCounter, SceneServices};
use super::surface::Surface;

/// Caller-side handles on the collaborators given to a fixture scene
pub struct Handles {
    pub pool: Rc<RefCell<NodePool>>,
    pub paused: Rc<Cell<bool>>,
    pub repaint: RepaintCounter,
    pub viewport: Rc<RefCell<RectViewport>>,
}

/// Scene over an 800x600 viewport at the origin
pub fn fixture() -> (Scene, Handles) {
    fixture_with(SceneConfig::default())
}

pub fn fixture_with(config: SceneConfig) -> (Scene, Handles) {
    let handles = Handles {
        pool: Rc::new(RefCell::new(NodePool::new())),
        paused: Rc::new(Cell::new(false)),
        repaint: RepaintCounter::default(),
        viewport: Rc::new(RefCell::new(RectViewport::new(Vec2::zeros(), Vec2::new(800.0, 600.0)))),
    };
    let services = SceneServices::new(
        handles.viewport.clone(),
        handles.paused.clone(),
        handles.pool.clone(),
        handles.repaint.clone(),
    );
    (Scene::new(config, services), handles)
}

/// Everything a [`Probe`] observed
#[derive(Debug, Default)]
pub struct ProbeLog {
    pub activations: usize,
    pub deactivations: usize,
    pub updates: usize,
    /// Surface translation at each draw
    pub draws: Vec<Vec2>,
    /// `position` argument of each draw
    pub positions: Vec<Vec2>,
}

/// Recording scene object with every capability
pub struct Probe {
    name: String,
    log: Rc<RefCell<ProbeLog>>,
    extent: Option<Vec2>,
    dirty: bool,
    fail_draw: bool,
    properties: Vec<(String, PropertyValue)>,
}

impl Probe {
    pub fn new(name: &str) -> (Self, Rc<RefCell<ProbeLog>>) {
        let log = Rc::new(RefCell::new(ProbeLog::default()));
        let probe = Self {
            name: name.to_owned(),
            log: log.clone(),
            extent: Some(Vec2::new(10.0, 10.0)),
            dirty: false,
            fail_draw: false,
            properties: Vec::new(),
        };
        (probe, log)
    }

    pub fn with_extent(mut self, extent: Option<Vec2>) -> Self {
        self.extent = extent;
        self
    }

    pub fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_draw = true;
        self
    }

    pub fn with_property(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.push((name.to_owned(), value.into()));
        self
    }
}

impl Updatable for Probe {
    fn update(&mut self, _dt: f32) -> bool {
        self.log.borrow_mut().updates += 1;
        self.dirty
    }
}

impl Renderable for Probe {
    fn draw(&mut self, surface: &mut dyn Surface, position: Vec2, _clip: &Bounds) -> Result<(), DrawError> {
        let mut log = self.log.borrow_mut();
        log.draws.push(crate::foundation::math::translation_of(&surface.transform()));
        log.positions.push(position);
        if self.fail_draw {
            return Err(DrawError::new(format!("{} failed", self.name)));
        }
        Ok(())
    }
}

impl SceneObject for Probe {
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }

    fn extent(&self) -> Option<Vec2> {
        self.extent
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        self.properties.iter().find(|(key, _)| key == name).map(|(_, value)| value.clone())
    }

    fn on_activate(&mut self) {
        self.log.borrow_mut().activations += 1;
    }

    fn on_deactivate(&mut self) {
        self.log.borrow_mut().deactivations += 1;
    }
}
