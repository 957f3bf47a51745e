//! Headless scene demo
//!
//! Builds an asteroid field with a floating HUD, then drives a fixed number of
//! frames through tick/update/draw while the camera pans across the field.
//!
//! Usage: `scene_demo [config.toml|config.ron]`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_engine::foundation::logging;
use scene_engine::prelude::*;

const FRAME_COUNT: u32 = 120;
const FRAME_TIME: f32 = 1.0 / 60.0;
const SCREEN_SIZE: (f32, f32) = (800.0, 600.0);
const FIELD_WIDTH: f32 = 4000.0;
const ASTEROID_COUNT: usize = 64;
const POOL_CAPACITY: usize = 16;
const CAMERA_SPEED: f32 = 400.0; // World units per second

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

struct Asteroid {
    velocity: Vec2,
    offset: Vec2,
    radius: f32,
}

impl Updatable for Asteroid {
    fn update(&mut self, dt: f32) -> bool {
        self.offset += self.velocity * dt;
        true
    }
}

impl Renderable for Asteroid {
    fn draw(&mut self, surface: &mut dyn Surface, position: Vec2, _clip: &Bounds) -> Result<(), DrawError> {
        let at = scene_engine::foundation::math::translation_of(&surface.transform()) + position + self.offset;
        log::trace!("asteroid r={:.0} at ({:.0}, {:.0})", self.radius, at.x, at.y);
        Ok(())
    }
}

impl SceneObject for Asteroid {
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }

    fn extent(&self) -> Option<Vec2> {
        Some(Vec2::new(self.radius * 2.0, self.radius * 2.0))
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        (name == "radius").then(|| self.radius.into())
    }
}

struct ScoreLabel {
    frames: u32,
}

impl Updatable for ScoreLabel {
    fn update(&mut self, _dt: f32) -> bool {
        self.frames += 1;
        self.frames % 60 == 0
    }
}

impl Renderable for ScoreLabel {
    fn draw(&mut self, _surface: &mut dyn Surface, _position: Vec2, _clip: &Bounds) -> Result<(), DrawError> {
        if self.frames % 60 == 0 {
            log::info!("HUD: {} frames survived", self.frames);
        }
        Ok(())
    }
}

impl SceneObject for ScoreLabel {
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }

    fn extent(&self) -> Option<Vec2> {
        Some(Vec2::new(120.0, 24.0))
    }
}

fn load_config() -> Result<SceneConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(SceneConfig::load_from_file(path)?),
        None => Ok(SceneConfig::default()),
    }
}

fn populate(scene: &mut Scene, rng: &mut StdRng) -> Result<(NodeId, NodeId), DemoError> {
    let world = scene.root();

    let field = scene.create_container(Vec2::zeros(), Some(Vec2::new(FIELD_WIDTH, SCREEN_SIZE.1)));
    if let Some(node) = scene.node_mut(field) {
        node.set_name("asteroid field");
    }
    scene.add_child(world, field)?;

    for index in 0..ASTEROID_COUNT {
        let asteroid = Asteroid {
            velocity: Vec2::new(rng.gen_range(-30.0..30.0), rng.gen_range(-30.0..30.0)),
            offset: Vec2::zeros(),
            radius: rng.gen_range(8.0..48.0),
        };
        let position = Vec2::new(rng.gen_range(0.0..FIELD_WIDTH), rng.gen_range(0.0..SCREEN_SIZE.1));
        let node = Node::object(asteroid)
            .with_position(position)
            .with_z(rng.gen_range(0.0..10.0))
            .with_flag(NodeFlags::ENTITY)
            .with_name(format!("asteroid-{index}"));
        let id = scene.spawn(node);
        scene.add_child(field, id)?;
    }

    let hud = scene.create_container(Vec2::new(16.0, 16.0), Some(Vec2::new(200.0, 40.0)));
    if let Some(node) = scene.node_mut(hud) {
        node.set_name("hud");
        node.z = 100.0;
        node.flags |= NodeFlags::FLOATING | NodeFlags::UPDATE_WHEN_PAUSED | NodeFlags::PERSISTENT;
    }
    scene.add_child(world, hud)?;
    let score = scene.spawn(Node::object(ScoreLabel { frames: 0 }).with_name("score"));
    scene.add_child(hud, score)?;

    Ok((field, hud))
}

fn main() -> Result<(), DemoError> {
    let config = load_config()?;
    logging::init(&config.logging);
    log::info!("Starting scene demo ({FRAME_COUNT} frames)");

    let screen = Vec2::new(SCREEN_SIZE.0, SCREEN_SIZE.1);
    let viewport = Rc::new(RefCell::new(RectViewport::new(Vec2::zeros(), screen)));
    let paused = Rc::new(Cell::new(false));
    let pool = Rc::new(RefCell::new(NodePool::with_capacity(POOL_CAPACITY)));
    let repaints = RepaintCounter::default();
    let services = SceneServices::new(viewport.clone(), paused.clone(), pool.clone(), repaints.clone());

    let mut scene = Scene::new(config, services);
    let mut rng = StdRng::seed_from_u64(7);
    let (field, hud) = populate(&mut scene, &mut rng)?;

    log::info!("{} asteroids queued for sorting", scene.child_count(field)?);
    let tagged = scene.get_entity_by_prop(field, "name", "asteroid-1$")?;
    log::debug!("{} asteroid named \"asteroid-1\"", tagged.len());

    let clip = Bounds::new(Vec2::zeros(), screen);
    let mut surface = TransformStack::new();
    let mut camera = Vec2::zeros();

    for frame in 0..FRAME_COUNT {
        scene.tick();

        // Pause for half a second in the middle of the run
        paused.set((50..80).contains(&frame));
        let dirty = scene.update(FRAME_TIME);

        scene.draw(&mut surface, &clip)?;
        log::debug!(
            "frame {frame}: dirty={dirty} field drew {}/{} hud drew {}",
            scene.draw_count(field)?,
            scene.child_count(field)?,
            scene.draw_count(hud)?,
        );

        if !paused.get() {
            camera.x = (camera.x + CAMERA_SPEED * FRAME_TIME).min(FIELD_WIDTH - screen.x);
            viewport.borrow_mut().move_to(camera);
        }
    }

    scene.destroy(field)?;
    log::info!(
        "Demo finished: {} repaints, {} nodes recycled, {} live nodes",
        repaints.count(),
        pool.borrow().total_released(),
        scene.len(),
    );
    Ok(())
}
