//! # Scene Engine
//!
//! Scene-graph containers for a real-time update/draw loop.
//!
//! ## Features
//!
//! - **Child Registry**: single-ownership child lists with silent re-parenting
//! - **Deferred Sorting**: coalesced z-order sorts that run on the next cooperative tick
//! - **Viewport Culling**: per-frame visibility gating of child updates
//! - **Nested Draw Traversal**: world-space and screen-space ("floating") children
//!   with a net-zero transform discipline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! struct Ship;
//!
//! impl SceneObject for Ship {
//!     fn extent(&self) -> Option<Vec2> {
//!         Some(Vec2::new(32.0, 32.0))
//!     }
//! }
//!
//! fn main() -> Result<(), SceneError> {
//!     let services = SceneServices::new(
//!         RectViewport::new(Vec2::zeros(), Vec2::new(800.0, 600.0)),
//!         std::rc::Rc::new(std::cell::Cell::new(false)),
//!         DiscardPool,
//!         RepaintCounter::default(),
//!     );
//!     let mut scene = Scene::new(SceneConfig::default(), services);
//!     let world = scene.root();
//!
//!     let ship = scene.spawn(Node::object(Ship).with_z(2.0));
//!     scene.add_child(world, ship)?;
//!
//!     // Once per frame:
//!     scene.tick();
//!     scene.update(1.0 / 60.0);
//!     let mut surface = TransformStack::new();
//!     scene.draw(&mut surface, &Bounds::new(Vec2::zeros(), Vec2::new(800.0, 600.0)))?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod scene;

mod error;

pub use error::{DrawError, SceneError, SceneResult};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SceneConfig},
        error::{DrawError, SceneError, SceneResult},
        foundation::math::{Bounds, Mat3, Vec2},
        scene::{
            DiscardPool, Node, NodeFlags, NodeId, NodePool, PauseState, PropertyValue,
            RecyclePool, RectViewport, Renderable, RepaintCounter, RepaintSignal, Scene,
            SceneObject, SceneServices, SortAxis, Surface, TransformStack, Updatable, Viewport,
        },
    };
}
