//! Scene graph containers
//!
//! A [`Scene`] owns every node in an arena. Containers hold ordered lists of
//! child handles; the frame driver calls [`Scene::tick`], [`Scene::update`]
//! and [`Scene::draw`] once per frame.

pub mod node;
pub mod object;
pub mod scheduler;
pub mod services;
pub mod sort;
pub mod surface;

mod ordering;
mod query;
mod registry;
mod traversal;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use crate::foundation::collections::NodeId;
pub use node::{ContainerState, Node, NodeFlags, NodeKind};
pub use object::{PropertyMatcher, PropertyValue, Renderable, SceneObject, Updatable};
pub use registry::Scene;
pub use scheduler::{DeferredScheduler, DeferredSort};
pub use services::{
    DiscardPool, NodePool, PauseState, RecyclePool, RectViewport, RepaintCounter, RepaintSignal,
    SceneServices, Viewport,
};
pub use sort::SortAxis;
pub use surface::{Surface, TransformStack};
