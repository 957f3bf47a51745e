//! Child capability contracts
//!
//! Scene objects are not a class hierarchy. Each object opts into the
//! capabilities it supports and the traversal skips whatever is missing:
//!
//! - **Updatable**: [`SceneObject::as_updatable`]
//! - **Renderable**: [`SceneObject::as_renderable`]
//! - **Boundable**: [`SceneObject::extent`]
//!
//! Containers are not implemented through this trait; they are a separate
//! node kind and compose recursively.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::DrawError;
use crate::foundation::math::{Bounds, Vec2};

use super::surface::Surface;

/// Per-frame logic of an object
pub trait Updatable {
    /// Advance the object by `dt` seconds
    ///
    /// Returns `true` if the object changed visually this frame.
    fn update(&mut self, dt: f32) -> bool;
}

/// Drawing of an object
pub trait Renderable {
    /// Draw into `surface`
    ///
    /// The current transform is the owning container's space (or screen space
    /// for floating objects); `position` is the object's origin in it.
    fn draw(&mut self, surface: &mut dyn Surface, position: Vec2, clip: &Bounds) -> Result<(), DrawError>;
}

/// A user-supplied object that can be placed in a container
///
/// Every method has a default, so an empty `impl SceneObject for T {}` is a
/// valid (inert) child.
pub trait SceneObject: 'static {
    /// Updatable capability
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        None
    }

    /// Renderable capability
    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        None
    }

    /// Boundable capability: width and height of the object's bounding box,
    /// anchored at the node's position
    fn extent(&self) -> Option<Vec2> {
        None
    }

    /// Named attribute lookup used by property queries
    fn property(&self, _name: &str) -> Option<PropertyValue> {
        None
    }

    /// Called when the object is added to a container
    fn on_activate(&mut self) {}

    /// Called when the object leaves a container (teardown hook)
    fn on_deactivate(&mut self) {}
}

/// Value of a queryable node attribute
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Text; matched case-insensitively against a pattern
    Text(String),
    /// Number; matched by equality
    Number(f64),
    /// Boolean; matched by equality
    Bool(bool),
}

impl PropertyValue {
    /// Check whether this attribute value satisfies `query`
    ///
    /// Compiles the query on every call; use [`PropertyMatcher`] to test many
    /// values against one query.
    pub fn matches(&self, query: &Self) -> bool {
        PropertyMatcher::new(query.clone()).matches(self)
    }
}

/// A property query prepared for repeated matching
///
/// Text queries are regular expressions anchored at the start of the value
/// and matched ignoring case, so `"go"` matches "Goblin" but not "Dragon",
/// and `".*gon"` matches anywhere. A query that is not a valid expression is
/// matched literally. Every other query requires exact equality.
#[derive(Debug, Clone)]
pub struct PropertyMatcher {
    query: PropertyValue,
    pattern: Option<Regex>,
}

impl PropertyMatcher {
    /// Prepare `query` for matching
    pub fn new(query: PropertyValue) -> Self {
        let pattern = match &query {
            PropertyValue::Text(text) => compile_prefix_pattern(text),
            _ => None,
        };
        Self { query, pattern }
    }

    /// The query this matcher was built from
    pub const fn query(&self) -> &PropertyValue {
        &self.query
    }

    /// Whether `value` satisfies the query
    pub fn matches(&self, value: &PropertyValue) -> bool {
        match (value, &self.query) {
            (PropertyValue::Text(text), PropertyValue::Text(literal)) => match &self.pattern {
                Some(pattern) => pattern.is_match(text),
                None => text.to_lowercase().starts_with(&literal.to_lowercase()),
            },
            _ => *value == self.query,
        }
    }
}

fn compile_prefix_pattern(text: &str) -> Option<Regex> {
    let source = match Regex::new(text) {
        Ok(_) => text.to_owned(),
        Err(err) => {
            log::debug!("property pattern {text:?} is not a valid expression, matching literally: {err}");
            regex::escape(text)
        }
    };
    match RegexBuilder::new(&format!("^(?:{source})")).case_insensitive(true).build() {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            log::warn!("property pattern {text:?} rejected: {err}");
            None
        }
    }
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
