//! Drawing surface transform state
//!
//! The draw pass only needs three operations from a backend: translate the
//! current transform, and save/restore it. Backends implement [`Surface`];
//! [`TransformStack`] is a self-contained implementation that backends can
//! embed or that tools can use headless.

use crate::foundation::math::{self, Mat3, Vec2};

/// Transform state of a drawing target
pub trait Surface {
    /// Post-multiply the current transform by a translation
    fn translate(&mut self, offset: Vec2);

    /// Push the current transform
    fn save(&mut self);

    /// Pop the most recently saved transform
    fn restore(&mut self);

    /// Current transform
    fn transform(&self) -> Mat3;
}

/// Explicit push/pop stack of 2D affine transforms
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStack {
    current: Mat3,
    saved: Vec<Mat3>,
}

impl TransformStack {
    /// Create a stack at the identity transform
    pub fn new() -> Self {
        Self::with_transform(Mat3::identity())
    }

    /// Create a stack at a given base transform
    pub fn with_transform(transform: Mat3) -> Self {
        Self { current: transform, saved: Vec::new() }
    }

    /// Translation part of the current transform
    pub fn translation(&self) -> Vec2 {
        math::translation_of(&self.current)
    }

    /// Number of saved states not yet restored
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TransformStack {
    fn translate(&mut self, offset: Vec2) {
        self.current *= math::translation(offset);
    }

    fn save(&mut self) {
        self.saved.push(self.current);
    }

    fn restore(&mut self) {
        match self.saved.pop() {
            Some(transform) => self.current = transform,
            None => log::warn!("TransformStack::restore called without a matching save"),
        }
    }

    fn transform(&self) -> Mat3 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_translate_accumulates() {
        let mut stack = TransformStack::new();
        stack.translate(Vec2::new(10.0, 5.0));
        stack.translate(Vec2::new(-2.0, 1.0));
        assert_relative_eq!(stack.translation(), Vec2::new(8.0, 6.0));
    }

    #[test]
    fn test_save_restore() {
        let mut stack = TransformStack::new();
        stack.translate(Vec2::new(1.0, 1.0));
        stack.save();
        stack.translate(Vec2::new(100.0, 100.0));
        assert_eq!(stack.depth(), 1);

        stack.restore();
        assert_eq!(stack.depth(), 0);
        assert_relative_eq!(stack.translation(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_unbalanced_restore_keeps_transform() {
        let mut stack = TransformStack::new();
        stack.translate(Vec2::new(3.0, 4.0));
        stack.restore();
        assert_relative_eq!(stack.translation(), Vec2::new(3.0, 4.0));
    }
}
