//! Scene container for committed shapes.

use super::shape::Shape;
use serde::Serialize;

/// Ordered, append-only collection of committed shapes.
///
/// Insertion order is paint order (first = bottom layer, last = top layer).
/// Shapes are never edited in place; the only way to remove them is
/// [`Scene::clear`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Creates a new empty scene.
    pub const fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Appends a committed shape on top of the existing ones.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Removes all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn last(&self) -> Option<&Shape> {
        self.shapes.last()
    }
}
