//! Immediate-mode drawing surface
//!
//! Simulation objects draw through the [`Canvas`] trait. The window backend
//! records a frame into a [`DrawList`] and hands it to the GPU renderer.

use glam::Vec2;

/// Straight-alpha RGBA colour, components in `0.0..=1.0` (sRGB encoded)
pub type Color = [f32; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];

/// The drawing primitives the simulation needs
pub trait Canvas {
    /// Fill the whole surface, discarding everything drawn so far
    fn clear(&mut self, color: Color);
    fn fill_circle(&mut self, center: Vec2, diameter: f32, color: Color);
    /// Outline of a circle, one stroke width wide
    fn stroke_circle(&mut self, center: Vec2, diameter: f32, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Disc,
    Ring,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Recorded frame: a background colour and circles in paint order
#[derive(Debug, Clone)]
pub struct DrawList {
    pub background: Color,
    pub shapes: Vec<Shape>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            background: BLACK,
            shapes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, color: Color) {
        self.background = color;
        self.shapes.clear();
    }

    fn fill_circle(&mut self, center: Vec2, diameter: f32, color: Color) {
        self.shapes.push(Shape {
            kind: ShapeKind::Disc,
            center,
            radius: diameter * 0.5,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, diameter: f32, color: Color) {
        self.shapes.push(Shape {
            kind: ShapeKind::Ring,
            center,
            radius: diameter * 0.5,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_discards_recorded_shapes() {
        let mut list = DrawList::new();
        list.fill_circle(Vec2::ZERO, 4.0, BLACK);
        list.stroke_circle(Vec2::ONE, 8.0, BLACK);
        assert_eq!(list.len(), 2);

        let grey = [0.04, 0.04, 0.04, 1.0];
        list.clear(grey);
        assert!(list.is_empty());
        assert_eq!(list.background, grey);
    }

    #[test]
    fn diameter_is_stored_as_radius() {
        let mut list = DrawList::new();
        list.stroke_circle(Vec2::new(3.0, 4.0), 10.0, BLACK);
        let shape = list.shapes[0];
        assert_eq!(shape.kind, ShapeKind::Ring);
        assert_eq!(shape.radius, 5.0);
        assert_eq!(shape.center, Vec2::new(3.0, 4.0));
    }
}
