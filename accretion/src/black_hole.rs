//! The black hole: a fixed attractor that swallows stars
//!
//! Gravity is plain Newtonian inverse-square. The absorption radius is a
//! cosmetic stand-in for the Schwarzschild radius, scaled linearly with mass.

use glam::Vec2;

use crate::canvas::{Canvas, Color, BLACK};
use crate::config::{ABSORPTION_SCALE, G, MIN_PULL_DISTANCE};
use crate::star::Star;

/// Pink halo drawn around the horizon, `rgba(255, 100, 150, 150)`
pub const GLOW_COLOR: Color = [1.0, 100.0 / 255.0, 150.0 / 255.0, 150.0 / 255.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackHole {
    pub position: Vec2,
    pub mass: f32,
    pub absorption_radius: f32,
    pub gravitational_constant: f32,
}

impl BlackHole {
    pub fn new(position: Vec2, mass: f32) -> Self {
        debug_assert!(mass > 0.0, "black hole mass must be positive");
        Self {
            position,
            mass,
            absorption_radius: mass * ABSORPTION_SCALE,
            gravitational_constant: G,
        }
    }

    pub fn with_gravitational_constant(mut self, g: f32) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Same black hole with a different mass; the absorption radius follows.
    pub fn with_mass(&self, mass: f32) -> Self {
        Self::new(self.position, mass).with_gravitational_constant(self.gravitational_constant)
    }

    /// Check if a point lies inside the absorption radius
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance(point) < self.absorption_radius
    }

    /// Force this black hole exerts on `star`, pointing from the star toward
    /// the hole. Distances below [`MIN_PULL_DISTANCE`] are clamped, and a star
    /// sitting exactly on the centre feels no force at all.
    pub fn gravitational_force(&self, star: &Star) -> Vec2 {
        let offset = self.position - star.position;
        let r = offset.length().max(MIN_PULL_DISTANCE);
        let strength = self.gravitational_constant * self.mass * star.mass / (r * r);
        offset.normalize_or_zero() * strength
    }

    /// Absorb `star` if it has crossed the absorption radius, otherwise pull
    /// it toward the hole. Returns `true` if the star is dead afterwards.
    ///
    /// Absorption is checked before any force is applied, so a swallowed star
    /// never receives the near-singular pull from inside the radius.
    pub fn pull(&self, star: &mut Star) -> bool {
        if star.dead {
            return true;
        }

        if self.contains(star.position) {
            star.dead = true;
            return true;
        }

        star.apply_force(self.gravitational_force(star));
        false
    }

    pub fn render(&self, canvas: &mut impl Canvas) {
        canvas.fill_circle(self.position, self.absorption_radius * 2.0, BLACK);
        canvas.stroke_circle(self.position, self.absorption_radius * 4.0, GLOW_COLOR);
    }
}
