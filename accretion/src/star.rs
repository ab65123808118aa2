//! Stars: point masses drifting toward the black hole

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::canvas::{Canvas, Color};
use crate::config::SimulationConfig;

/// Warm white, `rgb(255, 255, 200)`
pub const STAR_COLOR: Color = [1.0, 1.0, 200.0 / 255.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub mass: f32,
    pub dead: bool,
}

impl Star {
    pub fn new(position: Vec2, velocity: Vec2, mass: f32) -> Self {
        debug_assert!(mass > 0.0, "star mass must be positive");
        Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
            mass,
            dead: false,
        }
    }

    /// A star placed uniformly in `[0, bounds.x) x [0, bounds.y)`, drifting in a
    /// random direction.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, config: &SimulationConfig) -> Self {
        let position = Vec2::new(
            rng.gen::<f32>() * bounds.x,
            rng.gen::<f32>() * bounds.y,
        );
        Self::random_at(rng, position, config)
    }

    /// A star at `position` with a random mass and drift
    pub fn random_at<R: Rng + ?Sized>(rng: &mut R, position: Vec2, config: &SimulationConfig) -> Self {
        let mass = rng.gen_range(config.star_mass.clone());

        let angle: f32 = rng.gen::<f32>() * TAU;
        let speed = rng.gen_range(config.star_speed.clone());
        let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

        Self::new(position, velocity, mass)
    }

    /// A star on a circular orbit around `center`.
    ///
    /// The orbit radius is drawn from `config.disk_radius` and the velocity is
    /// tangential (counter-clockwise) with magnitude `sqrt(G M / r)`.
    pub fn orbiting<R: Rng + ?Sized>(
        rng: &mut R,
        center: Vec2,
        central_mass: f32,
        config: &SimulationConfig,
    ) -> Self {
        let angle: f32 = rng.gen::<f32>() * TAU;
        let radius = rng.gen_range(config.disk_radius.clone());
        let (sin, cos) = angle.sin_cos();

        let position = center + Vec2::new(cos, sin) * radius;
        let speed = (config.gravitational_constant * central_mass / radius).sqrt();
        let velocity = Vec2::new(-sin, cos) * speed;
        let mass = rng.gen_range(config.star_mass.clone());

        Self::new(position, velocity, mass)
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force / self.mass;
    }

    /// Advance one frame (semi-implicit Euler, unit time step)
    pub fn update(&mut self) {
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
    }

    pub fn render(&self, canvas: &mut impl Canvas) {
        canvas.fill_circle(self.position, self.mass * 2.0, STAR_COLOR);
    }
}
