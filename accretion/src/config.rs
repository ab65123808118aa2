//! Fixed simulation constants
//!
//! World units are pixels and one frame is one unit of time.

use std::ops::Range;

/// Gravitational constant (normalized)
pub const G: f32 = 1.0;

/// Absorption radius per unit of black hole mass
pub const ABSORPTION_SCALE: f32 = 0.01;

/// Distances below this are treated as this when computing the pull.
///
/// Never larger than the smallest reachable absorption radius
/// (`MIN_BLACK_HOLE_MASS * ABSORPTION_SCALE`), so through `BlackHole::pull` a
/// star is always swallowed before the floor could apply. The floor only
/// matters for direct `BlackHole::gravitational_force` calls.
pub const MIN_PULL_DISTANCE: f32 = 1.0;

/// Smallest black hole mass reachable from the mass controls
pub const MIN_BLACK_HOLE_MASS: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub gravitational_constant: f32,
    pub black_hole_mass: f32,
    pub star_count: usize,
    pub star_mass: Range<f32>,
    pub star_speed: Range<f32>,
    /// Orbit radii for the orbiting disk layout, measured from the black hole
    pub disk_radius: Range<f32>,
    /// Simulation frames per second of wall time
    pub frame_rate: f32,
}

impl SimulationConfig {
    pub fn frame_interval(&self) -> f32 {
        1.0 / self.frame_rate
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            black_hole_mass: 5000.0,
            star_count: 300,
            star_mass: 1.0..5.0,
            star_speed: 0.5..2.0,
            disk_radius: 80.0..320.0,
            frame_rate: 60.0,
        }
    }
}
