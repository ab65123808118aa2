//! Simulation state and the per-frame loop

use glam::Vec2;
use rand::Rng;

use crate::black_hole::BlackHole;
use crate::canvas::{Canvas, BLACK};
use crate::config::{SimulationConfig, MIN_BLACK_HOLE_MASS};
use crate::star::Star;

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub live: usize,
    pub absorbed: usize,
}

/// How a fresh field of stars is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Uniform over the whole field, drifting in random directions
    #[default]
    Scatter,
    /// A ring of stars on circular orbits around the black hole
    OrbitingDisk,
}

impl Layout {
    pub fn name(self) -> &'static str {
        match self {
            Layout::Scatter => "Scatter",
            Layout::OrbitingDisk => "Orbiting disk",
        }
    }
}

/// Owns the black hole and every live star
pub struct Simulation {
    pub config: SimulationConfig,
    /// Size of the field the stars are scattered over
    pub bounds: Vec2,
    pub layout: Layout,
    pub black_hole: BlackHole,
    pub stars: Vec<Star>,
    pub frames: u64,
    pub absorbed_total: usize,
}

impl Simulation {
    /// Black hole at the centre of `bounds`, stars scattered across it
    pub fn new<R: Rng + ?Sized>(config: SimulationConfig, bounds: Vec2, rng: &mut R) -> Self {
        let mut simulation = Self::with_stars(config, bounds, Vec::new());
        simulation.stars = simulation.spawn_stars(rng);
        simulation
    }

    pub fn with_stars(config: SimulationConfig, bounds: Vec2, stars: Vec<Star>) -> Self {
        let black_hole = BlackHole::new(bounds * 0.5, config.black_hole_mass)
            .with_gravitational_constant(config.gravitational_constant);

        Self {
            config,
            bounds,
            layout: Layout::default(),
            black_hole,
            stars,
            frames: 0,
            absorbed_total: 0,
        }
    }

    fn spawn_stars<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Star> {
        let config = &self.config;
        match self.layout {
            Layout::Scatter => (0..config.star_count)
                .map(|_| Star::random(&mut *rng, self.bounds, config))
                .collect(),
            Layout::OrbitingDisk => (0..config.star_count)
                .map(|_| {
                    Star::orbiting(
                        &mut *rng,
                        self.black_hole.position,
                        self.black_hole.mass,
                        config,
                    )
                })
                .collect(),
        }
    }

    /// Throw away the current field and lay out a fresh one
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.stars = self.spawn_stars(rng);
        self.frames = 0;
        self.absorbed_total = 0;
        log::info!(
            "{} field reset with {} stars",
            self.layout.name(),
            self.stars.len()
        );
    }

    /// Switch to `layout` and reset the field with it
    pub fn load_layout<R: Rng + ?Sized>(&mut self, layout: Layout, rng: &mut R) {
        self.layout = layout;
        self.reset(rng);
    }

    /// Drop one more star at `position` with a random mass and drift
    pub fn add_star<R: Rng + ?Sized>(&mut self, position: Vec2, rng: &mut R) {
        let star = Star::random_at(rng, position, &self.config);
        log::debug!(
            "star of mass {:.1} added at ({:.0}, {:.0})",
            star.mass,
            position.x,
            position.y
        );
        self.stars.push(star);
    }

    /// Replace the black hole with one of a different mass, keeping its position.
    pub fn set_black_hole_mass(&mut self, mass: f32) {
        let mass = mass.max(MIN_BLACK_HOLE_MASS);
        self.black_hole = self.black_hole.with_mass(mass);
        log::info!(
            "black hole mass {:.0}, absorption radius {:.1}",
            self.black_hole.mass,
            self.black_hole.absorption_radius
        );
    }

    /// Draw the current state without advancing it
    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.clear(BLACK);
        self.black_hole.render(canvas);
        for star in self.stars.iter().filter(|star| !star.dead) {
            star.render(canvas);
        }
    }

    /// Run one frame: pull, integrate and draw every live star, then drop
    /// the ones that were swallowed.
    pub fn frame(&mut self, canvas: &mut impl Canvas) -> FrameStats {
        canvas.clear(BLACK);
        self.black_hole.render(canvas);

        let black_hole = self.black_hole;
        for star in &mut self.stars {
            if black_hole.pull(star) {
                continue;
            }
            star.update();
            star.render(canvas);
        }

        let before = self.stars.len();
        self.stars = std::mem::take(&mut self.stars)
            .into_iter()
            .filter(|star| !star.dead)
            .collect();
        let absorbed = before - self.stars.len();

        self.frames += 1;
        self.absorbed_total += absorbed;
        if absorbed > 0 {
            log::debug!(
                "frame {}: {} absorbed, {} left",
                self.frames,
                absorbed,
                self.stars.len()
            );
        }

        FrameStats {
            live: self.stars.len(),
            absorbed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawList, ShapeKind};
    use rand::{rngs::StdRng, SeedableRng};

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn simulation_with(stars: Vec<Star>) -> Simulation {
        Simulation::with_stars(SimulationConfig::default(), BOUNDS, stars)
    }

    #[test]
    fn initial_field_is_centred_and_populated() {
        let mut rng = StdRng::seed_from_u64(42);
        let sim = Simulation::new(SimulationConfig::default(), BOUNDS, &mut rng);

        assert_eq!(sim.black_hole.position, Vec2::new(400.0, 300.0));
        assert_eq!(sim.black_hole.mass, 5000.0);
        assert_eq!(sim.stars.len(), 300);
        assert!(sim.stars.iter().all(|s| s.mass > 0.0 && !s.dead));
    }

    #[test]
    fn absorbed_star_is_gone_after_the_frame() {
        let center = BOUNDS * 0.5;
        let near = Star::new(center + Vec2::new(25.0, 0.0), Vec2::ZERO, 2.0);
        let far = Star::new(center + Vec2::new(0.0, 250.0), Vec2::ZERO, 2.0);
        let mut sim = simulation_with(vec![near, far]);

        let mut list = DrawList::new();
        let stats = sim.frame(&mut list);

        assert_eq!(stats, FrameStats { live: 1, absorbed: 1 });
        assert_eq!(sim.stars.len(), 1);
        assert_eq!(sim.absorbed_total, 1);
        assert!(sim.stars[0].position.y > center.y);
        // hole disc + glow + the one surviving star
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn distant_star_falls_inward() {
        let center = BOUNDS * 0.5;
        let start = center + Vec2::new(1000.0, 0.0);
        let mut sim = simulation_with(vec![Star::new(start, Vec2::ZERO, 3.0)]);

        sim.frame(&mut DrawList::new());

        let star = sim.stars[0];
        // a = G M / r^2, applied as one unit-time kick
        let expected = 5000.0 / 1_000_000.0;
        assert!((star.velocity.x + expected).abs() < 1e-7);
        assert!((star.position.x - (start.x - expected)).abs() < 1e-3);
        assert_eq!(star.acceleration, Vec2::ZERO);
    }

    #[test]
    fn survivors_keep_their_order() {
        let center = BOUNDS * 0.5;
        let stars = vec![
            Star::new(center + Vec2::new(-300.0, 0.0), Vec2::ZERO, 1.0),
            Star::new(center + Vec2::new(10.0, 0.0), Vec2::ZERO, 2.0),
            Star::new(center + Vec2::new(300.0, 0.0), Vec2::ZERO, 3.0),
        ];
        let mut sim = simulation_with(stars);
        sim.frame(&mut DrawList::new());

        let masses: Vec<f32> = sim.stars.iter().map(|s| s.mass).collect();
        assert_eq!(masses, vec![1.0, 3.0]);
    }

    #[test]
    fn frame_clears_canvas_before_drawing() {
        let mut sim = simulation_with(Vec::new());
        let mut list = DrawList::new();
        list.fill_circle(Vec2::ZERO, 100.0, [1.0; 4]);

        sim.frame(&mut list);

        assert_eq!(list.background, BLACK);
        assert_eq!(list.len(), 2);
        assert_eq!(list.shapes[0].kind, ShapeKind::Disc);
        assert_eq!(list.shapes[1].kind, ShapeKind::Ring);
    }

    #[test]
    fn long_runs_stay_finite() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sim = Simulation::new(SimulationConfig::default(), BOUNDS, &mut rng);
        let mut list = DrawList::new();

        for _ in 0..2000 {
            sim.frame(&mut list);
        }

        assert_eq!(sim.frames, 2000);
        assert_eq!(sim.stars.len() + sim.absorbed_total, 300);
        for star in &sim.stars {
            assert!(star.position.is_finite());
            assert!(star.velocity.is_finite());
            assert!(!star.dead);
        }
    }

    #[test]
    fn mass_change_recomputes_radius_and_is_floored() {
        let mut sim = simulation_with(Vec::new());
        sim.set_black_hole_mass(10_000.0);
        assert!((sim.black_hole.absorption_radius - 100.0).abs() < 1e-3);

        sim.set_black_hole_mass(-5.0);
        assert_eq!(sim.black_hole.mass, MIN_BLACK_HOLE_MASS);
        assert_eq!(sim.black_hole.position, BOUNDS * 0.5);
    }

    #[test]
    fn reset_restores_population_and_counters() {
        let mut rng = StdRng::seed_from_u64(9);
        let center = BOUNDS * 0.5;
        let mut sim = simulation_with(vec![Star::new(center, Vec2::ZERO, 1.0)]);
        sim.frame(&mut DrawList::new());
        assert_eq!(sim.absorbed_total, 1);

        sim.reset(&mut rng);
        assert_eq!(sim.stars.len(), 300);
        assert_eq!(sim.frames, 0);
        assert_eq!(sim.absorbed_total, 0);
    }

    #[test]
    fn added_star_is_pulled_then_swallowed() {
        let mut rng = StdRng::seed_from_u64(21);
        let center = BOUNDS * 0.5;
        let mut sim = simulation_with(Vec::new());

        sim.add_star(center + Vec2::new(200.0, 0.0), &mut rng);
        assert_eq!(sim.stars.len(), 1);
        let start = sim.stars[0];
        assert_eq!(start.position, center + Vec2::new(200.0, 0.0));

        sim.frame(&mut DrawList::new());
        // one unit-time kick of G M / r^2 toward the hole
        let kick = sim.stars[0].velocity - start.velocity;
        assert!((kick - Vec2::new(-5000.0 / 40_000.0, 0.0)).length() < 1e-5);

        sim.add_star(center + Vec2::new(10.0, 0.0), &mut rng);
        let absorbed_before = sim.absorbed_total;
        let stats = sim.frame(&mut DrawList::new());
        assert_eq!(stats, FrameStats { live: 1, absorbed: 1 });
        assert_eq!(sim.absorbed_total, absorbed_before + 1);
    }

    #[test]
    fn orbiting_disk_layout_circles_the_hole() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut sim = Simulation::new(SimulationConfig::default(), BOUNDS, &mut rng);
        sim.load_layout(Layout::OrbitingDisk, &mut rng);

        assert_eq!(sim.layout, Layout::OrbitingDisk);
        assert_eq!(sim.stars.len(), 300);
        let gm = sim.config.gravitational_constant * sim.black_hole.mass;
        for star in &sim.stars {
            let offset = star.position - sim.black_hole.position;
            let r = offset.length();
            assert!(sim.config.disk_radius.contains(&r) || (r - sim.config.disk_radius.end).abs() < 1e-3);
            assert!((star.velocity.length() - (gm / r).sqrt()).abs() < 1e-3);
            assert!(star.velocity.dot(offset / r).abs() < 1e-3);
        }
    }

    #[test]
    fn reset_reloads_the_current_layout() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut sim = Simulation::new(SimulationConfig::default(), BOUNDS, &mut rng);
        sim.load_layout(Layout::OrbitingDisk, &mut rng);
        sim.frame(&mut DrawList::new());

        sim.reset(&mut rng);
        assert_eq!(sim.layout, Layout::OrbitingDisk);
        assert_eq!(sim.frames, 0);
        let hole = sim.black_hole.position;
        assert!(sim
            .stars
            .iter()
            .all(|s| s.position.distance(hole) >= sim.config.disk_radius.start - 1e-3));

        sim.load_layout(Layout::Scatter, &mut rng);
        sim.reset(&mut rng);
        assert_eq!(sim.layout, Layout::Scatter);
        assert_eq!(sim.stars.len(), 300);
    }

    #[test]
    fn draw_shows_the_field_without_advancing_it() {
        let center = BOUNDS * 0.5;
        let stars = vec![
            Star::new(center + Vec2::new(200.0, 0.0), Vec2::new(0.0, 1.0), 2.0),
            Star::new(center + Vec2::new(-150.0, 0.0), Vec2::ZERO, 3.0),
        ];
        let mut sim = simulation_with(stars);
        sim.set_black_hole_mass(8000.0);
        let before = sim.stars.clone();

        let mut list = DrawList::new();
        list.fill_circle(Vec2::ZERO, 10.0, [1.0; 4]);
        sim.draw(&mut list);

        assert_eq!(sim.stars, before);
        assert_eq!(sim.frames, 0);
        assert_eq!(list.background, BLACK);
        assert_eq!(list.len(), 4);
        // the hole disc reflects the new mass straight away
        assert!((list.shapes[0].radius - 80.0).abs() < 1e-3);
        assert_eq!(list.shapes[2].center, before[0].position);
    }
}
