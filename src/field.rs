// Simulation state for the particle field: the surface bounds and the
// particle set, with the per-frame update and the connection-line rule.
// No DOM types here so the whole module tests natively.

use crate::particle::Particle;
use rand::Rng;

pub struct FieldState {
    pub width: f64,
    pub height: f64,
    pub particles: Vec<Particle>,
}

impl FieldState {
    pub const MAX_PARTICLES: usize = 100;
    pub const DENSITY_DIVISOR: f64 = 10_000.0;
    pub const CONNECT_DISTANCE: f64 = 150.0;
    pub const LINE_ALPHA_SCALE: f64 = 0.2;

    // Placeholder state for a handle whose mount failed; zero particles,
    // nothing to update or draw
    pub fn empty() -> FieldState {
        FieldState {
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
        }
    }

    pub fn new<R: Rng>(width: f64, height: f64, rng: &mut R) -> FieldState {
        let count = FieldState::particle_count(width, height);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::new_random(width, height, rng));
        }
        FieldState {
            width,
            height,
            particles,
        }
    }

    // One particle per ~100x100 px block, capped at MAX_PARTICLES
    pub fn particle_count(width: f64, height: f64) -> usize {
        let by_area = (width * height / FieldState::DENSITY_DIVISOR).floor();
        if by_area <= 0.0 {
            return 0;
        }
        (by_area as usize).min(FieldState::MAX_PARTICLES)
    }

    // Only the bounds move; existing particles keep their positions and
    // pick up the new bounds at their next bounce check
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update(self.width, self.height);
        }
    }

    // Alpha for the line between two particles at the given distance, or
    // None past the strict threshold
    pub fn line_alpha(distance: f64) -> Option<f64> {
        if distance < FieldState::CONNECT_DISTANCE {
            Some((1.0 - distance / FieldState::CONNECT_DISTANCE) * FieldState::LINE_ALPHA_SCALE)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_count_caps_at_max() {
        assert_eq!(FieldState::particle_count(1000.0, 1000.0), 100);
        assert_eq!(FieldState::particle_count(4000.0, 4000.0), 100);
    }

    #[test]
    fn particle_count_scales_with_area() {
        assert_eq!(FieldState::particle_count(800.0, 600.0), 48);
        assert_eq!(FieldState::particle_count(500.0, 400.0), 20);
    }

    #[test]
    fn tiny_and_zero_surfaces_get_no_particles() {
        assert_eq!(FieldState::particle_count(50.0, 50.0), 0);
        assert_eq!(FieldState::particle_count(0.0, 0.0), 0);
        assert_eq!(FieldState::particle_count(0.0, 1080.0), 0);
    }

    #[test]
    fn new_spawns_count_particles_inside_bounds() {
        let mut rng = rand::thread_rng();
        let state = FieldState::new(1000.0, 1000.0, &mut rng);
        assert_eq!(state.particles.len(), 100);
        for p in &state.particles {
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= state.width);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= state.height);
        }
    }

    #[test]
    fn update_on_empty_state_is_a_no_op() {
        let mut state = FieldState::empty();
        state.update();
        assert!(state.particles.is_empty());
    }

    #[test]
    fn resize_moves_bounds_but_not_particles() {
        let mut rng = rand::thread_rng();
        let mut state = FieldState::new(800.0, 600.0, &mut rng);
        let before: Vec<[f64; 2]> = state.particles.iter().map(|p| p.pos).collect();
        state.resize(1600.0, 1200.0);
        assert_eq!(state.width, 1600.0);
        assert_eq!(state.height, 1200.0);
        let after: Vec<[f64; 2]> = state.particles.iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn line_alpha_threshold_is_strict() {
        assert!(FieldState::line_alpha(150.0).is_none());
        assert!(FieldState::line_alpha(151.0).is_none());

        let near_cutoff = FieldState::line_alpha(149.999).unwrap();
        assert!(near_cutoff > 0.0);
        assert!((near_cutoff - (1.0 - 149.999 / 150.0) * 0.2).abs() < 1e-12);

        let touching = FieldState::line_alpha(0.0).unwrap();
        assert!((touching - 0.2).abs() < 1e-12);
    }
}
