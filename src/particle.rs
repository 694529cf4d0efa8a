// Simple particle struct to keep track of individual position, velocity,
// size, and opacity

use rand::Rng;

pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    pub const MAX_SPEED: f64 = 0.25;

    // Position is uniform over the surface, radius is in [1, 4), each
    // velocity component is in [-0.25, 0.25), opacity is in [0.1, 0.6)
    pub fn new_random<R: Rng>(width: f64, height: f64, rng: &mut R) -> Particle {
        Particle {
            pos: [rng.gen::<f64>() * width, rng.gen::<f64>() * height],
            vel: [
                (rng.gen::<f64>() - 0.5) * 0.5,
                (rng.gen::<f64>() - 0.5) * 0.5,
            ],
            radius: rng.gen::<f64>() * 3.0 + 1.0,
            opacity: rng.gen::<f64>() * 0.5 + 0.1,
        }
    }

    pub fn update(&mut self, width: f64, height: f64) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];

        // Reactive bounce, no clamp: a particle past the edge flips its
        // velocity every frame until it drifts back inside
        if self.pos[0] > width || self.pos[0] < 0.0 {
            self.vel[0] = -self.vel[0];
        }
        if self.pos[1] > height || self.pos[1] < 0.0 {
            self.vel[1] = -self.vel[1];
        }
    }
}
