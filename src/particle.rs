// One drifting point of the backdrop: position, per-frame velocity, and the
// visual attributes it keeps for life (radius, opacity).

use rand::Rng;
use vecmath::{self, Vector2};

use crate::scene::ViewportState;

/// Particles within this many pixels of the pointer get nudged away.
pub const POINTER_RADIUS: f64 = 100.0;

pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    /// Sample a fresh particle uniformly over the given viewport.
    pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64) -> Particle {
        Particle {
            pos: [rng.gen::<f64>() * width, rng.gen::<f64>() * height],
            vel: [rng.gen::<f64>() * 2.0 - 1.0, rng.gen::<f64>() * 2.0 - 1.0],
            radius: rng.gen::<f64>() * 2.0 + 0.5,
            opacity: rng.gen::<f64>() * 0.5 + 0.2,
        }
    }

    /// Advance one frame: Euler step, pointer repulsion, toroidal wrap.
    ///
    /// Wrapping runs last so the position lands in [0, w) x [0, h) no matter
    /// how far the step or the nudge carried it.
    pub fn step(&mut self, viewport: &ViewportState) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);

        let away = vecmath::vec2_sub(self.pos, viewport.pointer);
        let distance = vecmath::vec2_len(away);
        // A particle exactly under the pointer stays put; normalizing a
        // zero-length vector would put NaN in the position.
        if distance > 0.0 && distance < POINTER_RADIUS {
            let push = vecmath::vec2_scale(away, 1.0 / distance);
            self.pos = vecmath::vec2_add(self.pos, push);
        }

        self.pos[0] = wrap(self.pos[0], viewport.width as f64);
        self.pos[1] = wrap(self.pos[1], viewport.height as f64);
    }
}

/// Euclidean remainder onto [0, extent); off-edge positions reappear on the
/// opposite edge.
fn wrap(coord: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    let wrapped = coord.rem_euclid(extent);
    // rem_euclid can round up to the extent itself for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: u32, height: u32, pointer: [f64; 2]) -> ViewportState {
        ViewportState {
            width,
            height,
            pointer,
        }
    }

    #[test]
    fn spawn_attributes_stay_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, 640.0, 480.0);
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 640.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 480.0);
            assert!(p.radius >= 0.5 && p.radius <= 2.5);
            assert!(p.opacity >= 0.2 && p.opacity <= 0.7);
            assert!(p.vel[0] >= -1.0 && p.vel[0] <= 1.0);
            assert!(p.vel[1] >= -1.0 && p.vel[1] <= 1.0);
        }
    }

    #[test]
    fn step_keeps_position_inside_viewport() {
        let vp = viewport(200, 100, [-500.0, -500.0]);
        let mut rng = rand::thread_rng();
        let mut p = Particle::spawn(&mut rng, 200.0, 100.0);
        for _ in 0..10_000 {
            p.step(&vp);
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 200.0, "x = {}", p.pos[0]);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 100.0, "y = {}", p.pos[1]);
        }
    }

    #[test]
    fn step_wraps_past_either_edge() {
        let vp = viewport(100, 100, [-500.0, -500.0]);
        let mut p = Particle {
            pos: [99.5, 0.2],
            vel: [1.0, -1.0],
            radius: 1.0,
            opacity: 0.5,
        };
        p.step(&vp);
        assert!((p.pos[0] - 0.5).abs() < 1e-9);
        assert!((p.pos[1] - 99.2).abs() < 1e-9);
    }

    #[test]
    fn pointer_overlap_does_not_corrupt_position() {
        let vp = viewport(100, 100, [50.0, 50.0]);
        let mut p = Particle {
            pos: [50.0, 50.0],
            vel: [0.0, 0.0],
            radius: 1.0,
            opacity: 0.5,
        };
        p.step(&vp);
        assert!(p.pos[0].is_finite() && p.pos[1].is_finite());
        assert_eq!(p.pos, [50.0, 50.0]);
    }

    #[test]
    fn pointer_nearby_pushes_particle_away() {
        let vp = viewport(400, 400, [100.0, 100.0]);
        let mut p = Particle {
            pos: [110.0, 100.0],
            vel: [0.0, 0.0],
            radius: 1.0,
            opacity: 0.5,
        };
        p.step(&vp);
        // Unit nudge straight along +x, away from the pointer
        assert!((p.pos[0] - 111.0).abs() < 1e-9);
        assert!((p.pos[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn pointer_outside_radius_has_no_effect() {
        let vp = viewport(400, 400, [0.0, 0.0]);
        let mut p = Particle {
            pos: [200.0, 200.0],
            vel: [0.5, -0.25],
            radius: 1.0,
            opacity: 0.5,
        };
        p.step(&vp);
        assert!((p.pos[0] - 200.5).abs() < 1e-9);
        assert!((p.pos[1] - 199.75).abs() < 1e-9);
    }
}
