// Mutable state behind the backdrop: the viewport snapshot written by the
// input adapters and the particle field the frame loop advances. Kept free of
// web-sys types so the update rules run under native tests.

use log::debug;

use crate::gradient::DayPhase;
use crate::particle::Particle;

/// The field is replaced wholesale on resize, never grown or shrunk.
pub const PARTICLE_COUNT: usize = 50;

/// Latest observed viewport dimensions and pointer position, in
/// component-local pixels. Input adapters overwrite, the update step reads.
#[derive(Copy, Clone, Debug)]
pub struct ViewportState {
    pub width: u32,
    pub height: u32,
    pub pointer: [f64; 2],
}

impl ViewportState {
    pub fn new(width: u32, height: u32) -> ViewportState {
        ViewportState {
            width,
            height,
            // Off-canvas until the first mousemove, so nothing gets repelled
            pointer: [-POINTER_PARK, -POINTER_PARK],
        }
    }
}

const POINTER_PARK: f64 = 10_000.0;

/// Owns the fixed-size particle batch.
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> ParticleField {
        ParticleField {
            particles: Vec::new(),
        }
    }

    /// Throw away the current batch and sample a fresh one over the given
    /// dimensions. Zero-area viewports clear the field instead.
    pub fn reseed(&mut self, width: u32, height: u32) {
        self.particles.clear();
        if width == 0 || height == 0 {
            return;
        }
        self.particles.reserve(PARTICLE_COUNT);
        let mut rng = rand::thread_rng();
        for _ in 0..PARTICLE_COUNT {
            self.particles
                .push(Particle::spawn(&mut rng, width as f64, height as f64));
        }
    }

    pub fn step(&mut self, viewport: &ViewportState) {
        for particle in &mut self.particles {
            particle.step(viewport);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }
}

/// Everything one frame needs: viewport snapshot, particle field, and the
/// hour bucket driving the gradient overlay.
pub struct Scene {
    pub viewport: ViewportState,
    pub field: ParticleField,
    pub phase: DayPhase,
}

impl Scene {
    pub fn new(width: u32, height: u32, hour: u32) -> Scene {
        let mut field = ParticleField::new();
        field.reseed(width, height);
        Scene {
            viewport: ViewportState::new(width, height),
            field,
            phase: DayPhase::from_hour(hour),
        }
    }

    /// Resize adapter: record the new dimensions and replace the particle
    /// batch so density stays constant relative to area.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("backdrop resize to {}x{}", width, height);
        self.viewport.width = width;
        self.viewport.height = height;
        self.field.reseed(width, height);
    }

    /// Pointer adapter: record the latest component-local position.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.viewport.pointer = [x, y];
    }

    /// Clock adapter: re-bucket the hour backing the overlay gradient.
    pub fn set_hour(&mut self, hour: u32) {
        self.phase = DayPhase::from_hour(hour);
    }

    /// One simulation tick; drawing happens separately in `render`.
    pub fn advance(&mut self) {
        self.field.step(&self.viewport);
    }
}
