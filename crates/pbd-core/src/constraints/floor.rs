use glam::Vec3;

use crate::particle::ParticleState;

/// One-sided horizontal plane at `y = height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorConstraint {
    pub height: f32,
}

impl FloorConstraint {
    pub fn new(height: f32) -> Self {
        Self { height }
    }

    /// Constraint value for a point; negative means below the floor.
    #[inline]
    pub fn evaluate(&self, p: Vec3) -> f32 {
        p.y - self.height
    }
}

impl Default for FloorConstraint {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Push every predicted position below the floor back up by `k_tap` of its
/// penetration. Applies to all particles, pinned ones included.
pub fn solve_floor_constraint(floor: &FloorConstraint, particles: &mut ParticleState, k_tap: f32) {
    for p in particles.predicted.iter_mut() {
        let c = floor.evaluate(*p);
        if c < 0.0 {
            // grad C = +Y
            *p += Vec3::Y * (-c * k_tap);
        }
    }
}
