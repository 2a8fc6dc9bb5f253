use glam::Vec3;

use crate::particle::ParticleState;

/// Below this separation two endpoints are treated as coincident and the
/// correction direction is undefined.
const COINCIDENT_EPSILON: f32 = 1e-10;

/// PBD distance constraint between two particles.
///
/// Holds particles `i` and `j` at `rest_length` apart by partial positional
/// correction, weighted by inverse mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceConstraint {
    /// Particle index A.
    pub i: u32,
    /// Particle index B.
    pub j: u32,
    /// Target separation.
    pub rest_length: f32,
}

impl DistanceConstraint {
    /// Create a new distance constraint between particles `i` and `j`.
    pub fn new(i: u32, j: u32, rest_length: f32) -> Self {
        Self { i, j, rest_length }
    }

    /// Create a constraint whose rest length is the current separation of
    /// `i` and `j` in `positions`.
    pub fn from_positions(i: u32, j: u32, positions: &[Vec3]) -> Self {
        let rest_length = positions[i as usize].distance(positions[j as usize]);
        Self::new(i, j, rest_length)
    }

    /// Project this constraint once onto `predicted` with per-pass fraction `k_tap`.
    ///
    /// 1. `C = |p_i - p_j| - rest_length`
    /// 2. `n = (p_i - p_j) / |p_i - p_j|`
    /// 3. `p_i -= w_i / (w_i + w_j) * C * n * k_tap`, `p_j += w_j / (w_i + w_j) * C * n * k_tap`
    ///
    /// Pinned endpoints (`w == 0`) are never written.
    #[inline]
    pub fn project(&self, predicted: &mut [Vec3], inv_mass: &[f32], k_tap: f32) {
        let i = self.i as usize;
        let j = self.j as usize;

        let w_i = inv_mass[i];
        let w_j = inv_mass[j];
        let w_sum = w_i + w_j;
        if w_sum == 0.0 {
            return;
        }

        let diff = predicted[i] - predicted[j];
        let dist = diff.length();
        if dist < COINCIDENT_EPSILON {
            return;
        }

        let c_val = dist - self.rest_length;
        let n = diff / dist;
        let correction = n * (c_val * k_tap);

        if w_i > 0.0 {
            predicted[i] -= correction * (w_i / w_sum);
        }
        if w_j > 0.0 {
            predicted[j] += correction * (w_j / w_sum);
        }
    }
}

/// Project all distance constraints once, in list order.
///
/// Corrections are applied immediately (Gauss-Seidel), so later constraints
/// see the positions produced by earlier ones within the same pass.
pub fn solve_distance_constraints(
    constraints: &[DistanceConstraint],
    particles: &mut ParticleState,
    k_tap: f32,
) {
    if k_tap == 0.0 {
        return;
    }
    for c in constraints {
        c.project(&mut particles.predicted, &particles.inv_mass, k_tap);
    }
}
