use glam::Vec3;
use rand::Rng;

/// Per-iteration correction fraction for a constraint with total stiffness
/// `k` solved over `iterations` passes: `1 - (1 - k)^(1/N)`.
///
/// Applying this fraction `N` times leaves `(1 - k)` of the original error,
/// so the effect of `k` does not depend on the iteration count.
pub fn tapered_stiffness(k: f32, iterations: u32) -> f32 {
    let n = iterations.max(1) as f32;
    1.0 - (1.0 - k).powf(1.0 / n)
}

/// Uniform direction on the unit sphere by rejection sampling the cube
/// `[-1, 1]^3`. Samples too close to the origin are rejected as well.
pub fn uniform_on_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let d = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let sq = d.length_squared();
        if (1.0e-4..=1.0).contains(&sq) {
            return d / sq.sqrt();
        }
    }
}
