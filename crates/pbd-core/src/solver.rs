use crate::config::PhysicsConfig;
use crate::constraints::distance::solve_distance_constraints;
use crate::constraints::floor::solve_floor_constraint;
use crate::constraints::ConstraintSet;
use crate::math::tapered_stiffness;
use crate::particle::ParticleState;

/// Position-based dynamics stepper.
///
/// Holds only the fixed internal parameters; all simulation state is passed
/// in, so the same solver can drive any number of scenes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Solver {
    pub config: PhysicsConfig,
}

impl Solver {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Advance `particles` by one frame.
    ///
    /// `dt` is the fixed frame step in seconds and `stiffness` the global
    /// distance-constraint strength in `[0, 1]`.
    ///
    /// 1. Predict positions from current velocity (gravity is not applied here)
    /// 2. Relax distance then floor constraints, `solver_iterations` times
    /// 3. Rebuild velocity from displacement and add gravity to movable particles
    /// 4. Commit predicted positions
    pub fn step(
        &self,
        particles: &mut ParticleState,
        constraints: &ConstraintSet,
        dt: f32,
        stiffness: f32,
    ) {
        assert!(dt > 0.0, "time step must be positive, got {dt}");
        assert!(
            (0.0..=1.0).contains(&stiffness),
            "stiffness must be in [0, 1], got {stiffness}"
        );
        assert_eq!(particles.position.len(), particles.count);
        assert_eq!(particles.predicted.len(), particles.count);
        assert_eq!(particles.velocity.len(), particles.count);
        assert_eq!(particles.inv_mass.len(), particles.count);
        for i in 0..particles.count {
            assert!(
                particles.position[i].is_finite() && particles.velocity[i].is_finite(),
                "particle {i} has a non-finite position or velocity"
            );
            let w = particles.inv_mass[i];
            assert!(
                w.is_finite() && w >= 0.0,
                "particle {i} has an invalid inverse mass {w}"
            );
        }

        self.predict(particles, dt);
        self.relax(particles, constraints, stiffness);
        self.update_velocities(particles, dt);
        self.commit(particles);

        debug_assert!(
            particles.position.iter().all(|p| p.is_finite()),
            "non-finite particle position after step"
        );
    }

    /// `predicted = position + velocity * dt`.
    pub fn predict(&self, particles: &mut ParticleState, dt: f32) {
        for i in 0..particles.count {
            particles.predicted[i] = particles.position[i] + particles.velocity[i] * dt;
        }
    }

    /// Run every relaxation pass over the predicted positions.
    pub fn relax(&self, particles: &mut ParticleState, constraints: &ConstraintSet, stiffness: f32) {
        let iterations = self.config.solver_iterations;
        let k_tap = tapered_stiffness(stiffness, iterations);
        let k_tap_floor = tapered_stiffness(self.config.floor_stiffness, iterations);

        for _iter in 0..iterations {
            solve_distance_constraints(&constraints.distance, particles, k_tap);
            solve_floor_constraint(&constraints.floor, particles, k_tap_floor);
        }
    }

    /// Derive velocity from this step's displacement, then apply gravity to
    /// every particle with finite mass.
    pub fn update_velocities(&self, particles: &mut ParticleState, dt: f32) {
        let gravity_dv = self.config.gravity * dt;
        for i in 0..particles.count {
            particles.velocity[i] = (particles.predicted[i] - particles.position[i]) / dt;
            if particles.inv_mass[i] == 0.0 {
                continue;
            }
            particles.velocity[i] += gravity_dv;
        }
    }

    /// `position = predicted`.
    pub fn commit(&self, particles: &mut ParticleState) {
        particles.position.copy_from_slice(&particles.predicted);
    }
}
