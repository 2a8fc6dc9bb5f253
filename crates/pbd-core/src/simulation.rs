use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{HostParams, PhysicsConfig};
use crate::constraints::ConstraintSet;
use crate::error::SimulationError;
use crate::particle::ParticleState;
use crate::render::RenderSnapshot;
use crate::scene::reference_scene;
use crate::solver::Solver;

/// Seed used when the host does not supply one.
pub const DEFAULT_SEED: u64 = 2_463_534_242;

/// Particles and the topology that refers to them, always built and replaced
/// together.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationContext {
    pub particles: ParticleState,
    pub constraints: ConstraintSet,
}

impl SimulationContext {
    /// Pair a particle state with a constraint set, checking that every
    /// constraint refers to a valid particle.
    pub fn new(
        particles: ParticleState,
        constraints: ConstraintSet,
    ) -> Result<Self, SimulationError> {
        particles.validate()?;
        constraints.validate(particles.count)?;
        Ok(Self {
            particles,
            constraints,
        })
    }

    pub fn step(&mut self, solver: &Solver, dt: f32, stiffness: f32) {
        solver.step(&mut self.particles, &self.constraints, dt, stiffness);
    }
}

/// Frame-driven host state: the live context, the solver, the user tunables
/// and the scene RNG.
///
/// The RNG lives as long as the simulation, so each reset builds a different
/// rope.
pub struct Simulation {
    context: SimulationContext,
    solver: Solver,
    params: HostParams,
    rng: StdRng,
    frame: u64,
}

impl Simulation {
    /// Reference scene with default parameters.
    pub fn new(seed: u64) -> Result<Self, SimulationError> {
        Self::with_config(seed, PhysicsConfig::default(), HostParams::default())
    }

    pub fn with_config(
        seed: u64,
        config: PhysicsConfig,
        params: HostParams,
    ) -> Result<Self, SimulationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let context = reference_scene(&mut rng, params.floor_height())?;
        Ok(Self {
            context,
            solver: Solver::new(config),
            params,
            rng,
            frame: 0,
        })
    }

    /// Drive an externally built scene. Resets still rebuild the reference scene.
    pub fn from_context(context: SimulationContext, config: PhysicsConfig, seed: u64) -> Self {
        let params = HostParams::default().with_scene_floor(context.constraints.floor.height);
        Self {
            context,
            solver: Solver::new(config),
            params,
            rng: StdRng::seed_from_u64(seed),
            frame: 0,
        }
    }

    /// Advance one frame at the fixed time step with the current stiffness.
    pub fn step(&mut self) {
        let dt = self.solver.config.time_step;
        self.context.step(&self.solver, dt, self.params.stiffness());
        self.frame += 1;
    }

    /// Discard the current scene and build a fresh one. The new context is
    /// swapped in whole; nothing from the old one is reused.
    pub fn reset(&mut self) -> Result<(), SimulationError> {
        let context = reference_scene(&mut self.rng, self.params.floor_height())?;
        self.context = context;
        self.frame = 0;
        Ok(())
    }

    pub fn set_stiffness(&mut self, stiffness: f32) {
        self.params.set_stiffness(stiffness);
    }

    /// Move the floor. Takes effect from the next step.
    pub fn set_floor_height(&mut self, height: f32) {
        self.params.set_floor_height(height);
        self.context.constraints.floor.height = self.params.floor_height();
    }

    pub fn stiffness(&self) -> f32 {
        self.params.stiffness()
    }

    pub fn floor_height(&self) -> f32 {
        self.context.constraints.floor.height
    }

    pub fn params(&self) -> &HostParams {
        &self.params
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.solver.config
    }

    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    pub fn particles(&self) -> &ParticleState {
        &self.context.particles
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.context.constraints
    }

    /// Frames stepped since construction or the last reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.context)
    }
}
