//! Position-based dynamics for point masses joined by distance constraints
//! above a ground plane.
//!
//! Each frame the [`Solver`] predicts positions from velocity, relaxes the
//! distance and floor constraints a fixed number of times with a tapered
//! stiffness, then rebuilds velocity from the displacement and adds gravity.

pub mod config;
pub mod constraints;
pub mod error;
pub mod math;
pub mod particle;
pub mod render;
pub mod scene;
pub mod simulation;
pub mod solver;

pub use config::{HostParams, PhysicsConfig};
pub use constraints::distance::DistanceConstraint;
pub use constraints::floor::FloorConstraint;
pub use constraints::ConstraintSet;
pub use error::SimulationError;
pub use particle::ParticleState;
pub use render::RenderSnapshot;
pub use scene::SceneBuilder;
pub use simulation::{Simulation, SimulationContext};
pub use solver::Solver;
