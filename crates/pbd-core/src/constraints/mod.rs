//! Constraint types and the set a scene hands to the solver.

pub mod distance;
pub mod floor;

use crate::error::SimulationError;
use distance::DistanceConstraint;
use floor::FloorConstraint;

/// Fixed topology of a scene plus the floor plane.
///
/// Distance constraints are solved in insertion order, which stays stable for
/// the lifetime of the set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstraintSet {
    pub distance: Vec<DistanceConstraint>,
    pub floor: FloorConstraint,
}

impl ConstraintSet {
    pub fn new(distance: Vec<DistanceConstraint>, floor: FloorConstraint) -> Self {
        Self { distance, floor }
    }

    /// Check every constraint against a particle count.
    pub fn validate(&self, particle_count: usize) -> Result<(), SimulationError> {
        for (index, c) in self.distance.iter().enumerate() {
            for p in [c.i as usize, c.j as usize] {
                if p >= particle_count {
                    return Err(SimulationError::ParticleOutOfBounds {
                        index: p,
                        count: particle_count,
                    });
                }
            }
            if c.i == c.j {
                return Err(SimulationError::DegenerateConstraint { index });
            }
            if !c.rest_length.is_finite() || c.rest_length < 0.0 {
                return Err(SimulationError::InvalidRestLength { index });
            }
        }
        Ok(())
    }

    /// Index pairs of every distance constraint, for drawing line segments.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.distance.iter().map(|c| (c.i, c.j))
    }

    pub fn replace_all(&mut self, other: ConstraintSet) {
        *self = other;
    }
}
