use glam::Vec3;

use crate::error::SimulationError;

/// Inverse mass of a pinned (infinitely heavy) particle.
pub const PINNED: f32 = 0.0;

/// Convert a mass to the inverse mass stored by [`ParticleState`].
///
/// `f32::INFINITY` maps to exactly [`PINNED`]; the reciprocal of a huge
/// finite sentinel is never taken.
pub fn inverse_mass(mass: f32) -> f32 {
    if mass.is_infinite() {
        PINNED
    } else {
        1.0 / mass
    }
}

/// SoA particle storage.
///
/// Index `i` identifies the same particle in every array for the lifetime of
/// the state; constraints refer to particles only by index.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleState {
    pub count: usize,
    /// Confirmed positions after the last committed step.
    pub position: Vec<Vec3>,
    /// Working positions during relaxation (recomputed every step).
    pub predicted: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    /// Inverse mass; `0.0` is immovable.
    pub inv_mass: Vec<f32>,
}

impl ParticleState {
    /// `count` unit-mass particles at rest at the origin.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec3::ZERO; count],
            predicted: vec![Vec3::ZERO; count],
            velocity: vec![Vec3::ZERO; count],
            inv_mass: vec![1.0; count],
        }
    }

    /// Build a state from positions and inverse masses, with zero velocity.
    pub fn from_parts(position: Vec<Vec3>, inv_mass: Vec<f32>) -> Result<Self, SimulationError> {
        let count = position.len();
        if inv_mass.len() != count {
            return Err(SimulationError::LengthMismatch {
                expected: count,
                found: inv_mass.len(),
            });
        }
        let state = Self {
            count,
            predicted: position.clone(),
            position,
            velocity: vec![Vec3::ZERO; count],
            inv_mass,
        };
        state.validate()?;
        Ok(state)
    }

    /// Check array lengths, finiteness and mass ranges.
    pub fn validate(&self) -> Result<(), SimulationError> {
        for len in [
            self.position.len(),
            self.predicted.len(),
            self.velocity.len(),
            self.inv_mass.len(),
        ] {
            if len != self.count {
                return Err(SimulationError::LengthMismatch {
                    expected: self.count,
                    found: len,
                });
            }
        }
        for i in 0..self.count {
            if !self.position[i].is_finite() || !self.velocity[i].is_finite() {
                return Err(SimulationError::NonFinitePosition { index: i });
            }
            let w = self.inv_mass[i];
            if !w.is_finite() || w < 0.0 {
                return Err(SimulationError::InvalidMass { index: i });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_pinned(&self, i: usize) -> bool {
        self.inv_mass[i] == PINNED
    }

    pub fn pin(&mut self, i: usize) {
        self.inv_mass[i] = PINNED;
    }

    /// Set a particle's mass. `f32::INFINITY` pins it; zero, negative and
    /// NaN masses are rejected.
    pub fn set_mass(&mut self, i: usize, mass: f32) -> Result<(), SimulationError> {
        self.check_index(i)?;
        if mass.is_nan() || mass <= 0.0 {
            return Err(SimulationError::InvalidMass { index: i });
        }
        self.inv_mass[i] = inverse_mass(mass);
        Ok(())
    }

    pub fn set_position(&mut self, i: usize, p: Vec3) -> Result<(), SimulationError> {
        self.check_index(i)?;
        if !p.is_finite() {
            return Err(SimulationError::NonFinitePosition { index: i });
        }
        self.position[i] = p;
        self.predicted[i] = p;
        Ok(())
    }

    pub fn set_velocity(&mut self, i: usize, v: Vec3) -> Result<(), SimulationError> {
        self.check_index(i)?;
        if !v.is_finite() {
            return Err(SimulationError::NonFinitePosition { index: i });
        }
        self.velocity[i] = v;
        Ok(())
    }

    fn check_index(&self, i: usize) -> Result<(), SimulationError> {
        if i < self.count {
            Ok(())
        } else {
            Err(SimulationError::ParticleOutOfBounds {
                index: i,
                count: self.count,
            })
        }
    }

    /// Replace every particle at once. The particle count may change; callers
    /// must replace the constraint set alongside.
    pub fn replace_all(&mut self, other: ParticleState) {
        *self = other;
    }
}
