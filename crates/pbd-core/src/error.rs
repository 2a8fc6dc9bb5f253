//! Error types for scene construction and validation.

use std::fmt;

/// Errors raised while assembling particle state or constraint topology.
///
/// The solver itself never fails; every variant here describes input that
/// would break the solver's contract and is rejected before the first step.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A constraint references a particle that does not exist.
    ParticleOutOfBounds { index: usize, count: usize },
    /// A distance constraint joins a particle to itself.
    DegenerateConstraint { index: usize },
    /// A distance constraint has a negative or non-finite rest length.
    InvalidRestLength { index: usize },
    /// A particle position or velocity is NaN or infinite.
    NonFinitePosition { index: usize },
    /// Parallel particle arrays were supplied with different lengths.
    LengthMismatch { expected: usize, found: usize },
    /// Inverse mass must be finite and non-negative.
    InvalidMass { index: usize },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            SimulationError::DegenerateConstraint { index } => {
                write!(f, "distance constraint {} connects a particle to itself", index)
            }
            SimulationError::InvalidRestLength { index } => {
                write!(f, "distance constraint {} has an invalid rest length", index)
            }
            SimulationError::NonFinitePosition { index } => {
                write!(f, "particle {} has a non-finite position or velocity", index)
            }
            SimulationError::LengthMismatch { expected, found } => {
                write!(f, "particle array length mismatch (expected {}, found {})", expected, found)
            }
            SimulationError::InvalidMass { index } => {
                write!(f, "particle {} has an invalid inverse mass", index)
            }
        }
    }
}

impl std::error::Error for SimulationError {}
