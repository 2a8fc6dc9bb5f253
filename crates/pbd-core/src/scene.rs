//! Scene construction: particles plus distance-constraint topology.
//!
//! The solver does not care what the topology looks like. [`reference_scene`]
//! builds the demo used by the hosts: a random rope hanging from a pinned
//! anchor and a rotated wireframe cube.

use std::ops::Range;

use glam::{Quat, Vec3};
use rand::Rng;

use crate::constraints::distance::DistanceConstraint;
use crate::constraints::floor::FloorConstraint;
use crate::constraints::ConstraintSet;
use crate::error::SimulationError;
use crate::math::uniform_on_unit_sphere;
use crate::particle::{ParticleState, PINNED};
use crate::simulation::SimulationContext;

/// Rope anchor of the reference scene.
pub const ROPE_ANCHOR: Vec3 = Vec3::new(0.0, 2.0, 0.0);
/// Number of rope links (the rope has one more particle than links).
pub const ROPE_LINKS: usize = 20;
pub const ROPE_LINK_LENGTH: f32 = 0.1;
/// Centre of the reference cube.
pub const CUBE_CENTER: Vec3 = Vec3::new(2.0, 2.0, 0.0);
pub const CUBE_HALF_EXTENT: f32 = 0.5;

/// Edges of a box with bottom vertices 0..4 and top vertices 4..8, wound the
/// same way: rings, verticals, side diagonals both ways, cap diagonals.
#[rustfmt::skip]
const BOX_EDGES: [(usize, usize); 24] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
    (0, 5), (1, 6), (2, 7), (3, 4),
    (0, 7), (1, 4), (2, 5), (3, 6),
    (0, 2), (1, 3), (4, 6), (5, 7),
];

/// Incrementally assembles a [`SimulationContext`].
#[derive(Clone, Debug, Default)]
pub struct SceneBuilder {
    positions: Vec<Vec3>,
    inv_mass: Vec<f32>,
    distance: Vec<DistanceConstraint>,
    /// Pins are applied in `build`, where a bad index becomes an error.
    pinned: Vec<u32>,
    floor_height: f32,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floor_height(mut self, height: f32) -> Self {
        self.floor_height = height;
        self
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    /// Add a particle and return its index.
    pub fn add_particle(&mut self, position: Vec3, inv_mass: f32) -> u32 {
        self.positions.push(position);
        self.inv_mass.push(inv_mass);
        (self.positions.len() - 1) as u32
    }

    /// Make a particle immovable. An out-of-range index is reported by
    /// [`build`](Self::build).
    pub fn pin(&mut self, i: u32) {
        self.pinned.push(i);
    }

    pub fn add_distance(&mut self, i: u32, j: u32, rest_length: f32) {
        self.distance.push(DistanceConstraint::new(i, j, rest_length));
    }

    /// Constrain `i` and `j` to their current separation. An out-of-range
    /// index is reported by [`build`](Self::build).
    pub fn connect(&mut self, i: u32, j: u32) {
        let count = self.positions.len();
        if (i as usize) < count && (j as usize) < count {
            self.distance
                .push(DistanceConstraint::from_positions(i, j, &self.positions));
        } else {
            // No separation to measure; validation rejects the indices first.
            self.distance.push(DistanceConstraint::new(i, j, f32::NAN));
        }
    }

    /// Random-walk rope starting at `anchor` with `links` segments.
    ///
    /// Each link direction is a unit-sphere sample stretched 2x along X before
    /// renormalising, so the rope tends to spread sideways. Returns the range
    /// of particle indices, anchor first.
    pub fn add_rope<R: Rng + ?Sized>(
        &mut self,
        anchor: Vec3,
        links: usize,
        link_length: f32,
        rng: &mut R,
    ) -> Range<u32> {
        let first = self.add_particle(anchor, 1.0);
        let mut prev = first;
        let mut o = anchor;
        for _ in 0..links {
            let mut d = uniform_on_unit_sphere(rng);
            d.x *= 2.0;
            let d = d.normalize();

            o += d * link_length;
            let next = self.add_particle(o, 1.0);
            self.add_distance(prev, next, link_length);
            prev = next;
        }
        first..prev + 1
    }

    /// Wireframe box of 8 contiguous unit-mass particles, rotated about its
    /// centre. Edge rest lengths are the initial separations.
    pub fn add_box(&mut self, center: Vec3, half_extent: f32, rotation: Quat) -> [u32; 8] {
        let s = half_extent;
        let corners = [
            Vec3::new(-s, -s, -s),
            Vec3::new(s, -s, -s),
            Vec3::new(s, -s, s),
            Vec3::new(-s, -s, s),
            Vec3::new(-s, s, -s),
            Vec3::new(s, s, -s),
            Vec3::new(s, s, s),
            Vec3::new(-s, s, s),
        ];
        let indices = corners.map(|c| self.add_particle(rotation * c + center, 1.0));
        for (a, b) in BOX_EDGES {
            self.connect(indices[a], indices[b]);
        }
        indices
    }

    pub fn build(mut self) -> Result<SimulationContext, SimulationError> {
        let count = self.positions.len();
        for &i in &self.pinned {
            let index = i as usize;
            if index >= count {
                return Err(SimulationError::ParticleOutOfBounds { index, count });
            }
            self.inv_mass[index] = PINNED;
        }
        let particles = ParticleState::from_parts(self.positions, self.inv_mass)?;
        let constraints =
            ConstraintSet::new(self.distance, FloorConstraint::new(self.floor_height));
        SimulationContext::new(particles, constraints)
    }
}

/// Rotation applied to the reference cube: the shortest arc taking +Y to
/// `(0.1, 0.7, 0.3)`.
pub fn reference_cube_rotation() -> Quat {
    Quat::from_rotation_arc(Vec3::Y, Vec3::new(0.1, 0.7, 0.3).normalize())
}

/// Rope of [`ROPE_LINKS`] links pinned at particle 0, followed by the cube.
pub fn reference_scene<R: Rng + ?Sized>(
    rng: &mut R,
    floor_height: f32,
) -> Result<SimulationContext, SimulationError> {
    let mut builder = SceneBuilder::new().with_floor_height(floor_height);
    let rope = builder.add_rope(ROPE_ANCHOR, ROPE_LINKS, ROPE_LINK_LENGTH, rng);
    builder.pin(rope.start);
    builder.add_box(CUBE_CENTER, CUBE_HALF_EXTENT, reference_cube_rotation());
    builder.build()
}
