use glam::{Quat, Vec3};
use pbd_core::error::SimulationError;
use pbd_core::scene::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn reference(seed: u64) -> pbd_core::SimulationContext {
    let mut rng = StdRng::seed_from_u64(seed);
    reference_scene(&mut rng, 0.0).unwrap()
}

#[test]
fn test_reference_scene_counts() {
    let ctx = reference(1);
    assert_eq!(ctx.particles.count, ROPE_LINKS + 1 + 8);
    assert_eq!(ctx.constraints.distance.len(), ROPE_LINKS + 24);
    assert_eq!(ctx.constraints.floor.height, 0.0);
}

#[test]
fn test_reference_scene_masses() {
    let ctx = reference(1);
    assert!(ctx.particles.is_pinned(0), "rope anchor must be pinned");
    for i in 1..ctx.particles.count {
        assert_eq!(ctx.particles.inv_mass[i], 1.0, "particle {i} should have unit mass");
    }
    assert_eq!(ctx.particles.position[0], ROPE_ANCHOR);
}

#[test]
fn test_rope_links_have_fixed_length() {
    let ctx = reference(3);
    for (k, c) in ctx.constraints.distance[..ROPE_LINKS].iter().enumerate() {
        assert_eq!((c.i, c.j), (k as u32, k as u32 + 1), "rope link {k} out of order");
        assert_eq!(c.rest_length, ROPE_LINK_LENGTH);
        let d = ctx.particles.position[c.i as usize].distance(ctx.particles.position[c.j as usize]);
        assert!((d - ROPE_LINK_LENGTH).abs() < 1e-5, "link {k} starts at length {d}");
    }
}

#[test]
fn test_cube_topology() {
    let ctx = reference(5);
    let first = (ROPE_LINKS + 1) as u32;
    let cube = &ctx.constraints.distance[ROPE_LINKS..];

    let mut edges = 0;
    let mut diagonals = 0;
    for c in cube {
        assert!(c.i >= first && c.i < first + 8, "cube edge refers to {}", c.i);
        assert!(c.j >= first && c.j < first + 8, "cube edge refers to {}", c.j);
        // Every cube constraint starts satisfied.
        let d = ctx.particles.position[c.i as usize].distance(ctx.particles.position[c.j as usize]);
        assert!((d - c.rest_length).abs() < 1e-6);

        if (c.rest_length - 1.0).abs() < 1e-4 {
            edges += 1;
        } else if (c.rest_length - std::f32::consts::SQRT_2).abs() < 1e-4 {
            diagonals += 1;
        }
    }
    assert_eq!(edges, 12, "4 bottom + 4 top + 4 vertical edges");
    assert_eq!(diagonals, 12, "8 side diagonals + 4 cap diagonals");

    let centroid = (first as usize..first as usize + 8)
        .map(|i| ctx.particles.position[i])
        .sum::<Vec3>()
        / 8.0;
    assert!((centroid - CUBE_CENTER).length() < 1e-5, "cube centroid {centroid}");
}

#[test]
fn test_cube_is_rotated() {
    let ctx = reference(5);
    let first = ROPE_LINKS + 1;
    // Vertical edge 0-4 follows the rotated up axis.
    let up = (ctx.particles.position[first + 4] - ctx.particles.position[first]).normalize();
    let expected = Vec3::new(0.1, 0.7, 0.3).normalize();
    assert!((up - expected).length() < 1e-5, "up axis {up}, expected {expected}");
}

#[test]
fn test_same_seed_same_scene() {
    assert_eq!(reference(11), reference(11));
}

#[test]
fn test_different_seed_different_rope() {
    let a = reference(11);
    let b = reference(12);
    assert_ne!(a.particles.position[ROPE_LINKS], b.particles.position[ROPE_LINKS]);
}

#[test]
fn test_builder_connect_and_pin() {
    let mut builder = SceneBuilder::new().with_floor_height(-1.0);
    let a = builder.add_particle(Vec3::ZERO, 1.0);
    let b = builder.add_particle(Vec3::new(0.0, 2.0, 0.0), 0.5);
    builder.connect(a, b);
    builder.pin(b);
    assert_eq!(builder.particle_count(), 2);

    let ctx = builder.build().unwrap();
    assert_eq!(ctx.constraints.distance[0].rest_length, 2.0);
    assert!(ctx.particles.is_pinned(1));
    assert_eq!(ctx.constraints.floor.height, -1.0);
}

#[test]
fn test_builder_rope_range() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut builder = SceneBuilder::new();
    builder.add_particle(Vec3::ONE, 1.0);
    let rope = builder.add_rope(Vec3::ZERO, 4, 0.25, &mut rng);
    assert_eq!(rope, 1..6);

    let ctx = builder.build().unwrap();
    assert_eq!(ctx.constraints.distance.len(), 4);
    assert_eq!(ctx.particles.position[1], Vec3::ZERO);
}

#[test]
fn test_builder_box_indices_are_contiguous() {
    let mut builder = SceneBuilder::new();
    builder.add_particle(Vec3::ZERO, 1.0);
    let indices = builder.add_box(Vec3::ZERO, 1.0, Quat::IDENTITY);
    assert_eq!(indices, [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_builder_rejects_invalid_constraint() {
    let mut builder = SceneBuilder::new();
    builder.add_particle(Vec3::ZERO, 1.0);
    builder.add_particle(Vec3::X, 1.0);
    builder.add_distance(0, 7, 1.0);
    assert_eq!(
        builder.build().unwrap_err(),
        SimulationError::ParticleOutOfBounds { index: 7, count: 2 }
    );
}

#[test]
fn test_builder_rejects_non_finite_particle() {
    let mut builder = SceneBuilder::new();
    builder.add_particle(Vec3::new(0.0, f32::INFINITY, 0.0), 1.0);
    assert_eq!(
        builder.build().unwrap_err(),
        SimulationError::NonFinitePosition { index: 0 }
    );
}

#[test]
fn test_builder_connect_out_of_range_reports_on_build() {
    let mut builder = SceneBuilder::new();
    builder.add_particle(Vec3::ZERO, 1.0);
    builder.connect(0, 5);
    assert_eq!(
        builder.build().unwrap_err(),
        SimulationError::ParticleOutOfBounds { index: 5, count: 1 }
    );
}

#[test]
fn test_builder_pin_out_of_range_reports_on_build() {
    let mut builder = SceneBuilder::new();
    builder.add_particle(Vec3::ZERO, 1.0);
    builder.pin(3);
    assert_eq!(
        builder.build().unwrap_err(),
        SimulationError::ParticleOutOfBounds { index: 3, count: 1 }
    );
}

#[test]
fn test_builder_pin_before_connect_keeps_anchor() {
    let mut builder = SceneBuilder::new();
    let a = builder.add_particle(Vec3::ZERO, 1.0);
    builder.pin(a);
    let b = builder.add_particle(Vec3::X, 1.0);
    builder.connect(a, b);

    let ctx = builder.build().unwrap();
    assert!(ctx.particles.is_pinned(0));
    assert_eq!(ctx.particles.inv_mass[1], 1.0);
    assert_eq!(ctx.constraints.distance[0].rest_length, 1.0);
}
