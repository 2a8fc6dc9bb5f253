//! Read-only views of simulation state for drawing.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::simulation::SimulationContext;

/// GPU-compatible point: 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3], // 12 bytes
    /// 0.0 for pinned particles, so shaders can tint anchors.
    pub inv_mass: f32,      //  4 bytes
}

/// One end of a line segment: 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub _pad: f32,
}

impl LineVertex {
    fn at(p: Vec3) -> Self {
        Self {
            position: p.to_array(),
            _pad: 0.0,
        }
    }
}

/// Points, constraint segments and floor height at one instant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderSnapshot {
    pub points: Vec<PointVertex>,
    /// Two vertices per distance constraint, in constraint order.
    pub lines: Vec<LineVertex>,
    pub floor_height: f32,
}

impl RenderSnapshot {
    pub fn capture(context: &SimulationContext) -> Self {
        let mut snapshot = Self::default();
        snapshot.write_from(context);
        snapshot
    }

    /// Refresh in place, reusing the existing allocations.
    pub fn write_from(&mut self, context: &SimulationContext) {
        let particles = &context.particles;
        self.points.clear();
        self.points.extend((0..particles.count).map(|i| PointVertex {
            position: particles.position[i].to_array(),
            inv_mass: particles.inv_mass[i],
        }));

        self.lines.clear();
        for (i, j) in context.constraints.edges() {
            self.lines.push(LineVertex::at(particles.position[i as usize]));
            self.lines.push(LineVertex::at(particles.position[j as usize]));
        }

        self.floor_height = context.constraints.floor.height;
    }

    pub fn point_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }
}

/// Square grid in the plane `y = height`, `cells` cells across, as line-list
/// vertices. Used to draw the floor.
pub fn floor_grid(height: f32, half_extent: f32, cells: u32) -> Vec<LineVertex> {
    let cells = cells.max(1);
    let step = 2.0 * half_extent / cells as f32;
    let mut lines = Vec::with_capacity(4 * (cells as usize + 1));
    for k in 0..=cells {
        let t = -half_extent + k as f32 * step;
        lines.push(LineVertex::at(Vec3::new(t, height, -half_extent)));
        lines.push(LineVertex::at(Vec3::new(t, height, half_extent)));
        lines.push(LineVertex::at(Vec3::new(-half_extent, height, t)));
        lines.push(LineVertex::at(Vec3::new(half_extent, height, t)));
    }
    lines
}
