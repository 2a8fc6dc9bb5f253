use std::ops::RangeInclusive;

use glam::Vec3;

/// Valid range of the user-facing distance-constraint stiffness.
pub const STIFFNESS_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Valid range of the floor height control.
pub const FLOOR_HEIGHT_RANGE: RangeInclusive<f32> = -2.0..=2.0;

/// Fixed internal solver parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Relaxation passes per step.
    pub solver_iterations: u32,
    /// Total correction fraction of the floor constraint per step.
    pub floor_stiffness: f32,
    pub gravity: Vec3,
    /// Frame time step in seconds (fixed cadence, not wall clock).
    pub time_step: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            solver_iterations: 20,
            floor_stiffness: 0.3,
            gravity: Vec3::new(0.0, -9.8, 0.0),
            time_step: 1.0 / 60.0,
        }
    }
}

/// Parameters the host lets the user tune between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostParams {
    stiffness: f32,
    floor_height: f32,
}

impl HostParams {
    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }

    /// Set the stiffness, clamped into [`STIFFNESS_RANGE`]. NaN is ignored.
    pub fn set_stiffness(&mut self, stiffness: f32) {
        if !stiffness.is_nan() {
            self.stiffness = stiffness.clamp(*STIFFNESS_RANGE.start(), *STIFFNESS_RANGE.end());
        }
    }

    /// Set the floor height, clamped into [`FLOOR_HEIGHT_RANGE`]. NaN is ignored.
    pub fn set_floor_height(&mut self, height: f32) {
        if !height.is_nan() {
            self.floor_height =
                height.clamp(*FLOOR_HEIGHT_RANGE.start(), *FLOOR_HEIGHT_RANGE.end());
        }
    }

    /// Mirror a floor height that came from a built scene rather than the host
    /// controls. The value is taken as is.
    pub(crate) fn with_scene_floor(mut self, height: f32) -> Self {
        self.floor_height = height;
        self
    }
}

impl Default for HostParams {
    fn default() -> Self {
        Self {
            stiffness: 1.0,
            floor_height: 0.0,
        }
    }
}
