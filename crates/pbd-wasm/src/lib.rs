use pbd_core::render::{floor_grid, LineVertex, RenderSnapshot};
use pbd_core::simulation::Simulation;
use wasm_bindgen::prelude::*;

/// Half-width of the drawn floor grid, in world units.
const FLOOR_GRID_HALF_EXTENT: f32 = 5.0;
const FLOOR_GRID_CELLS: u32 = 10;

fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

/// Message for a stiffness request that landed somewhere else. NaN requests
/// are dropped by the simulation and get no message.
fn clamp_notice(requested: f32, applied: f32) -> Option<String> {
    if requested.is_nan() || requested == applied {
        None
    } else {
        Some(format!("stiffness {requested} clamped to {applied}"))
    }
}

/// Frame counter as exposed to JS, saturating at `u32::MAX`.
fn frame_for_js(frame: u64) -> u32 {
    u32::try_from(frame).unwrap_or(u32::MAX)
}

fn random_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => pbd_core::simulation::DEFAULT_SEED,
    }
}

#[wasm_bindgen]
pub struct PbdWorld {
    simulation: Simulation,
    snapshot: RenderSnapshot,
    floor_buffer: Vec<LineVertex>,
}

#[wasm_bindgen]
impl PbdWorld {
    /// Build the reference scene. Without a seed one is drawn from the
    /// browser's crypto source.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>) -> Result<PbdWorld, JsError> {
        let seed = seed.map(u64::from).unwrap_or_else(random_seed);
        let simulation = Simulation::new(seed)?;
        log(&format!(
            "WASM PbdWorld created: {} particles, {} constraints (seed {})",
            simulation.particles().count,
            simulation.constraints().distance.len(),
            seed
        ));

        let snapshot = simulation.snapshot();
        let floor_buffer = floor_grid(
            simulation.floor_height(),
            FLOOR_GRID_HALF_EXTENT,
            FLOOR_GRID_CELLS,
        );
        Ok(PbdWorld {
            simulation,
            snapshot,
            floor_buffer,
        })
    }

    /// Advance one fixed frame. Returns the wall time spent, in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self) -> f32 {
        let start = js_sys::Date::now();
        self.simulation.step();
        self.write_gpu_output();
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) -> Result<(), JsError> {
        self.simulation.reset()?;
        self.write_gpu_output();
        log(&format!(
            "WASM PbdWorld reset: {} particles",
            self.simulation.particles().count
        ));
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_stiffness(&mut self, stiffness: f32) {
        self.simulation.set_stiffness(stiffness);
        if let Some(notice) = clamp_notice(stiffness, self.simulation.stiffness()) {
            log(&notice);
        }
    }

    #[wasm_bindgen]
    pub fn set_floor_height(&mut self, height: f32) {
        self.simulation.set_floor_height(height);
        self.floor_buffer = floor_grid(
            self.simulation.floor_height(),
            FLOOR_GRID_HALF_EXTENT,
            FLOOR_GRID_CELLS,
        );
        self.snapshot.floor_height = self.simulation.floor_height();
    }

    #[wasm_bindgen]
    pub fn stiffness(&self) -> f32 {
        self.simulation.stiffness()
    }

    #[wasm_bindgen]
    pub fn floor_height(&self) -> f32 {
        self.simulation.floor_height()
    }

    #[wasm_bindgen]
    pub fn frame(&self) -> u32 {
        frame_for_js(self.simulation.frame())
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.simulation.particles().count
    }

    #[wasm_bindgen]
    pub fn constraint_count(&self) -> usize {
        self.simulation.constraints().distance.len()
    }

    #[wasm_bindgen]
    pub fn get_point_buffer_ptr(&self) -> *const f32 {
        self.snapshot.points.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_point_buffer_byte_length(&self) -> usize {
        self.snapshot.point_bytes().len()
    }

    #[wasm_bindgen]
    pub fn get_line_buffer_ptr(&self) -> *const f32 {
        self.snapshot.lines.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_line_buffer_byte_length(&self) -> usize {
        self.snapshot.line_bytes().len()
    }

    #[wasm_bindgen]
    pub fn get_floor_buffer_ptr(&self) -> *const f32 {
        self.floor_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_floor_buffer_byte_length(&self) -> usize {
        bytemuck::cast_slice::<LineVertex, u8>(&self.floor_buffer).len()
    }
}

impl PbdWorld {
    fn write_gpu_output(&mut self) {
        self.snapshot.write_from(self.simulation.context());
    }
}
