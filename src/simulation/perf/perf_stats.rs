use wasm_bindgen::prelude::*;

/// Snapshot of the last tick's cost, all zeros while perf metrics are off
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) injection_ms: f64,
    pub(super) transition_ms: f64,
    pub(super) diffusion_ms: f64,
    pub(super) commit_ms: f64,
    pub(super) stats_ms: f64,

    pub(super) injections_drained: u32,
    pub(super) cells_injected: u32,
    pub(super) kernel_launches: u32,
    /// Ticks run by the most recent `on_tick`
    pub(super) ticks_run: u32,
    pub(super) grid_size: u32,
    pub(super) memory_bytes: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn injection_ms(&self) -> f64 { self.injection_ms }
    #[wasm_bindgen(getter)]
    pub fn transition_ms(&self) -> f64 { self.transition_ms }
    #[wasm_bindgen(getter)]
    pub fn diffusion_ms(&self) -> f64 { self.diffusion_ms }
    #[wasm_bindgen(getter)]
    pub fn commit_ms(&self) -> f64 { self.commit_ms }
    #[wasm_bindgen(getter)]
    pub fn stats_ms(&self) -> f64 { self.stats_ms }
    #[wasm_bindgen(getter)]
    pub fn injections_drained(&self) -> u32 { self.injections_drained }
    #[wasm_bindgen(getter)]
    pub fn cells_injected(&self) -> u32 { self.cells_injected }
    #[wasm_bindgen(getter)]
    pub fn kernel_launches(&self) -> u32 { self.kernel_launches }
    #[wasm_bindgen(getter)]
    pub fn ticks_run(&self) -> u32 { self.ticks_run }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
}
