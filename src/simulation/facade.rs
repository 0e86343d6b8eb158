use wasm_bindgen::prelude::*;

use crate::core::config::SimConfig;
use crate::core::error::SimError;

use super::perf_stats::PerfStats;
use super::CellArea;

fn to_js(err: SimError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JS-facing handle to a cell area
#[wasm_bindgen]
pub struct CellGrowth {
    core: CellArea,
}

#[wasm_bindgen]
impl CellGrowth {
    /// Default configuration, grid placed at (offset_x, offset_y)
    #[wasm_bindgen(constructor)]
    pub fn new(offset_x: f32, offset_y: f32) -> Result<CellGrowth, JsValue> {
        let config = SimConfig {
            offset: [offset_x, offset_y],
            ..SimConfig::default()
        };
        CellArea::new(config).map(|core| Self { core }).map_err(to_js)
    }

    /// Configuration from JSON (`seed`, `backend`, `fan_out`); the offset
    /// arguments win over any `offset` in the JSON
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str, offset_x: f32, offset_y: f32) -> Result<CellGrowth, JsValue> {
        let mut config = SimConfig::from_json(json).map_err(to_js)?;
        config.offset = [offset_x, offset_y];
        CellArea::new(config).map(|core| Self { core }).map_err(to_js)
    }

    /// Queue medicine at a renderer-space point. Returns the targeted cell index.
    pub fn inject_medicine(&self, x: f32, y: f32) -> u32 {
        self.core.inject_medicine([x, y]) as u32
    }

    /// Advance by `dt` seconds; returns the number of ticks run
    pub fn on_tick(&mut self, dt: f32) -> Result<u32, JsValue> {
        self.core.on_tick(dt).map_err(to_js)
    }

    /// "Generate New Grid"
    pub fn regenerate(&mut self) {
        self.core.regenerate();
    }

    #[wasm_bindgen(getter)]
    pub fn cancer_count(&self) -> u32 { self.core.counts().cancer as u32 }

    #[wasm_bindgen(getter)]
    pub fn healthy_count(&self) -> u32 { self.core.counts().healthy as u32 }

    #[wasm_bindgen(getter)]
    pub fn medicine_count(&self) -> u32 { self.core.counts().medicine as u32 }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn cell_size(&self) -> f32 { self.core.cell_size() }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.core.tick() }

    /// Pointer to interleaved x,y positions (for a Float32Array view)
    pub fn positions_ptr(&self) -> *const f32 {
        self.core.positions().as_ptr() as *const f32
    }

    /// Number of f32 values behind `positions_ptr`
    pub fn positions_len(&self) -> usize {
        self.core.positions().len() * 2
    }

    /// Pointer to interleaved RGBA colors (for a Float32Array view)
    pub fn colors_ptr(&self) -> *const f32 {
        self.core.colors().as_ptr() as *const f32
    }

    /// Number of f32 values behind `colors_ptr`
    pub fn colors_len(&self) -> usize {
        self.core.colors().len() * 4
    }

    /// Current counts as `{"cancer":..,"healthy":..,"medicine":..}`
    pub fn stats_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.core.counts()).map_err(|e| to_js(e.into()))
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }

    pub fn backend_name(&self) -> String {
        self.core.backend_name().to_string()
    }
}

impl CellGrowth {
    /// Native access to the core, for hosts that are not JS
    pub fn core(&self) -> &CellArea {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut CellArea {
        &mut self.core
    }
}
