//! Cell Growth Engine - cancer/medicine cell simulation in WASM
//!
//! Architecture:
//! - core/        - build constants, runtime config, errors, logging
//! - spatial/     - grid geometry, Moore directions, neighbor table
//! - domain/      - cell kinds and the cell state store
//! - systems/     - per-cell kernels and the compute backends running them
//! - simulation/  - tick orchestration (`CellArea`) and the JS facade

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Thread pool setup for the partition and offload backends in the browser
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    if crate::core::logging::init_console_logger() {
        log::info!("cell growth engine {} initialized", env!("CARGO_PKG_VERSION"));
    }
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::config::{BackendKind, FanOut, SimConfig};
pub use crate::core::error::{BackendError, SimError};
pub use domain::CellType;
pub use simulation::{CellArea, CellCounts, CellGrowth, Injector, PerfStats};
