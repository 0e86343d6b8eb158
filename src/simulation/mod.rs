//! Cell area - the simulation core
//!
//! `CellArea` owns the cell store, the neighbor table and a compute backend,
//! and advances them in fixed ticks. Each tick runs four phases in order:
//!
//! - A: drain the injection queue and seed medicine (simulation thread)
//! - B: transition kernel - cancer spread and cure
//! - C: diffusion kernel - medicine travel
//! - D: commit, recolor, recount
//!
//! B and C go through the backend with a full buffer round-trip, so every
//! phase reads only what the previous one committed.

use rand_chacha::ChaCha8Rng;

use crate::core::config::SimConfig;
use crate::core::error::SimError;
use crate::domain::{CellStore, CellType, Color};
use crate::spatial::{GridGeometry, NeighborTable};
use crate::systems::ComputeBackend;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "commands/injection.rs"]
mod injection;
#[path = "stats/stats.rs"]
mod stats;
#[path = "step/fixed_step.rs"]
mod fixed_step;
#[path = "step/phase_injection.rs"]
mod phase_injection;
#[path = "step/step.rs"]
mod step;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::CellGrowth;
pub use injection::{InjectionQueue, Injector};
pub use perf_stats::PerfStats;
pub use stats::CellCounts;

use fixed_step::FixedStep;

pub struct CellArea {
    config: SimConfig,
    store: CellStore,
    topology: NeighborTable,
    backend: Box<dyn ComputeBackend>,
    injections: InjectionQueue,
    rng: ChaCha8Rng,
    clock: FixedStep,

    // State
    counts: CellCounts,
    tick: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl CellArea {
    /// Build-time sized grid, randomly seeded with cancer
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        init::create_cell_area(GridGeometry::build_default(config.offset), config)
    }

    /// Same as `new` on a grid of the given size
    #[allow(dead_code)]
    pub(crate) fn with_geometry(width: u32, height: u32, config: SimConfig) -> Result<Self, SimError> {
        let geometry = GridGeometry::new(width, height, config.offset)?;
        init::create_cell_area(geometry, config)
    }

    pub fn width(&self) -> u32 { self.store.geometry().width() }

    pub fn height(&self) -> u32 { self.store.geometry().height() }

    pub fn cell_size(&self) -> f32 { self.store.geometry().cell_size() }

    /// Ticks run since construction or the last `regenerate`
    pub fn tick(&self) -> u64 { self.tick }

    pub fn config(&self) -> &SimConfig { &self.config }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    // === Input ===

    /// Queue medicine at a renderer-space point; it is placed on the next tick
    pub fn inject_medicine(&self, point: [f32; 2]) -> usize {
        self.injections.inject(point)
    }

    /// Handle for queueing injections from other threads
    pub fn injector(&self) -> Injector {
        self.injections.injector()
    }

    pub fn pending_injections(&self) -> usize {
        self.injections.len()
    }

    // === Stepping ===

    /// Advance by a frame's worth of time. Returns how many ticks ran.
    pub fn on_tick(&mut self, dt: f32) -> Result<u32, SimError> {
        let due = self.clock.advance(dt);
        for _ in 0..due {
            step::step(self)?;
        }
        if self.perf_enabled {
            self.perf_stats.ticks_run = due;
        }
        Ok(due)
    }

    /// Run exactly one tick, ignoring the frame clock
    pub fn step(&mut self) -> Result<(), SimError> {
        step::step(self)
    }

    /// Throw away the population and seed a new one
    pub fn regenerate(&mut self) {
        init::regenerate(self);
    }

    // === Readback ===

    pub fn counts(&self) -> CellCounts { self.counts }

    pub fn types(&self) -> &[CellType] { self.store.types() }

    pub fn colors(&self) -> &[Color] { self.store.colors() }

    pub fn positions(&self) -> &[[f32; 2]] { self.store.positions() }

    pub fn store(&self) -> &CellStore { &self.store }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last tick's perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
