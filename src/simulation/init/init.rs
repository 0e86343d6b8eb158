use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::{SimConfig, MAX_TICKS_PER_FRAME, PARTITION_COUNT, TICK_SECONDS};
use crate::core::error::SimError;
use crate::domain::CellStore;
use crate::spatial::{build_neighbor_table, GridGeometry};
use crate::systems::create_backend;

use super::fixed_step::FixedStep;
use super::injection::InjectionQueue;
use super::perf_stats::PerfStats;
use super::stats::CellCounts;
use super::CellArea;

/// Seed for runs that did not ask for one
fn clock_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().to_bits()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED)
    }
}

pub(super) fn create_cell_area(geometry: GridGeometry, config: SimConfig) -> Result<CellArea, SimError> {
    config.validate()?;

    let mut store = CellStore::new(geometry);
    let topology = build_neighbor_table(geometry.width(), geometry.height());
    let injections = InjectionQueue::new(geometry, store.shared_positions());

    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let seeded = store.seed_cancer(&mut rng);

    // A backend that cannot take the initial upload never starts the simulation.
    let mut backend = create_backend(config.backend, store.size())?;
    backend.write_buffer(&store.buffers)?;

    info!(
        "cell area {}x{} ready: backend={} seed={} cancer={}",
        geometry.width(),
        geometry.height(),
        backend.name(),
        seed,
        seeded
    );

    let counts = CellCounts::tally(store.types(), PARTITION_COUNT);
    Ok(CellArea {
        config,
        store,
        topology,
        backend,
        injections,
        rng,
        clock: FixedStep::new(TICK_SECONDS, MAX_TICKS_PER_FRAME),
        counts,
        tick: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}

/// Fresh random population on the existing grid
pub(super) fn regenerate(area: &mut CellArea) {
    area.injections.clear();
    area.clock.reset();
    let seeded = area.store.seed_cancer(&mut area.rng);
    area.counts = CellCounts::tally(area.store.types(), PARTITION_COUNT);
    area.tick = 0;
    info!("regenerated grid with {} cancer cells", seeded);
}
