use crate::core::config::PARTITION_COUNT;
use crate::core::error::SimError;
use crate::domain::{CellType, MedicineRecord};
use crate::systems::{Completion, Kernel};

use super::perf_timer::{elapsed_or_zero, PerfTimer};
use super::phase_injection::resolve_injections;
use super::stats::CellCounts;
use super::CellArea;

/// Upload the committed state, run one kernel over every cell, read it back
fn run_kernel(area: &mut CellArea, kernel: Kernel) -> Result<Completion, SimError> {
    let work_items = area.store.size();
    area.backend.write_buffer(&area.store.buffers)?;
    let done = area.backend.dispatch(kernel, work_items, &area.topology)?;
    area.backend.read_buffer(&mut area.store.buffers)?;
    Ok(done)
}

/// Bytes held by the host arrays and the backend's input/output copies
fn memory_estimate(cells: usize) -> u32 {
    let buffers = std::mem::size_of::<CellType>()
        + std::mem::size_of::<MedicineRecord>()
        + std::mem::size_of::<bool>();
    let host_only = std::mem::size_of::<[f32; 4]>() + std::mem::size_of::<[f32; 2]>();
    (cells * (3 * buffers + host_only)).min(u32::MAX as usize) as u32
}

pub(super) fn step(area: &mut CellArea) -> Result<(), SimError> {
    let perf_on = area.perf_enabled;
    if perf_on {
        area.perf_stats.reset();
        area.perf_stats.grid_size = area.store.size() as u32;
        area.perf_stats.memory_bytes = memory_estimate(area.store.size());
    }
    let step_start = PerfTimer::start_if(perf_on);

    // === Phase A: injections ===
    let t0 = PerfTimer::start_if(perf_on);
    let pending = area.injections.drain();
    let converted = if pending.is_empty() {
        0
    } else {
        resolve_injections(
            &mut area.store,
            &area.topology,
            &pending,
            area.config.fan_out,
            &mut area.rng,
        )
    };
    let injection_ms = elapsed_or_zero(t0);

    // === Phase B: transition ===
    let t0 = PerfTimer::start_if(perf_on);
    let transition = run_kernel(area, Kernel::Transition)?;
    let transition_ms = elapsed_or_zero(t0);

    // === Phase C: diffusion ===
    let t0 = PerfTimer::start_if(perf_on);
    let diffusion = run_kernel(area, Kernel::Diffusion)?;
    let diffusion_ms = elapsed_or_zero(t0);

    // === Phase D: commit ===
    let t0 = PerfTimer::start_if(perf_on);
    area.store.recolor();
    let commit_ms = elapsed_or_zero(t0);

    let t0 = PerfTimer::start_if(perf_on);
    area.counts = CellCounts::tally(area.store.types(), PARTITION_COUNT);
    let stats_ms = elapsed_or_zero(t0);

    debug_assert_eq!(area.counts.total(), area.store.size());
    area.tick += 1;

    if perf_on {
        let perf = &mut area.perf_stats;
        perf.injection_ms = injection_ms;
        perf.transition_ms = transition_ms;
        perf.diffusion_ms = diffusion_ms;
        perf.commit_ms = commit_ms;
        perf.stats_ms = stats_ms;
        perf.injections_drained = pending.len() as u32;
        perf.cells_injected = converted as u32;
        perf.kernel_launches = (transition.launches + diffusion.launches) as u32;
        perf.step_ms = elapsed_or_zero(step_start);
    }
    Ok(())
}
