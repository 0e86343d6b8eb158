//! Phase A: turn queued injection points into travelling medicine.
//! Runs on the simulation thread before any kernel launches.

use indexmap::IndexSet;
use rand::Rng;

use crate::core::config::{FanOut, MAX_FAN_OUT};
use crate::domain::{CellStore, CellType, MedicineRecord};
use crate::spatial::NeighborTable;

#[inline]
fn fan_out_for<R: Rng>(policy: FanOut, rng: &mut R) -> usize {
    match policy {
        FanOut::Fixed(k) => k as usize,
        FanOut::Random => rng.gen_range(1..=MAX_FAN_OUT) as usize,
    }
}

/// Seed medicine around every pending origin.
///
/// Each origin spreads into the first k of its neighbor slots. A neighbor that
/// is already medicine is left alone; anything else becomes medicine heading
/// away from the origin, remembers what it was, and sits out diffusion for the
/// rest of this tick. Returns the number of cells converted.
pub(crate) fn resolve_injections<R: Rng>(
    store: &mut CellStore,
    topology: &NeighborTable,
    pending: &IndexSet<usize>,
    policy: FanOut,
    rng: &mut R,
) -> usize {
    let mut converted = 0;
    for &origin in pending {
        let k = fan_out_for(policy, rng);
        for (direction, n) in topology.neighbors(origin).iter().take(k) {
            let current = store.get_type(n);
            if current == CellType::Medicine {
                continue;
            }
            store.place_medicine(n, MedicineRecord::travelling(Some(current), direction));
            store.buffers.updated[n] = true;
            converted += 1;
        }
    }
    converted
}
