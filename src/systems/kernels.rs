//! Per-cell kernels for the transition and diffusion phases
//!
//! Every kernel computes exactly one output slot from an immutable input
//! snapshot. A cell never writes anywhere but its own slot, which is what lets
//! any backend split the grid however it likes: effects that look like
//! "writing a neighbor" (a cure consuming medicine, medicine arriving) are
//! pulled by the affected cell instead of pushed by the cause.

use std::fmt;

use crate::domain::{CellBuffers, CellType, MedicineRecord};
use crate::spatial::{Direction, NeighborTable};

/// Cancer neighbors needed to turn a healthy cell
pub const CANCER_THRESHOLD: usize = 6;
/// Medicine neighbors needed to cure a cancer cell
pub const CURE_THRESHOLD: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// Phase B: cancer spread and cure
    Transition,
    /// Phase C: medicine travel
    Diffusion,
}

impl Kernel {
    pub const fn name(self) -> &'static str {
        match self {
            Kernel::Transition => "transition_cells",
            Kernel::Diffusion => "diffuse_medicine",
        }
    }

    /// Run this kernel for one work item
    #[inline]
    pub fn run(self, idx: usize, input: &CellBuffers, topology: &NeighborTable) -> CellSlot {
        match self {
            Kernel::Transition => transition_cell(idx, input, topology),
            Kernel::Diffusion => diffuse_cell(idx, input, topology),
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One work item's output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSlot {
    pub cell: CellType,
    pub medicine: MedicineRecord,
    pub updated: bool,
}

impl CellSlot {
    #[inline]
    fn of(input: &CellBuffers, idx: usize) -> Self {
        Self {
            cell: input.types[idx],
            medicine: input.medicine[idx],
            updated: input.updated[idx],
        }
    }

    #[inline]
    fn plain(cell: CellType, updated: bool) -> Self {
        Self {
            cell,
            medicine: MedicineRecord::INACTIVE,
            updated,
        }
    }
}

#[inline]
fn count_neighbors(input: &CellBuffers, topology: &NeighborTable, idx: usize, kind: CellType) -> usize {
    topology
        .neighbors(idx)
        .iter()
        .filter(|&(_, n)| input.types[n] == kind)
        .count()
}

/// A cancer cell with enough medicine around it to be cured this tick
#[inline]
fn is_cured(input: &CellBuffers, topology: &NeighborTable, idx: usize) -> bool {
    input.types[idx] == CellType::Cancer
        && count_neighbors(input, topology, idx, CellType::Medicine) >= CURE_THRESHOLD
}

/// Phase B for one cell.
///
/// Healthy turns cancer at >= 6 cancer neighbors, cancer turns healthy at >= 6
/// medicine neighbors. Medicine next to a cured cancer cell is consumed: it
/// becomes healthy and is flagged so it does not travel this tick.
pub fn transition_cell(idx: usize, input: &CellBuffers, topology: &NeighborTable) -> CellSlot {
    let current = CellSlot::of(input, idx);
    match current.cell {
        CellType::Healthy => {
            if count_neighbors(input, topology, idx, CellType::Cancer) >= CANCER_THRESHOLD {
                CellSlot::plain(CellType::Cancer, current.updated)
            } else {
                current
            }
        }
        CellType::Cancer => {
            if is_cured(input, topology, idx) {
                CellSlot::plain(CellType::Healthy, current.updated)
            } else {
                current
            }
        }
        CellType::Medicine => {
            let consumed = topology
                .neighbors(idx)
                .iter()
                .any(|(_, n)| is_cured(input, topology, n));
            if consumed {
                CellSlot::plain(CellType::Healthy, true)
            } else {
                current
            }
        }
    }
}

/// Where the medicine at `idx` travels this tick, if it does
#[inline]
fn departure(input: &CellBuffers, topology: &NeighborTable, idx: usize) -> Option<usize> {
    if input.types[idx] != CellType::Medicine || input.updated[idx] {
        return None;
    }
    let record = &input.medicine[idx];
    if !record.active {
        return None;
    }
    topology.step(idx, record.direction)
}

/// Phase C for one cell.
///
/// Outgoing: travelling medicine leaves and the cell reverts to what the
/// medicine was sitting on. Medicine whose next step leaves the grid stays put.
/// Incoming: the first sender in `Direction::ALL` order whose step lands here
/// moves in, recording this cell's content underneath it; later senders are
/// absorbed.
pub fn diffuse_cell(idx: usize, input: &CellBuffers, topology: &NeighborTable) -> CellSlot {
    let mut cell = input.types[idx];
    let mut record = input.medicine[idx];

    if departure(input, topology, idx).is_some() {
        if let Some(previous) = record.previous_type.filter(|&p| p != CellType::Medicine) {
            cell = previous;
        }
        record = MedicineRecord::INACTIVE;
    }

    let arrival = Direction::ALL.into_iter().find(|&dir| {
        topology
            .step(idx, dir.opposite())
            .is_some_and(|sender| departure(input, topology, sender) == Some(idx))
    });

    if let Some(direction) = arrival {
        let underneath = if cell == CellType::Medicine {
            record.previous_type
        } else {
            Some(cell)
        };
        cell = CellType::Medicine;
        record = MedicineRecord::travelling(underneath, direction);
    }

    CellSlot {
        cell,
        medicine: record,
        updated: false,
    }
}
