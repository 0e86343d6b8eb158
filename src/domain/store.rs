//! Cell State Store - Structure of Arrays
//!
//! `CellBuffers` is the part that changes every tick and crosses the backend
//! buffer contract. `CellStore` wraps it with the derived colors and the
//! immutable renderer positions.

use std::sync::Arc;

use rand::seq::index;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::cells::{color_of, CellType, Color, MedicineRecord};
use crate::spatial::GridGeometry;

/// Per-tick mutable cell state, one entry per cell in each array
#[derive(Clone, Debug, PartialEq)]
pub struct CellBuffers {
    pub types: Vec<CellType>,
    pub medicine: Vec<MedicineRecord>,
    /// Set when a cell already acted this tick (seeded by an injection or
    /// consumed by a cure) and must not diffuse
    pub updated: Vec<bool>,
}

impl CellBuffers {
    pub fn new(size: usize, fill: CellType) -> Self {
        Self {
            types: vec![fill; size],
            medicine: vec![MedicineRecord::INACTIVE; size],
            updated: vec![false; size],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Copy another buffer set of the same size into this one
    pub fn copy_from(&mut self, other: &CellBuffers) {
        self.types.copy_from_slice(&other.types);
        self.medicine.copy_from_slice(&other.medicine);
        self.updated.copy_from_slice(&other.updated);
    }
}

pub struct CellStore {
    geometry: GridGeometry,
    pub(crate) buffers: CellBuffers,
    colors: Vec<Color>,
    /// Fixed at construction; shared with injection handles
    positions: Arc<[[f32; 2]]>,
}

impl CellStore {
    /// All-healthy grid with positions laid out from `geometry`
    pub fn new(geometry: GridGeometry) -> Self {
        let size = geometry.size();
        Self {
            geometry,
            buffers: CellBuffers::new(size, CellType::Healthy),
            colors: vec![color_of(CellType::Healthy); size],
            positions: geometry.positions().into(),
        }
    }

    #[inline]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.buffers.len()
    }

    #[inline]
    pub fn types(&self) -> &[CellType] {
        &self.buffers.types
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 2]] {
        &self.positions
    }

    pub(crate) fn shared_positions(&self) -> Arc<[[f32; 2]]> {
        Arc::clone(&self.positions)
    }

    #[inline]
    pub fn get_type(&self, idx: usize) -> CellType {
        self.buffers.types[idx]
    }

    #[inline]
    pub fn medicine(&self, idx: usize) -> &MedicineRecord {
        &self.buffers.medicine[idx]
    }

    /// Overwrite one cell. The color follows; leaving `Medicine` drops the record.
    pub fn set_type(&mut self, idx: usize, cell: CellType) {
        self.buffers.types[idx] = cell;
        if cell != CellType::Medicine {
            self.buffers.medicine[idx] = MedicineRecord::INACTIVE;
        }
        self.colors[idx] = color_of(cell);
    }

    /// Place a travelling medicine cell on top of whatever is at `idx`
    pub fn place_medicine(&mut self, idx: usize, record: MedicineRecord) {
        self.buffers.types[idx] = CellType::Medicine;
        self.buffers.medicine[idx] = record;
        self.colors[idx] = color_of(CellType::Medicine);
    }

    /// Reset every cell to `cell`
    pub fn fill(&mut self, cell: CellType) {
        self.buffers.types.fill(cell);
        self.buffers.medicine.fill(MedicineRecord::INACTIVE);
        self.buffers.updated.fill(false);
        self.colors.fill(color_of(cell));
    }

    /// Fresh grid: a random 25%..50% of the cells become cancer, the rest healthy.
    /// Returns the number of cancer cells placed.
    pub fn seed_cancer<R: Rng>(&mut self, rng: &mut R) -> usize {
        self.fill(CellType::Healthy);
        let size = self.size();
        let quarter = size / 4;
        let target = quarter + (rng.gen::<f64>() * quarter as f64) as usize;
        let target = target.min(size);

        for idx in index::sample(rng, size, target).into_iter() {
            self.buffers.types[idx] = CellType::Cancer;
            self.colors[idx] = color_of(CellType::Cancer);
        }
        target
    }

    /// Recompute every color from the committed types
    pub fn recolor(&mut self) {
        let types = &self.buffers.types;
        #[cfg(feature = "parallel")]
        {
            self.colors
                .par_iter_mut()
                .zip(types.par_iter())
                .for_each(|(color, &cell)| *color = color_of(cell));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (color, &cell) in self.colors.iter_mut().zip(types.iter()) {
                *color = color_of(cell);
            }
        }
    }
}
