//! Population counts, derived from the committed cell types after each tick

use std::iter::Sum;
use std::ops::Add;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::domain::CellType;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CellCounts {
    pub cancer: usize,
    pub healthy: usize,
    pub medicine: usize,
}

impl CellCounts {
    #[inline]
    pub fn total(&self) -> usize {
        self.cancer + self.healthy + self.medicine
    }

    #[inline]
    fn record(mut self, cell: CellType) -> Self {
        match cell {
            CellType::Cancer => self.cancer += 1,
            CellType::Healthy => self.healthy += 1,
            CellType::Medicine => self.medicine += 1,
        }
        self
    }

    fn of_slice(types: &[CellType]) -> Self {
        types.iter().fold(Self::default(), |acc, &cell| acc.record(cell))
    }

    /// Count `types` split into `partitions` contiguous slices, then sum the
    /// per-slice counts
    pub fn tally(types: &[CellType], partitions: usize) -> Self {
        let len = types.len().div_ceil(partitions.max(1)).max(1);
        #[cfg(feature = "parallel")]
        {
            types
                .par_chunks(len)
                .map(Self::of_slice)
                .reduce(Self::default, |a, b| a + b)
        }
        #[cfg(not(feature = "parallel"))]
        {
            types.chunks(len).map(Self::of_slice).sum()
        }
    }
}

impl Add for CellCounts {
    type Output = CellCounts;

    fn add(self, rhs: CellCounts) -> CellCounts {
        CellCounts {
            cancer: self.cancer + rhs.cancer,
            healthy: self.healthy + rhs.healthy,
            medicine: self.medicine + rhs.medicine,
        }
    }
}

impl Sum for CellCounts {
    fn sum<I: Iterator<Item = CellCounts>>(iter: I) -> CellCounts {
        iter.fold(CellCounts::default(), Add::add)
    }
}
