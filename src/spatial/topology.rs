//! Neighbor table - static, edge-aware Moore adjacency
//!
//! Built once per grid and read-only afterwards. Corner cells keep 3
//! neighbors, edge cells 5, interior cells 8. Nothing wraps around.

use super::direction::Direction;

/// Valid neighbors of one cell, addressable by direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbors {
    slots: [u32; 8],
    mask: u8,
}

impl Neighbors {
    #[inline]
    pub fn get(&self, dir: Direction) -> Option<usize> {
        if self.mask & (1 << dir.slot()) != 0 {
            Some(self.slots[dir.slot()] as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Valid `(direction, index)` pairs in `Direction::ALL` order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.get(dir).map(|idx| (dir, idx)))
    }

    fn insert(&mut self, dir: Direction, idx: u32) {
        self.slots[dir.slot()] = idx;
        self.mask |= 1 << dir.slot();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborTable {
    width: u32,
    height: u32,
    cells: Vec<Neighbors>,
}

impl NeighborTable {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn neighbors(&self, idx: usize) -> &Neighbors {
        &self.cells[idx]
    }

    /// One step from `idx` towards `dir`, or `None` if that leaves the grid
    #[inline]
    pub fn step(&self, idx: usize, dir: Direction) -> Option<usize> {
        self.cells[idx].get(dir)
    }
}

/// Build the adjacency for a `width` x `height` grid.
///
/// A direction is kept only if the target index is inside the grid and the
/// column actually moved by the direction's dx; the second check is what
/// rejects steps that would wrap from one row's edge onto the next row.
pub fn build_neighbor_table(width: u32, height: u32) -> NeighborTable {
    let w = width as i64;
    let size = (width as usize) * (height as usize);
    let mut cells = vec![Neighbors::default(); size];

    for (idx, cell) in cells.iter_mut().enumerate() {
        let idx = idx as i64;
        let x = idx % w;
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            let target = idx + (dy as i64) * w + dx as i64;
            if target < 0 || target >= size as i64 {
                continue;
            }
            if target % w - x != dx as i64 {
                continue;
            }
            cell.insert(dir, target as u32);
        }
    }

    NeighborTable {
        width,
        height,
        cells,
    }
}
