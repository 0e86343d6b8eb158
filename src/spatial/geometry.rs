//! Grid geometry - dimensions, renderer-space positions, index conversion

use crate::core::config::{CELL_SIZE, GRID_HEIGHT, GRID_WIDTH};
use crate::core::error::SimError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    width: u32,
    height: u32,
    cell_size: f32,
    offset: [f32; 2],
}

impl GridGeometry {
    /// Build-time grid (200x200 debug, 400x400 release) placed at `offset`
    pub fn build_default(offset: [f32; 2]) -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            cell_size: CELL_SIZE,
            offset,
        }
    }

    pub(crate) fn new(width: u32, height: u32, offset: [f32; 2]) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidConfig(format!(
                "grid must have at least one cell, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            cell_size: CELL_SIZE,
            offset,
        })
    }

    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { (self.width as usize) * (self.height as usize) }

    #[inline]
    pub fn cell_size(&self) -> f32 { self.cell_size }

    #[inline]
    pub fn offset(&self) -> [f32; 2] { self.offset }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((idx % w) as u32, (idx / w) as u32)
    }

    /// Renderer-space position of every cell, row-major
    pub fn positions(&self) -> Vec<[f32; 2]> {
        (0..self.size())
            .map(|idx| {
                let (x, y) = self.coords(idx);
                [
                    self.offset[0] + x as f32 * self.cell_size,
                    self.offset[1] + y as f32 * self.cell_size,
                ]
            })
            .collect()
    }

    /// Cell under a renderer-space point.
    ///
    /// Picks the greatest column/row boundary <= the coordinate using the
    /// precomputed `positions`; anything outside the grid clamps to the
    /// nearest edge cell.
    pub fn grid_index(&self, positions: &[[f32; 2]], point: [f32; 2]) -> usize {
        let w = self.width as usize;
        let h = self.height as usize;
        debug_assert_eq!(positions.len(), w * h);

        let column = bucket(w, |x| positions[x][0], point[0]);
        let row = bucket(h, |y| positions[y * w][1], point[1]);
        row * w + column
    }
}

/// Index of the greatest boundary <= `value` among `count` ascending boundaries
fn bucket(count: usize, boundary: impl Fn(usize) -> f32, value: f32) -> usize {
    // Binary search over the monotonic boundaries; NaN falls into bucket 0.
    let (mut lo, mut hi) = (0usize, count);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if boundary(mid) <= value {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo.saturating_sub(1).min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> (GridGeometry, Vec<[f32; 2]>) {
        let geometry = GridGeometry::new(10, 8, [100.0, 50.0]).expect("valid geometry");
        let positions = geometry.positions();
        (geometry, positions)
    }

    #[test]
    fn positions_follow_offset_and_cell_size() {
        let (geometry, positions) = small();
        assert_eq!(positions.len(), 80);
        assert_eq!(positions[0], [100.0, 50.0]);
        assert_eq!(positions[geometry.index(3, 2)], [100.0 + 3.0 * CELL_SIZE, 50.0 + 2.0 * CELL_SIZE]);
    }

    #[test]
    fn point_inside_cell_maps_to_that_cell() {
        let (geometry, positions) = small();
        let p = positions[geometry.index(4, 5)];
        assert_eq!(geometry.grid_index(&positions, p), geometry.index(4, 5));
        let inside = [p[0] + CELL_SIZE * 0.5, p[1] + CELL_SIZE * 0.9];
        assert_eq!(geometry.grid_index(&positions, inside), geometry.index(4, 5));
    }

    #[test]
    fn out_of_range_points_clamp_to_edges() {
        let (geometry, positions) = small();
        assert_eq!(geometry.grid_index(&positions, [-1000.0, -1000.0]), 0);
        assert_eq!(geometry.grid_index(&positions, [1e6, 1e6]), geometry.index(9, 7));
        assert_eq!(geometry.grid_index(&positions, [1e6, 50.0]), geometry.index(9, 0));
        assert_eq!(geometry.grid_index(&positions, [0.0, 1e6]), geometry.index(0, 7));
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(GridGeometry::new(0, 10, [0.0, 0.0]).is_err());
        assert!(GridGeometry::new(10, 0, [0.0, 0.0]).is_err());
    }
}
