//! Spatial layer - grid geometry, Moore directions and the neighbor table

pub mod direction;
pub mod geometry;
pub mod topology;

pub use direction::Direction;
pub use geometry::GridGeometry;
pub use topology::{build_neighbor_table, NeighborTable, Neighbors};
