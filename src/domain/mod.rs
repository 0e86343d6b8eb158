//! Domain - cell kinds, medicine bookkeeping and the cell state store

pub mod cells;
pub mod store;

pub use cells::{color_of, CellType, Color, MedicineRecord};
pub use store::{CellBuffers, CellStore};
