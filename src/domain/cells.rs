//! Cell kinds and per-cell medicine metadata

use serde::{Deserialize, Serialize};

use crate::spatial::Direction;

/// RGBA, each channel in `0.0..=1.0`
pub type Color = [f32; 4];

pub const COLOR_CANCER: Color = [0.75, 0.0, 0.0, 1.0];
pub const COLOR_HEALTHY: Color = [0.0, 1.0, 0.0, 1.0];
pub const COLOR_MEDICINE: Color = [1.0, 1.0, 0.0, 1.0];

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Cancer = 0,
    Healthy = 1,
    Medicine = 2,
}

impl CellType {
    #[inline]
    pub fn color(self) -> Color {
        color_of(self)
    }
}

/// Color is a pure function of the cell type
#[inline]
pub fn color_of(cell: CellType) -> Color {
    match cell {
        CellType::Cancer => COLOR_CANCER,
        CellType::Healthy => COLOR_HEALTHY,
        CellType::Medicine => COLOR_MEDICINE,
    }
}

/// Travel state of a medicine cell.
///
/// Only meaningful while the owning cell is `Medicine`. `previous_type` is
/// whatever the medicine is sitting on and gets restored when it moves on;
/// `None` means nothing was recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineRecord {
    pub active: bool,
    pub previous_type: Option<CellType>,
    pub direction: Direction,
}

impl MedicineRecord {
    pub const INACTIVE: MedicineRecord = MedicineRecord {
        active: false,
        previous_type: None,
        direction: Direction::East,
    };

    #[inline]
    pub fn travelling(previous_type: Option<CellType>, direction: Direction) -> Self {
        Self {
            active: true,
            previous_type,
            direction,
        }
    }
}
