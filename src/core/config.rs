//! Build-time constants and the runtime `SimConfig`
//!
//! Grid geometry is fixed at build time: a smaller grid in debug builds keeps
//! iteration fast, release builds use the full 400x400 field.

use serde::{Deserialize, Serialize};

use super::error::SimError;

#[cfg(debug_assertions)]
pub const GRID_WIDTH: u32 = 200;
#[cfg(debug_assertions)]
pub const GRID_HEIGHT: u32 = 200;

#[cfg(not(debug_assertions))]
pub const GRID_WIDTH: u32 = 400;
#[cfg(not(debug_assertions))]
pub const GRID_HEIGHT: u32 = 400;

/// Size of one cell in renderer units (also the point size used to draw it)
pub const CELL_SIZE: f32 = 2.5;

/// Number of contiguous row-major slices the partition pool splits the grid into
pub const PARTITION_COUNT: usize = 4;

/// Fixed virtual duration of one simulation tick (30 ticks per second)
pub const TICK_SECONDS: f32 = 1.0 / 30.0;

/// Catch-up cap: a long frame never runs more than this many ticks
pub const MAX_TICKS_PER_FRAME: u32 = 8;

/// Largest fan-out a single injection can seed (one per Moore direction)
pub const MAX_FAN_OUT: u8 = 8;

/// Which compute strategy executes the per-tick kernels
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Fixed pool: one worker per contiguous partition
    #[default]
    PartitionPool,
    /// One work item per cell, separate launch per phase
    Offload,
}

/// How many neighbor directions an injection seeds
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FanOut {
    /// Uniform draw in `1..=8` per injection
    #[default]
    Random,
    /// Always seed this many directions
    Fixed(u8),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Compute strategy for the transition and diffusion phases.
    pub backend: BackendKind,
    /// Injection fan-out policy.
    pub fan_out: FanOut,
    /// Placement offset of cell (0, 0) in renderer space.
    pub offset: [f32; 2],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            backend: BackendKind::PartitionPool,
            fan_out: FanOut::Random,
            offset: [0.0, 0.0],
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if let FanOut::Fixed(k) = self.fan_out {
            if k == 0 || k > MAX_FAN_OUT {
                return Err(SimError::InvalidConfig(format!(
                    "fixed fan-out must be within 1..={MAX_FAN_OUT}, got {k}"
                )));
            }
        }
        if !self.offset.iter().all(|v| v.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "offset must be finite, got {:?}",
                self.offset
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = SimConfig::from_json("{}").expect("empty object should parse");
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn json_fields_parse_in_snake_case() {
        let json = r#"{"seed": 9, "backend": "offload", "fan_out": {"fixed": 3}, "offset": [4.0, -2.5]}"#;
        let config = SimConfig::from_json(json).expect("config should parse");
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.backend, BackendKind::Offload);
        assert_eq!(config.fan_out, FanOut::Fixed(3));
        assert_eq!(config.offset, [4.0, -2.5]);
    }

    #[test]
    fn fixed_fan_out_out_of_range_is_rejected() {
        let err = SimConfig::from_json(r#"{"fan_out": {"fixed": 9}}"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));

        let err = SimConfig::from_json(r#"{"fan_out": {"fixed": 0}}"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SimConfig::from_json("{seed:").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse(_)));
    }
}
