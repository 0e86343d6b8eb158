use thiserror::Error;

/// Failures raised by a compute backend. All of them are fatal at init.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("compute backend `{backend}` unavailable: {reason}")]
    Unavailable { backend: &'static str, reason: String },
    #[error("partition count {partitions} is invalid for a grid of {cells} cells")]
    InvalidPartitionCount { partitions: usize, cells: usize },
    #[error("kernel `{kernel}` dispatched with {actual} work items, device holds {expected}")]
    WorkSizeMismatch {
        kernel: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("host buffer of {actual} cells does not match device allocation of {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
