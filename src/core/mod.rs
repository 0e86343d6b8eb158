//! Core - build constants, runtime configuration, errors and logging
//!
//! Everything else in the crate depends on this module; it depends on nothing
//! else in the crate.

pub mod config;
pub mod error;
pub mod logging;
