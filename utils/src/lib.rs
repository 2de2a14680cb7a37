//! Shared utilities for the StakeVault protocol.

pub mod logging;
pub mod math;

pub use math::{ceil_div, mul_div_floor};
