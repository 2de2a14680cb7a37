//! Fundamental types for the StakeVault protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, amounts, the block-height clock, and the capability
//! traits at the system's boundaries (asset token, balance snapshots,
//! proposal execution).

pub mod address;
pub mod amount;
pub mod error;
pub mod height;
pub mod traits;

pub use address::Address;
pub use amount::{AssetAmount, ShareAmount, RATE_SCALE};
pub use error::AssetError;
pub use height::BlockHeight;
pub use traits::{AssetToken, BalanceSnapshot, Executor};
