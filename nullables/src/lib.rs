//! Nullable infrastructure for deterministic testing.
//!
//! Each nullable is a fully functional in-memory stand-in for an external
//! collaborator: the block-height clock, the pooled asset token, the
//! proposal executor, and the storage backend. No wall clock, no I/O.

pub mod asset;
pub mod chain;
pub mod executor;
pub mod store;

pub use asset::NullAsset;
pub use chain::NullChain;
pub use executor::{ExecutedCall, NullExecutor};
pub use store::NullStore;
