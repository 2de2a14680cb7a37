//! Abstract storage traits for the StakeVault protocol.
//!
//! Every storage backend (embedded database, in-memory for testing)
//! implements these traits. The engines depend only on the traits and
//! serialize their own state to bytes.

pub mod error;
pub mod governance;
pub mod pool;

pub use error::StoreError;
pub use governance::GovernanceStore;
pub use pool::PoolStore;
