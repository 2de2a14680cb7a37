//! Share-pool accounting for the StakeVault protocol.
//!
//! Deposits mint shares at the running exchange rate, withdrawals burn them,
//! and direct asset contributions to the vault's address raise the rate for
//! every holder without minting. All conversions truncate toward zero — the
//! pool keeps the dust, a depositor can never extract more than they put in.
//!
//! Share balances are checkpointed per block height so governance can weigh
//! votes against historical balances.

pub mod asset;
pub mod checkpoint;
pub mod error;
pub mod executor;
pub mod pool;

pub use asset::AssetLedger;
pub use checkpoint::CheckpointHistory;
pub use error::PoolError;
pub use executor::VaultExecutor;
pub use pool::SharePool;
