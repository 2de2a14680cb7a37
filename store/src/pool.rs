//! Share-pool storage trait.

use crate::StoreError;
use vault_types::Address;

/// Trait for storing share-pool state (per-account checkpoint histories and
/// pool-level metadata).
pub trait PoolStore {
    /// Store an account's serialized checkpoint history.
    fn put_account_history(&self, account: &Address, data: &[u8]) -> Result<(), StoreError>;

    /// Get an account's serialized checkpoint history.
    fn get_account_history(&self, account: &Address) -> Result<Option<Vec<u8>>, StoreError>;

    /// Iterate all stored account histories.
    fn iter_account_histories(&self) -> Result<Vec<(Address, Vec<u8>)>, StoreError>;

    /// Store a pool metadata entry (totals, supply history).
    fn put_meta(&self, key: &[u8], data: &[u8]) -> Result<(), StoreError>;

    /// Get a pool metadata entry.
    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
}
