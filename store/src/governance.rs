//! Governance storage trait.

use crate::StoreError;

/// Trait for storing governance state (the append-only proposal table and
/// registry metadata).
pub trait GovernanceStore {
    /// Store a serialized proposal under its id.
    fn put_proposal(&self, id: u64, data: &[u8]) -> Result<(), StoreError>;

    /// Get a serialized proposal by id.
    fn get_proposal(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError>;

    /// Number of stored proposals.
    fn proposal_count(&self) -> Result<u64, StoreError>;

    /// Store a registry metadata entry (params, registry address).
    fn put_meta(&self, key: &[u8], data: &[u8]) -> Result<(), StoreError>;

    /// Get a registry metadata entry.
    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
}
