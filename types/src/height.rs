//! Block height — the discrete logical clock of the ledger.
//!
//! Heights advance only via external events (block production is outside
//! this core's control) and are monotonically non-decreasing. All voting
//! deadlines and expiry windows compare against this counter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block height on the underlying ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// The genesis height (block zero).
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// This height advanced by `blocks`, saturating at the maximum.
    pub fn saturating_add(&self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }

    /// Blocks elapsed since `earlier` (zero if `earlier` is in the future).
    pub fn blocks_since(&self, earlier: BlockHeight) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
