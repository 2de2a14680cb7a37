//! Append-only balance checkpoints with lookup by block height.

use serde::{Deserialize, Serialize};
use vault_types::BlockHeight;

/// A single `(height, value)` checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub height: BlockHeight,
    pub value: u128,
}

/// An append-only list of checkpoints for one tracked quantity.
///
/// Heights are strictly increasing; recording at the latest height again
/// overwrites that checkpoint (several mutations in one block collapse into
/// one entry, matching one-block-one-state semantics).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CheckpointHistory {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` as of `height`.
    pub fn record(&mut self, height: BlockHeight, value: u128) {
        if let Some(last) = self.checkpoints.last_mut() {
            debug_assert!(height >= last.height, "checkpoint heights must not decrease");
            if last.height == height {
                last.value = value;
                return;
            }
        }
        self.checkpoints.push(Checkpoint { height, value });
    }

    /// The value as of `height`: the latest checkpoint at or before it.
    ///
    /// Zero if no checkpoint exists that early — an account that had not
    /// yet deposited had no shares.
    pub fn value_at(&self, height: BlockHeight) -> u128 {
        let idx = self.checkpoints.partition_point(|c| c.height <= height);
        if idx == 0 {
            0
        } else {
            self.checkpoints[idx - 1].value
        }
    }

    /// The current (most recently recorded) value.
    pub fn latest(&self) -> u128 {
        self.checkpoints.last().map(|c| c.value).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}
