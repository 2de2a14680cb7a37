//! Governance parameters — self-amending configuration.
//!
//! There is no public setter: the only mutation path is an executed proposal
//! whose call targets the registry itself, carrying an encoded [`ParamCall`].

use serde::{Deserialize, Serialize};

/// The three governance tunables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    voting_period_blocks: u64,
    expiration_offset_blocks: u64,
    minimum_participation_bps: u32,
}

impl GovernanceParams {
    pub fn new(
        voting_period_blocks: u64,
        expiration_offset_blocks: u64,
        minimum_participation_bps: u32,
    ) -> Self {
        Self {
            voting_period_blocks,
            expiration_offset_blocks,
            minimum_participation_bps,
        }
    }

    /// Blocks from a proposal's creation until its voting deadline.
    pub fn voting_period_blocks(&self) -> u64 {
        self.voting_period_blocks
    }

    /// Blocks from the voting deadline until the proposal expires.
    pub fn expiration_offset_blocks(&self) -> u64 {
        self.expiration_offset_blocks
    }

    /// Minimum participation as basis points of the supply snapshot.
    pub fn minimum_participation_bps(&self) -> u32 {
        self.minimum_participation_bps
    }

    /// Apply an executed self-call. Crate-private: only proposal execution
    /// reaches this.
    pub(crate) fn apply(&mut self, call: &ParamCall) {
        match call {
            ParamCall::SetMinimumParticipation(bps) => self.minimum_participation_bps = *bps,
            ParamCall::SetVotingPeriod(blocks) => self.voting_period_blocks = *blocks,
            ParamCall::SetExpirationOffset(blocks) => self.expiration_offset_blocks = *blocks,
        }
    }
}

/// Defaults: 100-block voting window, 1000-block execution window, 30% quorum.
impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            voting_period_blocks: 100,
            expiration_offset_blocks: 1000,
            minimum_participation_bps: 3000,
        }
    }
}

/// Payload of a proposal call that targets the registry itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamCall {
    SetMinimumParticipation(u32),
    SetVotingPeriod(u64),
    SetExpirationOffset(u64),
}

impl ParamCall {
    /// Serialize for embedding in a proposal's call data.
    pub fn encode(&self) -> Vec<u8> {
        bincode::serialize(self).unwrap_or_default()
    }

    /// Decode a self-call payload; `None` if malformed.
    pub fn decode(data: &[u8]) -> Option<Self> {
        bincode::deserialize(data).ok()
    }
}
