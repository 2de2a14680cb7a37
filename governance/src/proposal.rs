//! Governance proposals and their ballots.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vault_types::{Address, AssetAmount, BlockHeight, ShareAmount};

/// A voter's choice on a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    Yes,
    No,
}

/// A cast ballot. The recorded weight is immutable after first cast —
/// re-voting moves it between tallies but never re-derives it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub choice: VoteChoice,
    pub weight: ShareAmount,
}

/// Lifecycle of a proposal, derived from height and the executed flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Ballots may still be cast or changed.
    Voting,
    /// Voting is over; the proposal awaits execution.
    PendingExecution,
    /// Terminal: the authorized call was performed.
    Executed,
    /// Terminal: the execution window closed without execution.
    Expired,
}

/// A governance proposal — an authorized external call plus its vote state.
///
/// Proposals are append-only and never deleted; after finalization they
/// remain as an immutable historical record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    /// Monotonically assigned identifier.
    pub id: u64,
    /// Who proposed it.
    pub proposer: Address,
    /// Call target; the registry's own address makes this a parameter change.
    pub target: Address,
    /// Asset value forwarded from the vault's reserves.
    pub value: AssetAmount,
    /// Opaque call payload.
    pub data: Vec<u8>,
    /// Free-form metadata, not interpreted by the registry.
    pub extra: Vec<u8>,
    /// Height the proposal was created at; ballots are weighed here.
    pub creation_height: BlockHeight,
    /// First height at which voting is closed.
    pub voting_deadline_height: BlockHeight,
    /// First height at which the proposal is expired (boundary exclusive).
    pub expiration_height: BlockHeight,
    /// Set exactly once, by successful execution.
    pub executed: bool,
    pub yes_weight: ShareAmount,
    pub no_weight: ShareAmount,
    /// Total share supply at creation — the quorum base. Never recomputed.
    pub total_supply_snapshot: ShareAmount,
    /// One ballot per voter.
    pub ballots: HashMap<Address, Ballot>,
}

impl Proposal {
    /// Status as of `now`.
    pub fn status(&self, now: BlockHeight) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else if now < self.voting_deadline_height {
            ProposalStatus::Voting
        } else if now < self.expiration_height {
            ProposalStatus::PendingExecution
        } else {
            ProposalStatus::Expired
        }
    }

    /// The running tally for one choice.
    pub fn tally(&self, choice: VoteChoice) -> ShareAmount {
        match choice {
            VoteChoice::Yes => self.yes_weight,
            VoteChoice::No => self.no_weight,
        }
    }
}
