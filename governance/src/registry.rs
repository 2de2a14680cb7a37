//! The proposal registry — governance state machine over the proposal table.

use crate::error::GovernanceError;
use crate::params::{GovernanceParams, ParamCall};
use crate::proposal::{Ballot, Proposal, VoteChoice};
use std::collections::HashMap;
use vault_store::GovernanceStore;
use vault_types::{Address, AssetAmount, BalanceSnapshot, BlockHeight, Executor, ShareAmount};
use vault_utils::ceil_div;

/// Revert reason for `add_proposal` by an account without shares.
const REASON_NO_BALANCE: &str = "token balance is required to perform this operation";
/// Revert reason for a vote by an account without shares at creation.
const REASON_NO_WEIGHT_AT_CREATION: &str = "not enough tokens at the moment of proposal creation";

/// Notification emitted by the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GovernanceEvent {
    NewProposal {
        id: u64,
        proposer: Address,
        target: Address,
        value: AssetAmount,
    },
}

/// Result of the approval check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApprovalStatus {
    pub approved: bool,
    pub executed: bool,
}

/// Stores proposals and their vote tallies, and drives them through
/// voting, approval, and execution.
///
/// Vote weight comes from the [`BalanceSnapshot`] capability at each
/// proposal's creation height; the registry consumes the snapshot, it does
/// not own it. Calls targeting the registry's own address are parameter
/// amendments.
pub struct ProposalRegistry {
    address: Address,
    params: GovernanceParams,
    proposals: Vec<Proposal>,
    events: Vec<GovernanceEvent>,
}

impl ProposalRegistry {
    pub fn new(address: Address, params: GovernanceParams) -> Self {
        Self {
            address,
            params,
            proposals: Vec::new(),
            events: Vec::new(),
        }
    }

    /// The registry's own address — proposals targeting it amend the params.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Current governance parameters.
    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    /// Number of proposals ever created.
    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// Look up a proposal by id.
    pub fn proposal(&self, id: u64) -> Result<&Proposal, GovernanceError> {
        self.proposals
            .get(id as usize)
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    /// Take all pending notifications.
    pub fn drain_events(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Create a proposal authorizing one external call.
    ///
    /// Requires the proposer to hold shares right now; the voting deadline
    /// and expiry are stamped from the current params, and the quorum base
    /// is snapshotted from the current total supply.
    pub fn add_proposal(
        &mut self,
        proposer: &Address,
        target: Address,
        value: AssetAmount,
        data: Vec<u8>,
        extra: Vec<u8>,
        now: BlockHeight,
        snapshot: &dyn BalanceSnapshot,
    ) -> Result<u64, GovernanceError> {
        if snapshot.balance_at(proposer, now).is_zero() {
            return Err(GovernanceError::Unauthorized(REASON_NO_BALANCE));
        }
        let id = self.proposals.len() as u64;
        let voting_deadline_height = now.saturating_add(self.params.voting_period_blocks());
        let expiration_height =
            voting_deadline_height.saturating_add(self.params.expiration_offset_blocks());
        let total_supply_snapshot = snapshot.total_supply_at(now);

        self.proposals.push(Proposal {
            id,
            proposer: proposer.clone(),
            target: target.clone(),
            value,
            data,
            extra,
            creation_height: now,
            voting_deadline_height,
            expiration_height,
            executed: false,
            yes_weight: ShareAmount::ZERO,
            no_weight: ShareAmount::ZERO,
            total_supply_snapshot,
            ballots: HashMap::new(),
        });
        self.events.push(GovernanceEvent::NewProposal {
            id,
            proposer: proposer.clone(),
            target: target.clone(),
            value,
        });

        tracing::info!(
            id,
            proposer = %proposer,
            target = %target,
            value = value.raw(),
            deadline = %voting_deadline_height,
            expiration = %expiration_height,
            supply_snapshot = total_supply_snapshot.raw(),
            "new proposal"
        );
        Ok(id)
    }

    /// Cast or change a ballot.
    ///
    /// Weight is the voter's balance at the proposal's creation height —
    /// fixed there regardless of later deposits or withdrawals. Re-voting
    /// retracts the prior ballot's recorded weight from its old tally before
    /// applying it to the new choice; repeating the same choice is a no-op
    /// on the net tally.
    pub fn vote(
        &mut self,
        voter: &Address,
        id: u64,
        support: bool,
        now: BlockHeight,
        snapshot: &dyn BalanceSnapshot,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(id as usize)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if now >= proposal.voting_deadline_height {
            return Err(GovernanceError::VotingClosed);
        }
        let weight_at_creation = snapshot.balance_at(voter, proposal.creation_height);
        if weight_at_creation.is_zero() {
            return Err(GovernanceError::Unauthorized(REASON_NO_WEIGHT_AT_CREATION));
        }
        let choice = if support {
            VoteChoice::Yes
        } else {
            VoteChoice::No
        };

        // Retract-then-apply. The recorded weight never changes after the
        // first cast, so retraction is exact.
        let weight = match proposal.ballots.get(voter).copied() {
            Some(prev) => {
                match prev.choice {
                    VoteChoice::Yes => {
                        proposal.yes_weight = proposal
                            .yes_weight
                            .checked_sub(prev.weight)
                            .ok_or(GovernanceError::Overflow)?;
                    }
                    VoteChoice::No => {
                        proposal.no_weight = proposal
                            .no_weight
                            .checked_sub(prev.weight)
                            .ok_or(GovernanceError::Overflow)?;
                    }
                }
                prev.weight
            }
            None => weight_at_creation,
        };
        match choice {
            VoteChoice::Yes => {
                proposal.yes_weight = proposal
                    .yes_weight
                    .checked_add(weight)
                    .ok_or(GovernanceError::Overflow)?;
            }
            VoteChoice::No => {
                proposal.no_weight = proposal
                    .no_weight
                    .checked_add(weight)
                    .ok_or(GovernanceError::Overflow)?;
            }
        }
        proposal.ballots.insert(voter.clone(), Ballot { choice, weight });

        tracing::debug!(
            id,
            voter = %voter,
            support,
            weight = weight.raw(),
            yes = proposal.yes_weight.raw(),
            no = proposal.no_weight.raw(),
            "vote"
        );
        Ok(())
    }

    /// The running tally for one side.
    pub fn votes(&self, id: u64, support: bool) -> Result<ShareAmount, GovernanceError> {
        let proposal = self.proposal(id)?;
        Ok(proposal.tally(if support {
            VoteChoice::Yes
        } else {
            VoteChoice::No
        }))
    }

    /// A voter's current choice, if they have a ballot.
    pub fn vote_of(
        &self,
        voter: &Address,
        id: u64,
    ) -> Result<Option<VoteChoice>, GovernanceError> {
        Ok(self.proposal(id)?.ballots.get(voter).map(|b| b.choice))
    }

    /// Whether the proposal has majority and quorum, and whether it has
    /// already executed.
    pub fn is_proposal_approved(&self, id: u64) -> Result<ApprovalStatus, GovernanceError> {
        let proposal = self.proposal(id)?;
        let (majority, quorum_met) = self.approval_parts(proposal)?;
        Ok(ApprovalStatus {
            approved: majority && quorum_met,
            executed: proposal.executed,
        })
    }

    /// Perform the authorized call of an approved proposal.
    ///
    /// Checks, in order: the voting window must be over, the expiry window
    /// still open, the proposal not yet executed, and the vote approved —
    /// majority failure and quorum failure are distinct errors. The executed
    /// flag is set before the outbound call; a failed call restores it and
    /// the whole operation surfaces as `ExecutionFailed`.
    pub fn execute_transaction(
        &mut self,
        id: u64,
        now: BlockHeight,
        executor: &mut dyn Executor,
    ) -> Result<(), GovernanceError> {
        let proposal = self.proposal(id)?;
        if now < proposal.voting_deadline_height {
            return Err(GovernanceError::VotingStillActive);
        }
        if now >= proposal.expiration_height {
            return Err(GovernanceError::ProposalExpired);
        }
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted);
        }
        let (majority, quorum_met) = self.approval_parts(proposal)?;
        if !majority {
            return Err(GovernanceError::NotApproved);
        }
        if !quorum_met {
            return Err(GovernanceError::InsufficientParticipation);
        }

        let idx = id as usize;
        let (target, value, data) = {
            let p = &self.proposals[idx];
            (p.target.clone(), p.value, p.data.clone())
        };

        // State before call: the flag flips first, and is restored if the
        // call fails so the operation stays atomic as a unit.
        self.proposals[idx].executed = true;
        let outcome = if target == self.address {
            match ParamCall::decode(&data) {
                Some(call) => {
                    self.params.apply(&call);
                    tracing::info!(id, ?call, "governance parameters amended");
                    Ok(())
                }
                None => Err(format!(
                    "malformed parameter call: 0x{}",
                    hex::encode(&data)
                )),
            }
        } else {
            executor
                .execute(&target, value, &data)
                .map_err(|e| e.to_string())
        };
        if let Err(reason) = outcome {
            self.proposals[idx].executed = false;
            return Err(GovernanceError::ExecutionFailed(reason));
        }

        tracing::info!(id, target = %target, value = value.raw(), "proposal executed");
        Ok(())
    }

    /// Majority and quorum, evaluated separately so callers can tell the
    /// failure modes apart.
    fn approval_parts(&self, proposal: &Proposal) -> Result<(bool, bool), GovernanceError> {
        let yes = proposal.yes_weight;
        let no = proposal.no_weight;
        let participation = yes.checked_add(no).ok_or(GovernanceError::Overflow)?;

        let required = (self.params.minimum_participation_bps() as u128)
            .checked_mul(proposal.total_supply_snapshot.raw())
            .and_then(|product| ceil_div(product, 10_000))
            .ok_or(GovernanceError::Overflow)?;

        // Strict majority: a tie is not approved.
        Ok((yes > no, participation.raw() >= required))
    }
}

const META_REGISTRY_ADDRESS: &[u8] = b"registry_address";
const META_PARAMS: &[u8] = b"params";

impl ProposalRegistry {
    /// Persist all registry state to a store.
    pub fn save_to_store(&self, store: &dyn GovernanceStore) -> Result<(), GovernanceError> {
        store
            .put_meta(META_REGISTRY_ADDRESS, self.address.as_str().as_bytes())
            .map_err(|e| GovernanceError::Other(e.to_string()))?;
        let params_bytes = bincode::serialize(&self.params)
            .map_err(|e| GovernanceError::Other(e.to_string()))?;
        store
            .put_meta(META_PARAMS, &params_bytes)
            .map_err(|e| GovernanceError::Other(e.to_string()))?;

        for proposal in &self.proposals {
            let bytes = bincode::serialize(proposal)
                .map_err(|e| GovernanceError::Other(e.to_string()))?;
            store
                .put_proposal(proposal.id, &bytes)
                .map_err(|e| GovernanceError::Other(e.to_string()))?;
        }
        Ok(())
    }

    /// Restore registry state from a store.
    pub fn load_from_store(store: &dyn GovernanceStore) -> Result<Self, GovernanceError> {
        let address = match store.get_meta(META_REGISTRY_ADDRESS) {
            Ok(Some(bytes)) => Address::new(
                String::from_utf8(bytes)
                    .map_err(|e| GovernanceError::Other(e.to_string()))?,
            ),
            Ok(None) => {
                return Err(GovernanceError::Other(
                    "no registry address in store".to_string(),
                ))
            }
            Err(e) => return Err(GovernanceError::Other(e.to_string())),
        };

        let params = match store.get_meta(META_PARAMS) {
            Ok(Some(bytes)) => bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Other(e.to_string()))?,
            _ => GovernanceParams::default(),
        };

        let count = store
            .proposal_count()
            .map_err(|e| GovernanceError::Other(e.to_string()))?;
        let mut proposals = Vec::with_capacity(count as usize);
        for id in 0..count {
            let bytes = store
                .get_proposal(id)
                .map_err(|e| GovernanceError::Other(e.to_string()))?
                .ok_or_else(|| {
                    GovernanceError::Other(format!("proposal {id} missing from store"))
                })?;
            let proposal: Proposal = bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Other(e.to_string()))?;
            proposals.push(proposal);
        }

        Ok(Self {
            address,
            params,
            proposals,
            events: Vec::new(),
        })
    }
}
