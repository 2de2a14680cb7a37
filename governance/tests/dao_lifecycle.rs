//! End-to-end governance lifecycle against the real share pool.
//!
//! The pool provides the balance snapshots; the chain, asset, and executor
//! are nullables. Each test walks a proposal through some part of
//! voting, approval, and execution.

use vault_governance::{GovernanceError, GovernanceParams, ParamCall, ProposalRegistry};
use vault_nullables::{NullAsset, NullChain, NullExecutor};
use vault_pool::{SharePool, VaultExecutor};
use vault_types::{Address, AssetAmount, AssetToken, ShareAmount};

fn addr(name: &str) -> Address {
    Address::new(format!("vlt_{name}"))
}

struct Harness {
    chain: NullChain,
    asset: NullAsset,
    pool: SharePool,
    registry: ProposalRegistry,
    executor: NullExecutor,
}

impl Harness {
    fn new() -> Self {
        vault_utils::logging::init_tracing();
        Self {
            chain: NullChain::new(1),
            asset: NullAsset::new(),
            pool: SharePool::new(addr("vault")),
            registry: ProposalRegistry::new(addr("registry"), GovernanceParams::default()),
            executor: NullExecutor::new(),
        }
    }

    fn fund_and_deposit(&mut self, account: &Address, amount: u128) {
        self.asset.mint(account, AssetAmount::new(amount));
        self.pool
            .deposit(
                account,
                AssetAmount::new(amount),
                self.chain.height(),
                &mut self.asset,
            )
            .unwrap();
    }

    fn propose(&mut self, proposer: &Address, target: Address, value: u128) -> u64 {
        self.registry
            .add_proposal(
                proposer,
                target,
                AssetAmount::new(value),
                Vec::new(),
                Vec::new(),
                self.chain.height(),
                &self.pool,
            )
            .unwrap()
    }

    fn vote(&mut self, voter: &Address, id: u64, support: bool) {
        self.registry
            .vote(voter, id, support, self.chain.height(), &self.pool)
            .unwrap();
    }

    fn execute(&mut self, id: u64) -> Result<(), GovernanceError> {
        self.registry
            .execute_transaction(id, self.chain.height(), &mut self.executor)
    }
}

#[test]
fn test_full_lifecycle_executes_the_call() {
    let mut h = Harness::new();
    let alice = addr("alice");
    let bob = addr("bob");
    h.fund_and_deposit(&alice, 600);
    h.fund_and_deposit(&bob, 400);

    h.chain.advance(1);
    let id = h.propose(&alice, addr("payee"), 250);

    h.chain.advance(1);
    h.vote(&alice, id, true);
    h.vote(&bob, id, false);

    // Past the 100-block voting window, inside the execution window.
    h.chain.advance(150);
    h.execute(id).unwrap();

    assert_eq!(h.executor.calls.len(), 1);
    assert_eq!(h.executor.calls[0].target, addr("payee"));
    assert_eq!(h.executor.calls[0].value.raw(), 250);
    let status = h.registry.is_proposal_approved(id).unwrap();
    assert!(status.approved);
    assert!(status.executed);
}

#[test]
fn test_execution_pays_value_from_vault_reserves() {
    let mut h = Harness::new();
    let alice = addr("alice");
    let payee = addr("payee");
    h.fund_and_deposit(&alice, 1000);

    h.chain.advance(1);
    let id = h.propose(&alice, payee.clone(), 250);
    h.vote(&alice, id, true);
    h.chain.advance(150);

    let mut executor = VaultExecutor::new(h.pool.vault().clone(), &mut h.asset);
    h.registry
        .execute_transaction(id, h.chain.height(), &mut executor)
        .unwrap();

    assert_eq!(h.asset.balance_of(&payee).raw(), 250);
    assert_eq!(h.asset.balance_of(h.pool.vault()).raw(), 750);
    // The payout thins the backing, not the supply: shares survive intact
    // and the exchange rate drops for every holder.
    assert_eq!(h.pool.total_supply().raw(), 1000);
    assert_eq!(
        h.pool.exchange_rate(&h.asset).unwrap(),
        vault_types::RATE_SCALE * 750 / 1000
    );
}

#[test]
fn test_value_exceeding_reserves_reverts_execution() {
    let mut h = Harness::new();
    let alice = addr("alice");
    let payee = addr("payee");
    h.fund_and_deposit(&alice, 1000);

    h.chain.advance(1);
    let id = h.propose(&alice, payee.clone(), 2000);
    h.vote(&alice, id, true);
    h.chain.advance(150);

    let mut executor = VaultExecutor::new(h.pool.vault().clone(), &mut h.asset);
    let err = h
        .registry
        .execute_transaction(id, h.chain.height(), &mut executor)
        .unwrap_err();
    assert!(matches!(err, GovernanceError::ExecutionFailed(_)));

    // Nothing moved and the proposal is still executable.
    assert!(!h.registry.proposal(id).unwrap().executed);
    assert_eq!(h.asset.balance_of(&payee).raw(), 0);
    assert_eq!(h.asset.balance_of(h.pool.vault()).raw(), 1000);
}

#[test]
fn test_vote_weight_fixed_at_creation_height() {
    let mut h = Harness::new();
    let alice = addr("alice");
    let bob = addr("bob");
    h.fund_and_deposit(&alice, 100);
    h.fund_and_deposit(&bob, 100);

    h.chain.advance(1);
    let id = h.propose(&alice, addr("payee"), 0);

    // Bob deposits 900 more after creation; his vote still weighs 100.
    h.chain.advance(1);
    h.fund_and_deposit(&bob, 900);
    h.vote(&bob, id, false);
    h.vote(&alice, id, true);

    assert_eq!(h.registry.votes(id, false).unwrap().raw(), 100);
    assert_eq!(h.registry.votes(id, true).unwrap().raw(), 100);
}

#[test]
fn test_late_depositor_cannot_vote() {
    let mut h = Harness::new();
    let alice = addr("alice");
    let carol = addr("carol");
    h.fund_and_deposit(&alice, 100);

    h.chain.advance(1);
    let id = h.propose(&alice, addr("payee"), 0);

    // Carol only acquires shares after the proposal exists.
    h.chain.advance(1);
    h.fund_and_deposit(&carol, 500);
    let err = h
        .registry
        .vote(&carol, id, true, h.chain.height(), &h.pool)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "not enough tokens at the moment of proposal creation"
    );
}

#[test]
fn test_revote_after_withdrawal_keeps_recorded_weight() {
    let mut h = Harness::new();
    let alice = addr("alice");
    h.fund_and_deposit(&alice, 100);

    h.chain.advance(1);
    let id = h.propose(&alice, addr("payee"), 0);

    h.chain.advance(1);
    h.vote(&alice, id, false);

    // She withdraws almost everything, then flips her vote: the full
    // original weight moves to the other tally.
    let height = h.chain.height();
    h.pool
        .withdraw(&alice, ShareAmount::new(90), height, &mut h.asset)
        .unwrap();
    h.chain.advance(1);
    h.vote(&alice, id, true);

    assert_eq!(h.registry.votes(id, true).unwrap().raw(), 100);
    assert_eq!(h.registry.votes(id, false).unwrap().raw(), 0);
}

#[test]
fn test_quorum_failure_is_distinct_from_majority_failure() {
    let mut h = Harness::new();
    let alice = addr("alice");
    let whale = addr("whale");
    h.fund_and_deposit(&alice, 100);
    h.fund_and_deposit(&whale, 900);

    h.chain.advance(1);
    let id = h.propose(&alice, addr("payee"), 0);

    // Only alice votes: 100 yes of a 1000 supply snapshot, below the 30%
    // participation floor even though yes has a strict majority.
    h.chain.advance(1);
    h.vote(&alice, id, true);

    assert!(!h.registry.is_proposal_approved(id).unwrap().approved);
    h.chain.advance(150);
    let err = h.execute(id).unwrap_err();
    assert!(matches!(err, GovernanceError::InsufficientParticipation));

    // The whale's late vote cannot help: voting is closed.
    let err = h
        .registry
        .vote(&whale, id, true, h.chain.height(), &h.pool)
        .unwrap_err();
    assert!(matches!(err, GovernanceError::VotingClosed));
}

#[test]
fn test_quorum_at_thirty_percent_of_six_equal_holders() {
    let mut h = Harness::new();
    let holders: Vec<Address> = (0..6).map(|i| addr(&format!("holder{i}"))).collect();
    for holder in &holders {
        h.fund_and_deposit(holder, 100);
    }

    h.chain.advance(1);
    let id = h.propose(&holders[0], addr("payee"), 0);
    h.chain.advance(1);

    // One yes of six: 100/600 participation, under the 30% floor.
    h.vote(&holders[0], id, true);
    h.chain.advance(150);
    assert!(matches!(
        h.execute(id).unwrap_err(),
        GovernanceError::InsufficientParticipation
    ));

    // Three of six yes clears the floor and the majority.
    let id2 = h.propose(&holders[0], addr("payee"), 0);
    h.chain.advance(1);
    for holder in holders.iter().take(3) {
        h.vote(holder, id2, true);
    }
    h.chain.advance(150);
    h.execute(id2).unwrap();
    assert_eq!(h.executor.calls.len(), 1);
}

#[test]
fn test_execution_window_boundaries() {
    let mut h = Harness::new();
    let alice = addr("alice");
    h.fund_and_deposit(&alice, 1000);

    h.chain.advance(1);
    let id = h.propose(&alice, addr("payee"), 0);
    let created = h.chain.height().as_u64();
    h.vote(&alice, id, true);

    // Still inside the voting window.
    assert!(matches!(
        h.execute(id).unwrap_err(),
        GovernanceError::VotingStillActive
    ));

    // At the expiration boundary itself the proposal is already dead.
    h.chain.set(created + 100 + 1000);
    assert!(matches!(
        h.execute(id).unwrap_err(),
        GovernanceError::ProposalExpired
    ));

    // One block earlier it would have gone through.
    h.chain.set(created + 100 + 1000 - 1);
    h.execute(id).unwrap();
    assert!(matches!(
        h.execute(id).unwrap_err(),
        GovernanceError::AlreadyExecuted
    ));
}

#[test]
fn test_failed_call_can_be_retried() {
    let mut h = Harness::new();
    let alice = addr("alice");
    h.fund_and_deposit(&alice, 1000);

    h.chain.advance(1);
    let id = h.propose(&alice, addr("payee"), 10);
    h.vote(&alice, id, true);
    h.chain.advance(150);

    h.executor.set_fail(true);
    let err = h.execute(id).unwrap_err();
    assert!(matches!(err, GovernanceError::ExecutionFailed(_)));
    assert!(!h.registry.proposal(id).unwrap().executed);
    assert!(h.executor.calls.is_empty());

    // Same window, working executor: the retry lands.
    h.executor.set_fail(false);
    h.execute(id).unwrap();
    assert_eq!(h.executor.calls.len(), 1);
}

#[test]
fn test_params_amended_through_a_proposal() {
    let mut h = Harness::new();
    let alice = addr("alice");
    h.fund_and_deposit(&alice, 1000);

    h.chain.advance(1);
    let registry_addr = h.registry.address().clone();
    let id = h
        .registry
        .add_proposal(
            &alice,
            registry_addr,
            AssetAmount::ZERO,
            ParamCall::SetVotingPeriod(10).encode(),
            Vec::new(),
            h.chain.height(),
            &h.pool,
        )
        .unwrap();
    h.vote(&alice, id, true);
    h.chain.advance(150);
    h.execute(id).unwrap();

    assert_eq!(h.registry.params().voting_period_blocks(), 10);
    assert!(h.executor.calls.is_empty());

    // A proposal created afterwards gets the shortened window.
    let id2 = h.propose(&alice, addr("payee"), 0);
    let proposal = h.registry.proposal(id2).unwrap();
    assert_eq!(
        proposal.voting_deadline_height.as_u64(),
        proposal.creation_height.as_u64() + 10
    );
}

#[test]
fn test_proposer_must_hold_shares_now() {
    let mut h = Harness::new();
    let alice = addr("alice");
    let bob = addr("bob");
    h.fund_and_deposit(&alice, 100);
    h.fund_and_deposit(&bob, 100);

    // Alice exits the pool entirely; her past balance does not qualify her.
    h.chain.advance(5);
    let height = h.chain.height();
    h.pool
        .withdraw(&alice, ShareAmount::new(100), height, &mut h.asset)
        .unwrap();
    h.chain.advance(1);

    let err = h
        .registry
        .add_proposal(
            &alice,
            addr("payee"),
            AssetAmount::ZERO,
            Vec::new(),
            Vec::new(),
            h.chain.height(),
            &h.pool,
        )
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "token balance is required to perform this operation"
    );
}
