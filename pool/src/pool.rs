//! The share pool — converts deposits and withdrawals into pool shares at a
//! running exchange rate.

use crate::asset::AssetLedger;
use crate::checkpoint::CheckpointHistory;
use crate::error::PoolError;
use std::collections::HashMap;
use vault_store::PoolStore;
use vault_types::{
    Address, AssetAmount, AssetToken, BalanceSnapshot, BlockHeight, ShareAmount, RATE_SCALE,
};
use vault_utils::mul_div_floor;

/// The share pool engine.
///
/// Shares are the vault's accounting and voting unit. The pooled asset total
/// is read through the [`AssetLedger`] on every operation, so contributions
/// sent straight to the vault's address dilute into the rate without any
/// call into this engine.
///
/// Invariant: the sum of all account balances equals `total_shares`, and
/// every mutation is checkpointed at the height it happened.
pub struct SharePool {
    ledger: AssetLedger,
    total_shares: ShareAmount,
    accounts: HashMap<Address, CheckpointHistory>,
    supply_history: CheckpointHistory,
}

impl SharePool {
    /// Create an empty pool holding its reserves at `vault`.
    pub fn new(vault: Address) -> Self {
        Self {
            ledger: AssetLedger::new(vault),
            total_shares: ShareAmount::ZERO,
            accounts: HashMap::new(),
            supply_history: CheckpointHistory::new(),
        }
    }

    /// The vault's reserve address on the asset token.
    pub fn vault(&self) -> &Address {
        self.ledger.vault()
    }

    /// Current share balance of an account.
    pub fn balance_of(&self, account: &Address) -> ShareAmount {
        ShareAmount::new(
            self.accounts
                .get(account)
                .map(|h| h.latest())
                .unwrap_or(0),
        )
    }

    /// Total shares in existence.
    pub fn total_supply(&self) -> ShareAmount {
        self.total_shares
    }

    /// The asset total currently backing the pool.
    pub fn pooled_assets(&self, asset: &dyn AssetToken) -> AssetAmount {
        self.ledger.pooled(asset)
    }

    /// The exchange rate as an 18-decimal fixed-point value.
    ///
    /// Exactly `RATE_SCALE` (1.0) while no shares exist, else
    /// `floor(pooled * RATE_SCALE / total_shares)`.
    pub fn exchange_rate(&self, asset: &dyn AssetToken) -> Result<u128, PoolError> {
        if self.total_shares.is_zero() {
            return Ok(RATE_SCALE);
        }
        let pooled = self.ledger.pooled(asset);
        mul_div_floor(pooled.raw(), RATE_SCALE, self.total_shares.raw())
            .ok_or(PoolError::Overflow)
    }

    /// Deposit `amount` of the asset, minting shares at the current rate.
    ///
    /// Shares minted: `amount` for the first depositor, else
    /// `floor(amount * total_shares / pooled)` with the pooled total taken
    /// before the pull. The pull is the only external call and happens
    /// before any state mutation, so a failed pull leaves nothing changed.
    pub fn deposit(
        &mut self,
        caller: &Address,
        amount: AssetAmount,
        now: BlockHeight,
        asset: &mut dyn AssetToken,
    ) -> Result<ShareAmount, PoolError> {
        if amount.is_zero() {
            return Err(PoolError::InvalidAmount);
        }
        let pooled_before = self.ledger.pooled(asset);
        let minted = if self.total_shares.is_zero() {
            ShareAmount::new(amount.raw())
        } else {
            ShareAmount::new(
                mul_div_floor(amount.raw(), self.total_shares.raw(), pooled_before.raw())
                    .ok_or(PoolError::Overflow)?,
            )
        };
        let new_total = self
            .total_shares
            .checked_add(minted)
            .ok_or(PoolError::Overflow)?;
        let new_balance = self
            .balance_of(caller)
            .checked_add(minted)
            .ok_or(PoolError::Overflow)?;

        self.ledger.pull(asset, caller, amount)?;

        self.total_shares = new_total;
        self.accounts
            .entry(caller.clone())
            .or_default()
            .record(now, new_balance.raw());
        self.supply_history.record(now, new_total.raw());

        tracing::debug!(
            caller = %caller,
            amount = amount.raw(),
            minted = minted.raw(),
            total_shares = new_total.raw(),
            "deposit"
        );
        Ok(minted)
    }

    /// Burn `share_amount` of the caller's shares and pay out the backing
    /// assets at the current rate, truncated toward zero.
    ///
    /// All internal state is updated before the outbound transfer; a failed
    /// transfer rolls the update back so no partial state is observable.
    pub fn withdraw(
        &mut self,
        caller: &Address,
        share_amount: ShareAmount,
        now: BlockHeight,
        asset: &mut dyn AssetToken,
    ) -> Result<AssetAmount, PoolError> {
        if share_amount.is_zero() {
            return Err(PoolError::InvalidAmount);
        }
        let available = self.balance_of(caller);
        if available < share_amount {
            return Err(PoolError::InsufficientShares {
                needed: share_amount.raw(),
                available: available.raw(),
            });
        }
        let pooled = self.ledger.pooled(asset);
        let payout = AssetAmount::new(
            mul_div_floor(share_amount.raw(), pooled.raw(), self.total_shares.raw())
                .ok_or(PoolError::Overflow)?,
        );

        // Effects before the outbound call (checks-effects-interactions).
        let prior_total = self.total_shares;
        let new_balance = available - share_amount;
        self.total_shares = prior_total - share_amount;
        let history = self
            .accounts
            .entry(caller.clone())
            .or_default();
        history.record(now, new_balance.raw());
        self.supply_history.record(now, self.total_shares.raw());

        if let Err(e) = self.ledger.pay_out(asset, caller, payout) {
            // Roll back: same-height re-record restores the checkpoints.
            self.total_shares = prior_total;
            self.accounts
                .entry(caller.clone())
                .or_default()
                .record(now, available.raw());
            self.supply_history.record(now, prior_total.raw());
            return Err(e);
        }

        tracing::debug!(
            caller = %caller,
            shares = share_amount.raw(),
            payout = payout.raw(),
            total_shares = self.total_shares.raw(),
            "withdraw"
        );
        Ok(payout)
    }
}

impl BalanceSnapshot for SharePool {
    fn balance_at(&self, account: &Address, height: BlockHeight) -> ShareAmount {
        ShareAmount::new(
            self.accounts
                .get(account)
                .map(|h| h.value_at(height))
                .unwrap_or(0),
        )
    }

    fn total_supply_at(&self, height: BlockHeight) -> ShareAmount {
        ShareAmount::new(self.supply_history.value_at(height))
    }
}

const META_VAULT_ADDRESS: &[u8] = b"vault_address";
const META_TOTAL_SHARES: &[u8] = b"total_shares";
const META_SUPPLY_HISTORY: &[u8] = b"supply_history";

impl SharePool {
    /// Persist all pool state to a store.
    pub fn save_to_store(&self, store: &dyn PoolStore) -> Result<(), PoolError> {
        store
            .put_meta(META_VAULT_ADDRESS, self.ledger.vault().as_str().as_bytes())
            .map_err(|e| PoolError::Other(e.to_string()))?;
        store
            .put_meta(META_TOTAL_SHARES, &self.total_shares.raw().to_be_bytes())
            .map_err(|e| PoolError::Other(e.to_string()))?;

        let supply_bytes = bincode::serialize(&self.supply_history)
            .map_err(|e| PoolError::Other(e.to_string()))?;
        store
            .put_meta(META_SUPPLY_HISTORY, &supply_bytes)
            .map_err(|e| PoolError::Other(e.to_string()))?;

        for (account, history) in &self.accounts {
            let bytes =
                bincode::serialize(history).map_err(|e| PoolError::Other(e.to_string()))?;
            store
                .put_account_history(account, &bytes)
                .map_err(|e| PoolError::Other(e.to_string()))?;
        }
        Ok(())
    }

    /// Restore pool state from a store.
    pub fn load_from_store(store: &dyn PoolStore) -> Result<Self, PoolError> {
        let vault = match store.get_meta(META_VAULT_ADDRESS) {
            Ok(Some(bytes)) => Address::new(
                String::from_utf8(bytes).map_err(|e| PoolError::Other(e.to_string()))?,
            ),
            Ok(None) => return Err(PoolError::Other("no vault address in store".to_string())),
            Err(e) => return Err(PoolError::Other(e.to_string())),
        };

        let total_shares = match store.get_meta(META_TOTAL_SHARES) {
            Ok(Some(bytes)) if bytes.len() >= 16 => {
                ShareAmount::new(u128::from_be_bytes(bytes[..16].try_into().unwrap()))
            }
            _ => ShareAmount::ZERO,
        };

        let supply_history = match store.get_meta(META_SUPPLY_HISTORY) {
            Ok(Some(bytes)) => bincode::deserialize(&bytes)
                .map_err(|e| PoolError::Other(e.to_string()))?,
            _ => CheckpointHistory::new(),
        };

        let entries = store
            .iter_account_histories()
            .map_err(|e| PoolError::Other(e.to_string()))?;
        let mut accounts = HashMap::new();
        for (account, bytes) in entries {
            let history: CheckpointHistory =
                bincode::deserialize(&bytes).map_err(|e| PoolError::Other(e.to_string()))?;
            accounts.insert(account, history);
        }

        Ok(Self {
            ledger: AssetLedger::new(vault),
            total_shares,
            accounts,
            supply_history,
        })
    }
}
