//! Asset ledger — the vault's view of the external asset it holds.
//!
//! Pure bookkeeping, no policy. The pooled total is read through the asset
//! token on every query, which is what makes a direct contribution to the
//! vault's address (no call into the pool) raise the exchange rate.

use crate::error::PoolError;
use vault_types::{Address, AssetAmount, AssetToken};

/// Tracks the external asset balance held at the vault's own address.
pub struct AssetLedger {
    vault: Address,
}

impl AssetLedger {
    pub fn new(vault: Address) -> Self {
        Self { vault }
    }

    /// The vault's reserve address on the asset token.
    pub fn vault(&self) -> &Address {
        &self.vault
    }

    /// The asset total currently backing the pool.
    pub fn pooled(&self, asset: &dyn AssetToken) -> AssetAmount {
        asset.balance_of(&self.vault)
    }

    /// Pull `amount` from a depositor into the vault's reserves.
    pub fn pull(
        &self,
        asset: &mut dyn AssetToken,
        from: &Address,
        amount: AssetAmount,
    ) -> Result<(), PoolError> {
        asset
            .transfer(from, &self.vault, amount)
            .map_err(|e| PoolError::TransferFailed(e.to_string()))
    }

    /// Pay `amount` out of the vault's reserves.
    pub fn pay_out(
        &self,
        asset: &mut dyn AssetToken,
        to: &Address,
        amount: AssetAmount,
    ) -> Result<(), PoolError> {
        asset
            .transfer(&self.vault, to, amount)
            .map_err(|e| PoolError::TransferFailed(e.to_string()))
    }
}
