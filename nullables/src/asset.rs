//! Nullable asset token — an in-memory fungible asset for testing.

use std::collections::HashMap;
use vault_types::{Address, AssetAmount, AssetError, AssetToken};

/// An in-memory asset token with simple balance bookkeeping.
///
/// `set_fail_transfers(true)` makes every transfer fail, for exercising the
/// rollback paths behind `TransferFailed`.
pub struct NullAsset {
    balances: HashMap<Address, u128>,
    fail_transfers: bool,
}

impl NullAsset {
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            fail_transfers: false,
        }
    }

    /// Credit an account out of thin air.
    pub fn mint(&mut self, account: &Address, amount: AssetAmount) {
        *self.balances.entry(account.clone()).or_default() += amount.raw();
    }

    /// Make every subsequent transfer fail (or succeed again).
    pub fn set_fail_transfers(&mut self, fail: bool) {
        self.fail_transfers = fail;
    }
}

impl Default for NullAsset {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetToken for NullAsset {
    fn balance_of(&self, account: &Address) -> AssetAmount {
        AssetAmount::new(self.balances.get(account).copied().unwrap_or(0))
    }

    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: AssetAmount,
    ) -> Result<(), AssetError> {
        if self.fail_transfers {
            return Err(AssetError::Rejected("transfers disabled".to_string()));
        }
        let have = self.balances.get(from).copied().unwrap_or(0);
        if have < amount.raw() {
            return Err(AssetError::InsufficientBalance {
                have,
                need: amount.raw(),
            });
        }
        *self.balances.get_mut(from).unwrap() = have - amount.raw();
        *self.balances.entry(to.clone()).or_default() += amount.raw();
        Ok(())
    }
}
