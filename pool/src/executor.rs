//! Production executor — performs approved proposal calls against the live
//! asset token, paying the forwarded value out of the vault's reserves.

use vault_types::{Address, AssetAmount, AssetError, AssetToken, Executor};

/// Executes a proposal's authorized call with real funds.
///
/// The forwarded `value` leaves the vault's reserve address for the target;
/// the opaque payload travels with the call and has no further on-ledger
/// effect at this layer. The single transfer is the only mutation, so a
/// failure leaves the reserves untouched and surfaces to the caller as the
/// whole call's failure.
pub struct VaultExecutor<'a> {
    vault: Address,
    asset: &'a mut dyn AssetToken,
}

impl<'a> VaultExecutor<'a> {
    pub fn new(vault: Address, asset: &'a mut dyn AssetToken) -> Self {
        Self { vault, asset }
    }
}

impl Executor for VaultExecutor<'_> {
    fn execute(
        &mut self,
        target: &Address,
        value: AssetAmount,
        _data: &[u8],
    ) -> Result<(), AssetError> {
        if !value.is_zero() {
            self.asset.transfer(&self.vault, target, value)?;
        }
        tracing::debug!(to = %target, value = value.raw(), "proposal call executed");
        Ok(())
    }
}
