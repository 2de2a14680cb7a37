//! Capability traits at the system's boundaries.
//!
//! The vault core never owns its collaborators: the fungible asset, the
//! historical balance oracle, and the call executor are all consumed through
//! these traits. Production backends and test nullables implement them.

use crate::address::Address;
use crate::amount::{AssetAmount, ShareAmount};
use crate::error::AssetError;
use crate::height::BlockHeight;

/// The external fungible-asset contract the vault pools.
///
/// Specified only at its interface boundary — mint/approve semantics are the
/// collaborator's own business.
pub trait AssetToken {
    /// Current asset balance of an account.
    fn balance_of(&self, account: &Address) -> AssetAmount;

    /// Move `amount` from `from` to `to`.
    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: AssetAmount,
    ) -> Result<(), AssetError>;
}

/// Historical share/vote-weight query by block height.
///
/// Governance correctness depends on this capability: ballot weight is fixed
/// at a proposal's creation height and quorum is measured against the supply
/// snapshot taken there. Backed by append-only per-account checkpoints.
pub trait BalanceSnapshot {
    /// An account's share balance as of `height`.
    fn balance_at(&self, account: &Address, height: BlockHeight) -> ShareAmount;

    /// The total share supply as of `height`.
    fn total_supply_at(&self, height: BlockHeight) -> ShareAmount;
}

/// Performs the single opaque external call an approved proposal authorizes,
/// forwarding `value` from the vault's reserves.
///
/// Deliberately fully general: a quorum-approved proposal may call anything
/// with an arbitrary payload.
pub trait Executor {
    fn execute(
        &mut self,
        target: &Address,
        value: AssetAmount,
        data: &[u8],
    ) -> Result<(), AssetError>;
}
