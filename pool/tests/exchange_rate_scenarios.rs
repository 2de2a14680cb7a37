//! End-to-end exchange-rate walkthrough: two depositors, an external
//! contribution, and a withdrawal at the raised rate.

use vault_nullables::{NullAsset, NullChain};
use vault_pool::SharePool;
use vault_types::{Address, AssetAmount, AssetToken, ShareAmount, RATE_SCALE};

const WHOLE: u128 = 1_000_000_000_000_000_000;

fn addr(name: &str) -> Address {
    Address::new(format!("vlt_{name}"))
}

#[test]
fn test_exchange_rate_lifecycle() {
    vault_utils::logging::init_tracing();
    let jonathan = addr("jonathan");
    let iuri = addr("iuri");
    let richard = addr("richard");
    let donor = addr("donor");

    let mut asset = NullAsset::new();
    for account in [&jonathan, &iuri, &richard, &donor] {
        asset.mint(account, AssetAmount::new(100 * WHOLE));
    }
    let chain = NullChain::new(1);
    let mut pool = SharePool::new(addr("vault"));

    // Initial state: rate 1.0, no supply, no backing assets.
    assert_eq!(pool.exchange_rate(&asset).unwrap(), RATE_SCALE);
    assert_eq!(pool.total_supply().raw(), 0);
    assert_eq!(asset.balance_of(pool.vault()).raw(), 0);

    // Deposit 11 before any contributions: rate stays 1.0.
    pool.deposit(
        &jonathan,
        AssetAmount::new(11 * WHOLE),
        chain.height(),
        &mut asset,
    )
    .unwrap();
    assert_eq!(pool.exchange_rate(&asset).unwrap(), RATE_SCALE);
    assert_eq!(pool.total_supply().raw(), 11 * WHOLE);
    assert_eq!(asset.balance_of(pool.vault()).raw(), 11 * WHOLE);

    // Second depositor, 5 more: still 1.0.
    chain.advance(1);
    pool.deposit(
        &iuri,
        AssetAmount::new(5 * WHOLE),
        chain.height(),
        &mut asset,
    )
    .unwrap();
    assert_eq!(pool.exchange_rate(&asset).unwrap(), RATE_SCALE);
    assert_eq!(pool.total_supply().raw(), 16 * WHOLE);
    assert_eq!(asset.balance_of(pool.vault()).raw(), 16 * WHOLE);

    // Contribute 10 straight to the vault: rate becomes 26/16 = 1.625,
    // supply untouched.
    chain.advance(1);
    asset
        .transfer(&donor, pool.vault(), AssetAmount::new(10 * WHOLE))
        .unwrap();
    assert_eq!(pool.exchange_rate(&asset).unwrap(), 1_625_000_000_000_000_000);
    assert_eq!(pool.total_supply().raw(), 16 * WHOLE);
    assert_eq!(asset.balance_of(pool.vault()).raw(), 26 * WHOLE);

    // Withdraw 5 shares at the raised rate: payout floor(5 * 26 / 16) = 8.125.
    chain.advance(1);
    let payout = pool
        .withdraw(
            &jonathan,
            ShareAmount::new(5 * WHOLE),
            chain.height(),
            &mut asset,
        )
        .unwrap();
    assert_eq!(payout.raw(), 8_125_000_000_000_000_000);
    assert_eq!(pool.exchange_rate(&asset).unwrap(), 1_625_000_000_000_000_000);
    assert_eq!(pool.total_supply().raw(), 11 * WHOLE);
    assert_eq!(asset.balance_of(pool.vault()).raw(), 17_875_000_000_000_000_000);

    // Deposit after the contribution mints at the raised rate:
    // floor(8 * 11 / 17.875) shares.
    chain.advance(1);
    let minted = pool
        .deposit(
            &richard,
            AssetAmount::new(8 * WHOLE),
            chain.height(),
            &mut asset,
        )
        .unwrap();
    assert_eq!(minted.raw(), 4_923_076_923_076_923_076);
    assert_eq!(pool.total_supply().raw(), 15_923_076_923_076_923_076);
    assert_eq!(asset.balance_of(pool.vault()).raw(), 25_875_000_000_000_000_000);
}

#[test]
fn test_deposit_then_withdraw_never_profits() {
    let alice = addr("alice");
    let bob = addr("bob");
    let donor = addr("donor");

    let mut asset = NullAsset::new();
    for account in [&alice, &bob, &donor] {
        asset.mint(account, AssetAmount::new(1_000_000));
    }
    let mut pool = SharePool::new(addr("vault"));

    pool.deposit(
        &alice,
        AssetAmount::new(977),
        vault_types::BlockHeight::new(1),
        &mut asset,
    )
    .unwrap();
    asset
        .transfer(&donor, pool.vault(), AssetAmount::new(313))
        .unwrap();

    let before = asset.balance_of(&bob);
    let minted = pool
        .deposit(
            &bob,
            AssetAmount::new(1001),
            vault_types::BlockHeight::new(2),
            &mut asset,
        )
        .unwrap();
    pool.withdraw(&bob, minted, vault_types::BlockHeight::new(3), &mut asset)
        .unwrap();
    let after = asset.balance_of(&bob);

    assert!(after <= before, "round trip must not profit the depositor");
}
