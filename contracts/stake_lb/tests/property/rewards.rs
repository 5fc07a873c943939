#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for reward distribution.
//!
//! Invariants tested:
//! - A sole staker receives the full emission, minus at most one unit of rounding
//! - Two stakers together never receive more than was emitted
//! - Stake then unstake hands back exactly the staked position

use proptest::prelude::*;

use crate::fixture::{setup, DURATION, REWARD_AMOUNT};

const RATE: u128 = (REWARD_AMOUNT as u128) / (DURATION as u128);

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever the stake size, the only staker collects `rate * elapsed`.
    #[test]
    fn prop_sole_staker_collects_emission(
        amount in 1u128..=1_000_000_000u128,
        elapsed in 1u64..DURATION,
    ) {
        let f = setup();
        let user = f.staker(&[3], amount);

        f.client.stake(&user, &f.pool, &f.bin_token(3), &amount);
        f.advance(elapsed);

        let emitted = RATE * elapsed as u128;
        let harvested = f.client.harvest(&user, &f.pool);

        prop_assert!(harvested <= emitted);
        prop_assert!(emitted - harvested <= 1);
        prop_assert_eq!(f.reward_balance(&user), harvested as i128);
    }

    /// Splitting the emission never pays out more than was emitted.
    #[test]
    fn prop_two_stakers_share_without_inflation(
        a in 1u128..=1_000_000u128,
        b in 1u128..=1_000_000u128,
        elapsed in 1u64..DURATION,
    ) {
        let f = setup();
        let alice = f.staker(&[1], a);
        let bob = f.staker(&[2], b);

        f.client.stake(&alice, &f.pool, &f.bin_token(1), &a);
        f.client.stake(&bob, &f.pool, &f.bin_token(2), &b);
        f.advance(elapsed);

        let emitted = RATE * elapsed as u128;
        let total = f.client.get_pending_user_rewards(&f.pool, &alice)
            + f.client.get_pending_user_rewards(&f.pool, &bob);

        prop_assert!(total <= emitted);
        prop_assert!(emitted - total <= 2);
    }

    /// Stake followed by a full unstake returns the exact position.
    #[test]
    fn prop_stake_unstake_round_trip(
        amount in 1u128..=1_000_000u128,
        bin_id in 1u32..=8_388_608u32,
        elapsed in 0u64..=1_000u64,
    ) {
        let f = setup();
        let user = f.staker(&[bin_id], amount);

        f.client.stake(&user, &f.pool, &f.bin_token(bin_id), &amount);
        f.advance(elapsed);
        let returned = f.client.unstake(&user, &f.pool, &bin_id, &amount);

        prop_assert_eq!(returned.amount, amount);
        prop_assert_eq!(returned.token, f.bin_token(bin_id));
        prop_assert_eq!(f.registry.balance(&user, &f.bin_token(bin_id)), amount);
        prop_assert_eq!(f.client.get_pool_total_stake(&f.pool), 0);
    }
}
