use soroban_sdk::{testutils::Address as _, Address};

use crate::{
    test_helpers::{assert_error, setup, REWARD_PER_SEC, WEEK},
    ContractError,
};

#[test]
fn test_boost_config_views() {
    let s = setup();
    let pool = s.register_boostable_pool(50);

    assert!(s.client.is_boostable(&pool));
    assert_eq!(s.client.get_boost_config(&pool), Some(s.boost_config(50)));
}

#[test]
fn test_boost_raises_weight() {
    let s = setup();
    let pool = s.register_boostable_pool(50);
    let (user, token) = s.staker(1, 1_000);
    let nft = s.mint_boost_nft(&user, 7);

    s.client.stake(&user, &pool, &token, &1_000);
    assert_eq!(s.client.boost(&user, &pool, &nft, &1), 500);

    assert_eq!(s.client.get_user_boosted(&pool, &user), 500);
    assert_eq!(s.client.get_pool_total_boosted(&pool), 500);
    assert_eq!(s.client.get_pool_total_stake(&pool), 1_000);
    assert_eq!(s.client.get_boost_token(&pool, &user), Some(nft.clone()));
    assert_eq!(s.registry.balance(&s.contract, &nft), 1);
    assert_eq!(s.registry.balance(&user, &nft), 0);
}

#[test]
fn test_boosted_staker_earns_double_at_full_boost() {
    let s = setup();
    let pool = s.register_boostable_pool(100);
    let (alice, alice_token) = s.staker(1, 1_000);
    let (bob, bob_token) = s.staker(1, 1_000);
    let nft = s.mint_boost_nft(&alice, 1);

    s.client.stake(&alice, &pool, &alice_token, &1_000);
    s.client.stake(&bob, &pool, &bob_token, &1_000);
    s.client.boost(&alice, &pool, &nft, &1);

    s.advance(30);
    let total = 30 * REWARD_PER_SEC as u128;
    assert_eq!(s.client.harvest(&alice, &pool), total * 2 / 3);
    assert_eq!(s.client.harvest(&bob, &pool), total / 3);
}

#[test]
fn test_boost_halfway_through_week_splits_exactly() {
    let s = setup();
    let pool = s.register_boostable_pool(100);
    let (alice, alice_token) = s.staker(1, 1_000);
    let (bob, bob_token) = s.staker(2, 1_000);
    let nft = s.mint_boost_nft(&alice, 1);

    s.client.stake(&alice, &pool, &alice_token, &1_000);
    s.client.stake(&bob, &pool, &bob_token, &1_000);

    // 3 024 000 000 000 per half week: 1:1 first, then 2:1.
    s.advance(WEEK / 2);
    s.client.boost(&alice, &pool, &nft, &1);
    assert_eq!(s.client.get_pending_user_rewards(&pool, &alice), 1_512_000_000_000);
    assert_eq!(s.client.get_pending_user_rewards(&pool, &bob), 1_512_000_000_000);

    s.advance(WEEK / 2);
    assert_eq!(s.client.harvest(&alice, &pool), 3_528_000_000_000);
    assert_eq!(s.client.harvest(&bob, &pool), 2_520_000_000_000);
}

#[test]
fn test_remove_boost_halfway_through_week_splits_exactly() {
    let s = setup();
    let pool = s.register_boostable_pool(100);
    let (alice, alice_token) = s.staker(1, 1_000);
    let (bob, bob_token) = s.staker(2, 1_000);
    let nft = s.mint_boost_nft(&alice, 1);

    s.client.stake(&alice, &pool, &alice_token, &1_000);
    s.client.stake(&bob, &pool, &bob_token, &1_000);
    s.client.boost(&alice, &pool, &nft, &1);

    // 2:1 for the first half week, then 1:1.
    s.advance(WEEK / 2);
    s.client.remove_boost(&alice, &pool);
    assert_eq!(s.client.get_pool_total_boosted(&pool), 0);
    assert_eq!(s.client.get_pending_user_rewards(&pool, &alice), 2_016_000_000_000);
    assert_eq!(s.client.get_pending_user_rewards(&pool, &bob), 1_008_000_000_000);

    s.advance(WEEK / 2);
    assert_eq!(s.client.harvest(&alice, &pool), 3_528_000_000_000);
    assert_eq!(s.client.harvest(&bob, &pool), 2_520_000_000_000);
}

#[test]
fn test_boost_follows_stake_changes() {
    let s = setup();
    let pool = s.register_boostable_pool(50);
    let user = Address::generate(&s.env);
    let first = s.mint_position(&user, 1, 1_000);
    let second = s.mint_position(&user, 2, 200);
    let nft = s.mint_boost_nft(&user, 3);

    s.client.stake(&user, &pool, &first, &1_000);
    s.client.boost(&user, &pool, &nft, &1);
    assert_eq!(s.client.get_user_boosted(&pool, &user), 500);

    s.client.stake(&user, &pool, &second, &200);
    assert_eq!(s.client.get_user_boosted(&pool, &user), 600);

    s.client.unstake(&user, &pool, &1, &200);
    assert_eq!(s.client.get_user_boosted(&pool, &user), 500);
    assert_eq!(s.client.get_pool_total_boosted(&pool), 500);
}

#[test]
fn test_remove_boost_returns_nft_and_keeps_reward() {
    let s = setup();
    let pool = s.register_boostable_pool(100);
    let (user, token) = s.staker(1, 1_000);
    let nft = s.mint_boost_nft(&user, 9);

    s.client.stake(&user, &pool, &token, &1_000);
    s.client.boost(&user, &pool, &nft, &1);
    s.advance(10);

    assert_eq!(s.client.remove_boost(&user, &pool), nft.clone());
    assert_eq!(s.registry.balance(&user, &nft), 1);
    assert_eq!(s.client.get_user_boosted(&pool, &user), 0);
    assert_eq!(s.client.get_pool_total_boosted(&pool), 0);
    assert_eq!(s.client.get_boost_token(&pool, &user), None);

    // Sole staker: the boost changes nothing about its share.
    assert_eq!(s.client.harvest(&user, &pool), 10 * REWARD_PER_SEC as u128);
}

#[test]
fn test_boost_misuse() {
    let s = setup();
    let pool = s.register_pool_with(1_000_000, 1_000, Some(s.boost_config(10)));
    let (user, token) = s.staker(1, 1_000);
    let nft = s.mint_boost_nft(&user, 1);
    let second_nft = s.mint_boost_nft(&user, 2);

    assert_error(
        s.client.try_boost(&user, &pool, &nft, &1),
        ContractError::NoStake,
    );

    s.client.stake(&user, &pool, &token, &500);

    assert_error(
        s.client.try_boost(&user, &pool, &nft, &2),
        ContractError::InvalidBoostAmount,
    );
    assert_error(
        s.client.try_boost(&user, &pool, &token, &1),
        ContractError::WrongBoostCollection,
    );
    assert_error(
        s.client.try_remove_boost(&user, &pool),
        ContractError::NotBoosted,
    );

    s.client.boost(&user, &pool, &nft, &1);
    assert_error(
        s.client.try_boost(&user, &pool, &second_nft, &1),
        ContractError::AlreadyBoosted,
    );

    assert!(ContractError::AlreadyBoosted.is_boost_misuse());
    assert!(!ContractError::NoStake.is_boost_misuse());
}

#[test]
fn test_boost_on_plain_pool_fails() {
    let s = setup();
    let pool = s.register_pool();
    let (user, token) = s.staker(1, 10);
    let nft = s.mint_boost_nft(&user, 1);

    s.client.stake(&user, &pool, &token, &10);
    assert_error(
        s.client.try_boost(&user, &pool, &nft, &1),
        ContractError::NonBoostablePool,
    );
    assert_eq!(s.client.get_boost_config(&pool), None);
}
