//! NFT boost: attaching one token of the pool's boost collection raises the
//! stake weight of every bin the user holds by `boost_percent`.

use common::{math, RegistryClient, TokenId};
use soroban_sdk::{Address, Env};

use crate::{
    config::GlobalConfig,
    constants::{MAX_BOOST_PERCENT, MIN_BOOST_PERCENT},
    emergency, epochs, events,
    pool::{BoostConfig, Pool, PoolId},
    positions::{Position, UserStake},
    storage, ContractError,
};

pub fn validate_config(config: &BoostConfig) -> Result<(), ContractError> {
    if config.boost_percent < MIN_BOOST_PERCENT || config.boost_percent > MAX_BOOST_PERCENT {
        return Err(ContractError::InvalidBoostPercent);
    }
    Ok(())
}

/// Sets the bin's boosted amount to what the user's boost state implies
/// (`amount * boost_percent / 100` while boosted, zero otherwise) and moves
/// the user and pool totals by the difference.
pub fn rebalance_bin(
    pool: &mut Pool,
    user_stake: &mut UserStake,
    position: &mut Position,
) -> Result<(), ContractError> {
    let target = match (&pool.boost_config, user_stake.is_boosted()) {
        (Some(config), true) => math::percent_of(position.amount, config.boost_percent)
            .ok_or(ContractError::ArithmeticOverflow)?,
        _ => 0,
    };

    pool.total_boosted = pool
        .total_boosted
        .checked_sub(position.boosted_amount)
        .and_then(|total| total.checked_add(target))
        .ok_or(ContractError::ArithmeticOverflow)?;
    user_stake.boosted_amount = user_stake
        .boosted_amount
        .checked_sub(position.boosted_amount)
        .and_then(|total| total.checked_add(target))
        .ok_or(ContractError::ArithmeticOverflow)?;
    position.boosted_amount = target;
    Ok(())
}

/// Settles every bin of the user, then re-weights each one for the user's
/// current boost state.
fn reweight_bins(
    env: &Env,
    pool_id: &PoolId,
    pool: &mut Pool,
    user: &Address,
    user_stake: &mut UserStake,
    accum: u128,
) -> Result<(), ContractError> {
    for bin_id in user_stake.bin_ids.clone().iter() {
        let mut position =
            storage::load_position(env, pool_id, user, bin_id).ok_or(ContractError::NoStake)?;
        let pending = position.settle(accum)?;
        user_stake.add_earned(pending)?;

        rebalance_bin(pool, user_stake, &mut position)?;
        position.reprice(accum)?;
        storage::store_position(env, pool_id, user, bin_id, &position);
    }
    Ok(())
}

/// Attach `token` as the user's boost. Returns the user's boosted amount.
pub fn boost(
    env: &Env,
    config: &GlobalConfig,
    user: Address,
    pool_id: PoolId,
    token: TokenId,
    amount: u128,
) -> Result<u128, ContractError> {
    let mut pool = storage::load_pool(env, &pool_id)?;
    emergency::ensure_active(config, &pool)?;

    let boost_config = pool
        .boost_config
        .clone()
        .ok_or(ContractError::NonBoostablePool)?;
    let mut user_stake =
        storage::load_user_stake(env, &pool_id, &user).ok_or(ContractError::NoStake)?;
    if user_stake.is_boosted() {
        return Err(ContractError::AlreadyBoosted);
    }
    if amount != 1 {
        return Err(ContractError::InvalidBoostAmount);
    }
    if !token.belongs_to(&boost_config.collection_owner, &boost_config.collection_name) {
        return Err(ContractError::WrongBoostCollection);
    }

    let now = env.ledger().timestamp();
    let accum = epochs::settle(env, &pool_id, &mut pool, now)?;

    user_stake.boost_token = Some(token.clone());
    reweight_bins(env, &pool_id, &mut pool, &user, &mut user_stake, accum)?;

    RegistryClient::new(env, &config.position_registry).transfer(
        &user,
        &env.current_contract_address(),
        &token,
        &amount,
    );

    storage::store_user_stake(env, &pool_id, &user, &user_stake);
    storage::store_pool(env, &pool_id, &pool);

    events::publish_boosted(env, pool_id, user, token, user_stake.boosted_amount);

    Ok(user_stake.boosted_amount)
}

/// Detach the user's boost token and hand it back.
pub fn remove_boost(
    env: &Env,
    config: &GlobalConfig,
    user: Address,
    pool_id: PoolId,
) -> Result<TokenId, ContractError> {
    let mut pool = storage::load_pool(env, &pool_id)?;
    emergency::ensure_active(config, &pool)?;

    let mut user_stake =
        storage::load_user_stake(env, &pool_id, &user).ok_or(ContractError::NoStake)?;
    let token = user_stake
        .boost_token
        .clone()
        .ok_or(ContractError::NotBoosted)?;

    let now = env.ledger().timestamp();
    let accum = epochs::settle(env, &pool_id, &mut pool, now)?;

    user_stake.boost_token = None;
    reweight_bins(env, &pool_id, &mut pool, &user, &mut user_stake, accum)?;

    RegistryClient::new(env, &config.position_registry).transfer(
        &env.current_contract_address(),
        &user,
        &token,
        &1u128,
    );

    storage::store_user_stake(env, &pool_id, &user, &user_stake);
    storage::store_pool(env, &pool_id, &pool);

    events::publish_boost_removed(env, pool_id, user, token.clone());

    Ok(token)
}
