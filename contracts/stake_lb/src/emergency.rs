use common::RegistryClient;
use soroban_sdk::{Address, Env, Vec};

use crate::{
    config::{self, GlobalConfig},
    epochs, events,
    pool::{EmergencyWithdrawal, Pool, PoolId, StakedPosition},
    storage, ContractError,
};

// ── Gates ────────────────────────────────────────────────────────────────────

/// A pool is halted when either its own switch or the global one is set.
pub fn is_emergency(config: &GlobalConfig, pool: &Pool) -> bool {
    pool.local_emergency || config.global_emergency
}

/// Guard for every normally-gated pool operation.
pub fn ensure_active(config: &GlobalConfig, pool: &Pool) -> Result<(), ContractError> {
    if is_emergency(config, pool) {
        return Err(ContractError::Emergency);
    }
    Ok(())
}

// ── Switches ─────────────────────────────────────────────────────────────────

/// Halt every pool. There is no way back.
pub fn enable_global_emergency(
    env: &Env,
    config: &mut GlobalConfig,
    admin: Address,
) -> Result<(), ContractError> {
    config::require_emergency_admin(config, &admin)?;
    if config.global_emergency {
        return Err(ContractError::AlreadyHalted);
    }

    config.global_emergency = true;
    config::store(env, config);

    events::publish_global_emergency_enabled(env, admin);
    Ok(())
}

/// Halt a single pool. There is no way back.
pub fn enable_emergency(
    env: &Env,
    config: &GlobalConfig,
    admin: Address,
    pool_id: PoolId,
) -> Result<(), ContractError> {
    config::require_emergency_admin(config, &admin)?;
    let mut pool = storage::load_pool(env, &pool_id)?;
    if config.global_emergency || pool.local_emergency {
        return Err(ContractError::AlreadyHalted);
    }

    pool.local_emergency = true;
    storage::store_pool(env, &pool_id, &pool);

    events::publish_emergency_enabled(env, pool_id, admin);
    Ok(())
}

// ── Exit ─────────────────────────────────────────────────────────────────────

/// Return every bin the user holds plus their boost token, dropping all of
/// their records in the pool. Unharvested reward is forfeited.
pub fn emergency_unstake(
    env: &Env,
    config: &GlobalConfig,
    user: Address,
    pool_id: PoolId,
) -> Result<EmergencyWithdrawal, ContractError> {
    let mut pool = storage::load_pool(env, &pool_id)?;
    if !is_emergency(config, &pool) {
        return Err(ContractError::NoEmergency);
    }

    // Close the running interval at the old weight before it drops.
    epochs::settle(env, &pool_id, &mut pool, env.ledger().timestamp())?;

    let user_stake =
        storage::load_user_stake(env, &pool_id, &user).ok_or(ContractError::NoStake)?;
    let registry = RegistryClient::new(env, &config.position_registry);
    let contract = env.current_contract_address();

    let mut positions = Vec::new(env);
    let mut total_amount: u128 = 0;
    for bin_id in user_stake.bin_ids.iter() {
        let position =
            storage::load_position(env, &pool_id, &user, bin_id).ok_or(ContractError::NoStake)?;

        pool.total_stake = pool
            .total_stake
            .checked_sub(position.amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool.total_boosted = pool
            .total_boosted
            .checked_sub(position.boosted_amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        total_amount = total_amount
            .checked_add(position.amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let token = pool.bin_token(&pool_id, bin_id);
        registry.transfer(&contract, &user, &token, &position.amount);
        storage::remove_position(env, &pool_id, &user, bin_id);

        positions.push_back(StakedPosition {
            token,
            amount: position.amount,
        });
    }

    if let Some(token) = &user_stake.boost_token {
        registry.transfer(&contract, &user, token, &1u128);
    }

    storage::remove_user_stake(env, &pool_id, &user);
    storage::store_pool(env, &pool_id, &pool);

    events::publish_emergency_unstaked(env, pool_id, user, positions.len(), total_amount);

    Ok(EmergencyWithdrawal {
        positions,
        boost_token: user_stake.boost_token,
    })
}
