use common::ttl;
use soroban_sdk::{contracttype, Address, Env};

use crate::{
    epochs::Epoch,
    pool::{Pool, PoolId},
    positions::{Position, UserStake},
    ContractError,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

/// The global config lives in instance storage; everything keyed by a pool is
/// persistent.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Pool(PoolId),
    Epoch(PoolId, u64),
    UserStake(PoolId, Address),
    Position(PoolId, Address, u32),
}

// ── Pools ────────────────────────────────────────────────────────────────────

pub fn has_pool(env: &Env, pool_id: &PoolId) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Pool(pool_id.clone()))
}

pub fn load_pool(env: &Env, pool_id: &PoolId) -> Result<Pool, ContractError> {
    let key = DataKey::Pool(pool_id.clone());
    let pool: Pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::NoPool)?;
    ttl::extend_persistent(env, &key);
    Ok(pool)
}

pub fn store_pool(env: &Env, pool_id: &PoolId, pool: &Pool) {
    let key = DataKey::Pool(pool_id.clone());
    env.storage().persistent().set(&key, pool);
    ttl::extend_persistent(env, &key);
}

// ── Epochs ───────────────────────────────────────────────────────────────────

pub fn load_epoch(env: &Env, pool_id: &PoolId, index: u64) -> Result<Epoch, ContractError> {
    env.storage()
        .persistent()
        .get(&DataKey::Epoch(pool_id.clone(), index))
        .ok_or(ContractError::EpochNotFound)
}

pub fn store_epoch(env: &Env, pool_id: &PoolId, index: u64, epoch: &Epoch) {
    let key = DataKey::Epoch(pool_id.clone(), index);
    env.storage().persistent().set(&key, epoch);
    ttl::extend_persistent(env, &key);
}

// ── User stakes ──────────────────────────────────────────────────────────────

pub fn load_user_stake(env: &Env, pool_id: &PoolId, user: &Address) -> Option<UserStake> {
    env.storage()
        .persistent()
        .get(&DataKey::UserStake(pool_id.clone(), user.clone()))
}

/// Stores `stake`, or drops the record entirely once it holds nothing.
pub fn store_user_stake(env: &Env, pool_id: &PoolId, user: &Address, stake: &UserStake) {
    let key = DataKey::UserStake(pool_id.clone(), user.clone());
    if stake.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, stake);
    ttl::extend_persistent(env, &key);
}

pub fn remove_user_stake(env: &Env, pool_id: &PoolId, user: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::UserStake(pool_id.clone(), user.clone()));
}

// ── Positions ────────────────────────────────────────────────────────────────

pub fn load_position(
    env: &Env,
    pool_id: &PoolId,
    user: &Address,
    bin_id: u32,
) -> Option<Position> {
    env.storage()
        .persistent()
        .get(&DataKey::Position(pool_id.clone(), user.clone(), bin_id))
}

/// Stores `position`, deleting the record when its amount reached zero.
pub fn store_position(
    env: &Env,
    pool_id: &PoolId,
    user: &Address,
    bin_id: u32,
    position: &Position,
) {
    let key = DataKey::Position(pool_id.clone(), user.clone(), bin_id);
    if position.amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, position);
    ttl::extend_persistent(env, &key);
}

pub fn remove_position(env: &Env, pool_id: &PoolId, user: &Address, bin_id: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::Position(pool_id.clone(), user.clone(), bin_id));
}
