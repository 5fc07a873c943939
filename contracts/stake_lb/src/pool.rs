use common::{math, RegistryClient, TokenId};
use soroban_sdk::{contracttype, token, Address, Env, String, Vec};

use crate::{
    boost,
    config::GlobalConfig,
    emergency,
    epochs::{self, Epoch},
    events,
    positions::{self, Position, UserStake},
    storage, ContractError,
};

// ── Types ────────────────────────────────────────────────────────────────────

/// Identity of a pool: who registered it, which collection it stakes and
/// which asset it pays rewards in.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolId {
    pub owner: Address,
    pub collection: String,
    pub reward_token: Address,
}

/// NFT collection whose tokens boost a staker's weight by `boost_percent`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostConfig {
    pub collection_owner: Address,
    pub collection_name: String,
    pub boost_percent: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Creator of the staked collection; the name is `PoolId::collection`.
    pub collection_creator: Address,
    pub reward_per_sec: u64,
    pub current_epoch_index: u64,
    pub epochs_count: u64,
    pub total_stake: u128,
    pub total_boosted: u128,
    /// Reward tokens held by the contract on behalf of this pool.
    pub reward_reserve: u128,
    pub boost_config: Option<BoostConfig>,
    pub local_emergency: bool,
}

impl Pool {
    pub fn total_weight(&self) -> Result<u128, ContractError> {
        self.total_stake
            .checked_add(self.total_boosted)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// The position token representing `bin_id` of this pool's collection.
    pub fn bin_token(&self, pool_id: &PoolId, bin_id: u32) -> TokenId {
        TokenId::new(
            self.collection_creator.clone(),
            pool_id.collection.clone(),
            bin_id,
        )
    }
}

/// A position handed back to its owner.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedPosition {
    pub token: TokenId,
    pub amount: u128,
}

/// Everything an emergency unstake returns in one go.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawal {
    pub positions: Vec<StakedPosition>,
    pub boost_token: Option<TokenId>,
}

// ── Registration ─────────────────────────────────────────────────────────────

/// Create a pool staking the collection of `position_proof`, funded with
/// `reward_amount` of `reward_token` spread over `duration` seconds.
#[allow(clippy::too_many_arguments)]
pub fn register_pool(
    env: &Env,
    config: &GlobalConfig,
    owner: Address,
    position_proof: TokenId,
    reward_token: Address,
    reward_amount: i128,
    duration: u64,
    boost_config: Option<BoostConfig>,
) -> Result<PoolId, ContractError> {
    if config.global_emergency {
        return Err(ContractError::Emergency);
    }
    if reward_amount <= 0 {
        return Err(ContractError::ZeroAmount);
    }
    if duration == 0 {
        return Err(ContractError::ZeroDuration);
    }
    if let Some(boost_config) = &boost_config {
        boost::validate_config(boost_config)?;
    }

    let registry = RegistryClient::new(env, &config.position_registry);
    if registry.balance(&owner, &position_proof) == 0 {
        return Err(ContractError::NoPermissions);
    }

    let pool_id = PoolId {
        owner: owner.clone(),
        collection: position_proof.collection.clone(),
        reward_token: reward_token.clone(),
    };
    if storage::has_pool(env, &pool_id) {
        return Err(ContractError::PoolAlreadyExists);
    }

    let now = env.ledger().timestamp();
    let rewards = math::to_u128(reward_amount).ok_or(ContractError::ZeroAmount)?;
    let first_epoch = Epoch::open(rewards, duration, 0, now)?;

    token::Client::new(env, &reward_token).transfer(
        &owner,
        &env.current_contract_address(),
        &reward_amount,
    );

    let pool = Pool {
        collection_creator: position_proof.creator,
        reward_per_sec: first_epoch.reward_per_sec,
        current_epoch_index: 0,
        epochs_count: 1,
        total_stake: 0,
        total_boosted: 0,
        reward_reserve: rewards,
        boost_config,
        local_emergency: false,
    };
    storage::store_epoch(env, &pool_id, 0, &first_epoch);
    storage::store_pool(env, &pool_id, &pool);

    events::publish_pool_registered(
        env,
        pool_id.clone(),
        rewards,
        duration,
        first_epoch.reward_per_sec,
        pool.boost_config.is_some(),
    );

    Ok(pool_id)
}

// ── Staking ──────────────────────────────────────────────────────────────────

/// Stake `amount` units of `token` into the bin it represents. Returns the
/// user's new amount in that bin.
pub fn stake(
    env: &Env,
    config: &GlobalConfig,
    user: Address,
    pool_id: PoolId,
    token: TokenId,
    amount: u128,
) -> Result<u128, ContractError> {
    let mut pool = storage::load_pool(env, &pool_id)?;
    emergency::ensure_active(config, &pool)?;

    if amount == 0 {
        return Err(ContractError::ZeroAmount);
    }
    if !token.belongs_to(&pool.collection_creator, &pool_id.collection) {
        return Err(ContractError::WrongCollection);
    }

    let now = env.ledger().timestamp();
    let accum = epochs::settle(env, &pool_id, &mut pool, now)?;

    let bin_id = token.id;
    let mut user_stake =
        storage::load_user_stake(env, &pool_id, &user).unwrap_or_else(|| UserStake::new(env));
    let mut position =
        storage::load_position(env, &pool_id, &user, bin_id).unwrap_or_else(Position::empty);

    let pending = position.settle(accum)?;
    user_stake.add_earned(pending)?;

    position.amount = checked_add(position.amount, amount)?;
    user_stake.amount = checked_add(user_stake.amount, amount)?;
    pool.total_stake = checked_add(pool.total_stake, amount)?;
    user_stake.track_bin(bin_id);

    boost::rebalance_bin(&mut pool, &mut user_stake, &mut position)?;
    position.reprice(accum)?;

    RegistryClient::new(env, &config.position_registry).transfer(
        &user,
        &env.current_contract_address(),
        &token,
        &amount,
    );

    storage::store_position(env, &pool_id, &user, bin_id, &position);
    storage::store_user_stake(env, &pool_id, &user, &user_stake);
    storage::store_pool(env, &pool_id, &pool);

    events::publish_staked(env, pool_id, user, bin_id, amount, pool.total_stake);

    Ok(position.amount)
}

/// Withdraw `amount` from the user's position in `bin_id`.
pub fn unstake(
    env: &Env,
    config: &GlobalConfig,
    user: Address,
    pool_id: PoolId,
    bin_id: u32,
    amount: u128,
) -> Result<StakedPosition, ContractError> {
    let mut pool = storage::load_pool(env, &pool_id)?;
    emergency::ensure_active(config, &pool)?;

    if amount == 0 {
        return Err(ContractError::ZeroAmount);
    }

    let mut user_stake =
        storage::load_user_stake(env, &pool_id, &user).ok_or(ContractError::NoStake)?;
    let mut position =
        storage::load_position(env, &pool_id, &user, bin_id).ok_or(ContractError::NoStake)?;
    if amount > position.amount {
        return Err(ContractError::InsufficientBalance);
    }

    let now = env.ledger().timestamp();
    let accum = epochs::settle(env, &pool_id, &mut pool, now)?;

    let pending = position.settle(accum)?;
    user_stake.add_earned(pending)?;

    position.amount -= amount;
    user_stake.amount = checked_sub(user_stake.amount, amount)?;
    pool.total_stake = checked_sub(pool.total_stake, amount)?;

    boost::rebalance_bin(&mut pool, &mut user_stake, &mut position)?;
    position.reprice(accum)?;
    if position.amount == 0 {
        user_stake.untrack_bin(env, bin_id);
    }

    let token = pool.bin_token(&pool_id, bin_id);
    RegistryClient::new(env, &config.position_registry).transfer(
        &env.current_contract_address(),
        &user,
        &token,
        &amount,
    );

    storage::store_position(env, &pool_id, &user, bin_id, &position);
    storage::store_user_stake(env, &pool_id, &user, &user_stake);
    storage::store_pool(env, &pool_id, &pool);

    events::publish_unstaked(env, pool_id, user, bin_id, amount, pool.total_stake);

    Ok(StakedPosition { token, amount })
}

/// Pay out everything the user has earned across all bins.
pub fn harvest(
    env: &Env,
    config: &GlobalConfig,
    user: Address,
    pool_id: PoolId,
) -> Result<u128, ContractError> {
    let mut pool = storage::load_pool(env, &pool_id)?;
    emergency::ensure_active(config, &pool)?;

    let mut user_stake =
        storage::load_user_stake(env, &pool_id, &user).ok_or(ContractError::NoStake)?;

    let now = env.ledger().timestamp();
    let accum = epochs::settle(env, &pool_id, &mut pool, now)?;
    positions::settle_all(env, &pool_id, &user, &mut user_stake, accum)?;

    let reward = user_stake.earned_reward;
    if reward == 0 {
        return Err(ContractError::NothingToHarvest);
    }
    user_stake.earned_reward = 0;
    pool.reward_reserve = pool
        .reward_reserve
        .checked_sub(reward)
        .ok_or(ContractError::InsufficientBalance)?;

    let payout = math::to_i128(reward).ok_or(ContractError::ArithmeticOverflow)?;
    token::Client::new(env, &pool_id.reward_token).transfer(
        &env.current_contract_address(),
        &user,
        &payout,
    );

    storage::store_user_stake(env, &pool_id, &user, &user_stake);
    storage::store_pool(env, &pool_id, &pool);

    events::publish_harvested(env, pool_id, user, reward);

    Ok(reward)
}

/// Add `amount` of reward to the pool, distributed over `duration` seconds
/// from now. Returns the index of the new current epoch.
pub fn deposit_reward_coins(
    env: &Env,
    config: &GlobalConfig,
    depositor: Address,
    pool_id: PoolId,
    amount: i128,
    duration: u64,
) -> Result<u64, ContractError> {
    let mut pool = storage::load_pool(env, &pool_id)?;
    emergency::ensure_active(config, &pool)?;

    if amount <= 0 {
        return Err(ContractError::ZeroAmount);
    }
    let rewards = math::to_u128(amount).ok_or(ContractError::ZeroAmount)?;

    let now = env.ledger().timestamp();
    let epoch_index = epochs::deposit_reward(env, &pool_id, &mut pool, rewards, duration, now)?;
    pool.reward_reserve = checked_add(pool.reward_reserve, rewards)?;

    token::Client::new(env, &pool_id.reward_token).transfer(
        &depositor,
        &env.current_contract_address(),
        &amount,
    );

    storage::store_pool(env, &pool_id, &pool);

    events::publish_reward_deposited(
        env,
        pool_id,
        depositor,
        rewards,
        duration,
        epoch_index,
        pool.reward_per_sec,
    );

    Ok(epoch_index)
}

// ── Views ────────────────────────────────────────────────────────────────────

/// Rate the pool is emitting at right now; zero once its last epoch is over.
pub fn current_reward_per_sec(env: &Env, pool_id: &PoolId) -> Result<u64, ContractError> {
    let pool = storage::load_pool(env, pool_id)?;
    let epoch = storage::load_epoch(env, pool_id, pool.current_epoch_index)?;
    if epoch.is_ended() || env.ledger().timestamp() >= epoch.end_time {
        return Ok(0);
    }
    Ok(pool.reward_per_sec)
}

/// Reward the user could harvest right now.
pub fn pending_user_rewards(
    env: &Env,
    pool_id: &PoolId,
    user: &Address,
) -> Result<u128, ContractError> {
    let pool = storage::load_pool(env, pool_id)?;
    let user_stake = match storage::load_user_stake(env, pool_id, user) {
        Some(stake) => stake,
        None => return Ok(0),
    };

    let accum = epochs::preview(env, pool_id, &pool, env.ledger().timestamp())?;
    positions::pending_total(env, pool_id, user, &user_stake, accum)
}

fn checked_add(a: u128, b: u128) -> Result<u128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

fn checked_sub(a: u128, b: u128) -> Result<u128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::ArithmeticOverflow)
}
