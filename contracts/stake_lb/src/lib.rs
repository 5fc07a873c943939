#![no_std]

//! Epoch-based reward staking for liquidity-bin position tokens.
//!
//! Users stake position tokens of a pool's collection (one sub-account per
//! bin), earn the pool's reward asset pro rata to their stake weight, can
//! attach an NFT of a configured collection to boost that weight, and can
//! always get their positions back through `emergency_unstake` once a pool is
//! halted.

pub mod boost;
pub mod config;
pub mod constants;
pub mod emergency;
pub mod epochs;
pub mod errors;
pub mod events;
pub mod pool;
pub mod positions;
pub mod storage;
pub mod treasury;

use common::TokenId;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Vec};

pub use config::GlobalConfig;
pub use epochs::Epoch;
pub use errors::ContractError;
pub use pool::{BoostConfig, EmergencyWithdrawal, Pool, PoolId, StakedPosition};
pub use positions::{Position, UserStake};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakeLbContract;

#[contractimpl]
impl StakeLbContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Write the global config.
    ///
    /// * `emergency_admin`   – may halt single pools or every pool.
    /// * `treasury_admin`    – may sweep reward reserves out of halted or
    ///                         long-finished pools.
    /// * `position_registry` – registry contract holding position tokens.
    pub fn initialize(
        env: Env,
        emergency_admin: Address,
        treasury_admin: Address,
        position_registry: Address,
    ) -> Result<(), ContractError> {
        if config::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        config::store(
            &env,
            &GlobalConfig {
                emergency_admin: emergency_admin.clone(),
                treasury_admin: treasury_admin.clone(),
                global_emergency: false,
                position_registry: position_registry.clone(),
            },
        );

        events::publish_initialized(&env, emergency_admin, treasury_admin, position_registry);
        Ok(())
    }

    pub fn set_emergency_admin(
        env: Env,
        admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        let mut cfg = config::load(&env)?;
        admin.require_auth();
        config::require_emergency_admin(&cfg, &admin)?;

        cfg.emergency_admin = new_admin.clone();
        config::store(&env, &cfg);

        events::publish_admin_changed(&env, symbol_short!("EMERG"), admin, new_admin);
        Ok(())
    }

    pub fn set_treasury_admin(
        env: Env,
        admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        let mut cfg = config::load(&env)?;
        admin.require_auth();
        config::require_treasury_admin(&cfg, &admin)?;

        cfg.treasury_admin = new_admin.clone();
        config::store(&env, &cfg);

        events::publish_admin_changed(&env, symbol_short!("TREASURY"), admin, new_admin);
        Ok(())
    }

    // ── Pools ───────────────────────────────────────────────────────────────

    /// Register a pool for the collection `position_proof` belongs to.
    ///
    /// `owner` must hold `position_proof` and fund the first epoch with
    /// `reward_amount` of `reward_token`, emitted over `duration` seconds.
    #[allow(clippy::too_many_arguments)]
    pub fn register_pool(
        env: Env,
        owner: Address,
        position_proof: TokenId,
        reward_token: Address,
        reward_amount: i128,
        duration: u64,
        boost_config: Option<BoostConfig>,
    ) -> Result<PoolId, ContractError> {
        let cfg = config::load(&env)?;
        owner.require_auth();

        pool::register_pool(
            &env,
            &cfg,
            owner,
            position_proof,
            reward_token,
            reward_amount,
            duration,
            boost_config,
        )
    }

    /// Stake `amount` units of the position `token` into its bin.
    pub fn stake(
        env: Env,
        user: Address,
        pool_id: PoolId,
        token: TokenId,
        amount: u128,
    ) -> Result<u128, ContractError> {
        let cfg = config::load(&env)?;
        user.require_auth();
        pool::stake(&env, &cfg, user, pool_id, token, amount)
    }

    /// Withdraw `amount` from the user's position in `bin_id`.
    pub fn unstake(
        env: Env,
        user: Address,
        pool_id: PoolId,
        bin_id: u32,
        amount: u128,
    ) -> Result<StakedPosition, ContractError> {
        let cfg = config::load(&env)?;
        user.require_auth();
        pool::unstake(&env, &cfg, user, pool_id, bin_id, amount)
    }

    /// Pay out all reward the user has earned in the pool.
    pub fn harvest(env: Env, user: Address, pool_id: PoolId) -> Result<u128, ContractError> {
        let cfg = config::load(&env)?;
        user.require_auth();
        pool::harvest(&env, &cfg, user, pool_id)
    }

    /// Top up a pool's rewards; see [`epochs::deposit_reward`] for how the
    /// deposit is spliced into the running schedule.
    pub fn deposit_reward_coins(
        env: Env,
        depositor: Address,
        pool_id: PoolId,
        amount: i128,
        duration: u64,
    ) -> Result<u64, ContractError> {
        let cfg = config::load(&env)?;
        depositor.require_auth();
        pool::deposit_reward_coins(&env, &cfg, depositor, pool_id, amount, duration)
    }

    // ── Boost ───────────────────────────────────────────────────────────────

    pub fn boost(
        env: Env,
        user: Address,
        pool_id: PoolId,
        token: TokenId,
        amount: u128,
    ) -> Result<u128, ContractError> {
        let cfg = config::load(&env)?;
        user.require_auth();
        boost::boost(&env, &cfg, user, pool_id, token, amount)
    }

    pub fn remove_boost(env: Env, user: Address, pool_id: PoolId) -> Result<TokenId, ContractError> {
        let cfg = config::load(&env)?;
        user.require_auth();
        boost::remove_boost(&env, &cfg, user, pool_id)
    }

    // ── Emergency ───────────────────────────────────────────────────────────

    pub fn enable_global_emergency(env: Env, admin: Address) -> Result<(), ContractError> {
        let mut cfg = config::load(&env)?;
        admin.require_auth();
        emergency::enable_global_emergency(&env, &mut cfg, admin)
    }

    pub fn enable_emergency(env: Env, admin: Address, pool_id: PoolId) -> Result<(), ContractError> {
        let cfg = config::load(&env)?;
        admin.require_auth();
        emergency::enable_emergency(&env, &cfg, admin, pool_id)
    }

    /// The only way out of a halted pool: returns every position the user
    /// holds in it, plus their boost token.
    pub fn emergency_unstake(
        env: Env,
        user: Address,
        pool_id: PoolId,
    ) -> Result<EmergencyWithdrawal, ContractError> {
        let cfg = config::load(&env)?;
        user.require_auth();
        emergency::emergency_unstake(&env, &cfg, user, pool_id)
    }

    pub fn withdraw_to_treasury(
        env: Env,
        treasury: Address,
        pool_id: PoolId,
        amount: i128,
    ) -> Result<(), ContractError> {
        let cfg = config::load(&env)?;
        treasury.require_auth();
        treasury::withdraw_to_treasury(&env, &cfg, treasury, pool_id, amount)
    }

    // ── Config views ────────────────────────────────────────────────────────

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn get_emergency_admin(env: Env) -> Result<Address, ContractError> {
        Ok(config::load(&env)?.emergency_admin)
    }

    pub fn get_treasury_admin(env: Env) -> Result<Address, ContractError> {
        Ok(config::load(&env)?.treasury_admin)
    }

    pub fn get_position_registry(env: Env) -> Result<Address, ContractError> {
        Ok(config::load(&env)?.position_registry)
    }

    pub fn is_global_emergency(env: Env) -> Result<bool, ContractError> {
        Ok(config::load(&env)?.global_emergency)
    }

    pub fn is_emergency(env: Env, pool_id: PoolId) -> Result<bool, ContractError> {
        let cfg = config::load(&env)?;
        let pool = storage::load_pool(&env, &pool_id)?;
        Ok(emergency::is_emergency(&cfg, &pool))
    }

    pub fn is_local_emergency(env: Env, pool_id: PoolId) -> Result<bool, ContractError> {
        Ok(storage::load_pool(&env, &pool_id)?.local_emergency)
    }

    // ── Pool views ──────────────────────────────────────────────────────────

    pub fn pool_exists(env: Env, pool_id: PoolId) -> bool {
        storage::has_pool(&env, &pool_id)
    }

    pub fn get_pool(env: Env, pool_id: PoolId) -> Result<Pool, ContractError> {
        storage::load_pool(&env, &pool_id)
    }

    pub fn get_pool_total_stake(env: Env, pool_id: PoolId) -> Result<u128, ContractError> {
        Ok(storage::load_pool(&env, &pool_id)?.total_stake)
    }

    pub fn get_pool_total_boosted(env: Env, pool_id: PoolId) -> Result<u128, ContractError> {
        Ok(storage::load_pool(&env, &pool_id)?.total_boosted)
    }

    pub fn get_pool_reward_reserve(env: Env, pool_id: PoolId) -> Result<u128, ContractError> {
        Ok(storage::load_pool(&env, &pool_id)?.reward_reserve)
    }

    pub fn get_pool_reward_per_sec(env: Env, pool_id: PoolId) -> Result<u64, ContractError> {
        pool::current_reward_per_sec(&env, &pool_id)
    }

    pub fn is_boostable(env: Env, pool_id: PoolId) -> Result<bool, ContractError> {
        Ok(storage::load_pool(&env, &pool_id)?.boost_config.is_some())
    }

    pub fn get_boost_config(env: Env, pool_id: PoolId) -> Result<Option<BoostConfig>, ContractError> {
        Ok(storage::load_pool(&env, &pool_id)?.boost_config)
    }

    // ── Epoch views ─────────────────────────────────────────────────────────

    pub fn get_epoch(env: Env, pool_id: PoolId, index: u64) -> Result<Epoch, ContractError> {
        storage::load_pool(&env, &pool_id)?;
        storage::load_epoch(&env, &pool_id, index)
    }

    pub fn get_epochs_count(env: Env, pool_id: PoolId) -> Result<u64, ContractError> {
        Ok(storage::load_pool(&env, &pool_id)?.epochs_count)
    }

    pub fn get_current_epoch_index(env: Env, pool_id: PoolId) -> Result<u64, ContractError> {
        Ok(storage::load_pool(&env, &pool_id)?.current_epoch_index)
    }

    /// Start of the pool's current epoch.
    pub fn get_start_timestamp(env: Env, pool_id: PoolId) -> Result<u64, ContractError> {
        let pool = storage::load_pool(&env, &pool_id)?;
        Ok(storage::load_epoch(&env, &pool_id, pool.current_epoch_index)?.start_time)
    }

    /// Scheduled end of the pool's current epoch.
    pub fn get_end_timestamp(env: Env, pool_id: PoolId) -> Result<u64, ContractError> {
        let pool = storage::load_pool(&env, &pool_id)?;
        Ok(storage::load_epoch(&env, &pool_id, pool.current_epoch_index)?.end_time)
    }

    // ── User views ──────────────────────────────────────────────────────────

    pub fn stake_exists(env: Env, pool_id: PoolId, user: Address) -> Result<bool, ContractError> {
        storage::load_pool(&env, &pool_id)?;
        Ok(storage::load_user_stake(&env, &pool_id, &user).is_some())
    }

    /// The user's stake summed over every bin.
    pub fn get_user_stake(env: Env, pool_id: PoolId, user: Address) -> Result<u128, ContractError> {
        Ok(Self::user_stake(&env, &pool_id, &user)?.amount)
    }

    pub fn get_user_stake_by_bin(
        env: Env,
        pool_id: PoolId,
        user: Address,
        bin_id: u32,
    ) -> Result<u128, ContractError> {
        storage::load_pool(&env, &pool_id)?;
        storage::load_position(&env, &pool_id, &user, bin_id)
            .map(|position| position.amount)
            .ok_or(ContractError::NoStake)
    }

    pub fn get_user_bin_ids(
        env: Env,
        pool_id: PoolId,
        user: Address,
    ) -> Result<Vec<u32>, ContractError> {
        Ok(Self::user_stake(&env, &pool_id, &user)?.bin_ids)
    }

    pub fn get_user_boosted(env: Env, pool_id: PoolId, user: Address) -> Result<u128, ContractError> {
        Ok(Self::user_stake(&env, &pool_id, &user)?.boosted_amount)
    }

    pub fn get_boost_token(
        env: Env,
        pool_id: PoolId,
        user: Address,
    ) -> Result<Option<TokenId>, ContractError> {
        Ok(Self::user_stake(&env, &pool_id, &user)?.boost_token)
    }

    /// Reward the user would receive from `harvest` at the current ledger time.
    pub fn get_pending_user_rewards(
        env: Env,
        pool_id: PoolId,
        user: Address,
    ) -> Result<u128, ContractError> {
        pool::pending_user_rewards(&env, &pool_id, &user)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn user_stake(env: &Env, pool_id: &PoolId, user: &Address) -> Result<UserStake, ContractError> {
        storage::load_pool(env, pool_id)?;
        storage::load_user_stake(env, pool_id, user).ok_or(ContractError::NoStake)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test_helpers;



#[cfg(test)]
mod test_boost;
