#![allow(deprecated)] // events().publish migration tracked separately

use common::TokenId;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::pool::PoolId;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the global config is written.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub emergency_admin: Address,
    pub treasury_admin: Address,
    pub position_registry: Address,
    pub timestamp: u64,
}

/// Fired when the emergency or treasury admin is replaced.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChangedEvent {
    pub role: Symbol,
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRegisteredEvent {
    pub pool: PoolId,
    pub reward_amount: u128,
    pub duration: u64,
    pub reward_per_sec: u64,
    pub boostable: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub pool: PoolId,
    pub user: Address,
    pub bin_id: u32,
    pub amount: u128,
    pub new_total_stake: u128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub pool: PoolId,
    pub user: Address,
    pub bin_id: u32,
    pub amount: u128,
    pub new_total_stake: u128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestedEvent {
    pub pool: PoolId,
    pub user: Address,
    pub amount: u128,
    pub timestamp: u64,
}

/// Fired when new reward is spliced into a pool's epoch timeline.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardDepositedEvent {
    pub pool: PoolId,
    pub depositor: Address,
    pub amount: u128,
    pub duration: u64,
    pub epoch_index: u64,
    pub reward_per_sec: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostedEvent {
    pub pool: PoolId,
    pub user: Address,
    pub token: TokenId,
    pub boosted_amount: u128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostRemovedEvent {
    pub pool: PoolId,
    pub user: Address,
    pub token: TokenId,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyEnabledEvent {
    pub pool: PoolId,
    pub admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlobalEmergencyEnabledEvent {
    pub admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyUnstakedEvent {
    pub pool: PoolId,
    pub user: Address,
    pub positions: u32,
    pub total_amount: u128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasuryWithdrawnEvent {
    pub pool: PoolId,
    pub treasury: Address,
    pub amount: u128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    emergency_admin: Address,
    treasury_admin: Address,
    position_registry: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            emergency_admin,
            treasury_admin,
            position_registry,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_changed(env: &Env, role: Symbol, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_SET"), role.clone()),
        AdminChangedEvent {
            role,
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_registered(
    env: &Env,
    pool: PoolId,
    reward_amount: u128,
    duration: u64,
    reward_per_sec: u64,
    boostable: bool,
) {
    env.events().publish(
        (symbol_short!("POOL_REG"), pool.owner.clone()),
        PoolRegisteredEvent {
            pool,
            reward_amount,
            duration,
            reward_per_sec,
            boostable,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    pool: PoolId,
    user: Address,
    bin_id: u32,
    amount: u128,
    new_total_stake: u128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), user.clone()),
        StakedEvent {
            pool,
            user,
            bin_id,
            amount,
            new_total_stake,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    pool: PoolId,
    user: Address,
    bin_id: u32,
    amount: u128,
    new_total_stake: u128,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), user.clone()),
        UnstakedEvent {
            pool,
            user,
            bin_id,
            amount,
            new_total_stake,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_harvested(env: &Env, pool: PoolId, user: Address, amount: u128) {
    env.events().publish(
        (symbol_short!("HARVEST"), user.clone()),
        HarvestedEvent {
            pool,
            user,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_deposited(
    env: &Env,
    pool: PoolId,
    depositor: Address,
    amount: u128,
    duration: u64,
    epoch_index: u64,
    reward_per_sec: u64,
) {
    env.events().publish(
        (symbol_short!("RWD_DEP"), depositor.clone()),
        RewardDepositedEvent {
            pool,
            depositor,
            amount,
            duration,
            epoch_index,
            reward_per_sec,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_boosted(
    env: &Env,
    pool: PoolId,
    user: Address,
    token: TokenId,
    boosted_amount: u128,
) {
    env.events().publish(
        (symbol_short!("BOOSTED"), user.clone()),
        BoostedEvent {
            pool,
            user,
            token,
            boosted_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_boost_removed(env: &Env, pool: PoolId, user: Address, token: TokenId) {
    env.events().publish(
        (symbol_short!("UNBOOST"), user.clone()),
        BoostRemovedEvent {
            pool,
            user,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_enabled(env: &Env, pool: PoolId, admin: Address) {
    env.events().publish(
        (symbol_short!("EMERG"), admin.clone()),
        EmergencyEnabledEvent {
            pool,
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_global_emergency_enabled(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("G_EMERG"), admin.clone()),
        GlobalEmergencyEnabledEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_unstaked(
    env: &Env,
    pool: PoolId,
    user: Address,
    positions: u32,
    total_amount: u128,
) {
    env.events().publish(
        (symbol_short!("EMRG_UNS"), user.clone()),
        EmergencyUnstakedEvent {
            pool,
            user,
            positions,
            total_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_treasury_withdrawn(env: &Env, pool: PoolId, treasury: Address, amount: u128) {
    env.events().publish(
        (symbol_short!("TREASURY"), treasury.clone()),
        TreasuryWithdrawnEvent {
            pool,
            treasury,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
