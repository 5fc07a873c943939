use common::math;
use soroban_sdk::{token, Address, Env};

use crate::{
    config::{self, GlobalConfig},
    constants::WITHDRAW_REWARD_PERIOD,
    emergency, events,
    pool::PoolId,
    storage, ContractError,
};

/// Move `amount` of a pool's reward reserve to the treasury admin.
///
/// Allowed while the pool is halted, or once `WITHDRAW_REWARD_PERIOD` has
/// passed since the last scheduled epoch ended.
pub fn withdraw_to_treasury(
    env: &Env,
    config: &GlobalConfig,
    treasury: Address,
    pool_id: PoolId,
    amount: i128,
) -> Result<(), ContractError> {
    config::require_treasury_admin(config, &treasury)?;
    if amount <= 0 {
        return Err(ContractError::ZeroAmount);
    }

    let mut pool = storage::load_pool(env, &pool_id)?;
    if !emergency::is_emergency(config, &pool) {
        let last_epoch = storage::load_epoch(env, &pool_id, pool.epochs_count - 1)?;
        let unlock_at = last_epoch.end_time.saturating_add(WITHDRAW_REWARD_PERIOD);
        if env.ledger().timestamp() < unlock_at {
            return Err(ContractError::TooEarlyForTreasury);
        }
    }

    let requested = math::to_u128(amount).ok_or(ContractError::ZeroAmount)?;
    pool.reward_reserve = pool
        .reward_reserve
        .checked_sub(requested)
        .ok_or(ContractError::InsufficientBalance)?;

    token::Client::new(env, &pool_id.reward_token).transfer(
        &env.current_contract_address(),
        &treasury,
        &amount,
    );

    storage::store_pool(env, &pool_id, &pool);

    events::publish_treasury_withdrawn(env, pool_id, treasury, requested);
    Ok(())
}
