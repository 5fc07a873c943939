use common::{math, TokenId};
use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::{constants::ACCUM_REWARD_SCALE, pool::PoolId, storage, ContractError};

/// One user's stake in one bin of a pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub amount: u128,
    /// Reward already accounted for at the last settlement, i.e.
    /// `weight * accum_reward / ACCUM_REWARD_SCALE` at that time.
    pub unobtainable_reward: u128,
    pub boosted_amount: u128,
}

impl Position {
    pub fn empty() -> Self {
        Self {
            amount: 0,
            unobtainable_reward: 0,
            boosted_amount: 0,
        }
    }

    pub fn weight(&self) -> Result<u128, ContractError> {
        self.amount
            .checked_add(self.boosted_amount)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    fn owed(&self, accum_reward: u128) -> Result<u128, ContractError> {
        math::mul_div(self.weight()?, accum_reward, ACCUM_REWARD_SCALE)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Reward accrued since the last settlement, without touching the baseline.
    pub fn pending(&self, accum_reward: u128) -> Result<u128, ContractError> {
        Ok(self.owed(accum_reward)?.saturating_sub(self.unobtainable_reward))
    }

    /// Takes the pending reward out of the position and moves its baseline to
    /// `accum_reward`.
    pub fn settle(&mut self, accum_reward: u128) -> Result<u128, ContractError> {
        let pending = self.pending(accum_reward)?;
        self.unobtainable_reward = self.owed(accum_reward)?;
        Ok(pending)
    }

    /// Re-prices the baseline after the weight changed, so the new weight only
    /// earns from `accum_reward` onwards.
    pub fn reprice(&mut self, accum_reward: u128) -> Result<(), ContractError> {
        self.unobtainable_reward = self.owed(accum_reward)?;
        Ok(())
    }
}

/// A user's aggregate across every bin they hold in one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStake {
    pub amount: u128,
    pub boosted_amount: u128,
    /// Settled but not yet harvested reward.
    pub earned_reward: u128,
    pub bin_ids: Vec<u32>,
    pub boost_token: Option<TokenId>,
}

impl UserStake {
    pub fn new(env: &Env) -> Self {
        Self {
            amount: 0,
            boosted_amount: 0,
            earned_reward: 0,
            bin_ids: Vec::new(env),
            boost_token: None,
        }
    }

    pub fn is_boosted(&self) -> bool {
        self.boost_token.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0 && self.boost_token.is_none() && self.earned_reward == 0
    }

    pub fn add_earned(&mut self, reward: u128) -> Result<(), ContractError> {
        self.earned_reward = self
            .earned_reward
            .checked_add(reward)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn track_bin(&mut self, bin_id: u32) {
        if !self.bin_ids.contains(bin_id) {
            self.bin_ids.push_back(bin_id);
        }
    }

    pub fn untrack_bin(&mut self, env: &Env, bin_id: u32) {
        let mut kept = Vec::new(env);
        for id in self.bin_ids.iter() {
            if id != bin_id {
                kept.push_back(id);
            }
        }
        self.bin_ids = kept;
    }
}

/// Settles every bin `user` holds in the pool against `accum_reward`, moving
/// the pending reward into `stake.earned_reward`.
pub fn settle_all(
    env: &Env,
    pool_id: &PoolId,
    user: &Address,
    stake: &mut UserStake,
    accum_reward: u128,
) -> Result<(), ContractError> {
    for bin_id in stake.bin_ids.clone().iter() {
        let mut position =
            storage::load_position(env, pool_id, user, bin_id).ok_or(ContractError::NoStake)?;
        let pending = position.settle(accum_reward)?;
        stake.add_earned(pending)?;
        storage::store_position(env, pool_id, user, bin_id, &position);
    }
    Ok(())
}

/// Read-only total of settled and pending reward for `stake`.
pub fn pending_total(
    env: &Env,
    pool_id: &PoolId,
    user: &Address,
    stake: &UserStake,
    accum_reward: u128,
) -> Result<u128, ContractError> {
    let mut total = stake.earned_reward;
    for bin_id in stake.bin_ids.iter() {
        let position =
            storage::load_position(env, pool_id, user, bin_id).ok_or(ContractError::NoStake)?;
        total = total
            .checked_add(position.pending(accum_reward)?)
            .ok_or(ContractError::ArithmeticOverflow)?;
    }
    Ok(total)
}
