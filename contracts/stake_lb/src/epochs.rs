//! Reward epochs and the per-pool epoch timeline.
//!
//! Every pool owns an append-only list of epochs stored under
//! `DataKey::Epoch(pool, index)`. Exactly one epoch is current; it emits
//! `reward_per_sec` until its `end_time`. New reward deposits never rewrite an
//! epoch's schedule: they close the current epoch and append a new one,
//! inserting a zero-rate "ghost" epoch first when the pool sat idle after the
//! previous epoch finished, so the timeline stays contiguous.
//!
//! `accum_reward` is the scaled reward per unit of stake weight. A freshly
//! appended epoch starts from the accumulator of the epoch it follows, which
//! keeps the value monotonic over the whole timeline and lets a position
//! settle against the current epoch alone.

use common::math;
use soroban_sdk::{contracttype, Env};

use crate::{
    constants::ACCUM_REWARD_SCALE,
    pool::{Pool, PoolId},
    storage, ContractError,
};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Epoch {
    pub rewards_amount: u128,
    pub reward_per_sec: u64,
    pub accum_reward: u128,
    pub start_time: u64,
    pub last_update_time: u64,
    pub end_time: u64,
    pub distributed: u128,
    /// Zero while the epoch is still emitting.
    pub ended_at: u64,
}

impl Epoch {
    /// Opens an epoch distributing `rewards_amount` over `duration` seconds from `now`.
    pub fn open(
        rewards_amount: u128,
        duration: u64,
        accum_reward: u128,
        now: u64,
    ) -> Result<Epoch, ContractError> {
        if duration == 0 {
            return Err(ContractError::ZeroDuration);
        }
        let reward_per_sec = u64::try_from(rewards_amount / duration as u128)
            .map_err(|_| ContractError::ArithmeticOverflow)?;
        if reward_per_sec == 0 {
            return Err(ContractError::ZeroAmount);
        }
        let end_time = now
            .checked_add(duration)
            .ok_or(ContractError::ArithmeticOverflow)?;

        Ok(Epoch {
            rewards_amount,
            reward_per_sec,
            accum_reward,
            start_time: now,
            last_update_time: now,
            end_time,
            distributed: 0,
            ended_at: 0,
        })
    }

    /// A closed, zero-rate epoch covering `[start_time, now]`.
    pub fn ghost(accum_reward: u128, start_time: u64, now: u64) -> Epoch {
        Epoch {
            rewards_amount: 0,
            reward_per_sec: 0,
            accum_reward,
            start_time,
            last_update_time: now,
            end_time: now,
            distributed: 0,
            ended_at: now,
        }
    }

    /// An epoch closed at timestamp zero still reports `ended_at == 0`, so the
    /// elapsed schedule is checked as well.
    pub fn is_ended(&self) -> bool {
        self.ended_at != 0 || self.last_update_time >= self.end_time
    }

    pub fn is_ghost(&self) -> bool {
        self.reward_per_sec == 0
    }

    /// Rewards allocated to this epoch that have not been emitted yet.
    pub fn remaining(&self) -> u128 {
        self.rewards_amount.saturating_sub(self.distributed)
    }

    /// Emits rewards up to `min(now, end_time)` across `total_weight` units of
    /// stake weight, closing the epoch once its schedule has run out. A
    /// naturally closed epoch has nothing remaining.
    ///
    /// With no weight staked the time still passes and its rewards count as
    /// distributed, but nobody's accumulator moves.
    pub fn accrue(&mut self, now: u64, total_weight: u128) -> Result<(), ContractError> {
        if self.is_ended() {
            return Ok(());
        }

        let until = now.min(self.end_time);
        if until > self.last_update_time {
            let elapsed = (until - self.last_update_time) as u128;
            let reward = (self.reward_per_sec as u128)
                .checked_mul(elapsed)
                .ok_or(ContractError::ArithmeticOverflow)?;

            if total_weight > 0 {
                let delta = math::mul_div(reward, ACCUM_REWARD_SCALE, total_weight)
                    .ok_or(ContractError::ArithmeticOverflow)?;
                self.accum_reward = self
                    .accum_reward
                    .checked_add(delta)
                    .ok_or(ContractError::ArithmeticOverflow)?;
            }
            self.distributed = self
                .distributed
                .checked_add(reward)
                .ok_or(ContractError::ArithmeticOverflow)?;
            self.last_update_time = until;
        }

        // Running out the schedule emits the truncation dust as well.
        if now >= self.end_time {
            self.distributed = self.rewards_amount;
            self.ended_at = self.end_time;
        }
        Ok(())
    }

    /// Stops emission at `now`, shortening the schedule.
    pub fn close(&mut self, now: u64) {
        self.end_time = now;
        self.ended_at = now;
    }
}

// ── Timeline ─────────────────────────────────────────────────────────────────

/// Settles the pool's current epoch up to `now`, stepping onto any later
/// epochs once the current one has ended. Returns the accumulator to settle
/// positions against.
pub fn settle(env: &Env, pool_id: &PoolId, pool: &mut Pool, now: u64) -> Result<u128, ContractError> {
    roll(env, pool_id, pool, now, true)
}

/// Same as [`settle`] without writing anything back.
pub fn preview(env: &Env, pool_id: &PoolId, pool: &Pool, now: u64) -> Result<u128, ContractError> {
    let mut scratch = pool.clone();
    roll(env, pool_id, &mut scratch, now, false)
}

fn roll(
    env: &Env,
    pool_id: &PoolId,
    pool: &mut Pool,
    now: u64,
    commit: bool,
) -> Result<u128, ContractError> {
    let total_weight = pool.total_weight()?;
    let mut epoch = storage::load_epoch(env, pool_id, pool.current_epoch_index)?;

    loop {
        epoch.accrue(now, total_weight)?;
        if commit {
            storage::store_epoch(env, pool_id, pool.current_epoch_index, &epoch);
        }

        let next = pool.current_epoch_index + 1;
        if !epoch.is_ended() || next >= pool.epochs_count {
            break;
        }

        epoch = storage::load_epoch(env, pool_id, next)?;
        pool.current_epoch_index = next;
        pool.reward_per_sec = epoch.reward_per_sec;
    }

    Ok(epoch.accum_reward)
}

/// Splices `amount` new reward into the timeline at `now`.
///
/// * Current epoch still open: whatever it has not emitted yet is carried
///   into a new epoch together with `amount`, spread over `duration`.
/// * Current epoch already over (including `now == end_time`): a ghost epoch
///   bridges `[end_time, now]` and the new epoch follows it.
///
/// Returns the index of the epoch that is current afterwards.
pub fn deposit_reward(
    env: &Env,
    pool_id: &PoolId,
    pool: &mut Pool,
    amount: u128,
    duration: u64,
    now: u64,
) -> Result<u64, ContractError> {
    if duration == 0 {
        return Err(ContractError::ZeroDuration);
    }
    if amount == 0 {
        return Err(ContractError::ZeroAmount);
    }

    settle(env, pool_id, pool, now)?;

    let current_index = pool.current_epoch_index;
    let mut current = storage::load_epoch(env, pool_id, current_index)?;
    let next_index = pool.epochs_count;

    if now < current.end_time {
        let carried = current
            .remaining()
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let fresh = Epoch::open(carried, duration, current.accum_reward, now)?;

        current.close(now);
        storage::store_epoch(env, pool_id, current_index, &current);
        storage::store_epoch(env, pool_id, next_index, &fresh);
        pool.epochs_count = next_index + 1;
    } else {
        let fresh = Epoch::open(amount, duration, current.accum_reward, now)?;
        let ghost = Epoch::ghost(current.accum_reward, current.end_time, now);

        storage::store_epoch(env, pool_id, next_index, &ghost);
        storage::store_epoch(env, pool_id, next_index + 1, &fresh);
        pool.epochs_count = next_index + 2;
    }

    // Steps the pool onto the epoch just appended.
    settle(env, pool_id, pool, now)?;
    Ok(pool.current_epoch_index)
}
