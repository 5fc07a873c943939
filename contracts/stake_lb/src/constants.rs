/// Fixed-point scale of `Epoch::accum_reward`.
pub const ACCUM_REWARD_SCALE: u128 = 1_000_000_000_000;

/// Inclusive bounds of `BoostConfig::boost_percent`.
pub const MIN_BOOST_PERCENT: u32 = 1;
pub const MAX_BOOST_PERCENT: u32 = 100;

/// Seconds after the last scheduled epoch ends before the treasury may
/// withdraw leftover rewards from a pool that is not in emergency (12 weeks).
pub const WITHDRAW_REWARD_PERIOD: u64 = 7_257_600;
