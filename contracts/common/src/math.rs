//! Checked integer helpers for reward accounting.
//!
//! Every helper returns `None` instead of wrapping or panicking so callers can
//! map the failure onto their own contract error.

/// Computes `a * b / c`, rounding down.
///
/// Returns `None` when the product overflows `u128` or `c` is zero.
pub fn mul_div(a: u128, b: u128, c: u128) -> Option<u128> {
    if c == 0 {
        return None;
    }
    a.checked_mul(b)?.checked_div(c)
}

/// Returns `amount * percent / 100`, rounding down.
pub fn percent_of(amount: u128, percent: u32) -> Option<u128> {
    mul_div(amount, percent as u128, 100)
}

/// Converts a token-interface amount into an unsigned ledger amount.
///
/// Negative values yield `None`.
pub fn to_u128(amount: i128) -> Option<u128> {
    u128::try_from(amount).ok()
}

/// Converts an unsigned ledger amount into a token-interface amount.
pub fn to_i128(amount: u128) -> Option<i128> {
    i128::try_from(amount).ok()
}
