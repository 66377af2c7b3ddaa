use crate::storage::{Pool, Position};

/// Fixed-point scaling factor.
///
/// Reward-per-share values are stored multiplied by this constant so that
/// sub-unit accrual survives integer division. 10^12 keeps twelve decimal
/// places while leaving headroom in `i128` for stakes of 10^20 base units.
pub const PRECISION: i128 = 1_000_000_000_000;

/// 10_000 bps = 100 %.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Simple-interest year used by the APR model (365 days).
pub const SECONDS_PER_YEAR: i128 = 31_536_000;

// ── Pure accrual math ───────────────────────────────────────────────────────

/// Advance a pool's `reward_per_share` accumulator.
///
/// ```text
/// Δrps = elapsed × apr_bps × PRECISION / (BPS_DENOMINATOR × SECONDS_PER_YEAR)
/// new_rps = stored + Δrps
/// ```
///
/// The APR is simple interest: every staked unit earns `apr_bps / 10_000`
/// per year, linearly in time, so the per-share delta is independent of how
/// much is staked. With nothing staked there is nobody to pay and `stored`
/// is returned unchanged.
#[allow(clippy::arithmetic_side_effects)]
pub fn accrue_reward_per_share(stored: i128, apr_bps: u32, elapsed: u64, total_staked: i128) -> i128 {
    if total_staked <= 0 || elapsed == 0 || apr_bps == 0 {
        return stored;
    }

    let delta = (elapsed as i128)
        .saturating_mul(apr_bps as i128)
        .saturating_mul(PRECISION)
        / (BPS_DENOMINATOR * SECONDS_PER_YEAR);

    stored.saturating_add(delta)
}

/// Rewards owed to a position.
///
/// ```text
/// earned = staked × (current_rps − checkpoint) / PRECISION + accrued
/// ```
#[allow(clippy::arithmetic_side_effects)]
pub fn earned(staked: i128, current_rps: i128, checkpoint: i128, accrued: i128) -> i128 {
    let fresh = staked.saturating_mul(current_rps.saturating_sub(checkpoint)) / PRECISION;
    accrued.saturating_add(fresh)
}

/// Portion of `amount` withheld at `penalty_bps`, rounded down.
#[allow(clippy::arithmetic_side_effects)]
pub fn penalty(amount: i128, penalty_bps: u32) -> i128 {
    amount.saturating_mul(penalty_bps as i128) / BPS_DENOMINATOR
}

// ── Settlement ──────────────────────────────────────────────────────────────

/// Bring a pool's accumulator up to `now`.
///
/// Idempotent: a second call with the same `now` changes nothing. A `now`
/// at or behind `last_accrual_at` is a no-op. An empty pool keeps its
/// accumulator but still moves its clock forward, otherwise the first
/// depositor after an idle stretch would be paid for time nobody staked.
pub fn settle_pool(pool: &mut Pool, now: u64) {
    if now <= pool.last_accrual_at {
        return;
    }
    let elapsed = now.saturating_sub(pool.last_accrual_at);
    pool.reward_per_share =
        accrue_reward_per_share(pool.reward_per_share, pool.apr_bps, elapsed, pool.total_staked);
    pool.last_accrual_at = now;
}

/// Settle the pool, then fold everything the position earned since its
/// checkpoint into `accrued_rewards`.
///
/// Returns the freshly credited amount so callers can keep lifetime totals.
pub fn settle_position(pool: &mut Pool, position: &mut Position, now: u64) -> i128 {
    settle_pool(pool, now);

    let before = position.accrued_rewards;
    position.accrued_rewards = earned(
        position.staked,
        pool.reward_per_share,
        position.reward_per_share_paid,
        position.accrued_rewards,
    );
    position.reward_per_share_paid = pool.reward_per_share;

    position.accrued_rewards.saturating_sub(before)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure math, no contract environment.
