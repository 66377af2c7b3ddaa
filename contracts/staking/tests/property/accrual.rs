#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Properties of the reward-per-share arithmetic.
//!
//! Invariants tested:
//! - The accumulator never decreases with time
//! - Splitting an interval never pays more than accruing it in one step
//! - A lone staker earns the simple-interest amount, up to rounding
//! - Penalty plus net always reconstructs the withdrawn amount

use multi_pool_staking::rewards::{
    accrue_reward_per_share, earned, penalty, BPS_DENOMINATOR, SECONDS_PER_YEAR,
};
use proptest::prelude::*;

const FIVE_YEARS: u64 = 5 * 31_536_000;

proptest! {
    #[test]
    fn prop_accumulator_monotonic(
        apr in 0u32..=100_000,
        total in 1i128..=1_000_000_000_000_000,
        first in 0u64..=FIVE_YEARS,
        second in 0u64..=FIVE_YEARS,
    ) {
        let after_first = accrue_reward_per_share(0, apr, first, total);
        let after_second = accrue_reward_per_share(after_first, apr, second, total);
        prop_assert!(after_first >= 0);
        prop_assert!(after_second >= after_first);
    }

    #[test]
    fn prop_split_interval_never_overpays(
        apr in 1u32..=50_000,
        total in 1i128..=1_000_000_000_000,
        first in 0u64..=FIVE_YEARS,
        second in 0u64..=FIVE_YEARS,
    ) {
        let split = accrue_reward_per_share(
            accrue_reward_per_share(0, apr, first, total),
            apr,
            second,
            total,
        );
        let whole = accrue_reward_per_share(0, apr, first + second, total);
        prop_assert!(split <= whole);
        // Each settlement floors at most one unit.
        prop_assert!(whole - split <= 1);
    }

    #[test]
    fn prop_single_staker_simple_interest(
        apr in 0u32..=50_000,
        staked in 1i128..=1_000_000_000_000,
        elapsed in 0u64..=FIVE_YEARS,
    ) {
        let rps = accrue_reward_per_share(0, apr, elapsed, staked);
        let paid = earned(staked, rps, 0, 0);
        let exact = staked * apr as i128 * elapsed as i128 / (BPS_DENOMINATOR * SECONDS_PER_YEAR);

        prop_assert!(paid <= exact);
        prop_assert!(exact - paid <= 2);
    }

    #[test]
    fn prop_earned_ignores_already_paid_share(
        staked in 0i128..=1_000_000_000_000,
        checkpoint in 0i128..=1_000_000_000_000,
        accrued in 0i128..=1_000_000_000,
    ) {
        prop_assert_eq!(earned(staked, checkpoint, checkpoint, accrued), accrued);
    }

    #[test]
    fn prop_penalty_bounded(amount in 0i128..=1_000_000_000_000_000, bps in 0u32..=10_000) {
        let cut = penalty(amount, bps);
        prop_assert!(cut >= 0);
        prop_assert!(cut <= amount);
        prop_assert_eq!((amount - cut) + cut, amount);
        if bps == 0 {
            prop_assert_eq!(cut, 0);
        }
        if bps == 10_000 {
            prop_assert_eq!(cut, amount);
        }
    }
}
