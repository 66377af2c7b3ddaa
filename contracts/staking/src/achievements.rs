//! Milestone rewards.
//!
//! Eligibility is never stored. It is recomputed on every query from the
//! user's [`UserStats`](crate::storage::UserStats) and live positions, so a
//! position change is reflected immediately. Only the per-achievement
//! `claimed` flag is persisted, and it is write-once.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::{
    custody::{self, AssetTransferPort},
    events, lifecycle, registry, rewards,
    storage::{self, StakingConfig},
    ContractError,
};

/// One whole token in base units (Stellar assets use 7 decimals).
pub const TOKEN_UNIT: i128 = 10_000_000;

const DAY: u64 = 86_400;

pub const DIAMOND_HANDS_HOLD: u64 = 30 * DAY;
pub const LONG_TERM_HOLD: u64 = 90 * DAY;
pub const PIONEER_POOLS: u32 = 3;
pub const HIGH_ROLLER_STAKE: i128 = 10_000 * TOKEN_UNIT;
pub const HARVESTER_EARNED: i128 = 1_000 * TOKEN_UNIT;
pub const WHALE_SINGLE_POOL_STAKE: i128 = 25_000 * TOKEN_UNIT;

/// The fixed catalogue. Discriminants are the stable achievement ids.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Achievement {
    /// Completed a first stake.
    FirstStake = 1,
    /// One open position held for 30 days.
    DiamondHands = 2,
    /// Staked in three different pools.
    PoolPioneer = 3,
    /// 10,000 tokens staked in total.
    HighRoller = 4,
    /// 1,000 tokens of rewards earned over the account's lifetime.
    RewardHarvester = 5,
    /// One open position held for 90 days.
    LongTermVision = 6,
    /// 25,000 tokens staked in a single pool.
    Whale = 7,
}

impl Achievement {
    pub const ALL: [Achievement; 7] = [
        Achievement::FirstStake,
        Achievement::DiamondHands,
        Achievement::PoolPioneer,
        Achievement::HighRoller,
        Achievement::RewardHarvester,
        Achievement::LongTermVision,
        Achievement::Whale,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    /// Fixed payout in base units of the achievement token.
    pub fn reward(self) -> i128 {
        let tokens: i128 = match self {
            Achievement::FirstStake => 5,
            Achievement::DiamondHands => 50,
            Achievement::PoolPioneer => 100,
            Achievement::HighRoller => 500,
            Achievement::RewardHarvester => 200,
            Achievement::LongTermVision => 1_000,
            Achievement::Whale => 2_500,
        };
        tokens.saturating_mul(TOKEN_UNIT)
    }

    pub fn is_met(self, progress: &UserProgress) -> bool {
        match self {
            Achievement::FirstStake => progress.stake_count > 0,
            Achievement::DiamondHands => progress.hold_seconds >= DIAMOND_HANDS_HOLD,
            Achievement::PoolPioneer => progress.pools_joined >= PIONEER_POOLS,
            Achievement::HighRoller => progress.total_staked >= HIGH_ROLLER_STAKE,
            Achievement::RewardHarvester => progress.lifetime_earned >= HARVESTER_EARNED,
            Achievement::LongTermVision => progress.hold_seconds >= LONG_TERM_HOLD,
            Achievement::Whale => progress.largest_stake >= WHALE_SINGLE_POOL_STAKE,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AchievementInfo {
    pub achievement: Achievement,
    pub reward: i128,
}

/// Catalogue-ordered flags.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStatus {
    pub eligible: Vec<bool>,
    pub claimed: Vec<bool>,
}

/// Aggregate statistics every predicate is evaluated against.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserProgress {
    pub stake_count: u32,
    pub pools_joined: u32,
    pub total_staked: i128,
    pub largest_stake: i128,
    /// Longest time any open position has gone without a deposit.
    pub hold_seconds: u64,
    /// Settled lifetime rewards plus whatever is pending right now.
    pub lifetime_earned: i128,
}

// ── Derivation ───────────────────────────────────────────────────────────────

pub fn progress(env: &Env, user: &Address) -> UserProgress {
    let now = env.ledger().timestamp();
    let stats = storage::load_user_stats(env, user);

    let mut out = UserProgress {
        stake_count: stats.stake_count,
        pools_joined: stats.pools.len(),
        total_staked: 0,
        largest_stake: 0,
        hold_seconds: 0,
        lifetime_earned: stats.lifetime_earned,
    };

    for pool_id in stats.pools.iter() {
        let Ok(mut pool) = storage::load_pool(env, pool_id) else {
            continue;
        };
        let mut position = storage::load_position(env, pool_id, user);
        let pending = rewards::settle_position(&mut pool, &mut position, now);

        out.lifetime_earned = out.lifetime_earned.saturating_add(pending);
        out.total_staked = out.total_staked.saturating_add(position.staked);
        if position.staked > out.largest_stake {
            out.largest_stake = position.staked;
        }
        let held_for = now.saturating_sub(position.last_deposit_at);
        if position.staked > 0 && held_for > out.hold_seconds {
            out.hold_seconds = held_for;
        }
    }

    out
}

pub fn catalogue(env: &Env) -> Vec<AchievementInfo> {
    let mut out = Vec::new(env);
    for achievement in Achievement::ALL {
        out.push_back(AchievementInfo {
            achievement,
            reward: achievement.reward(),
        });
    }
    out
}

/// Side-effect free.
pub fn user_status(env: &Env, user: &Address) -> UserStatus {
    let progress = progress(env, user);
    let mut eligible = Vec::new(env);
    let mut claimed = Vec::new(env);
    for achievement in Achievement::ALL {
        eligible.push_back(achievement.is_met(&progress));
        claimed.push_back(storage::is_claimed(env, user, achievement.id()));
    }
    UserStatus { eligible, claimed }
}

// ── Claims ───────────────────────────────────────────────────────────────────

/// The achievement token may double as a pool's staking asset; payouts never
/// touch that principal.
fn require_payout_cover(
    env: &Env,
    config: &StakingConfig,
    custody: &impl AssetTransferPort,
    amount: i128,
) -> Result<(), ContractError> {
    let asset = &config.achievement_token;
    let committed = registry::committed_principal(env, asset, None);
    custody::require_reward_cover(env, custody, asset, amount, committed)
}

pub fn claim(
    env: &Env,
    config: &StakingConfig,
    custody: &impl AssetTransferPort,
    user: &Address,
    achievement: Achievement,
) -> Result<i128, ContractError> {
    lifecycle::require_not_paused(env, config)?;

    if !achievement.is_met(&progress(env, user)) {
        return Err(ContractError::NotEligible);
    }
    if storage::is_claimed(env, user, achievement.id()) {
        return Err(ContractError::AlreadyClaimed);
    }

    let reward = achievement.reward();
    require_payout_cover(env, config, custody, reward)?;
    custody.transfer_out(&config.achievement_token, user, reward)?;
    storage::mark_claimed(env, user, achievement.id());

    events::publish_achievement_claimed(env, user.clone(), achievement.id(), reward);
    Ok(reward)
}

/// Claim every eligible, unclaimed achievement in one payout.
pub fn claim_all(
    env: &Env,
    config: &StakingConfig,
    custody: &impl AssetTransferPort,
    user: &Address,
) -> Result<i128, ContractError> {
    lifecycle::require_not_paused(env, config)?;

    let progress = progress(env, user);
    let mut batch: Vec<u32> = Vec::new(env);
    let mut total: i128 = 0;
    for achievement in Achievement::ALL {
        if achievement.is_met(&progress) && !storage::is_claimed(env, user, achievement.id()) {
            batch.push_back(achievement.id());
            total = total.saturating_add(achievement.reward());
        }
    }
    if batch.is_empty() {
        return Err(ContractError::NothingToClaim);
    }

    require_payout_cover(env, config, custody, total)?;
    custody.transfer_out(&config.achievement_token, user, total)?;

    for achievement in Achievement::ALL {
        if batch.contains(achievement.id()) {
            storage::mark_claimed(env, user, achievement.id());
            events::publish_achievement_claimed(
                env,
                user.clone(),
                achievement.id(),
                achievement.reward(),
            );
        }
    }

    Ok(total)
}
