//! Position state transitions.
//!
//! Every operation follows the same shape: validate, settle the position
//! in memory, apply the bookkeeping change in memory, move assets through
//! the [`AssetTransferPort`], and only then persist. An error at any step
//! returns before anything is written.
//!
//! Position states:
//!
//! ```text
//! Empty ──stake──▶ Staked(Locked) ──lock elapses──▶ Staked(Unlocked)
//!   ▲                   │  ▲                              │
//!   │                   │  └────────── top-up stake ──────┘
//!   └── full withdraw / early withdraw / exit / emergency withdraw
//! ```

use soroban_sdk::{contracttype, log, Address, Env};

use crate::{
    custody::{self, AssetTransferPort},
    events, registry, rewards,
    storage::{self, Pool, Position, StakingConfig, UserStats},
    ContractError,
};

/// Result of a lifecycle command: the position after the change and what
/// left custody because of it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionReceipt {
    pub pool_id: u32,
    pub staked: i128,
    pub pending_rewards: i128,
    pub total_staked: i128,
    pub principal_out: i128,
    pub rewards_out: i128,
    pub penalty: i128,
}

/// Read-only snapshot of a position with rewards settled to the current
/// ledger time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionInfo {
    pub staked: i128,
    pub pending_rewards: i128,
    pub last_deposit_at: u64,
    pub unlock_at: u64,
    pub locked: bool,
}

// ── Guards and helpers ───────────────────────────────────────────────────────

pub fn require_not_paused(env: &Env, config: &StakingConfig) -> Result<(), ContractError> {
    if config.paused {
        log!(env, "rejected: contract paused");
        return Err(ContractError::PoolPaused);
    }
    Ok(())
}

fn require_positive(env: &Env, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        log!(env, "rejected: non-positive amount {}", amount);
        return Err(ContractError::ZeroAmount);
    }
    Ok(())
}

pub fn unlock_at(pool: &Pool, position: &Position) -> u64 {
    position.last_deposit_at.saturating_add(pool.lock_duration)
}

/// An empty position has nothing locked.
pub fn is_unlocked(pool: &Pool, position: &Position, now: u64) -> bool {
    position.staked == 0 || pool.lock_duration == 0 || now >= unlock_at(pool, position)
}

struct Loaded {
    pool: Pool,
    position: Position,
    stats: UserStats,
}

/// Load the pool, the user's position and stats, and settle the position
/// to `now`. Nothing is written.
fn load_settled(env: &Env, pool_id: u32, user: &Address, now: u64) -> Result<Loaded, ContractError> {
    let mut pool = storage::load_pool(env, pool_id)?;
    let mut position = storage::load_position(env, pool_id, user);
    let mut stats = storage::load_user_stats(env, user);

    let credited = rewards::settle_position(&mut pool, &mut position, now);
    stats.lifetime_earned = stats.lifetime_earned.saturating_add(credited);

    Ok(Loaded {
        pool,
        position,
        stats,
    })
}

fn commit(env: &Env, user: &Address, state: &Loaded) {
    storage::save_pool(env, &state.pool);
    storage::save_position(env, state.pool.id, user, &state.position);
    storage::save_user_stats(env, user, &state.stats);
}

fn receipt(state: &Loaded, principal_out: i128, rewards_out: i128, penalty: i128) -> PositionReceipt {
    PositionReceipt {
        pool_id: state.pool.id,
        staked: state.position.staked,
        pending_rewards: state.position.accrued_rewards,
        total_staked: state.pool.total_staked,
        principal_out,
        rewards_out,
        penalty,
    }
}

/// Reward payouts may only spend what custody holds beyond staked principal.
fn require_reward_cover(
    env: &Env,
    custody: &impl AssetTransferPort,
    state: &Loaded,
    reward: i128,
) -> Result<(), ContractError> {
    let asset = &state.pool.reward_token;
    let committed = registry::committed_principal(env, asset, Some(&state.pool));
    custody::require_reward_cover(env, custody, asset, reward, committed)
}

fn remove_principal(state: &mut Loaded, amount: i128) {
    state.position.staked = state.position.staked.saturating_sub(amount);
    state.pool.total_staked = state.pool.total_staked.saturating_sub(amount);
}

// ── Commands ─────────────────────────────────────────────────────────────────

/// Deposit `amount` of the pool's staking asset. Restarts the position's
/// lock clock.
pub fn stake(
    env: &Env,
    config: &StakingConfig,
    custody: &impl AssetTransferPort,
    pool_id: u32,
    user: &Address,
    amount: i128,
) -> Result<PositionReceipt, ContractError> {
    require_positive(env, amount)?;
    require_not_paused(env, config)?;

    let now = env.ledger().timestamp();
    let mut state = load_settled(env, pool_id, user, now)?;

    custody.transfer_in(&state.pool.staking_token, user, amount)?;

    state.position.staked = state.position.staked.saturating_add(amount);
    state.position.last_deposit_at = now;
    state.pool.total_staked = state.pool.total_staked.saturating_add(amount);
    state.stats.record_stake(pool_id);
    commit(env, user, &state);

    events::publish_staked(
        env,
        pool_id,
        user.clone(),
        amount,
        state.pool.total_staked,
        unlock_at(&state.pool, &state.position),
    );

    Ok(receipt(&state, 0, 0, 0))
}

/// Penalty-free withdrawal of unlocked principal. Accrued rewards stay in
/// the position.
pub fn withdraw(
    env: &Env,
    config: &StakingConfig,
    custody: &impl AssetTransferPort,
    pool_id: u32,
    user: &Address,
    amount: i128,
) -> Result<PositionReceipt, ContractError> {
    require_positive(env, amount)?;
    require_not_paused(env, config)?;

    let now = env.ledger().timestamp();
    let mut state = load_settled(env, pool_id, user, now)?;

    if !is_unlocked(&state.pool, &state.position, now) {
        log!(env, "rejected: locked until {}", unlock_at(&state.pool, &state.position));
        return Err(ContractError::LockNotElapsed);
    }
    if amount > state.position.staked {
        return Err(ContractError::InsufficientBalance);
    }

    remove_principal(&mut state, amount);
    custody.transfer_out(&state.pool.staking_token, user, amount)?;
    commit(env, user, &state);

    events::publish_withdrawn(env, pool_id, user.clone(), amount, state.pool.total_staked);

    Ok(receipt(&state, amount, 0, 0))
}

/// Withdraw regardless of lock state. While the lock is running the pool's
/// penalty is withheld from principal and routed to the penalty recipient;
/// accrued rewards are kept either way.
pub fn early_withdraw(
    env: &Env,
    config: &StakingConfig,
    custody: &impl AssetTransferPort,
    pool_id: u32,
    user: &Address,
    amount: i128,
) -> Result<PositionReceipt, ContractError> {
    require_positive(env, amount)?;
    require_not_paused(env, config)?;

    let now = env.ledger().timestamp();
    let mut state = load_settled(env, pool_id, user, now)?;

    if amount > state.position.staked {
        return Err(ContractError::InsufficientBalance);
    }

    let penalty = if is_unlocked(&state.pool, &state.position, now) {
        0
    } else {
        rewards::penalty(amount, state.pool.early_penalty_bps)
    };
    let net = amount.saturating_sub(penalty);

    remove_principal(&mut state, amount);
    custody.transfer_out(&state.pool.staking_token, user, net)?;
    custody.transfer_out(&state.pool.staking_token, &config.penalty_recipient, penalty)?;
    commit(env, user, &state);

    events::publish_early_withdrawn(
        env,
        pool_id,
        user.clone(),
        net,
        penalty,
        config.penalty_recipient.clone(),
    );

    Ok(receipt(&state, net, 0, penalty))
}

/// Pay out all accrued rewards in the pool's reward asset.
pub fn get_reward(
    env: &Env,
    config: &StakingConfig,
    custody: &impl AssetTransferPort,
    pool_id: u32,
    user: &Address,
) -> Result<PositionReceipt, ContractError> {
    require_not_paused(env, config)?;

    let now = env.ledger().timestamp();
    let mut state = load_settled(env, pool_id, user, now)?;

    let reward = state.position.accrued_rewards;
    if reward <= 0 {
        return Err(ContractError::NothingToClaim);
    }

    state.position.accrued_rewards = 0;
    require_reward_cover(env, custody, &state, reward)?;
    custody.transfer_out(&state.pool.reward_token, user, reward)?;
    commit(env, user, &state);

    events::publish_reward_paid(env, pool_id, user.clone(), reward);

    Ok(receipt(&state, 0, reward, 0))
}

/// Full `withdraw` followed by `get_reward`, all or nothing.
pub fn exit(
    env: &Env,
    config: &StakingConfig,
    custody: &impl AssetTransferPort,
    pool_id: u32,
    user: &Address,
) -> Result<PositionReceipt, ContractError> {
    require_not_paused(env, config)?;

    let now = env.ledger().timestamp();
    let mut state = load_settled(env, pool_id, user, now)?;

    let amount = state.position.staked;
    require_positive(env, amount)?;
    if !is_unlocked(&state.pool, &state.position, now) {
        return Err(ContractError::LockNotElapsed);
    }
    let reward = state.position.accrued_rewards;
    if reward <= 0 {
        return Err(ContractError::NothingToClaim);
    }

    remove_principal(&mut state, amount);
    state.position.accrued_rewards = 0;
    custody.transfer_out(&state.pool.staking_token, user, amount)?;
    require_reward_cover(env, custody, &state, reward)?;
    custody.transfer_out(&state.pool.reward_token, user, reward)?;
    commit(env, user, &state);

    events::publish_withdrawn(env, pool_id, user.clone(), amount, state.pool.total_staked);
    events::publish_reward_paid(env, pool_id, user.clone(), reward);

    Ok(receipt(&state, amount, reward, 0))
}

/// Return all principal, ignoring both the lock and the pause flag, and
/// forfeit every accrued reward.
pub fn emergency_withdraw(
    env: &Env,
    custody: &impl AssetTransferPort,
    pool_id: u32,
    user: &Address,
) -> Result<PositionReceipt, ContractError> {
    let now = env.ledger().timestamp();
    let mut state = load_settled(env, pool_id, user, now)?;

    let amount = state.position.staked;
    if amount <= 0 {
        return Err(ContractError::InsufficientBalance);
    }

    let forfeited = state.position.accrued_rewards;
    state.position.accrued_rewards = 0;
    state.stats.lifetime_earned = state.stats.lifetime_earned.saturating_sub(forfeited);
    remove_principal(&mut state, amount);

    custody.transfer_out(&state.pool.staking_token, user, amount)?;
    commit(env, user, &state);

    events::publish_emergency_withdrawn(env, pool_id, user.clone(), amount, forfeited);

    Ok(receipt(&state, amount, 0, 0))
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Position settled to the current ledger time, in memory only.
pub fn position_info(env: &Env, pool_id: u32, user: &Address) -> Result<PositionInfo, ContractError> {
    let now = env.ledger().timestamp();
    let mut pool = storage::load_pool(env, pool_id)?;
    let mut position = storage::load_position(env, pool_id, user);
    rewards::settle_position(&mut pool, &mut position, now);

    Ok(PositionInfo {
        staked: position.staked,
        pending_rewards: position.accrued_rewards,
        last_deposit_at: position.last_deposit_at,
        unlock_at: unlock_at(&pool, &position),
        locked: position.staked > 0 && !is_unlocked(&pool, &position, now),
    })
}
