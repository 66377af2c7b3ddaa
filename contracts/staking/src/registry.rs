//! Pool configuration: creation, rate/lock/penalty changes, the global pause
//! flag and the penalty recipient.
//!
//! Callers must have checked the `Owner` capability. Anything that changes
//! how rewards accrue settles the affected pool(s) at the old parameters
//! first, so a rate change never reaches back into time already elapsed.

use soroban_sdk::{log, Address, Env};

use crate::{
    events, rewards,
    storage::{self, Pool, StakingConfig},
    ContractError,
};

/// Hard limit for the configurable APR ceiling (1000 %).
pub const APR_CEILING_LIMIT_BPS: u32 = 100_000;

/// Ceiling most deployments use (50 %).
pub const DEFAULT_MAX_APR_BPS: u32 = 5_000;

pub const MAX_PENALTY_BPS: u32 = 10_000;

// ── Validation ───────────────────────────────────────────────────────────────

pub fn validate_apr(env: &Env, config: &StakingConfig, apr_bps: u32) -> Result<(), ContractError> {
    if apr_bps > config.max_apr_bps {
        log!(env, "apr {} above ceiling {}", apr_bps, config.max_apr_bps);
        return Err(ContractError::InvalidParameter);
    }
    Ok(())
}

pub fn validate_penalty(env: &Env, penalty_bps: u32) -> Result<(), ContractError> {
    if penalty_bps > MAX_PENALTY_BPS {
        log!(env, "penalty {} above {}", penalty_bps, MAX_PENALTY_BPS);
        return Err(ContractError::InvalidParameter);
    }
    Ok(())
}

/// The custody account can never itself be one of the pool assets.
fn validate_asset(env: &Env, asset: &Address) -> Result<(), ContractError> {
    if *asset == env.current_contract_address() {
        return Err(ContractError::InvalidAsset);
    }
    Ok(())
}

// ── Mutators ─────────────────────────────────────────────────────────────────

pub fn create_pool(
    env: &Env,
    config: &StakingConfig,
    staking_token: Address,
    reward_token: Address,
    apr_bps: u32,
    lock_duration: u64,
) -> Result<u32, ContractError> {
    validate_asset(env, &staking_token)?;
    validate_asset(env, &reward_token)?;
    validate_apr(env, config, apr_bps)?;

    let pool = Pool {
        id: storage::next_pool_id(env),
        staking_token,
        reward_token,
        apr_bps,
        lock_duration,
        early_penalty_bps: 0,
        total_staked: 0,
        reward_per_share: 0,
        last_accrual_at: env.ledger().timestamp(),
    };
    storage::save_pool(env, &pool);

    events::publish_pool_created(
        env,
        pool.id,
        pool.staking_token.clone(),
        pool.reward_token.clone(),
        pool.apr_bps,
        pool.lock_duration,
    );

    Ok(pool.id)
}

pub fn set_apr(
    env: &Env,
    config: &StakingConfig,
    pool_id: u32,
    apr_bps: u32,
) -> Result<(), ContractError> {
    validate_apr(env, config, apr_bps)?;
    let mut pool = storage::load_pool(env, pool_id)?;

    // Close out the elapsed interval at the old rate.
    rewards::settle_pool(&mut pool, env.ledger().timestamp());

    let old = pool.apr_bps;
    pool.apr_bps = apr_bps;
    storage::save_pool(env, &pool);

    events::publish_apr_set(env, pool_id, old, apr_bps);
    Ok(())
}

/// Takes effect for existing positions too: unlock status is always judged
/// against the pool's current lock.
pub fn set_lock_duration(env: &Env, pool_id: u32, lock_duration: u64) -> Result<(), ContractError> {
    let mut pool = storage::load_pool(env, pool_id)?;
    let old = pool.lock_duration;
    pool.lock_duration = lock_duration;
    storage::save_pool(env, &pool);

    events::publish_lock_set(env, pool_id, old, lock_duration);
    Ok(())
}

pub fn set_early_penalty(env: &Env, pool_id: u32, penalty_bps: u32) -> Result<(), ContractError> {
    validate_penalty(env, penalty_bps)?;
    let mut pool = storage::load_pool(env, pool_id)?;
    let old = pool.early_penalty_bps;
    pool.early_penalty_bps = penalty_bps;
    storage::save_pool(env, &pool);

    events::publish_penalty_set(env, pool_id, old, penalty_bps);
    Ok(())
}

/// Flip the global pause flag after settling every pool.
pub fn set_global_pause(env: &Env, config: &mut StakingConfig, paused: bool) {
    let now = env.ledger().timestamp();
    for pool_id in 0..storage::pool_count(env) {
        if let Ok(mut pool) = storage::load_pool(env, pool_id) {
            rewards::settle_pool(&mut pool, now);
            storage::save_pool(env, &pool);
        }
    }

    config.paused = paused;
    storage::save_config(env, config);

    events::publish_pause_set(env, paused);
}

pub fn set_penalty_recipient(env: &Env, config: &mut StakingConfig, recipient: Address) {
    let old = config.penalty_recipient.clone();
    config.penalty_recipient = recipient.clone();
    storage::save_config(env, config);

    events::publish_penalty_recipient_set(env, old, recipient);
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// True if `asset` is the staking or reward asset of any pool.
pub fn is_pool_asset(env: &Env, asset: &Address) -> bool {
    (0..storage::pool_count(env)).any(|pool_id| match storage::load_pool(env, pool_id) {
        Ok(pool) => pool.staking_token == *asset || pool.reward_token == *asset,
        Err(_) => false,
    })
}

/// Principal staked in `asset` across every pool. `current` stands in for
/// its stored copy, so in-memory changes not yet persisted are counted.
pub fn committed_principal(env: &Env, asset: &Address, current: Option<&Pool>) -> i128 {
    let mut total: i128 = 0;
    for pool_id in 0..storage::pool_count(env) {
        let staked = match current {
            Some(pool) if pool.id == pool_id => {
                if pool.staking_token != *asset {
                    continue;
                }
                pool.total_staked
            }
            _ => match storage::load_pool(env, pool_id) {
                Ok(pool) if pool.staking_token == *asset => pool.total_staked,
                _ => continue,
            },
        };
        total = total.saturating_add(staked);
    }
    total
}

/// Pool with its accumulator advanced to `now` in memory only.
pub fn settled_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    let mut pool = storage::load_pool(env, pool_id)?;
    rewards::settle_pool(&mut pool, env.ledger().timestamp());
    Ok(pool)
}
