//! Owner-only surface: authorization in front of the registry mutators,
//! stray-asset recovery and the two-step ownership handover.

use soroban_sdk::{log, Address, Env};

use crate::{
    custody::AssetTransferPort,
    events, registry,
    storage::{self, StakingConfig},
    ContractError,
};

/// Guard: `caller` must be the configured owner. Returns the config so the
/// delegated operation works on the same record.
pub fn require_owner(env: &Env, caller: &Address) -> Result<StakingConfig, ContractError> {
    let config = storage::load_config(env)?;
    if *caller != config.owner {
        log!(env, "rejected: caller is not the owner");
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

// ── Registry delegation ──────────────────────────────────────────────────────

pub fn create_pool(
    env: &Env,
    caller: &Address,
    staking_token: Address,
    reward_token: Address,
    apr_bps: u32,
    lock_duration: u64,
) -> Result<u32, ContractError> {
    let config = require_owner(env, caller)?;
    registry::create_pool(env, &config, staking_token, reward_token, apr_bps, lock_duration)
}

pub fn set_apr(env: &Env, caller: &Address, pool_id: u32, apr_bps: u32) -> Result<(), ContractError> {
    let config = require_owner(env, caller)?;
    registry::set_apr(env, &config, pool_id, apr_bps)
}

pub fn set_lock_duration(
    env: &Env,
    caller: &Address,
    pool_id: u32,
    lock_duration: u64,
) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    registry::set_lock_duration(env, pool_id, lock_duration)
}

pub fn set_early_penalty(
    env: &Env,
    caller: &Address,
    pool_id: u32,
    penalty_bps: u32,
) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    registry::set_early_penalty(env, pool_id, penalty_bps)
}

pub fn set_global_pause(env: &Env, caller: &Address, paused: bool) -> Result<(), ContractError> {
    let mut config = require_owner(env, caller)?;
    registry::set_global_pause(env, &mut config, paused);
    Ok(())
}

pub fn set_penalty_recipient(
    env: &Env,
    caller: &Address,
    recipient: Address,
) -> Result<(), ContractError> {
    let mut config = require_owner(env, caller)?;
    registry::set_penalty_recipient(env, &mut config, recipient);
    Ok(())
}

// ── Recovery ─────────────────────────────────────────────────────────────────

/// Send tokens that were transferred to the contract by mistake to the
/// owner. Pool assets and the achievement token back user balances and are
/// refused.
pub fn recover_foreign_asset(
    env: &Env,
    caller: &Address,
    custody: &impl AssetTransferPort,
    asset: Address,
    amount: i128,
) -> Result<(), ContractError> {
    let config = require_owner(env, caller)?;
    if amount <= 0 {
        return Err(ContractError::ZeroAmount);
    }
    if !is_recoverable(env, &asset)? {
        log!(env, "rejected: recovery of a managed asset");
        return Err(ContractError::ForbiddenAsset);
    }

    custody.transfer_out(&asset, &config.owner, amount)?;

    events::publish_asset_recovered(env, asset, amount, config.owner);
    Ok(())
}

// ── Ownership transfer (two-step) ────────────────────────────────────────────

pub fn propose_owner(env: &Env, caller: &Address, new_owner: Address) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    storage::set_pending_owner(env, &new_owner);

    events::publish_owner_transfer_proposed(env, caller.clone(), new_owner);
    Ok(())
}

/// Completed by the proposed owner. The penalty recipient follows the owner
/// only if it still pointed at the old one.
pub fn accept_owner(env: &Env, new_owner: &Address) -> Result<(), ContractError> {
    let mut config = storage::load_config(env)?;
    let pending = storage::pending_owner(env).ok_or(ContractError::InvalidParameter)?;
    if *new_owner != pending {
        return Err(ContractError::Unauthorized);
    }

    let old_owner = config.owner.clone();
    if config.penalty_recipient == old_owner {
        config.penalty_recipient = new_owner.clone();
    }
    config.owner = new_owner.clone();
    storage::save_config(env, &config);
    storage::clear_pending_owner(env);

    events::publish_owner_transfer_accepted(env, old_owner, new_owner.clone());
    Ok(())
}

pub fn cancel_owner_transfer(env: &Env, caller: &Address) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    let pending = storage::pending_owner(env).ok_or(ContractError::InvalidParameter)?;
    storage::clear_pending_owner(env);

    events::publish_owner_transfer_cancelled(env, caller.clone(), pending);
    Ok(())
}

/// Whether `asset` may be recovered at all.
pub fn is_recoverable(env: &Env, asset: &Address) -> Result<bool, ContractError> {
    let config = storage::load_config(env)?;
    Ok(*asset != config.achievement_token && !registry::is_pool_asset(env, asset))
}
