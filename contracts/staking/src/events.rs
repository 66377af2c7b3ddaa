#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub achievement_token: Address,
    pub max_apr_bps: u32,
    pub timestamp: u64,
}

/// Fired when the owner opens a new pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool_id: u32,
    pub staking_token: Address,
    pub reward_token: Address,
    pub apr_bps: u32,
    pub lock_duration: u64,
    pub timestamp: u64,
}

/// Fired when a user deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub unlock_at: u64,
    pub timestamp: u64,
}

/// Fired when principal leaves a pool through `withdraw` or `exit`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired on an early withdrawal; `net + penalty` equals the amount removed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarlyWithdrawnEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub net: i128,
    pub penalty: i128,
    pub penalty_recipient: Address,
    pub timestamp: u64,
}

/// Fired when pool rewards are paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub forfeited_rewards: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AchievementClaimedEvent {
    pub user: Address,
    pub achievement_id: u32,
    pub reward: i128,
    pub timestamp: u64,
}

/// Fired for any per-pool parameter change (APR, lock, penalty).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolParamSetEvent {
    pub pool_id: u32,
    pub old_value: u64,
    pub new_value: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseSetEvent {
    pub paused: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltyRecipientSetEvent {
    pub old_recipient: Address,
    pub new_recipient: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetRecoveredEvent {
    pub asset: Address,
    pub amount: i128,
    pub recipient: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when a pending ownership transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, achievement_token: Address, max_apr_bps: u32) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            achievement_token,
            max_apr_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_created(
    env: &Env,
    pool_id: u32,
    staking_token: Address,
    reward_token: Address,
    apr_bps: u32,
    lock_duration: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_NEW"), pool_id),
        PoolCreatedEvent {
            pool_id,
            staking_token,
            reward_token,
            apr_bps,
            lock_duration,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    pool_id: u32,
    staker: Address,
    amount: i128,
    new_total_staked: i128,
    unlock_at: u64,
) {
    env.events().publish(
        (symbol_short!("STAKED"), pool_id, staker.clone()),
        StakedEvent {
            pool_id,
            staker,
            amount,
            new_total_staked,
            unlock_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    pool_id: u32,
    staker: Address,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), pool_id, staker.clone()),
        WithdrawnEvent {
            pool_id,
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_early_withdrawn(
    env: &Env,
    pool_id: u32,
    staker: Address,
    net: i128,
    penalty: i128,
    penalty_recipient: Address,
) {
    env.events().publish(
        (symbol_short!("EARLY_WD"), pool_id, staker.clone()),
        EarlyWithdrawnEvent {
            pool_id,
            staker,
            net,
            penalty,
            penalty_recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, pool_id: u32, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), pool_id, staker.clone()),
        RewardPaidEvent {
            pool_id,
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawn(
    env: &Env,
    pool_id: u32,
    staker: Address,
    amount: i128,
    forfeited_rewards: i128,
) {
    env.events().publish(
        (symbol_short!("EMERG_WD"), pool_id, staker.clone()),
        EmergencyWithdrawnEvent {
            pool_id,
            staker,
            amount,
            forfeited_rewards,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_achievement_claimed(env: &Env, user: Address, achievement_id: u32, reward: i128) {
    env.events().publish(
        (symbol_short!("ACH_CLMD"), user.clone()),
        AchievementClaimedEvent {
            user,
            achievement_id,
            reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_apr_set(env: &Env, pool_id: u32, old_apr_bps: u32, new_apr_bps: u32) {
    publish_pool_param(env, symbol_short!("APR_SET"), pool_id, old_apr_bps as u64, new_apr_bps as u64);
}

pub fn publish_lock_set(env: &Env, pool_id: u32, old_lock: u64, new_lock: u64) {
    publish_pool_param(env, symbol_short!("LOCK_SET"), pool_id, old_lock, new_lock);
}

pub fn publish_penalty_set(env: &Env, pool_id: u32, old_bps: u32, new_bps: u32) {
    publish_pool_param(env, symbol_short!("PNLTY_SET"), pool_id, old_bps as u64, new_bps as u64);
}

fn publish_pool_param(
    env: &Env,
    topic: soroban_sdk::Symbol,
    pool_id: u32,
    old_value: u64,
    new_value: u64,
) {
    env.events().publish(
        (topic, pool_id),
        PoolParamSetEvent {
            pool_id,
            old_value,
            new_value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pause_set(env: &Env, paused: bool) {
    env.events().publish(
        (symbol_short!("PAUSE_SET"),),
        PauseSetEvent {
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_penalty_recipient_set(env: &Env, old_recipient: Address, new_recipient: Address) {
    env.events().publish(
        (symbol_short!("PNLTY_RCP"),),
        PenaltyRecipientSetEvent {
            old_recipient,
            new_recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_asset_recovered(env: &Env, asset: Address, amount: i128, recipient: Address) {
    env.events().publish(
        (symbol_short!("RECOVERED"), asset.clone()),
        AssetRecoveredEvent {
            asset,
            amount,
            recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
