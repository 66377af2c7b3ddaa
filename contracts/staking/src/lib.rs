#![no_std]

//! Multi-pool token staking ledger.
//!
//! Users stake a fungible asset into independently configured pools, earn
//! simple-interest rewards at each pool's APR through a reward-per-share
//! accumulator, respect per-pool lock periods (or pay an early-exit
//! penalty), and unlock one-time achievement rewards.

pub mod achievements;
pub mod admin;
pub mod custody;
pub mod events;
pub mod lifecycle;
pub mod registry;
pub mod rewards;
pub mod storage;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub use achievements::{Achievement, AchievementInfo, UserProgress, UserStatus};
pub use lifecycle::{PositionInfo, PositionReceipt};
pub use storage::{Pool, StakingConfig};

use custody::TokenCustody;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Non-owner on an admin operation, or caller is not the pending owner.
    Unauthorized = 3,
    /// Out-of-range basis points or an otherwise malformed argument.
    InvalidParameter = 4,
    InvalidAsset = 5,
    PoolNotFound = 6,
    PoolPaused = 7,
    ZeroAmount = 8,
    InsufficientBalance = 9,
    LockNotElapsed = 10,
    NothingToClaim = 11,
    NotEligible = 12,
    AlreadyClaimed = 13,
    ForbiddenAsset = 14,
    /// The asset contract refused or failed the transfer.
    TransferFailed = 15,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct MultiPoolStakingContract;

#[contractimpl]
impl MultiPoolStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `owner`             – holder of every admin capability; also the
    ///                         initial penalty recipient.
    /// * `achievement_token` – asset paid out for achievement claims.
    /// * `max_apr_bps`       – APR ceiling enforced on every pool
    ///                         (see [`registry::DEFAULT_MAX_APR_BPS`]).
    pub fn initialize(
        env: Env,
        owner: Address,
        achievement_token: Address,
        max_apr_bps: u32,
    ) -> Result<(), ContractError> {
        if storage::has_config(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if max_apr_bps == 0 || max_apr_bps > registry::APR_CEILING_LIMIT_BPS {
            return Err(ContractError::InvalidParameter);
        }
        if achievement_token == env.current_contract_address() {
            return Err(ContractError::InvalidAsset);
        }

        let config = StakingConfig {
            owner: owner.clone(),
            penalty_recipient: owner.clone(),
            achievement_token: achievement_token.clone(),
            max_apr_bps,
            paused: false,
        };
        storage::save_config(&env, &config);

        events::publish_initialized(&env, owner, achievement_token, max_apr_bps);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::has_config(&env)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool's staking asset. A top-up restarts the
    /// lock for the whole position.
    pub fn stake(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<PositionReceipt, ContractError> {
        user.require_auth();
        let config = storage::load_config(&env)?;
        lifecycle::stake(&env, &config, &TokenCustody::new(&env), pool_id, &user, amount)
    }

    /// Withdraw unlocked principal without penalty.
    pub fn withdraw(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<PositionReceipt, ContractError> {
        user.require_auth();
        let config = storage::load_config(&env)?;
        lifecycle::withdraw(&env, &config, &TokenCustody::new(&env), pool_id, &user, amount)
    }

    /// Withdraw before the lock elapses, paying the pool's early penalty.
    pub fn early_withdraw(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<PositionReceipt, ContractError> {
        user.require_auth();
        let config = storage::load_config(&env)?;
        lifecycle::early_withdraw(&env, &config, &TokenCustody::new(&env), pool_id, &user, amount)
    }

    /// Claim all accrued rewards of one pool.
    pub fn get_reward(env: Env, user: Address, pool_id: u32) -> Result<PositionReceipt, ContractError> {
        user.require_auth();
        let config = storage::load_config(&env)?;
        lifecycle::get_reward(&env, &config, &TokenCustody::new(&env), pool_id, &user)
    }

    /// Withdraw everything and claim rewards in one step.
    pub fn exit(env: Env, user: Address, pool_id: u32) -> Result<PositionReceipt, ContractError> {
        user.require_auth();
        let config = storage::load_config(&env)?;
        lifecycle::exit(&env, &config, &TokenCustody::new(&env), pool_id, &user)
    }

    /// Withdraw everything, ignoring lock and pause, forfeiting rewards.
    pub fn emergency_withdraw(
        env: Env,
        user: Address,
        pool_id: u32,
    ) -> Result<PositionReceipt, ContractError> {
        user.require_auth();
        storage::load_config(&env)?;
        lifecycle::emergency_withdraw(&env, &TokenCustody::new(&env), pool_id, &user)
    }

    // ── Achievements ────────────────────────────────────────────────────────

    pub fn claim(env: Env, user: Address, achievement: Achievement) -> Result<i128, ContractError> {
        user.require_auth();
        let config = storage::load_config(&env)?;
        achievements::claim(&env, &config, &TokenCustody::new(&env), &user, achievement)
    }

    pub fn claim_all(env: Env, user: Address) -> Result<i128, ContractError> {
        user.require_auth();
        let config = storage::load_config(&env)?;
        achievements::claim_all(&env, &config, &TokenCustody::new(&env), &user)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn pool_count(env: Env) -> u32 {
        storage::pool_count(&env)
    }

    /// Stored pool record; `reward_per_share` is as of `last_accrual_at`.
    pub fn get_pool_info(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        storage::load_pool(&env, pool_id)
    }

    pub fn early_penalty_bps(env: Env, pool_id: u32) -> Result<u32, ContractError> {
        Ok(storage::load_pool(&env, pool_id)?.early_penalty_bps)
    }

    pub fn balance_of(env: Env, pool_id: u32, user: Address) -> i128 {
        storage::load_position(&env, pool_id, &user).staked
    }

    /// Real-time claimable rewards, without mutating state.
    pub fn earned(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        Ok(lifecycle::position_info(&env, pool_id, &user)?.pending_rewards)
    }

    /// Accumulator value as of the current ledger time.
    pub fn reward_per_share(env: Env, pool_id: u32) -> Result<i128, ContractError> {
        Ok(registry::settled_pool(&env, pool_id)?.reward_per_share)
    }

    pub fn get_position(env: Env, pool_id: u32, user: Address) -> Result<PositionInfo, ContractError> {
        lifecycle::position_info(&env, pool_id, &user)
    }

    pub fn unlock_time(env: Env, pool_id: u32, user: Address) -> Result<u64, ContractError> {
        Ok(lifecycle::position_info(&env, pool_id, &user)?.unlock_at)
    }

    pub fn get_user_status(env: Env, user: Address) -> UserStatus {
        achievements::user_status(&env, &user)
    }

    pub fn get_user_stats(env: Env, user: Address) -> UserProgress {
        achievements::progress(&env, &user)
    }

    pub fn get_achievements(env: Env) -> Vec<AchievementInfo> {
        achievements::catalogue(&env)
    }

    pub fn paused(env: Env) -> Result<bool, ContractError> {
        Ok(storage::load_config(&env)?.paused)
    }

    pub fn penalty_recipient(env: Env) -> Result<Address, ContractError> {
        Ok(storage::load_config(&env)?.penalty_recipient)
    }

    pub fn max_apr_bps(env: Env) -> Result<u32, ContractError> {
        Ok(storage::load_config(&env)?.max_apr_bps)
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        Ok(storage::load_config(&env)?.owner)
    }

    pub fn pending_owner(env: Env) -> Option<Address> {
        storage::pending_owner(&env)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Open a pool. Returns its id.
    pub fn create_pool(
        env: Env,
        caller: Address,
        staking_token: Address,
        reward_token: Address,
        apr_bps: u32,
        lock_duration: u64,
    ) -> Result<u32, ContractError> {
        caller.require_auth();
        admin::create_pool(&env, &caller, staking_token, reward_token, apr_bps, lock_duration)
    }

    /// Change a pool's APR. Rewards up to now are settled at the old rate.
    pub fn set_apr(env: Env, caller: Address, pool_id: u32, apr_bps: u32) -> Result<(), ContractError> {
        caller.require_auth();
        admin::set_apr(&env, &caller, pool_id, apr_bps)
    }

    pub fn set_lock_duration(
        env: Env,
        caller: Address,
        pool_id: u32,
        lock_duration: u64,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        admin::set_lock_duration(&env, &caller, pool_id, lock_duration)
    }

    pub fn set_early_penalty(
        env: Env,
        caller: Address,
        pool_id: u32,
        penalty_bps: u32,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        admin::set_early_penalty(&env, &caller, pool_id, penalty_bps)
    }

    pub fn set_global_pause(env: Env, caller: Address, paused: bool) -> Result<(), ContractError> {
        caller.require_auth();
        admin::set_global_pause(&env, &caller, paused)
    }

    pub fn set_penalty_recipient(
        env: Env,
        caller: Address,
        recipient: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        admin::set_penalty_recipient(&env, &caller, recipient)
    }

    pub fn recover_foreign_asset(
        env: Env,
        caller: Address,
        asset: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        admin::recover_foreign_asset(&env, &caller, &TokenCustody::new(&env), asset, amount)
    }

    // ── Ownership transfer (two-step) ──────────────────────────────────────

    /// Propose a new owner. The proposed address completes the handover with
    /// `accept_owner`.
    pub fn propose_owner(env: Env, caller: Address, new_owner: Address) -> Result<(), ContractError> {
        caller.require_auth();
        admin::propose_owner(&env, &caller, new_owner)
    }

    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        new_owner.require_auth();
        admin::accept_owner(&env, &new_owner)
    }

    pub fn cancel_owner_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        admin::cancel_owner_transfer(&env, &caller)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_achievements;
