use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL_CTR: Symbol = symbol_short!("POOL_CTR");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");

// Persistent entries use tuple keys: (prefix, ...)
const POOL: Symbol = symbol_short!("POOL");
const POSITION: Symbol = symbol_short!("POS");
const USER_STATS: Symbol = symbol_short!("U_STATS");
const CLAIMED: Symbol = symbol_short!("ACH_CLMD");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 3_110_400;

// ── Records ──────────────────────────────────────────────────────────────────

/// Contract-wide configuration, loaded once per operation and passed down.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Holder of the `Owner` capability.
    pub owner: Address,
    /// Receives early-withdrawal penalties.
    pub penalty_recipient: Address,
    /// Token paid out for achievement claims.
    pub achievement_token: Address,
    /// Upper bound accepted for any pool's APR.
    pub max_apr_bps: u32,
    /// Global circuit breaker shared by every pool.
    pub paused: bool,
}

/// A staking offer. Pools are never deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub staking_token: Address,
    pub reward_token: Address,
    pub apr_bps: u32,
    /// Seconds after the latest deposit before a penalty-free withdrawal.
    /// Zero means flexible.
    pub lock_duration: u64,
    pub early_penalty_bps: u32,
    pub total_staked: i128,
    /// Cumulative reward per staked unit, scaled by `rewards::PRECISION`.
    pub reward_per_share: i128,
    pub last_accrual_at: u64,
}

/// One user's bookkeeping inside one pool.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub staked: i128,
    pub reward_per_share_paid: i128,
    pub accrued_rewards: i128,
    pub last_deposit_at: u64,
}

/// Aggregated per-user history used for achievement eligibility.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStats {
    pub stake_count: u32,
    /// Distinct pool ids the user has ever staked in, in first-stake order.
    pub pools: Vec<u32>,
    /// Rewards credited by settlement, net of forfeits.
    pub lifetime_earned: i128,
}

impl UserStats {
    pub fn new(env: &Env) -> Self {
        Self {
            stake_count: 0,
            pools: Vec::new(env),
            lifetime_earned: 0,
        }
    }

    pub fn record_stake(&mut self, pool_id: u32) {
        self.stake_count = self.stake_count.saturating_add(1);
        if !self.pools.contains(pool_id) {
            self.pools.push_back(pool_id);
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn pool_key(pool_id: u32) -> (Symbol, u32) {
    (POOL, pool_id)
}

fn position_key(pool_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (POSITION, pool_id, user.clone())
}

fn stats_key(user: &Address) -> (Symbol, Address) {
    (USER_STATS, user.clone())
}

fn claimed_key(user: &Address, achievement_id: u32) -> (Symbol, Address, u32) {
    (CLAIMED, user.clone(), achievement_id)
}

// ── Config ───────────────────────────────────────────────────────────────────

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load_config(env: &Env) -> Result<StakingConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_config(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&CONFIG, config);
    extend_instance(env);
}

pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn set_pending_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&PENDING_OWNER, owner);
    extend_instance(env);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&PENDING_OWNER);
}

// ── Pools ────────────────────────────────────────────────────────────────────

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_CTR).unwrap_or(0)
}

/// Reserve the next pool id. Ids are never reused.
pub fn next_pool_id(env: &Env) -> u32 {
    let id = pool_count(env);
    env.storage()
        .instance()
        .set(&POOL_CTR, &id.saturating_add(1));
    extend_instance(env);
    id
}

pub fn load_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    let key = pool_key(pool_id);
    let pool: Pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::PoolNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(pool)
}

pub fn save_pool(env: &Env, pool: &Pool) {
    let key = pool_key(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Positions ────────────────────────────────────────────────────────────────

/// Positions spring into existence on first stake; absent means empty.
pub fn load_position(env: &Env, pool_id: u32, user: &Address) -> Position {
    let key = position_key(pool_id, user);
    let position: Option<Position> = env.storage().persistent().get(&key);
    match position {
        Some(p) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            p
        }
        None => Position::default(),
    }
}

pub fn save_position(env: &Env, pool_id: u32, user: &Address, position: &Position) {
    let key = position_key(pool_id, user);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── User stats ───────────────────────────────────────────────────────────────

pub fn load_user_stats(env: &Env, user: &Address) -> UserStats {
    let key = stats_key(user);
    let stats: Option<UserStats> = env.storage().persistent().get(&key);
    match stats {
        Some(s) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            s
        }
        None => UserStats::new(env),
    }
}

pub fn save_user_stats(env: &Env, user: &Address, stats: &UserStats) {
    let key = stats_key(user);
    env.storage().persistent().set(&key, stats);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Achievement claims ───────────────────────────────────────────────────────

pub fn is_claimed(env: &Env, user: &Address, achievement_id: u32) -> bool {
    env.storage()
        .persistent()
        .get(&claimed_key(user, achievement_id))
        .unwrap_or(false)
}

/// Write-once. Nothing clears the flag.
pub fn mark_claimed(env: &Env, user: &Address, achievement_id: u32) {
    let key = claimed_key(user, achievement_id);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
