extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use crate::{
    achievements::TOKEN_UNIT, test::expect_err, Achievement, ContractError,
    MultiPoolStakingContract, MultiPoolStakingContractClient,
};

const DAY: u64 = 86_400;
const YEAR: u64 = 31_536_000;

fn setup() -> (
    Env,
    MultiPoolStakingContractClient<'static>,
    Address, // owner
    Address, // stake_token
    Address, // achievement_token
    u32,     // 10 % APR pool, no lock
) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let achievement_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(MultiPoolStakingContract, ());
    let client = MultiPoolStakingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &achievement_token, &5_000);
    let pool = client.create_pool(&owner, &stake_token, &reward_token, &1_000, &0);

    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &(1_000_000 * TOKEN_UNIT));
    StellarAssetClient::new(&env, &achievement_token)
        .mint(&contract_id, &(10_000 * TOKEN_UNIT));

    (env, client, owner, stake_token, achievement_token, pool)
}

fn staker(env: &Env, stake_token: &Address, tokens: i128) -> Address {
    let user = Address::generate(env);
    StellarAssetClient::new(env, stake_token).mint(&user, &(tokens * TOKEN_UNIT));
    user
}

#[test]
fn test_catalogue() {
    let (_env, client, _, _, _, _) = setup();

    let catalogue = client.get_achievements();
    assert_eq!(catalogue.len(), 7);

    let first = catalogue.get(0).unwrap();
    assert_eq!(first.achievement, Achievement::FirstStake);
    assert_eq!(first.reward, 5 * TOKEN_UNIT);

    let last = catalogue.get(6).unwrap();
    assert_eq!(last.achievement, Achievement::Whale);
    assert_eq!(last.reward, 2_500 * TOKEN_UNIT);
}

#[test]
fn test_first_stake_claim_once() {
    let (env, client, _, stake_token, achievement_token, pool) = setup();
    let user = staker(&env, &stake_token, 1);

    expect_err(
        client.try_claim(&user, &Achievement::FirstStake),
        ContractError::NotEligible,
    );

    client.stake(&user, &pool, &TOKEN_UNIT);
    let paid = client.claim(&user, &Achievement::FirstStake);

    assert_eq!(paid, 5 * TOKEN_UNIT);
    assert_eq!(
        TokenClient::new(&env, &achievement_token).balance(&user),
        5 * TOKEN_UNIT
    );
    expect_err(
        client.try_claim(&user, &Achievement::FirstStake),
        ContractError::AlreadyClaimed,
    );
}

#[test]
fn test_unfunded_claim_is_not_recorded() {
    let env = Env::default();
    env.mock_all_auths();
    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let achievement_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(MultiPoolStakingContract, ());
    let client = MultiPoolStakingContractClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.initialize(&owner, &achievement_token, &5_000);
    let pool = client.create_pool(&owner, &stake_token, &stake_token, &0, &0);
    let user = staker(&env, &stake_token, 1);
    client.stake(&user, &pool, &TOKEN_UNIT);

    expect_err(
        client.try_claim(&user, &Achievement::FirstStake),
        ContractError::TransferFailed,
    );
    assert_eq!(client.get_user_status(&user).claimed.get(0), Some(false));

    StellarAssetClient::new(&env, &achievement_token).mint(&contract_id, &(5 * TOKEN_UNIT));
    assert_eq!(client.claim(&user, &Achievement::FirstStake), 5 * TOKEN_UNIT);
}

#[test]
fn test_hold_time_thresholds() {
    let (env, client, _, stake_token, _, pool) = setup();
    let user = staker(&env, &stake_token, 100);
    client.stake(&user, &pool, &(100 * TOKEN_UNIT));

    env.ledger().set_timestamp(30 * DAY - 1);
    expect_err(
        client.try_claim(&user, &Achievement::DiamondHands),
        ContractError::NotEligible,
    );

    env.ledger().set_timestamp(30 * DAY);
    assert_eq!(client.get_user_stats(&user).hold_seconds, 30 * DAY);
    client.claim(&user, &Achievement::DiamondHands);

    expect_err(
        client.try_claim(&user, &Achievement::LongTermVision),
        ContractError::NotEligible,
    );
    env.ledger().set_timestamp(90 * DAY);
    assert_eq!(client.claim(&user, &Achievement::LongTermVision), 1_000 * TOKEN_UNIT);
}

#[test]
fn test_hold_time_is_per_position() {
    let (env, client, owner, stake_token, _, first) = setup();
    let second = client.create_pool(&owner, &stake_token, &stake_token, &0, &0);
    let third = client.create_pool(&owner, &stake_token, &stake_token, &0, &0);
    let user = staker(&env, &stake_token, 3);
    client.stake(&user, &first, &TOKEN_UNIT);
    client.stake(&user, &second, &TOKEN_UNIT);

    env.ledger().set_timestamp(5 * DAY);
    client.stake(&user, &third, &TOKEN_UNIT);

    // Spreading across pools does not add hold time together.
    env.ledger().set_timestamp(10 * DAY);
    assert_eq!(client.get_user_stats(&user).hold_seconds, 10 * DAY);
    expect_err(
        client.try_claim(&user, &Achievement::DiamondHands),
        ContractError::NotEligible,
    );

    env.ledger().set_timestamp(30 * DAY);
    assert_eq!(client.get_user_stats(&user).hold_seconds, 30 * DAY);
    assert_eq!(client.claim(&user, &Achievement::DiamondHands), 50 * TOKEN_UNIT);
}

#[test]
fn test_achievement_payout_never_spends_principal() {
    let env = Env::default();
    env.mock_all_auths();
    let shared = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(MultiPoolStakingContract, ());
    let client = MultiPoolStakingContractClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.initialize(&owner, &shared, &5_000);
    let pool = client.create_pool(&owner, &shared, &shared, &0, &0);

    let user = staker(&env, &shared, 10);
    client.stake(&user, &pool, &(10 * TOKEN_UNIT));

    expect_err(
        client.try_claim(&user, &Achievement::FirstStake),
        ContractError::TransferFailed,
    );
    expect_err(client.try_claim_all(&user), ContractError::TransferFailed);
    assert_eq!(client.get_user_status(&user).claimed.get(0), Some(false));

    StellarAssetClient::new(&env, &shared).mint(&contract_id, &(5 * TOKEN_UNIT));
    assert_eq!(client.claim_all(&user), 5 * TOKEN_UNIT);

    client.withdraw(&user, &pool, &(10 * TOKEN_UNIT));
    assert_eq!(
        TokenClient::new(&env, &shared).balance(&user),
        15 * TOKEN_UNIT
    );
}

#[test]
fn test_eligibility_tracks_open_positions() {
    let (env, client, _, stake_token, _, pool) = setup();
    let user = staker(&env, &stake_token, 100);
    client.stake(&user, &pool, &(100 * TOKEN_UNIT));

    env.ledger().set_timestamp(31 * DAY);
    assert_eq!(client.get_user_status(&user).eligible.get(1), Some(true));

    // Closing the position removes its hold time.
    client.withdraw(&user, &pool, &(100 * TOKEN_UNIT));
    let status = client.get_user_status(&user);
    assert_eq!(status.eligible.get(0), Some(true));
    assert_eq!(status.eligible.get(1), Some(false));
}

#[test]
fn test_pool_pioneer_and_stake_size() {
    let (env, client, owner, stake_token, _, first) = setup();
    let second = client.create_pool(&owner, &stake_token, &stake_token, &500, &0);
    let third = client.create_pool(&owner, &stake_token, &stake_token, &500, &0);
    let user = staker(&env, &stake_token, 40_000);

    client.stake(&user, &first, &(5_000 * TOKEN_UNIT));
    client.stake(&user, &second, &(5_000 * TOKEN_UNIT));
    expect_err(
        client.try_claim(&user, &Achievement::PoolPioneer),
        ContractError::NotEligible,
    );
    assert_eq!(client.claim(&user, &Achievement::HighRoller), 500 * TOKEN_UNIT);
    expect_err(
        client.try_claim(&user, &Achievement::Whale),
        ContractError::NotEligible,
    );

    client.stake(&user, &third, &(25_000 * TOKEN_UNIT));
    let stats = client.get_user_stats(&user);
    assert_eq!(stats.stake_count, 3);
    assert_eq!(stats.pools_joined, 3);
    assert_eq!(stats.total_staked, 35_000 * TOKEN_UNIT);
    assert_eq!(stats.largest_stake, 25_000 * TOKEN_UNIT);

    assert_eq!(client.claim(&user, &Achievement::PoolPioneer), 100 * TOKEN_UNIT);
    assert_eq!(client.claim(&user, &Achievement::Whale), 2_500 * TOKEN_UNIT);
}

#[test]
fn test_reward_harvester_survives_payout() {
    let (env, client, _, stake_token, _, pool) = setup();
    let user = staker(&env, &stake_token, 10_000);
    client.stake(&user, &pool, &(10_000 * TOKEN_UNIT));

    env.ledger().set_timestamp(YEAR);
    assert_eq!(client.get_user_stats(&user).lifetime_earned, 1_000 * TOKEN_UNIT);

    client.get_reward(&user, &pool);
    assert_eq!(client.earned(&pool, &user), 0);
    assert_eq!(client.get_user_stats(&user).lifetime_earned, 1_000 * TOKEN_UNIT);
    assert_eq!(client.claim(&user, &Achievement::RewardHarvester), 200 * TOKEN_UNIT);
}

#[test]
fn test_emergency_withdraw_forfeits_lifetime_earnings() {
    let (env, client, _, stake_token, _, pool) = setup();
    let user = staker(&env, &stake_token, 10_000);
    client.stake(&user, &pool, &(10_000 * TOKEN_UNIT));

    env.ledger().set_timestamp(YEAR);
    client.emergency_withdraw(&user, &pool);

    assert_eq!(client.get_user_stats(&user).lifetime_earned, 0);
    expect_err(
        client.try_claim(&user, &Achievement::RewardHarvester),
        ContractError::NotEligible,
    );
}

#[test]
fn test_claim_all_skips_claimed() {
    let (env, client, owner, stake_token, achievement_token, first) = setup();
    let second = client.create_pool(&owner, &stake_token, &stake_token, &0, &0);
    let third = client.create_pool(&owner, &stake_token, &stake_token, &0, &0);
    let user = staker(&env, &stake_token, 3);

    client.stake(&user, &first, &TOKEN_UNIT);
    client.claim(&user, &Achievement::FirstStake);
    client.stake(&user, &second, &TOKEN_UNIT);
    client.stake(&user, &third, &TOKEN_UNIT);

    env.ledger().set_timestamp(30 * DAY);
    let status = client.get_user_status(&user);
    assert_eq!(status.eligible.get(1), Some(true));
    assert_eq!(status.eligible.get(2), Some(true));

    let paid = client.claim_all(&user);
    assert_eq!(paid, 150 * TOKEN_UNIT);
    assert_eq!(
        TokenClient::new(&env, &achievement_token).balance(&user),
        155 * TOKEN_UNIT
    );

    let status = client.get_user_status(&user);
    assert_eq!(status.claimed.get(0), Some(true));
    assert_eq!(status.claimed.get(1), Some(true));
    assert_eq!(status.claimed.get(2), Some(true));
    assert_eq!(status.claimed.get(3), Some(false));

    expect_err(client.try_claim_all(&user), ContractError::NothingToClaim);
}

#[test]
fn test_claims_blocked_while_paused() {
    let (env, client, owner, stake_token, _, pool) = setup();
    let user = staker(&env, &stake_token, 1);
    client.stake(&user, &pool, &TOKEN_UNIT);

    client.set_global_pause(&owner, &true);
    expect_err(
        client.try_claim(&user, &Achievement::FirstStake),
        ContractError::PoolPaused,
    );
    expect_err(client.try_claim_all(&user), ContractError::PoolPaused);
}

#[test]
fn test_status_for_unknown_user() {
    let (env, client, _, _, _, _) = setup();
    let nobody = Address::generate(&env);

    let status = client.get_user_status(&nobody);
    assert_eq!(status.eligible.len(), 7);
    assert!(status.eligible.iter().all(|e| !e));
    assert!(status.claimed.iter().all(|c| !c));
    expect_err(client.try_claim_all(&nobody), ContractError::NothingToClaim);
}
