#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use multi_pool_staking::{Achievement, MultiPoolStakingContract, MultiPoolStakingContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { pool: u8, amount: i64 },
    Withdraw { pool: u8, amount: i64 },
    EarlyWithdraw { pool: u8, amount: i64 },
    GetReward { pool: u8 },
    Exit { pool: u8 },
    EmergencyWithdraw { pool: u8 },
    ClaimAll,
    ClaimFirstStake,
    SetApr { pool: u8, apr_bps: u32 },
    SetPenalty { pool: u8, penalty_bps: u32 },
    Pause(bool),
    Advance { seconds: u32 },
}

const POOLS: u32 = 3;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

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
    for lock in [0u64, 86_400, 2_592_000] {
        client.create_pool(&owner, &stake_token, &reward_token, &1_000, &lock);
    }
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &i128::from(u64::MAX));
    StellarAssetClient::new(&env, &achievement_token).mint(&contract_id, &i128::from(u64::MAX));

    let mut users = vec![owner.clone()];
    for _ in 0..4 {
        users.push(Address::generate(&env));
    }
    for user in &users {
        StellarAssetClient::new(&env, &stake_token).mint(user, &i128::from(i64::MAX));
    }

    // Errors are expected; only panics and broken conservation are findings.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { pool, amount } => {
                let _ = client.try_stake(caller, &(pool as u32 % POOLS), &(amount as i128));
            }
            FuzzAction::Withdraw { pool, amount } => {
                let _ = client.try_withdraw(caller, &(pool as u32 % POOLS), &(amount as i128));
            }
            FuzzAction::EarlyWithdraw { pool, amount } => {
                let _ =
                    client.try_early_withdraw(caller, &(pool as u32 % POOLS), &(amount as i128));
            }
            FuzzAction::GetReward { pool } => {
                let _ = client.try_get_reward(caller, &(pool as u32 % POOLS));
            }
            FuzzAction::Exit { pool } => {
                let _ = client.try_exit(caller, &(pool as u32 % POOLS));
            }
            FuzzAction::EmergencyWithdraw { pool } => {
                let _ = client.try_emergency_withdraw(caller, &(pool as u32 % POOLS));
            }
            FuzzAction::ClaimAll => {
                let _ = client.try_claim_all(caller);
            }
            FuzzAction::ClaimFirstStake => {
                let _ = client.try_claim(caller, &Achievement::FirstStake);
            }
            FuzzAction::SetApr { pool, apr_bps } => {
                let _ = client.try_set_apr(caller, &(pool as u32 % POOLS), &apr_bps);
            }
            FuzzAction::SetPenalty { pool, penalty_bps } => {
                let _ = client.try_set_early_penalty(caller, &(pool as u32 % POOLS), &penalty_bps);
            }
            FuzzAction::Pause(paused) => {
                let _ = client.try_set_global_pause(caller, &paused);
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(seconds as u64));
            }
        }

        for pool in 0..POOLS {
            let total = client.get_pool_info(&pool).total_staked;
            let sum: i128 = users.iter().map(|u| client.balance_of(&pool, u)).sum();
            assert_eq!(total, sum);
        }
    }
});
