#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pool_staking::{PoolAsset, PoolStakingContract, PoolStakingContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { pool: u8, amount: u32 },
    RequestWithdraw { pool: u8, amount: u32 },
    Withdraw { pool: u8 },
    Claim { pool: u8 },
    SetPoolWeight { pool: u8, weight: u16 },
    Advance { blocks: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let native_asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(PoolStakingContract, ());
    let client = PoolStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &native_asset, &reward_token, &0, &2_000, &1_000);
    client.add_pool(&admin, &PoolAsset::Native, &10, &0, &3, &false);
    client.add_pool(&admin, &PoolAsset::Token(stake_token.clone()), &20, &0, &3, &false);
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &i128::from(u64::MAX));

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &native_asset).mint(&user, &i128::from(u64::MAX));
        StellarAssetClient::new(&env, &stake_token).mint(&user, &i128::from(u64::MAX));
        users.push(user);
    }

    // Errors are expected; host panics (overflow, broken invariants) are not.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { pool, amount } => {
                let _ = client.try_deposit(caller, &u32::from(pool % 3), &i128::from(amount));
            }
            FuzzAction::RequestWithdraw { pool, amount } => {
                let _ = client.try_request_withdraw(
                    caller,
                    &u32::from(pool % 3),
                    &i128::from(amount),
                );
            }
            FuzzAction::Withdraw { pool } => {
                let _ = client.try_withdraw(caller, &u32::from(pool % 3));
            }
            FuzzAction::Claim { pool } => {
                let _ = client.try_claim(caller, &u32::from(pool % 3));
            }
            FuzzAction::SetPoolWeight { pool, weight } => {
                let _ = client.try_set_pool_weight(
                    &admin,
                    &u32::from(pool % 3),
                    &u64::from(weight),
                    &true,
                );
            }
            FuzzAction::Advance { blocks } => {
                let next = env.ledger().sequence() + u32::from(blocks);
                env.ledger().set_sequence_number(next);
            }
        }

        for pool_id in 0..client.pool_length() {
            let pool = client.pool(&pool_id);
            assert!(pool.total_staked >= 0);
            assert!(pool.last_reward_block <= 2_000);
        }
    }
});
