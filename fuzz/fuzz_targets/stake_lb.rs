#![no_main]

use arbitrary::Arbitrary;
use common::TokenId;
use lb_position::{PositionRegistry, PositionRegistryClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env, String,
};
use stake_lb::{BoostConfig, StakeLbContract, StakeLbContractClient};

const USERS: usize = 4;
const BINS: u32 = 3;
const MINTED: u128 = 1_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { bin: u8, amount: u32 },
    Unstake { bin: u8, amount: u32 },
    Harvest,
    Boost,
    RemoveBoost,
    Deposit { amount: u32, duration: u16 },
    Advance { seconds: u16 },
    EnableEmergency,
    EmergencyUnstake,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let registry_id = env.register(PositionRegistry, ());
    let registry = PositionRegistryClient::new(&env, &registry_id);
    let lb_creator = Address::generate(&env);
    let lb_name = String::from_str(&env, "LB");
    let nft_creator = Address::generate(&env);
    let nft_name = String::from_str(&env, "NFT");
    registry.create_collection(&lb_creator, &lb_name, &lb_name);
    registry.create_collection(&nft_creator, &nft_name, &nft_name);

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_admin = StellarAssetClient::new(&env, &reward_token);

    let contract_id = env.register(StakeLbContract, ());
    let client = StakeLbContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin, &admin, &registry_id);

    let owner = Address::generate(&env);
    reward_admin.mint(&owner, &1_000_000_000);
    let proof = registry.mint(&lb_creator, &lb_name, &0, &owner, &1);
    let pool = client.register_pool(
        &owner,
        &proof,
        &reward_token,
        &1_000_000_000,
        &10_000,
        &Some(BoostConfig {
            collection_owner: nft_creator.clone(),
            collection_name: nft_name.clone(),
            boost_percent: 25,
        }),
    );

    let mut users = std::vec::Vec::new();
    for i in 0..USERS {
        let user = Address::generate(&env);
        for bin in 0..BINS {
            registry.mint(&lb_creator, &lb_name, &bin, &user, &MINTED);
        }
        registry.mint(&nft_creator, &nft_name, &(i as u32), &user, &1);
        reward_admin.mint(&user, &1_000_000_000);
        users.push(user);
    }

    // Looking for panics and accounting drift: every failing call must come
    // back as an error and the pool's stake and boost totals must match its users.
    for (i, action) in actions.into_iter().enumerate() {
        let slot = i % USERS;
        let user = &users[slot];
        match action {
            FuzzAction::Stake { bin, amount } => {
                let token = TokenId::new(lb_creator.clone(), lb_name.clone(), bin as u32 % BINS);
                let _ = client.try_stake(user, &pool, &token, &(amount as u128));
            }
            FuzzAction::Unstake { bin, amount } => {
                let _ = client.try_unstake(user, &pool, &(bin as u32 % BINS), &(amount as u128));
            }
            FuzzAction::Harvest => {
                let _ = client.try_harvest(user, &pool);
            }
            FuzzAction::Boost => {
                let nft = TokenId::new(nft_creator.clone(), nft_name.clone(), slot as u32);
                let _ = client.try_boost(user, &pool, &nft, &1);
            }
            FuzzAction::RemoveBoost => {
                let _ = client.try_remove_boost(user, &pool);
            }
            FuzzAction::Deposit { amount, duration } => {
                let _ = client.try_deposit_reward_coins(
                    user,
                    &pool,
                    &(amount as i128),
                    &(duration as u64),
                );
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + seconds as u64);
            }
            FuzzAction::EnableEmergency => {
                let _ = client.try_enable_emergency(&admin, &pool);
            }
            FuzzAction::EmergencyUnstake => {
                let _ = client.try_emergency_unstake(user, &pool);
            }
        }

        let mut staked: u128 = 0;
        let mut boosted: u128 = 0;
        for user in &users {
            if let Ok(Ok(amount)) = client.try_get_user_stake(&pool, user) {
                staked += amount;
            }
            if let Ok(Ok(amount)) = client.try_get_user_boosted(&pool, user) {
                boosted += amount;
            }
        }
        assert_eq!(client.get_pool_total_stake(&pool), staked);
        assert_eq!(client.get_pool_total_boosted(&pool), boosted);
    }
});
