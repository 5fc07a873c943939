//! Shared fixture for the property suites.

use common::TokenId;
use lb_position::{PositionRegistry, PositionRegistryClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, String,
};
use stake_lb::{BoostConfig, PoolId, StakeLbContract, StakeLbContractClient};

pub const START: u64 = 1_000_000;
pub const REWARD_AMOUNT: i128 = 1_000_000_000_000;
pub const DURATION: u64 = 100_000;
pub const BOOST_PERCENT: u32 = 50;

pub struct Fixture {
    pub env: Env,
    pub client: StakeLbContractClient<'static>,
    pub registry: PositionRegistryClient<'static>,
    pub emergency_admin: Address,
    pub lb_creator: Address,
    pub lb_collection: String,
    pub boost_creator: Address,
    pub boost_collection: String,
    pub reward_token: Address,
    pub pool: PoolId,
}

pub fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let registry_id = env.register(PositionRegistry, ());
    let registry = PositionRegistryClient::new(&env, &registry_id);

    let lb_creator = Address::generate(&env);
    let lb_collection = String::from_str(&env, "LB APT-USDC");
    registry.create_collection(
        &lb_creator,
        &lb_collection,
        &String::from_str(&env, "Liquidity-bin positions"),
    );

    let boost_creator = Address::generate(&env);
    let boost_collection = String::from_str(&env, "Liquid Genesis");
    registry.create_collection(
        &boost_creator,
        &boost_collection,
        &String::from_str(&env, "Boost NFTs"),
    );

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakeLbContract, ());
    let client = StakeLbContractClient::new(&env, &contract_id);

    let emergency_admin = Address::generate(&env);
    client.initialize(&emergency_admin, &Address::generate(&env), &registry_id);

    let owner = Address::generate(&env);
    StellarAssetClient::new(&env, &reward_token).mint(&owner, &REWARD_AMOUNT);
    let proof = registry.mint(&lb_creator, &lb_collection, &0, &owner, &1);
    let pool = client.register_pool(
        &owner,
        &proof,
        &reward_token,
        &REWARD_AMOUNT,
        &DURATION,
        &Some(BoostConfig {
            collection_owner: boost_creator.clone(),
            collection_name: boost_collection.clone(),
            boost_percent: BOOST_PERCENT,
        }),
    );

    Fixture {
        env,
        client,
        registry,
        emergency_admin,
        lb_creator,
        lb_collection,
        boost_creator,
        boost_collection,
        reward_token,
        pool,
    }
}

impl Fixture {
    pub fn staker(&self, bins: &[u32], amount: u128) -> Address {
        let user = Address::generate(&self.env);
        for bin_id in bins {
            self.registry
                .mint(&self.lb_creator, &self.lb_collection, bin_id, &user, &amount);
        }
        user
    }

    /// Mint boost NFT `id` to `to`.
    pub fn boost_nft(&self, to: &Address, id: u32) -> TokenId {
        self.registry
            .mint(&self.boost_creator, &self.boost_collection, &id, to, &1)
    }

    pub fn boost_nft_token(&self, id: u32) -> TokenId {
        TokenId::new(self.boost_creator.clone(), self.boost_collection.clone(), id)
    }

    pub fn mint_reward(&self, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.reward_token).mint(to, &amount);
    }

    pub fn bin_token(&self, bin_id: u32) -> TokenId {
        TokenId::new(self.lb_creator.clone(), self.lb_collection.clone(), bin_id)
    }

    pub fn advance(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(now + seconds);
    }

    pub fn reward_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.reward_token).balance(who)
    }
}
