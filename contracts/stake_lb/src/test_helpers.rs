use common::TokenId;
use lb_position::{PositionRegistry, PositionRegistryClient};
use soroban_sdk::{
    testutils::{Address as _, Events as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, IntoVal, InvokeError, String, TryFromVal, Val, Vec,
};

use crate::{BoostConfig, ContractError, PoolId, StakeLbContract, StakeLbContractClient};

/// Ledger time every test starts at.
pub const START: u64 = 1_000_000;

/// The reference schedule: 10 000 000 reward units per second for half a year.
pub const REWARD_PER_SEC: u64 = 10_000_000;
pub const DURATION: u64 = 15_768_000;
pub const REWARD_AMOUNT: i128 = 157_680_000_000_000;

pub const WEEK: u64 = 604_800;

/// Everything a stake_lb test needs: an initialised contract, a position
/// registry with one liquidity-bin collection and a SAC reward asset.
pub struct Setup {
    pub env: Env,
    pub client: StakeLbContractClient<'static>,
    pub contract: Address,
    pub registry: PositionRegistryClient<'static>,
    pub emergency_admin: Address,
    pub treasury_admin: Address,
    pub lb_creator: Address,
    pub lb_collection: String,
    pub boost_creator: Address,
    pub boost_collection: String,
    pub pool_owner: Address,
    pub reward_token: Address,
}

pub fn setup() -> Setup {
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

    let contract = env.register(StakeLbContract, ());
    let client = StakeLbContractClient::new(&env, &contract);

    let emergency_admin = Address::generate(&env);
    let treasury_admin = Address::generate(&env);
    client.initialize(&emergency_admin, &treasury_admin, &registry_id);

    let pool_owner = Address::generate(&env);

    Setup {
        env,
        client,
        contract,
        registry,
        emergency_admin,
        treasury_admin,
        lb_creator,
        lb_collection,
        boost_creator,
        boost_collection,
        pool_owner,
        reward_token,
    }
}

impl Setup {
    pub fn set_time(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    pub fn advance(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(now + seconds);
    }

    pub fn mint_reward(&self, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.reward_token).mint(to, &amount);
    }

    pub fn reward_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.reward_token).balance(who)
    }

    pub fn bin_token(&self, bin_id: u32) -> TokenId {
        TokenId::new(self.lb_creator.clone(), self.lb_collection.clone(), bin_id)
    }

    /// Mint `amount` units of the bin `bin_id` position to `to`.
    pub fn mint_position(&self, to: &Address, bin_id: u32, amount: u128) -> TokenId {
        self.registry
            .mint(&self.lb_creator, &self.lb_collection, &bin_id, to, &amount)
    }

    pub fn position_balance(&self, owner: &Address, bin_id: u32) -> u128 {
        self.registry.balance(owner, &self.bin_token(bin_id))
    }

    /// A fresh user holding `amount` units of bin `bin_id`.
    pub fn staker(&self, bin_id: u32, amount: u128) -> (Address, TokenId) {
        let user = Address::generate(&self.env);
        let token = self.mint_position(&user, bin_id, amount);
        (user, token)
    }

    pub fn boost_config(&self, boost_percent: u32) -> BoostConfig {
        BoostConfig {
            collection_owner: self.boost_creator.clone(),
            collection_name: self.boost_collection.clone(),
            boost_percent,
        }
    }

    pub fn mint_boost_nft(&self, to: &Address, id: u32) -> TokenId {
        self.registry
            .mint(&self.boost_creator, &self.boost_collection, &id, to, &1u128)
    }

    /// Give the pool owner a position proof and enough reward to fund a pool.
    pub fn fund_owner(&self, reward_amount: i128) -> TokenId {
        self.mint_reward(&self.pool_owner, reward_amount);
        self.mint_position(&self.pool_owner, 0, 1)
    }

    pub fn register_pool_with(
        &self,
        reward_amount: i128,
        duration: u64,
        boost_config: Option<BoostConfig>,
    ) -> PoolId {
        let proof = self.fund_owner(reward_amount);
        self.client.register_pool(
            &self.pool_owner,
            &proof,
            &self.reward_token,
            &reward_amount,
            &duration,
            &boost_config,
        )
    }

    /// The reference pool, without boost.
    pub fn register_pool(&self) -> PoolId {
        self.register_pool_with(REWARD_AMOUNT, DURATION, None)
    }

    pub fn register_boostable_pool(&self, boost_percent: u32) -> PoolId {
        self.register_pool_with(
            REWARD_AMOUNT,
            DURATION,
            Some(self.boost_config(boost_percent)),
        )
    }
}

/// Payload of the latest event `contract` published under `topics`.
pub fn last_event<T, P>(env: &Env, contract: &Address, topics: T) -> P
where
    T: IntoVal<Env, Vec<Val>>,
    P: TryFromVal<Env, Val>,
    P::Error: core::fmt::Debug,
{
    let topics: Vec<Val> = topics.into_val(env);
    let mut found = None;
    for (address, event_topics, data) in env.events().all().iter() {
        if &address == contract && event_topics == topics {
            found = Some(data);
        }
    }
    let data = found.expect("event was not published");
    P::try_from_val(env, &data).unwrap()
}

/// Asserts that a `try_*` client call failed with `expected`.
pub fn assert_error<T>(result: Result<T, Result<ContractError, InvokeError>>, expected: ContractError) {
    match result {
        Err(Ok(e)) => assert_eq!(e, expected),
        Err(Err(e)) => panic!("expected {:?}, got invoke error {:?}", expected, e),
        Ok(_) => panic!("expected {:?}, call succeeded", expected),
    }
}
