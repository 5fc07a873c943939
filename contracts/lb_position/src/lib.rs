#![no_std]

//! Registry for liquidity-bin position tokens and boost NFTs.
//!
//! A collection is identified by `(creator, name)`. Tokens inside it are
//! semi-fungible: every `TokenId` carries an integer `id` (the bin id for
//! liquidity collections) and balances are tracked per `(owner, TokenId)`.

pub mod events;

use common::{ttl, TokenId};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String};

// ── Storage keys ─────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Collection(Address, String),
    Balance(Address, TokenId),
    Supply(TokenId),
}

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RegistryError {
    CollectionExists = 1,
    CollectionNotFound = 2,
    InsufficientBalance = 3,
    ZeroAmount = 4,
}

/// Metadata stored for every collection.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collection {
    pub creator: Address,
    pub name: String,
    pub description: String,
    pub created_at: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PositionRegistry;

#[contractimpl]
impl PositionRegistry {
    /// Create a new collection owned by `creator`.
    pub fn create_collection(
        env: Env,
        creator: Address,
        name: String,
        description: String,
    ) -> Result<(), RegistryError> {
        creator.require_auth();

        let key = DataKey::Collection(creator.clone(), name.clone());
        if env.storage().persistent().has(&key) {
            return Err(RegistryError::CollectionExists);
        }

        let collection = Collection {
            creator: creator.clone(),
            name: name.clone(),
            description,
            created_at: env.ledger().timestamp(),
        };
        env.storage().persistent().set(&key, &collection);
        ttl::extend_persistent(&env, &key);

        events::publish_collection_created(&env, creator, name);
        Ok(())
    }

    pub fn collection_exists(env: Env, creator: Address, name: String) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Collection(creator, name))
    }

    pub fn get_collection(
        env: Env,
        creator: Address,
        name: String,
    ) -> Result<Collection, RegistryError> {
        env.storage()
            .persistent()
            .get(&DataKey::Collection(creator, name))
            .ok_or(RegistryError::CollectionNotFound)
    }

    /// Mint `amount` units of token `id` of `creator`'s `collection` to `to`.
    ///
    /// Only the collection creator may mint.
    pub fn mint(
        env: Env,
        creator: Address,
        collection: String,
        id: u32,
        to: Address,
        amount: u128,
    ) -> Result<TokenId, RegistryError> {
        creator.require_auth();

        if amount == 0 {
            return Err(RegistryError::ZeroAmount);
        }
        if !Self::collection_exists(env.clone(), creator.clone(), collection.clone()) {
            return Err(RegistryError::CollectionNotFound);
        }

        let token = TokenId::new(creator, collection, id);
        credit(&env, &to, &token, amount);

        let supply_key = DataKey::Supply(token.clone());
        let supply: u128 = env.storage().persistent().get(&supply_key).unwrap_or(0);
        env.storage()
            .persistent()
            .set(&supply_key, &supply.saturating_add(amount));
        ttl::extend_persistent(&env, &supply_key);

        events::publish_minted(&env, to, token.clone(), amount);
        Ok(token)
    }

    /// Move `amount` units of `token` from `from` to `to`.
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        token: TokenId,
        amount: u128,
    ) -> Result<(), RegistryError> {
        from.require_auth();

        if amount == 0 {
            return Err(RegistryError::ZeroAmount);
        }

        debit(&env, &from, &token, amount)?;
        credit(&env, &to, &token, amount);

        events::publish_transferred(&env, from, to, token, amount);
        Ok(())
    }

    /// Destroy `amount` units of `token` held by `owner`.
    pub fn burn(
        env: Env,
        owner: Address,
        token: TokenId,
        amount: u128,
    ) -> Result<(), RegistryError> {
        owner.require_auth();

        if amount == 0 {
            return Err(RegistryError::ZeroAmount);
        }

        debit(&env, &owner, &token, amount)?;

        let supply_key = DataKey::Supply(token.clone());
        let supply: u128 = env.storage().persistent().get(&supply_key).unwrap_or(0);
        env.storage()
            .persistent()
            .set(&supply_key, &supply.saturating_sub(amount));

        events::publish_burned(&env, owner, token, amount);
        Ok(())
    }

    pub fn balance(env: Env, owner: Address, token: TokenId) -> u128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(owner, token))
            .unwrap_or(0)
    }

    pub fn supply(env: Env, token: TokenId) -> u128 {
        env.storage()
            .persistent()
            .get(&DataKey::Supply(token))
            .unwrap_or(0)
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn credit(env: &Env, owner: &Address, token: &TokenId, amount: u128) {
    let key = DataKey::Balance(owner.clone(), token.clone());
    let balance: u128 = env.storage().persistent().get(&key).unwrap_or(0);
    env.storage()
        .persistent()
        .set(&key, &balance.saturating_add(amount));
    ttl::extend_persistent(env, &key);
}

/// Zero balances are removed rather than stored.
fn debit(env: &Env, owner: &Address, token: &TokenId, amount: u128) -> Result<(), RegistryError> {
    let key = DataKey::Balance(owner.clone(), token.clone());
    let balance: u128 = env.storage().persistent().get(&key).unwrap_or(0);
    if balance < amount {
        return Err(RegistryError::InsufficientBalance);
    }

    let remaining = balance - amount;
    if remaining == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &remaining);
        ttl::extend_persistent(env, &key);
    }
    Ok(())
}
