#![allow(deprecated)] // events().publish migration tracked separately

use common::TokenId;
use soroban_sdk::{symbol_short, Address, Env, String};

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollectionCreatedEvent {
    pub creator: Address,
    pub name: String,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintedEvent {
    pub to: Address,
    pub token: TokenId,
    pub amount: u128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferredEvent {
    pub from: Address,
    pub to: Address,
    pub token: TokenId,
    pub amount: u128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnedEvent {
    pub owner: Address,
    pub token: TokenId,
    pub amount: u128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_collection_created(env: &Env, creator: Address, name: String) {
    env.events().publish(
        (symbol_short!("COLL_NEW"), creator.clone()),
        CollectionCreatedEvent {
            creator,
            name,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_minted(env: &Env, to: Address, token: TokenId, amount: u128) {
    env.events().publish(
        (symbol_short!("MINT"), to.clone()),
        MintedEvent {
            to,
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_transferred(env: &Env, from: Address, to: Address, token: TokenId, amount: u128) {
    env.events().publish(
        (symbol_short!("XFER"), from.clone(), to.clone()),
        TransferredEvent {
            from,
            to,
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_burned(env: &Env, owner: Address, token: TokenId, amount: u128) {
    env.events().publish(
        (symbol_short!("BURN"), owner.clone()),
        BurnedEvent {
            owner,
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
