use soroban_sdk::{contractclient, contracttype, Address, Env, String};

// ── Token identity ───────────────────────────────────────────────────────────

/// Identifies one kind of position token inside the registry.
///
/// For liquidity-bin collections `id` is the bin id of the position, so two
/// tokens of the same collection are interchangeable only when they sit in
/// the same bin. For boost collections `id` is simply the serial number of
/// the NFT.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenId {
    pub creator: Address,
    pub collection: String,
    pub id: u32,
}

impl TokenId {
    pub fn new(creator: Address, collection: String, id: u32) -> Self {
        Self {
            creator,
            collection,
            id,
        }
    }

    /// Returns `true` when this token was minted in `creator`'s `collection`.
    pub fn belongs_to(&self, creator: &Address, collection: &String) -> bool {
        self.creator == *creator && self.collection == *collection
    }
}

// ── Cross-contract interface ─────────────────────────────────────────────────

/// The subset of the position registry that other contracts call into.
///
/// Failures inside the registry (e.g. an insufficient balance) abort the
/// calling transaction.
#[contractclient(name = "RegistryClient")]
pub trait PositionRegistryInterface {
    /// Moves `amount` units of `token` from `from` to `to`. `from` must authorise.
    fn transfer(env: Env, from: Address, to: Address, token: TokenId, amount: u128);

    /// Units of `token` currently held by `owner`.
    fn balance(env: Env, owner: Address, token: TokenId) -> u128;
}
