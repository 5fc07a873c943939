/// Abort codes returned by every `stake_lb` entry point.
///
/// Discriminants are part of the public interface and must stay stable.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NoPermissions = 3,
    Emergency = 4,
    NoEmergency = 5,
    AlreadyHalted = 6,
    NoPool = 7,
    NoStake = 8,
    InsufficientBalance = 9,
    ZeroAmount = 10,
    ZeroDuration = 11,
    NothingToHarvest = 12,
    NonBoostablePool = 13,
    AlreadyBoosted = 14,
    WrongBoostCollection = 15,
    InvalidBoostAmount = 16,
    NotBoosted = 17,
    PoolAlreadyExists = 18,
    WrongCollection = 19,
    InvalidBoostPercent = 20,
    EpochNotFound = 21,
    ArithmeticOverflow = 22,
    TooEarlyForTreasury = 23,
}

impl ContractError {
    /// Returns `true` for the boost misuse family of errors.
    pub fn is_boost_misuse(&self) -> bool {
        matches!(
            self,
            ContractError::NonBoostablePool
                | ContractError::AlreadyBoosted
                | ContractError::WrongBoostCollection
                | ContractError::InvalidBoostAmount
                | ContractError::NotBoosted
        )
    }
}
