use common::ttl;
use soroban_sdk::{contracttype, Address, Env};

use crate::{storage::DataKey, ContractError};

/// Process-wide admin and halt state, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlobalConfig {
    pub emergency_admin: Address,
    pub treasury_admin: Address,
    pub global_emergency: bool,
    /// Position-token registry holding LB positions and boost NFTs.
    pub position_registry: Address,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn load(env: &Env) -> Result<GlobalConfig, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn store(env: &Env, config: &GlobalConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    ttl::extend_instance(env);
}

pub fn require_emergency_admin(config: &GlobalConfig, caller: &Address) -> Result<(), ContractError> {
    if *caller != config.emergency_admin {
        return Err(ContractError::NoPermissions);
    }
    Ok(())
}

pub fn require_treasury_admin(config: &GlobalConfig, caller: &Address) -> Result<(), ContractError> {
    if *caller != config.treasury_admin {
        return Err(ContractError::NoPermissions);
    }
    Ok(())
}
