use soroban_sdk::{Address, Env};

use crate::errors::ContractError;
use crate::storage;
use crate::types::{Priority, ProtocolConfig};

pub const DEFAULT_EXECUTION_EFFORT: u32 = 1000;
pub const DEFAULT_MAX_MEMBERS: u32 = 50;

pub fn initialize(env: &Env, admin: Address, token: Address, scheduler: Address) {
    if storage::has_config(env) {
        panic!("already initialized");
    }
    storage::set_config(
        env,
        &ProtocolConfig {
            admin,
            token,
            scheduler,
            priority: Priority::Medium,
            execution_effort: DEFAULT_EXECUTION_EFFORT,
            max_members: DEFAULT_MAX_MEMBERS,
        },
    );
}

pub fn update_config(
    env: &Env,
    admin: Address,
    priority: Priority,
    execution_effort: u32,
    max_members: u32,
) -> Result<(), ContractError> {
    admin.require_auth();

    let mut config = storage::get_config(env)?;
    if admin != config.admin {
        return Err(ContractError::Unauthorized);
    }
    if execution_effort == 0 || max_members == 0 {
        return Err(ContractError::InvalidParameters);
    }

    config.priority = priority;
    config.execution_effort = execution_effort;
    config.max_members = max_members;
    storage::set_config(env, &config);

    env.events().publish(
        (crate::symbol_short!("cfg_upd"),),
        (execution_effort, max_members),
    );

    Ok(())
}

pub fn set_admin(
    env: &Env,
    current_admin: Address,
    new_admin: Address,
) -> Result<(), ContractError> {
    current_admin.require_auth();

    let mut config = storage::get_config(env)?;
    if current_admin != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.admin = new_admin.clone();
    storage::set_config(env, &config);

    env.events()
        .publish((crate::symbol_short!("adm_chng"),), new_admin);

    Ok(())
}
