use soroban_sdk::{Address, Env, Vec};

use crate::errors::ContractError;
use crate::storage;
use crate::types::{Circle, CircleStatus, ManagerProfile};

/// Registers `owner` as a circle manager. Calling it again is a no-op.
pub fn setup_manager(env: &Env, owner: Address) -> bool {
    owner.require_auth();

    if storage::get_manager(env, &owner).is_some() {
        return false;
    }

    let profile = ManagerProfile {
        owner: owner.clone(),
        circles: Vec::new(env),
        created_at: env.ledger().timestamp(),
    };
    storage::set_manager(env, &profile);

    env.events()
        .publish((crate::symbol_short!("mgr_new"),), owner);

    true
}

pub fn has_manager(env: &Env, owner: Address) -> bool {
    storage::get_manager(env, &owner).is_some()
}

pub fn get_manager(env: &Env, owner: Address) -> Option<ManagerProfile> {
    storage::get_manager(env, &owner)
}

pub fn create_circle(
    env: &Env,
    creator: Address,
    number_of_members: u32,
    contribution_amount: i128,
    cycle_duration: u64,
) -> Result<u64, ContractError> {
    creator.require_auth();

    let config = storage::get_config(env)?;
    let mut manager = storage::get_manager(env, &creator).ok_or(ContractError::ManagerNotSetup)?;

    if number_of_members < 1 || number_of_members > config.max_members {
        return Err(ContractError::InvalidParameters);
    }
    if contribution_amount <= 0 || cycle_duration == 0 {
        return Err(ContractError::InvalidParameters);
    }

    let circle_id = storage::get_next_circle_id(env);
    let circle = Circle {
        id: circle_id,
        creator: creator.clone(),
        number_of_members,
        contribution_amount,
        cycle_duration,
        status: CircleStatus::Forming,
        member_count: 0,
        current_cycle: 0,
        created_at: env.ledger().timestamp(),
        started_at: None,
        completed_at: None,
        vault_balance: 0,
        total_paid_out: 0,
    };

    // The whole schedule horizon must be representable, not just the reservation.
    let horizon = (number_of_members as u64)
        .checked_mul(cycle_duration)
        .and_then(|span| circle.created_at.checked_add(span));
    if circle.required_reservation().is_none() || horizon.is_none() {
        return Err(ContractError::InvalidParameters);
    }

    storage::set_next_circle_id(env, circle_id + 1);
    storage::set_circle(env, &circle);

    manager.circles.push_back(circle_id);
    storage::set_manager(env, &manager);

    env.events().publish(
        (crate::symbol_short!("circ_new"),),
        (circle_id, creator, number_of_members, contribution_amount),
    );

    Ok(circle_id)
}

pub fn get_circle(env: &Env, circle_id: u64) -> Result<Circle, ContractError> {
    storage::get_circle(env, circle_id).ok_or(ContractError::NotFound)
}

/// Largest page `get_circle_ids` returns.
pub const MAX_PAGE: u32 = 100;

/// Existing circle ids from `start`, at most `limit` (capped at `MAX_PAGE`).
pub fn get_circle_ids(env: &Env, start: u64, limit: u32) -> Vec<u64> {
    let end = start
        .saturating_add(limit.min(MAX_PAGE) as u64)
        .min(storage::get_next_circle_id(env));
    let mut ids = Vec::new(env);
    for id in start..end {
        ids.push_back(id);
    }
    ids
}

/// Moves a circle to `Cancelled`. The creator may abort a forming circle; the
/// protocol admin may abort a forming or active one. No funds are held by a
/// circle between executions, so nothing is refunded.
pub fn cancel_circle(env: &Env, caller: Address, circle_id: u64) -> Result<(), ContractError> {
    caller.require_auth();

    let config = storage::get_config(env)?;
    let mut circle = get_circle(env, circle_id)?;

    let is_admin = caller == config.admin;
    let allowed = match circle.status {
        CircleStatus::Forming => is_admin || caller == circle.creator,
        CircleStatus::Active => is_admin,
        CircleStatus::Completed | CircleStatus::Cancelled => {
            return Err(ContractError::InvalidTransition)
        }
    };
    if !allowed {
        return Err(ContractError::Unauthorized);
    }

    circle.status = CircleStatus::Cancelled;
    storage::set_circle(env, &circle);

    env.events()
        .publish((crate::symbol_short!("circ_cncl"),), (circle_id, caller));

    Ok(())
}
