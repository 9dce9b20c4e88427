use soroban_sdk::{Address, Env, Vec};

use crate::errors::ContractError;
use crate::types::{CircleStatus, MemberRecord};
use crate::{reservation, scheduling, storage};

/// Admits `member` at the next queue position. The admission that fills the
/// circle also activates it and registers every cycle with the scheduler; if
/// registration fails the join fails and nothing is persisted.
pub fn join_circle(env: &Env, member: Address, circle_id: u64) -> Result<u32, ContractError> {
    member.require_auth();

    let config = storage::get_config(env)?;
    let mut circle = storage::get_circle(env, circle_id).ok_or(ContractError::NotFound)?;

    if circle.is_full() {
        return Err(ContractError::CircleFull);
    }
    if storage::get_member(env, circle_id, &member).is_some() {
        return Err(ContractError::AlreadyMember);
    }
    if circle.status != CircleStatus::Forming {
        return Err(ContractError::CircleNotAccepting);
    }

    let required = circle
        .required_reservation()
        .ok_or(ContractError::InvalidParameters)?;
    let approved = reservation::validate(env, &config.token, &member, required)?;

    let now = env.ledger().timestamp();
    let position = circle.member_count;
    circle.member_count += 1;

    let mut schedule = None;
    if circle.is_full() {
        let quote = scheduling::quote_cycles(
            env,
            &config,
            circle_id,
            now,
            circle.cycle_duration,
            circle.number_of_members,
        )?;
        // The filling member pays the fees on top of their own reservation.
        let fee_budget = if quote.fee_token == config.token {
            required
                .checked_add(quote.total_fee)
                .ok_or(ContractError::InsufficientFunds)?
        } else {
            quote.total_fee
        };
        reservation::ensure_balance(env, &quote.fee_token, &member, fee_budget)?;

        let cycles = scheduling::register_cycles(env, &config, &member, circle_id, &quote)?;
        circle.status = CircleStatus::Active;
        circle.started_at = Some(now);
        schedule = Some(cycles);
    }

    let record = MemberRecord {
        address: member.clone(),
        position,
        approved_amount: approved,
        contributed_amount: 0,
        cycles_paid: 0,
        cycles_missed: 0,
        has_received_payout: false,
        unclaimed: 0,
        joined_at: now,
    };

    let mut members = storage::get_members(env, circle_id);
    members.push_back(member.clone());

    storage::set_member(env, circle_id, &record);
    storage::set_members(env, circle_id, &members);
    storage::add_member_circle(env, &member, circle_id);
    storage::set_circle(env, &circle);
    if let Some(cycles) = schedule {
        storage::set_schedule(env, circle_id, &cycles);
        if let Some(last) = cycles.last() {
            storage::extend_circle_ttl(env, circle_id, &members, last.execute_at);
        }
    }

    env.events().publish(
        (crate::symbol_short!("mem_join"),),
        (circle_id, member, position),
    );
    if circle.status == CircleStatus::Active {
        env.events()
            .publish((crate::symbol_short!("circ_act"),), (circle_id, now));
    }

    Ok(position)
}

pub fn get_member_info(env: &Env, circle_id: u64, member: Address) -> Option<MemberRecord> {
    storage::get_member(env, circle_id, &member)
}

/// Members in payout order.
pub fn get_members(env: &Env, circle_id: u64) -> Result<Vec<Address>, ContractError> {
    storage::get_circle(env, circle_id).ok_or(ContractError::NotFound)?;
    Ok(storage::get_members(env, circle_id))
}

pub fn get_member_circles(env: &Env, member: Address) -> Vec<u64> {
    storage::get_member_circles(env, &member)
}

/// Member due to receive the pool at the next execution.
pub fn get_current_recipient(env: &Env, circle_id: u64) -> Result<Address, ContractError> {
    let circle = storage::get_circle(env, circle_id).ok_or(ContractError::NotFound)?;
    if circle.status != CircleStatus::Active {
        return Err(ContractError::CircleNotActive);
    }
    storage::get_members(env, circle_id)
        .get(circle.current_cycle)
        .ok_or(ContractError::NotMember)
}
