use soroban_sdk::{log, Address, Bytes, Env, Vec};

use crate::errors::ContractError;
use crate::types::{Circle, CircleStatus, CycleRecord, CyclePayload, ProtocolConfig};
use crate::{reservation, storage};

/// Scheduler callback: runs the pull and payout for one cycle.
///
/// Re-delivery of a cycle that already ran is a no-op. Delivery of a later
/// cycle first runs every earlier cycle still outstanding, in order, so tasks
/// fired out of order never leave a gap. A member whose reservation can no
/// longer cover the contribution is recorded as a defaulter and the cycle
/// proceeds with what was collected.
pub fn execute_transaction(env: &Env, task_id: u64, data: Bytes) -> Result<(), ContractError> {
    let config = storage::get_config(env)?;
    config.scheduler.require_auth();

    let payload = CyclePayload::decode(env, &data)?;
    let circle_id = payload.circle_id;
    let target = payload.cycle_index;

    let mut circle = storage::get_circle(env, circle_id).ok_or(ContractError::NotFound)?;

    if target < circle.current_cycle {
        log!(env, "cycle already executed", circle_id, target, task_id);
        return Ok(());
    }
    if circle.status != CircleStatus::Active {
        return Err(ContractError::CircleNotActive);
    }

    let schedule = storage::get_schedule(env, circle_id);
    let slot = schedule.get(target).ok_or(ContractError::CycleOutOfOrder)?;
    let now = env.ledger().timestamp();
    if now < slot.execute_at {
        return Err(ContractError::CycleNotDue);
    }

    let members = storage::get_members(env, circle_id);
    if target > circle.current_cycle {
        log!(env, "catching up", circle_id, circle.current_cycle, target);
    }
    while circle.current_cycle <= target {
        run_cycle(env, &config, &mut circle, &members, now)?;
    }

    if circle.status == CircleStatus::Active {
        if let Some(last) = schedule.last() {
            storage::extend_circle_ttl(env, circle_id, &members, last.execute_at);
        }
    }

    Ok(())
}

fn run_cycle(
    env: &Env,
    config: &ProtocolConfig,
    circle: &mut Circle,
    members: &Vec<Address>,
    now: u64,
) -> Result<(), ContractError> {
    let circle_id = circle.id;
    let cycle_index = circle.current_cycle;
    let vault_before = circle.vault_balance;

    // Pull
    let mut defaulters = Vec::new(env);
    for address in members.iter() {
        let mut record =
            storage::get_member(env, circle_id, &address).ok_or(ContractError::NotMember)?;
        match reservation::withdraw(env, &config.token, &address, circle.contribution_amount) {
            Ok(()) => {
                record.contributed_amount += circle.contribution_amount;
                record.cycles_paid += 1;
                circle.vault_balance += circle.contribution_amount;
            }
            Err(_) => {
                record.cycles_missed += 1;
                defaulters.push_back(address.clone());
                env.events().publish(
                    (crate::symbol_short!("mem_dflt"),),
                    (circle_id, address.clone(), cycle_index),
                );
            }
        }
        storage::set_member(env, circle_id, &record);
    }

    // Payout
    let recipient = members.get(cycle_index).ok_or(ContractError::NotMember)?;
    let collected = circle.vault_balance - vault_before;
    let delivered =
        collected == 0 || reservation::pay_out(env, &config.token, &recipient, collected);
    circle.vault_balance = vault_before;
    circle.total_paid_out += collected;

    let mut winner =
        storage::get_member(env, circle_id, &recipient).ok_or(ContractError::NotMember)?;
    winner.has_received_payout = true;
    if !delivered {
        winner.unclaimed += collected;
        log!(env, "payout held", circle_id, cycle_index);
        env.events().publish(
            (crate::symbol_short!("pay_held"),),
            (circle_id, recipient.clone(), cycle_index, collected),
        );
    }
    storage::set_member(env, circle_id, &winner);

    storage::set_cycle(
        env,
        circle_id,
        &CycleRecord {
            cycle_index,
            recipient: recipient.clone(),
            collected,
            payout: collected,
            payout_held: !delivered,
            defaulters,
            executed_at: now,
        },
    );

    env.events().publish(
        (crate::symbol_short!("payout"),),
        (circle_id, recipient, cycle_index, collected),
    );

    circle.current_cycle += 1;
    if circle.current_cycle == circle.number_of_members {
        circle.status = CircleStatus::Completed;
        circle.completed_at = Some(now);
        env.events()
            .publish((crate::symbol_short!("circ_done"),), circle_id);
    }
    storage::set_circle(env, circle);

    Ok(())
}

/// Sends a member the payouts that could not be delivered when their cycle
/// ran. Works in any circle status.
pub fn claim_payout(env: &Env, member: Address, circle_id: u64) -> Result<i128, ContractError> {
    member.require_auth();

    let config = storage::get_config(env)?;
    storage::get_circle(env, circle_id).ok_or(ContractError::NotFound)?;
    let mut record =
        storage::get_member(env, circle_id, &member).ok_or(ContractError::NotMember)?;
    if record.unclaimed <= 0 {
        return Err(ContractError::NothingToClaim);
    }

    let amount = record.unclaimed;
    record.unclaimed = 0;
    storage::set_member(env, circle_id, &record);
    reservation::release(env, &config.token, &member, amount);

    env.events().publish(
        (crate::symbol_short!("pay_clmd"),),
        (circle_id, member, amount),
    );

    Ok(amount)
}

pub fn get_cycle(
    env: &Env,
    circle_id: u64,
    cycle_index: u32,
) -> Result<CycleRecord, ContractError> {
    storage::get_cycle(env, circle_id, cycle_index).ok_or(ContractError::NotFound)
}
