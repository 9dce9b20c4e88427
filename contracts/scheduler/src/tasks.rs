use soroban_sdk::{contractclient, log, token, Address, Bytes, Env};

use crate::errors::SchedulerError;
use crate::storage;
use crate::types::{FeeSchedule, Priority, Task, TaskStatus};

/// Contracts that accept scheduled calls implement this entry point.
#[contractclient(name = "HandlerClient")]
pub trait TransactionHandler {
    fn execute_transaction(env: Env, task_id: u64, data: Bytes);
}

pub fn fee_for(fees: &FeeSchedule, priority: Priority, effort: u32) -> Option<i128> {
    fees.fee_per_effort
        .checked_mul(effort as i128)
        .and_then(|variable| variable.checked_add(fees.base_fee))
        .and_then(|fee| fee.checked_mul(priority.fee_multiplier()))
}

pub fn estimate(
    env: &Env,
    execute_at: u64,
    priority: Priority,
    effort: u32,
) -> Result<i128, SchedulerError> {
    let config = storage::get_config(env)?;
    if execute_at <= env.ledger().timestamp() {
        return Err(SchedulerError::InvalidTimestamp);
    }
    if effort == 0 {
        return Err(SchedulerError::InvalidParameters);
    }
    fee_for(&config.fees, priority, effort).ok_or(SchedulerError::InvalidParameters)
}

#[allow(clippy::too_many_arguments)]
pub fn schedule(
    env: &Env,
    payer: Address,
    handler: Address,
    data: Bytes,
    execute_at: u64,
    priority: Priority,
    effort: u32,
    fee: i128,
) -> Result<u64, SchedulerError> {
    payer.require_auth();

    let config = storage::get_config(env)?;
    let required = estimate(env, execute_at, priority, effort)?;
    if fee < required {
        return Err(SchedulerError::InsufficientFee);
    }
    if fee > 0 {
        token::Client::new(env, &config.fee_token).transfer(
            &payer,
            &env.current_contract_address(),
            &fee,
        );
    }

    let task_id = storage::get_next_task_id(env);
    storage::set_next_task_id(env, task_id + 1);
    storage::set_task(
        env,
        &Task {
            id: task_id,
            payer: payer.clone(),
            handler: handler.clone(),
            data,
            execute_at,
            priority,
            effort,
            fee,
            status: TaskStatus::Scheduled,
            attempts: 0,
            executed_at: None,
        },
    );
    storage::extend_task_ttl(env, task_id, execute_at);

    env.events().publish(
        (crate::symbol_short!("task_new"),),
        (task_id, handler, execute_at),
    );

    Ok(task_id)
}

/// Fires a due task. Anyone may call this; the handler sees this contract as
/// the invoker. Returns whether the handler succeeded. A failed call leaves
/// the task pending so it can be fired again or cancelled by its payer.
pub fn execute(env: &Env, task_id: u64) -> Result<bool, SchedulerError> {
    let mut task = storage::get_task(env, task_id).ok_or(SchedulerError::TaskNotFound)?;

    if task.status != TaskStatus::Scheduled {
        return Err(SchedulerError::TaskNotPending);
    }
    let now = env.ledger().timestamp();
    if now < task.execute_at {
        return Err(SchedulerError::NotDue);
    }

    let handler = HandlerClient::new(env, &task.handler);
    let succeeded = matches!(
        handler.try_execute_transaction(&task_id, &task.data),
        Ok(Ok(()))
    );

    if succeeded {
        task.status = TaskStatus::Executed;
        task.executed_at = Some(now);
        storage::set_task(env, &task);
        env.events()
            .publish((crate::symbol_short!("task_exec"),), task_id);
    } else {
        task.attempts += 1;
        storage::set_task(env, &task);
        log!(env, "handler failed", task_id, task.attempts);
        env.events().publish(
            (crate::symbol_short!("task_fail"),),
            (task_id, task.attempts),
        );
    }

    Ok(succeeded)
}

/// Withdraws a pending task and refunds its fee to the payer.
pub fn cancel(env: &Env, payer: Address, task_id: u64) -> Result<(), SchedulerError> {
    payer.require_auth();

    let config = storage::get_config(env)?;
    let mut task = storage::get_task(env, task_id).ok_or(SchedulerError::TaskNotFound)?;

    if task.payer != payer {
        return Err(SchedulerError::Unauthorized);
    }
    if task.status != TaskStatus::Scheduled {
        return Err(SchedulerError::TaskNotPending);
    }

    task.status = TaskStatus::Cancelled;
    storage::set_task(env, &task);

    if task.fee > 0 {
        token::Client::new(env, &config.fee_token).transfer(
            &env.current_contract_address(),
            &payer,
            &task.fee,
        );
    }

    env.events()
        .publish((crate::symbol_short!("task_cncl"),), task_id);

    Ok(())
}
