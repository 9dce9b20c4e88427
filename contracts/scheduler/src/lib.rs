#![no_std]

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Bytes, Env};

mod errors;
mod storage;
mod tasks;
mod types;

pub use errors::SchedulerError;
pub use tasks::{HandlerClient, TransactionHandler};
pub use types::*;

#[contract]
pub struct SchedulerContract;

#[contractimpl]
impl SchedulerContract {
    /// Initialize with an admin and the token fees are paid in.
    pub fn __constructor(
        env: Env,
        admin: Address,
        fee_token: Address,
        base_fee: i128,
        fee_per_effort: i128,
    ) {
        if storage::has_config(&env) {
            panic!("already initialized");
        }
        if base_fee < 0 || fee_per_effort < 0 {
            panic!("negative fee");
        }
        storage::set_config(
            &env,
            &SchedulerConfig {
                admin,
                fee_token,
                fees: FeeSchedule {
                    base_fee,
                    fee_per_effort,
                },
            },
        );
    }

    /// Fee required to schedule a call at `execute_at`.
    pub fn estimate(
        env: Env,
        execute_at: u64,
        priority: Priority,
        effort: u32,
    ) -> Result<i128, SchedulerError> {
        tasks::estimate(&env, execute_at, priority, effort)
    }

    /// Register a call to `handler.execute_transaction(id, data)` at
    /// `execute_at`. The payer is charged `fee`, which must cover the estimate.
    #[allow(clippy::too_many_arguments)]
    pub fn schedule(
        env: Env,
        payer: Address,
        handler: Address,
        data: Bytes,
        execute_at: u64,
        priority: Priority,
        effort: u32,
        fee: i128,
    ) -> Result<u64, SchedulerError> {
        tasks::schedule(
            &env, payer, handler, data, execute_at, priority, effort, fee,
        )
    }

    /// Fire a due task.
    pub fn execute(env: Env, task_id: u64) -> Result<bool, SchedulerError> {
        tasks::execute(&env, task_id)
    }

    pub fn cancel(env: Env, payer: Address, task_id: u64) -> Result<(), SchedulerError> {
        tasks::cancel(&env, payer, task_id)
    }

    pub fn get_task(env: Env, task_id: u64) -> Result<Task, SchedulerError> {
        storage::get_task(&env, task_id).ok_or(SchedulerError::TaskNotFound)
    }

    pub fn next_task_id(env: Env) -> u64 {
        storage::get_next_task_id(&env)
    }

    pub fn fee_token(env: Env) -> Result<Address, SchedulerError> {
        Ok(storage::get_config(&env)?.fee_token)
    }

    pub fn get_fees(env: Env) -> Result<FeeSchedule, SchedulerError> {
        Ok(storage::get_config(&env)?.fees)
    }

    pub fn set_fees(
        env: Env,
        admin: Address,
        base_fee: i128,
        fee_per_effort: i128,
    ) -> Result<(), SchedulerError> {
        admin.require_auth();

        let mut config = storage::get_config(&env)?;
        if admin != config.admin {
            return Err(SchedulerError::Unauthorized);
        }
        if base_fee < 0 || fee_per_effort < 0 {
            return Err(SchedulerError::InvalidParameters);
        }
        config.fees = FeeSchedule {
            base_fee,
            fee_per_effort,
        };
        storage::set_config(&env, &config);
        Ok(())
    }
}
