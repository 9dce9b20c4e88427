use soroban_sdk::Env;

use crate::errors::SchedulerError;
use crate::types::{DataKey, SchedulerConfig, Task};

const INSTANCE_TTL_THRESHOLD: u32 = 100;
const INSTANCE_TTL_EXTEND: u32 = 500;
const PERSISTENT_TTL_THRESHOLD: u32 = 100;
const PERSISTENT_TTL_EXTEND: u32 = 1000;
const LEDGER_SECONDS: u64 = 5;

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<SchedulerConfig, SchedulerError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(SchedulerError::NotInitialized)
}

pub fn set_config(env: &Env, config: &SchedulerConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

pub fn get_next_task_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextTaskId)
        .unwrap_or(0)
}

pub fn set_next_task_id(env: &Env, next: u64) {
    env.storage().instance().set(&DataKey::NextTaskId, &next);
    extend_instance_ttl(env);
}

pub fn get_task(env: &Env, task_id: u64) -> Option<Task> {
    let key = DataKey::Task(task_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_task(env: &Env, task: &Task) {
    let key = DataKey::Task(task.id);
    env.storage().persistent().set(&key, task);
    extend_persistent_ttl(env, &key);
}

/// Keeps a task, and this contract, live until the task comes due plus the
/// regular extension. Capped at the network maximum.
pub fn extend_task_ttl(env: &Env, task_id: u64, execute_at: u64) {
    let remaining = execute_at.saturating_sub(env.ledger().timestamp()) / LEDGER_SECONDS;
    let ledgers = remaining
        .saturating_add(PERSISTENT_TTL_EXTEND as u64)
        .min(env.storage().max_ttl() as u64) as u32;

    env.storage().instance().extend_ttl(ledgers, ledgers);
    env.storage()
        .persistent()
        .extend_ttl(&DataKey::Task(task_id), ledgers, ledgers);
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
