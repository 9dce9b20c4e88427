use soroban_sdk::xdr::{FromXdr, ToXdr};
use soroban_sdk::{contractclient, log, Address, Bytes, Env, Vec};

use crate::errors::ContractError;
use crate::types::{CyclePayload, Priority, ProtocolConfig, ScheduledCycle};

/// Interface of the time-based execution service. Registered tasks are fired
/// back at the handler's `execute_transaction(task_id, data)` once due.
#[contractclient(name = "SchedulerClient")]
pub trait SchedulerInterface {
    /// Token registration fees are charged in.
    fn fee_token(env: Env) -> Address;

    /// Fee for registering one execution.
    fn estimate(env: Env, execute_at: u64, priority: Priority, effort: u32) -> i128;

    /// Registers one execution, charging `fee` to `payer`. Returns the task id.
    fn schedule(
        env: Env,
        payer: Address,
        handler: Address,
        data: Bytes,
        execute_at: u64,
        priority: Priority,
        effort: u32,
        fee: i128,
    ) -> u64;
}

impl CyclePayload {
    pub fn encode(&self, env: &Env) -> Bytes {
        self.clone().to_xdr(env)
    }

    pub fn decode(env: &Env, data: &Bytes) -> Result<Self, ContractError> {
        CyclePayload::from_xdr(env, data).map_err(|_| ContractError::InvalidPayload)
    }
}

/// Fees quoted for every cycle of a circle, before anything is charged.
pub struct CycleQuote {
    /// `(execute_at, fee)` per cycle, in cycle order.
    pub slots: Vec<(u64, i128)>,
    pub total_fee: i128,
    pub fee_token: Address,
}

/// Prices one execution per cycle at `start + k * duration` for k = 1..=count.
pub fn quote_cycles(
    env: &Env,
    config: &ProtocolConfig,
    circle_id: u64,
    start: u64,
    duration: u64,
    count: u32,
) -> Result<CycleQuote, ContractError> {
    let client = SchedulerClient::new(env, &config.scheduler);
    let fee_token = match client.try_fee_token() {
        Ok(Ok(token)) => token,
        _ => {
            log!(env, "fee token lookup failed", circle_id);
            return Err(ContractError::SchedulingFailed);
        }
    };

    let mut slots = Vec::new(env);
    let mut total_fee: i128 = 0;
    for k in 1..=count {
        let execute_at = (k as u64)
            .checked_mul(duration)
            .and_then(|offset| start.checked_add(offset))
            .ok_or(ContractError::SchedulingFailed)?;

        let estimate =
            client.try_estimate(&execute_at, &config.priority, &config.execution_effort);
        let fee = match estimate {
            Ok(Ok(fee)) if fee >= 0 => fee,
            _ => {
                log!(env, "fee estimate failed", circle_id, k);
                return Err(ContractError::SchedulingFailed);
            }
        };
        total_fee = total_fee
            .checked_add(fee)
            .ok_or(ContractError::SchedulingFailed)?;
        slots.push_back((execute_at, fee));
    }

    Ok(CycleQuote {
        slots,
        total_fee,
        fee_token,
    })
}

/// Registers every quoted cycle, charging `payer`. Any registration failure
/// aborts the whole batch: the caller must not persist an activation with a
/// partial schedule.
pub fn register_cycles(
    env: &Env,
    config: &ProtocolConfig,
    payer: &Address,
    circle_id: u64,
    quote: &CycleQuote,
) -> Result<Vec<ScheduledCycle>, ContractError> {
    let client = SchedulerClient::new(env, &config.scheduler);
    let handler = env.current_contract_address();
    let mut scheduled = Vec::new(env);

    for (cycle_index, (execute_at, fee)) in quote.slots.iter().enumerate() {
        let cycle_index = cycle_index as u32;
        let data = CyclePayload {
            circle_id,
            cycle_index,
        }
        .encode(env);

        let task_id = match client.try_schedule(
            payer,
            &handler,
            &data,
            &execute_at,
            &config.priority,
            &config.execution_effort,
            &fee,
        ) {
            Ok(Ok(task_id)) => task_id,
            _ => {
                log!(env, "cycle registration failed", circle_id, cycle_index);
                return Err(ContractError::SchedulingFailed);
            }
        };

        scheduled.push_back(ScheduledCycle {
            cycle_index,
            execute_at,
            task_id,
            fee,
        });
    }

    env.events().publish(
        (crate::symbol_short!("cyc_sched"),),
        (circle_id, scheduled.len()),
    );

    Ok(scheduled)
}
