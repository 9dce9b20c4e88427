use soroban_sdk::{contracttype, Address, Bytes};

/// Execution priority. Higher priorities cost more.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn fee_multiplier(&self) -> i128 {
        match self {
            Priority::High => 4,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TaskStatus {
    Scheduled, // Waiting for its timestamp, or for a retry after a failed call
    Executed,  // Handler ran successfully
    Cancelled, // Withdrawn by the payer, fee refunded
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSchedule {
    pub base_fee: i128,
    pub fee_per_effort: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchedulerConfig {
    pub admin: Address,
    pub fee_token: Address,
    pub fees: FeeSchedule,
}

/// A registered call to `handler.execute_transaction(id, data)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Task {
    pub id: u64,
    pub payer: Address,
    pub handler: Address,
    pub data: Bytes,
    pub execute_at: u64,
    pub priority: Priority,
    pub effort: u32,
    pub fee: i128,
    pub status: TaskStatus,
    /// Failed handler calls so far.
    pub attempts: u32,
    pub executed_at: Option<u64>,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    NextTaskId,
    Task(u64),
}
