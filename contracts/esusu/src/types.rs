use soroban_sdk::{contracttype, Address, Vec};

/// Lifecycle of a circle. Transitions only move forward.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CircleStatus {
    Forming,   // Accepting members
    Active,    // Full, cycles scheduled and running
    Completed, // Every member has received the pool once
    Cancelled, // Aborted by the creator or the protocol admin
}

/// Priority passed through to the scheduler when registering cycle executions.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Protocol-wide settings fixed at deployment and tunable by the admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolConfig {
    pub admin: Address,
    /// Token every circle contributes and pays out in.
    pub token: Address,
    /// Time-based execution service that calls back `execute_transaction`.
    pub scheduler: Address,
    pub priority: Priority,
    pub execution_effort: u32,
    /// Upper bound on `number_of_members`, which bounds per-call work.
    pub max_members: u32,
}

/// A rotating savings circle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Circle {
    pub id: u64,
    pub creator: Address,
    pub number_of_members: u32,
    pub contribution_amount: i128,
    /// Seconds between scheduled pulls.
    pub cycle_duration: u64,
    pub status: CircleStatus,
    pub member_count: u32,
    /// Index of the next cycle to execute.
    pub current_cycle: u32,
    pub created_at: u64,
    pub started_at: Option<u64>,
    pub completed_at: Option<u64>,
    /// Funds held between a pull and its payout. Zero between executions.
    pub vault_balance: i128,
    pub total_paid_out: i128,
}

impl Circle {
    /// Amount a member must have reserved to cover every cycle.
    pub fn required_reservation(&self) -> Option<i128> {
        self.contribution_amount
            .checked_mul(self.number_of_members as i128)
    }

    pub fn is_full(&self) -> bool {
        self.member_count >= self.number_of_members
    }
}

/// One member's standing in one circle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberRecord {
    pub address: Address,
    /// Payout queue position, assigned in join order.
    pub position: u32,
    /// Allowance observed at join time.
    pub approved_amount: i128,
    pub contributed_amount: i128,
    pub cycles_paid: u32,
    pub cycles_missed: u32,
    pub has_received_payout: bool,
    /// Payout that could not be delivered at execution, awaiting `claim_payout`.
    pub unclaimed: i128,
    pub joined_at: u64,
}

/// A cycle execution registered with the scheduler.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduledCycle {
    pub cycle_index: u32,
    pub execute_at: u64,
    pub task_id: u64,
    pub fee: i128,
}

/// Outcome of an executed cycle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CycleRecord {
    pub cycle_index: u32,
    pub recipient: Address,
    pub collected: i128,
    pub payout: i128,
    /// The transfer to the recipient failed; the payout is held for claiming.
    pub payout_held: bool,
    pub defaulters: Vec<Address>,
    pub executed_at: u64,
}

/// Payload carried by each scheduled execution, XDR-encoded into the task data.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CyclePayload {
    pub circle_id: u64,
    pub cycle_index: u32,
}

/// Marks an account as allowed to create circles.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagerProfile {
    pub owner: Address,
    pub circles: Vec<u64>,
    pub created_at: u64,
}

/// Storage keys for all contract data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    NextCircleId,
    Circle(u64),
    Members(u64),
    Member(u64, Address),
    Schedule(u64),
    Cycle(u64, u32),
    MemberCircles(Address),
    Manager(Address),
}
