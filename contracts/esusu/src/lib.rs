#![no_std]

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Bytes, Env, Vec};

mod admin;
mod circle;
mod errors;
mod executor;
mod membership;
mod reservation;
mod scheduling;
mod storage;
mod types;

pub use errors::ContractError;
pub use scheduling::{SchedulerClient, SchedulerInterface};
pub use types::*;

#[contract]
pub struct EsusuChainContract;

#[contractimpl]
impl EsusuChainContract {
    /// Deploy with the protocol admin, the contribution token and the
    /// scheduler that will drive cycle executions.
    pub fn __constructor(env: Env, admin: Address, token: Address, scheduler: Address) {
        admin::initialize(&env, admin, token, scheduler);
    }

    // ─── Configuration ──────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<ProtocolConfig, ContractError> {
        storage::get_config(&env)
    }

    /// Tune scheduling parameters and the member cap. Admin only.
    pub fn update_config(
        env: Env,
        admin: Address,
        priority: Priority,
        execution_effort: u32,
        max_members: u32,
    ) -> Result<(), ContractError> {
        admin::update_config(&env, admin, priority, execution_effort, max_members)
    }

    pub fn set_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        admin::set_admin(&env, current_admin, new_admin)
    }

    // ─── Managers ───────────────────────────────────────────────────

    /// One-time account setup required before creating circles.
    /// Returns false if the account was already set up.
    pub fn setup_manager(env: Env, owner: Address) -> bool {
        circle::setup_manager(&env, owner)
    }

    pub fn has_manager(env: Env, owner: Address) -> bool {
        circle::has_manager(&env, owner)
    }

    pub fn get_manager(env: Env, owner: Address) -> Option<ManagerProfile> {
        circle::get_manager(&env, owner)
    }

    // ─── Circle Lifecycle ───────────────────────────────────────────

    /// Create a circle in `Forming`. The creator is not automatically a member.
    pub fn create_circle(
        env: Env,
        creator: Address,
        number_of_members: u32,
        contribution_amount: i128,
        cycle_duration: u64,
    ) -> Result<u64, ContractError> {
        circle::create_circle(
            &env,
            creator,
            number_of_members,
            contribution_amount,
            cycle_duration,
        )
    }

    /// Join a forming circle. The member must have approved this contract for
    /// `contribution_amount * number_of_members`. Returns the payout position.
    pub fn join_circle(env: Env, member: Address, circle_id: u64) -> Result<u32, ContractError> {
        membership::join_circle(&env, member, circle_id)
    }

    pub fn cancel_circle(env: Env, caller: Address, circle_id: u64) -> Result<(), ContractError> {
        circle::cancel_circle(&env, caller, circle_id)
    }

    pub fn get_circle(env: Env, circle_id: u64) -> Result<Circle, ContractError> {
        circle::get_circle(&env, circle_id)
    }

    /// Like `get_circle`, but `None` for unknown ids.
    pub fn get_circle_info(env: Env, circle_id: u64) -> Option<Circle> {
        storage::get_circle(&env, circle_id)
    }

    /// The id the next created circle will receive.
    pub fn next_circle_id(env: Env) -> u64 {
        storage::get_next_circle_id(&env)
    }

    /// One page of circle ids starting at `start`. Use `next_circle_id` to
    /// know where the ids end.
    pub fn get_circle_ids(env: Env, start: u64, limit: u32) -> Vec<u64> {
        circle::get_circle_ids(&env, start, limit)
    }

    // ─── Membership ─────────────────────────────────────────────────

    pub fn get_member_info(env: Env, circle_id: u64, member: Address) -> Option<MemberRecord> {
        membership::get_member_info(&env, circle_id, member)
    }

    /// Members in payout order.
    pub fn get_members(env: Env, circle_id: u64) -> Result<Vec<Address>, ContractError> {
        membership::get_members(&env, circle_id)
    }

    pub fn get_member_circles(env: Env, member: Address) -> Vec<u64> {
        membership::get_member_circles(&env, member)
    }

    pub fn get_current_recipient(env: Env, circle_id: u64) -> Result<Address, ContractError> {
        membership::get_current_recipient(&env, circle_id)
    }

    // ─── Scheduled Execution ────────────────────────────────────────

    pub fn get_schedule(env: Env, circle_id: u64) -> Result<Vec<ScheduledCycle>, ContractError> {
        circle::get_circle(&env, circle_id)?;
        Ok(storage::get_schedule(&env, circle_id))
    }

    /// Called by the scheduler when a registered cycle comes due.
    pub fn execute_transaction(env: Env, task_id: u64, data: Bytes) -> Result<(), ContractError> {
        executor::execute_transaction(&env, task_id, data)
    }

    /// Collect payouts held back because the transfer to this member failed.
    pub fn claim_payout(env: Env, member: Address, circle_id: u64) -> Result<i128, ContractError> {
        executor::claim_payout(&env, member, circle_id)
    }

    pub fn get_cycle(
        env: Env,
        circle_id: u64,
        cycle_index: u32,
    ) -> Result<CycleRecord, ContractError> {
        executor::get_cycle(&env, circle_id, cycle_index)
    }
}
