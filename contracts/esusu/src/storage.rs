use soroban_sdk::{Address, Env, Vec};

use crate::errors::ContractError;
use crate::types::{
    Circle, CycleRecord, DataKey, ManagerProfile, MemberRecord, ProtocolConfig, ScheduledCycle,
};

const INSTANCE_TTL_THRESHOLD: u32 = 100;
const INSTANCE_TTL_EXTEND: u32 = 500;
const PERSISTENT_TTL_THRESHOLD: u32 = 100;
const PERSISTENT_TTL_EXTEND: u32 = 1000;
const LEDGER_SECONDS: u64 = 5;

// --- Config ---

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<ProtocolConfig, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_config(env: &Env, config: &ProtocolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// --- Circle ids ---

pub fn get_next_circle_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextCircleId)
        .unwrap_or(0)
}

pub fn set_next_circle_id(env: &Env, next: u64) {
    env.storage().instance().set(&DataKey::NextCircleId, &next);
    extend_instance_ttl(env);
}

// --- Circle ---

pub fn get_circle(env: &Env, circle_id: u64) -> Option<Circle> {
    read_persistent(env, &DataKey::Circle(circle_id))
}

pub fn set_circle(env: &Env, circle: &Circle) {
    write_persistent(env, &DataKey::Circle(circle.id), circle);
}

// --- Membership ---

/// Member addresses in position order.
pub fn get_members(env: &Env, circle_id: u64) -> Vec<Address> {
    read_persistent(env, &DataKey::Members(circle_id)).unwrap_or(Vec::new(env))
}

pub fn set_members(env: &Env, circle_id: u64, members: &Vec<Address>) {
    write_persistent(env, &DataKey::Members(circle_id), members);
}

pub fn get_member(env: &Env, circle_id: u64, member: &Address) -> Option<MemberRecord> {
    read_persistent(env, &DataKey::Member(circle_id, member.clone()))
}

pub fn set_member(env: &Env, circle_id: u64, record: &MemberRecord) {
    write_persistent(env, &DataKey::Member(circle_id, record.address.clone()), record);
}

pub fn get_member_circles(env: &Env, member: &Address) -> Vec<u64> {
    read_persistent(env, &DataKey::MemberCircles(member.clone())).unwrap_or(Vec::new(env))
}

pub fn add_member_circle(env: &Env, member: &Address, circle_id: u64) {
    let mut circles = get_member_circles(env, member);
    circles.push_back(circle_id);
    write_persistent(env, &DataKey::MemberCircles(member.clone()), &circles);
}

// --- Scheduling ---

pub fn get_schedule(env: &Env, circle_id: u64) -> Vec<ScheduledCycle> {
    read_persistent(env, &DataKey::Schedule(circle_id)).unwrap_or(Vec::new(env))
}

pub fn set_schedule(env: &Env, circle_id: u64, schedule: &Vec<ScheduledCycle>) {
    write_persistent(env, &DataKey::Schedule(circle_id), schedule);
}

pub fn get_cycle(env: &Env, circle_id: u64, cycle_index: u32) -> Option<CycleRecord> {
    read_persistent(env, &DataKey::Cycle(circle_id, cycle_index))
}

pub fn set_cycle(env: &Env, circle_id: u64, record: &CycleRecord) {
    write_persistent(env, &DataKey::Cycle(circle_id, record.cycle_index), record);
}

// --- Managers ---

pub fn get_manager(env: &Env, owner: &Address) -> Option<ManagerProfile> {
    read_persistent(env, &DataKey::Manager(owner.clone()))
}

pub fn set_manager(env: &Env, profile: &ManagerProfile) {
    write_persistent(env, &DataKey::Manager(profile.owner.clone()), profile);
}

// --- TTL Management ---

fn read_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let result = env.storage().persistent().get(key);
    if result.is_some() {
        extend_persistent_ttl(env, key);
    }
    result
}

fn write_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    extend_persistent_ttl(env, key);
}

/// Keeps a running circle's entries, and the contract itself, live until
/// `until` plus the regular extension. Capped at the network maximum.
pub fn extend_circle_ttl(env: &Env, circle_id: u64, members: &Vec<Address>, until: u64) {
    let ledgers = ledgers_until(env, until);
    env.storage().instance().extend_ttl(ledgers, ledgers);

    let persistent = env.storage().persistent();
    persistent.extend_ttl(&DataKey::Circle(circle_id), ledgers, ledgers);
    persistent.extend_ttl(&DataKey::Members(circle_id), ledgers, ledgers);
    persistent.extend_ttl(&DataKey::Schedule(circle_id), ledgers, ledgers);
    for member in members.iter() {
        persistent.extend_ttl(&DataKey::Member(circle_id, member), ledgers, ledgers);
    }
}

fn ledgers_until(env: &Env, until: u64) -> u32 {
    let remaining = until.saturating_sub(env.ledger().timestamp()) / LEDGER_SECONDS;
    let wanted = remaining.saturating_add(PERSISTENT_TTL_EXTEND as u64);
    wanted.min(env.storage().max_ttl() as u64) as u32
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
