use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum SchedulerError {
    NotInitialized = 1,
    Unauthorized = 2,
    InvalidParameters = 3,
    InvalidTimestamp = 4,
    InsufficientFee = 5,
    TaskNotFound = 6,
    TaskNotPending = 7,
    NotDue = 8,
}
