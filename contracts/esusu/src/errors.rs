use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    Unauthorized = 2,
    InvalidParameters = 3,
    NotFound = 4,
    InsufficientFunds = 5,
    CircleFull = 6,
    CircleNotAccepting = 7,
    AlreadyMember = 8,
    SchedulingFailed = 9,
    ManagerNotSetup = 10,
    CircleNotActive = 11,
    CycleOutOfOrder = 12,
    CycleNotDue = 13,
    InvalidPayload = 14,
    InvalidTransition = 15,
    NotMember = 16,
    NothingToClaim = 17,
}

impl ContractError {
    /// Decodes the numeric code carried in a failed invocation's result.
    pub fn from_code(code: u32) -> Option<Self> {
        let err = match code {
            1 => Self::NotInitialized,
            2 => Self::Unauthorized,
            3 => Self::InvalidParameters,
            4 => Self::NotFound,
            5 => Self::InsufficientFunds,
            6 => Self::CircleFull,
            7 => Self::CircleNotAccepting,
            8 => Self::AlreadyMember,
            9 => Self::SchedulingFailed,
            10 => Self::ManagerNotSetup,
            11 => Self::CircleNotActive,
            12 => Self::CycleOutOfOrder,
            13 => Self::CycleNotDue,
            14 => Self::InvalidPayload,
            15 => Self::InvalidTransition,
            16 => Self::NotMember,
            17 => Self::NothingToClaim,
            _ => return None,
        };
        Some(err)
    }
}
