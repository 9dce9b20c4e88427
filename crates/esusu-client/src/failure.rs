use std::fmt;

use esusu::ContractError;
use serde::{Deserialize, Serialize};

/// What the caller can usefully do after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retry {
    /// Raise the balance or allowance, then submit again.
    WithMoreFunds,
    /// The same request may succeed later.
    Later,
    /// The request cannot succeed as made.
    Never,
}

/// Why a submission failed, in terms a user can act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    InsufficientFunds,
    CircleFull,
    CircleNotAccepting,
    AlreadyMember,
    SchedulingFailed,
    InvalidParameters,
    NotFound,
    ManagerNotSetup,
    Unauthorized,
    /// Any other contract error, by code.
    Contract(u32),
    /// The network dropped the transaction before sealing it.
    Expired,
    /// The wallet refused to sign.
    Declined,
    Other(String),
}

const CONTRACT_ERROR_MARKER: &str = "Error(Contract, #";

impl FailureReason {
    /// Classifies the error message attached to a sealed transaction.
    pub fn from_error_message(message: &str) -> Self {
        if let Some(code) = contract_code(message) {
            return match ContractError::from_code(code) {
                Some(err) => err.into(),
                None => FailureReason::Contract(code),
            };
        }
        let lowered = message.to_ascii_lowercase();
        if lowered.contains("declined") || lowered.contains("rejected") {
            return FailureReason::Declined;
        }
        FailureReason::Other(message.to_string())
    }

    pub fn retry(&self) -> Retry {
        match self {
            FailureReason::InsufficientFunds => Retry::WithMoreFunds,
            FailureReason::SchedulingFailed
            | FailureReason::Expired
            | FailureReason::Declined
            | FailureReason::Other(_) => Retry::Later,
            FailureReason::CircleFull
            | FailureReason::CircleNotAccepting
            | FailureReason::AlreadyMember
            | FailureReason::InvalidParameters
            | FailureReason::NotFound
            | FailureReason::ManagerNotSetup
            | FailureReason::Unauthorized
            | FailureReason::Contract(_) => Retry::Never,
        }
    }
}

impl From<ContractError> for FailureReason {
    fn from(err: ContractError) -> Self {
        match err {
            ContractError::InsufficientFunds => FailureReason::InsufficientFunds,
            ContractError::CircleFull => FailureReason::CircleFull,
            ContractError::CircleNotAccepting => FailureReason::CircleNotAccepting,
            ContractError::AlreadyMember => FailureReason::AlreadyMember,
            ContractError::SchedulingFailed => FailureReason::SchedulingFailed,
            ContractError::InvalidParameters => FailureReason::InvalidParameters,
            ContractError::NotFound => FailureReason::NotFound,
            ContractError::ManagerNotSetup => FailureReason::ManagerNotSetup,
            ContractError::Unauthorized => FailureReason::Unauthorized,
            other => FailureReason::Contract(other as u32),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::InsufficientFunds => {
                write!(f, "your balance or approved amount does not cover every cycle")
            }
            FailureReason::CircleFull => write!(f, "this circle is already full"),
            FailureReason::CircleNotAccepting => {
                write!(f, "this circle is no longer accepting members")
            }
            FailureReason::AlreadyMember => write!(f, "you are already a member of this circle"),
            FailureReason::SchedulingFailed => {
                write!(f, "automated payouts could not be scheduled; try again later")
            }
            FailureReason::InvalidParameters => write!(f, "invalid circle parameters"),
            FailureReason::NotFound => write!(f, "circle not found"),
            FailureReason::ManagerNotSetup => write!(f, "account setup is required first"),
            FailureReason::Unauthorized => write!(f, "not permitted for this account"),
            FailureReason::Contract(code) => write!(f, "contract error #{code}"),
            FailureReason::Expired => write!(f, "transaction expired before it was sealed"),
            FailureReason::Declined => write!(f, "transaction was declined in the wallet"),
            FailureReason::Other(message) => write!(f, "{message}"),
        }
    }
}

fn contract_code(message: &str) -> Option<u32> {
    let start = message.find(CONTRACT_ERROR_MARKER)? + CONTRACT_ERROR_MARKER.len();
    let digits: String = message[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
