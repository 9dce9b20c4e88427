use thiserror::Error;

use crate::submission::RequestId;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("unknown transaction status code: {0}")]
    UnknownStatus(u8),

    #[error("unknown request: {0}")]
    UnknownRequest(RequestId),

    #[error("request {id} cannot accept {event} while {state}")]
    InvalidTransition {
        id: RequestId,
        state: &'static str,
        event: &'static str,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
