use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Lifecycle of a submitted transaction as reported by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TxStatus {
    Unknown,
    Pending,
    Finalized,
    Executed,
    Sealed,
    Expired,
}

impl TxStatus {
    /// No further updates follow a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, TxStatus::Sealed | TxStatus::Expired)
    }
}

impl TryFrom<u8> for TxStatus {
    type Error = ClientError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TxStatus::Unknown),
            1 => Ok(TxStatus::Pending),
            2 => Ok(TxStatus::Finalized),
            3 => Ok(TxStatus::Executed),
            4 => Ok(TxStatus::Sealed),
            5 => Ok(TxStatus::Expired),
            other => Err(ClientError::UnknownStatus(other)),
        }
    }
}

impl From<TxStatus> for u8 {
    fn from(status: TxStatus) -> u8 {
        match status {
            TxStatus::Unknown => 0,
            TxStatus::Pending => 1,
            TxStatus::Finalized => 2,
            TxStatus::Executed => 3,
            TxStatus::Sealed => 4,
            TxStatus::Expired => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_codes() {
        assert_eq!(TxStatus::try_from(4).unwrap(), TxStatus::Sealed);
        assert!(TxStatus::try_from(5).unwrap().is_terminal());
        assert!(!TxStatus::try_from(3).unwrap().is_terminal());
        assert!(matches!(
            TxStatus::try_from(9),
            Err(ClientError::UnknownStatus(9))
        ));
    }

    #[test]
    fn test_wire_format_is_numeric() {
        assert_eq!(serde_json::to_string(&TxStatus::Finalized).unwrap(), "2");
        let status: TxStatus = serde_json::from_str("1").unwrap();
        assert_eq!(status, TxStatus::Pending);
        assert!(serde_json::from_str::<TxStatus>("\"Sealed\"").is_err());
    }
}
