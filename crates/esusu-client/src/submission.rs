use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::failure::FailureReason;
use crate::status::TxStatus;

/// Correlates a request with the updates that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// The contract call a request stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    SetupManager,
    CreateCircle {
        number_of_members: u32,
        contribution_amount: i128,
        cycle_duration: u64,
    },
    JoinCircle {
        circle_id: u64,
    },
    CancelCircle {
        circle_id: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionState {
    /// Built but not yet handed to the network.
    Idle,
    Submitted {
        tx_id: String,
        last_status: TxStatus,
    },
    Sealed {
        tx_id: String,
    },
    Failed {
        tx_id: Option<String>,
        reason: FailureReason,
    },
}

impl SubmissionState {
    fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitted { .. } => "submitted",
            SubmissionState::Sealed { .. } => "sealed",
            SubmissionState::Failed { .. } => "failed",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            SubmissionState::Sealed { .. } | SubmissionState::Failed { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: RequestId,
    pub operation: Operation,
    pub state: SubmissionState,
}

/// Every request the client has made and where each one stands.
///
/// Serialisable so a host can persist it and resume after a reload; what is
/// in flight is always derived from the tracked states.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SubmissionTracker {
    next_id: u64,
    submissions: BTreeMap<u64, Submission>,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, operation: Operation) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        debug!(%id, ?operation, "request created");
        self.submissions.insert(
            id.0,
            Submission {
                id,
                operation,
                state: SubmissionState::Idle,
            },
        );
        id
    }

    /// The network accepted the request under `tx_id`.
    pub fn submitted(&mut self, id: RequestId, tx_id: impl Into<String>) -> Result<()> {
        let submission = self.entry(id)?;
        if submission.state != SubmissionState::Idle {
            return Err(invalid(id, &submission.state, "submission"));
        }
        let tx_id = tx_id.into();
        info!(%id, %tx_id, "request submitted");
        submission.state = SubmissionState::Submitted {
            tx_id,
            last_status: TxStatus::Unknown,
        };
        Ok(())
    }

    /// The request never reached the network, e.g. the wallet declined it.
    pub fn rejected(&mut self, id: RequestId, reason: FailureReason) -> Result<()> {
        let submission = self.entry(id)?;
        if submission.state != SubmissionState::Idle {
            return Err(invalid(id, &submission.state, "rejection"));
        }
        warn!(%id, %reason, "request rejected before submission");
        submission.state = SubmissionState::Failed {
            tx_id: None,
            reason,
        };
        Ok(())
    }

    /// Applies a status update. A sealed transaction carrying a non-empty
    /// error message is a failure, as is expiry.
    pub fn observe(
        &mut self,
        id: RequestId,
        status: TxStatus,
        error_message: Option<&str>,
    ) -> Result<&SubmissionState> {
        let submission = self.entry(id)?;
        let tx_id = match &submission.state {
            SubmissionState::Submitted { tx_id, .. } => tx_id.clone(),
            other => return Err(invalid(id, other, "status update")),
        };

        submission.state = match (status, error_message.filter(|m| !m.trim().is_empty())) {
            (TxStatus::Sealed, Some(message)) => {
                let reason = FailureReason::from_error_message(message);
                warn!(%id, %tx_id, %reason, "transaction sealed with error");
                SubmissionState::Failed {
                    tx_id: Some(tx_id),
                    reason,
                }
            }
            (TxStatus::Sealed, None) => {
                info!(%id, %tx_id, "transaction sealed");
                SubmissionState::Sealed { tx_id }
            }
            (TxStatus::Expired, _) => {
                warn!(%id, %tx_id, "transaction expired");
                SubmissionState::Failed {
                    tx_id: Some(tx_id),
                    reason: FailureReason::Expired,
                }
            }
            (status, _) => {
                debug!(%id, %tx_id, ?status, "status update");
                SubmissionState::Submitted {
                    tx_id,
                    last_status: status,
                }
            }
        };
        Ok(&submission.state)
    }

    pub fn get(&self, id: RequestId) -> Option<&Submission> {
        self.submissions.get(&id.0)
    }

    /// Requests handed to the network and not yet finished.
    pub fn in_flight(&self) -> impl Iterator<Item = &Submission> {
        self.submissions
            .values()
            .filter(|s| matches!(s.state, SubmissionState::Submitted { .. }))
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight().next().is_some()
    }

    /// Drops finished requests, returning how many were removed.
    pub fn prune_finished(&mut self) -> usize {
        let before = self.submissions.len();
        self.submissions.retain(|_, s| !s.state.is_finished());
        before - self.submissions.len()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn entry(&mut self, id: RequestId) -> Result<&mut Submission> {
        self.submissions
            .get_mut(&id.0)
            .ok_or(ClientError::UnknownRequest(id))
    }
}

fn invalid(id: RequestId, state: &SubmissionState, event: &'static str) -> ClientError {
    ClientError::InvalidTransition {
        id,
        state: state.name(),
        event,
    }
}
