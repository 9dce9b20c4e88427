//! Client-side view of EsusuChain submissions.
//!
//! Decodes transaction status codes into a closed enum, tracks each
//! submission from request to terminal state under its own correlation id,
//! and turns contract failures into reasons a caller can act on.

pub mod error;
pub mod failure;
pub mod status;
pub mod submission;

pub use error::{ClientError, Result};
pub use failure::{FailureReason, Retry};
pub use status::TxStatus;
pub use submission::{Operation, RequestId, Submission, SubmissionState, SubmissionTracker};
