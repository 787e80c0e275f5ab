//! Error types for quoting and recording.

use thiserror::Error;

use crate::Amount;
use crate::validate::MAX_CARS;
use crate::policy::RecordError;

/// Top-level error returned by the [`Engine`](super::Engine).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid customer: {0}")]
    Customer(#[from] CustomerError),

    #[error("policy not recorded: {0}")]
    Record(#[from] RecordError),
}

/// A customer record that breaks an invariant the console would enforce.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomerError {
    #[error("down payment {0} is negative")]
    NegativeDownPayment(Amount),

    #[error("{0} cars exceeds the limit of {MAX_CARS}")]
    TooManyCars(u32),

    #[error("claim {0} has negative amount {1}")]
    NegativeClaimAmount(String, Amount),
}
