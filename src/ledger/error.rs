//! Error types for ledger operations.

use thiserror::Error;

use crate::model::{CustomerId, RewardId};

/// Top-level error returned by [`Ledger::apply`](super::Ledger::apply).
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("earn failed: {0}")]
    Earn(#[from] EarnError),

    #[error("redemption failed: {0}")]
    Redeem(#[from] RedeemError),
}

/// Error during a point credit.
#[derive(Debug, Error)]
pub enum EarnError {
    #[error("zero-point credit for customer {0}")]
    ZeroPoints(CustomerId),
}

/// Error during a redemption.
#[derive(Debug, Error)]
pub enum RedeemError {
    /// Unknown id, or a listed reward that is not currently available.
    #[error("reward '{0}' not found")]
    RewardNotFound(RewardId),

    #[error(
        "insufficient points for customer {customer}: available {available}, required {required}"
    )]
    InsufficientPoints {
        customer: CustomerId,
        available: u64,
        required: u64,
    },

    /// The conditional decrement lost its retry as well; the balance is
    /// untouched and the caller may re-attempt.
    #[error("balance of customer {0} changed concurrently, redemption not applied")]
    ConcurrentConflict(CustomerId),
}
