//! Request-boundary types and handlers.
//!
//! The HTTP layer proper (routing, session cookies) lives outside this
//! crate; this module defines the wire shapes it exchanges and the
//! error-to-status mapping it applies. `session` is the customer id the
//! cookie layer resolved, or `None` when the request carried no valid
//! session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::{Ledger, RedeemError};
use crate::model::{CustomerId, PointsTransaction};

/// Response body of the balance + history endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub current_points: u64,
    pub total_earned: u64,
    pub transactions: Vec<PointsTransaction>,
}

/// Request body of the redeem endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub reward_id: String,
}

/// Success response of the redeem endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemReceipt {
    pub message: String,
    pub current_points: u64,
}

/// Errors surfaced to the caller, each with an HTTP status equivalent.
/// None are fatal; all become a user-visible message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("{0}")]
    Redeem(#[from] RedeemError),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unauthenticated => 401,
            ApiError::Redeem(RedeemError::RewardNotFound(_)) => 404,
            ApiError::Redeem(RedeemError::InsufficientPoints { .. }) => 400,
            ApiError::Redeem(RedeemError::ConcurrentConflict(_)) => 409,
        }
    }
}

/// `GET` balance + history.
pub fn balance_report(
    ledger: &Ledger,
    session: Option<CustomerId>,
) -> Result<BalanceReport, ApiError> {
    let customer = session.ok_or(ApiError::Unauthenticated)?;
    let snapshot = ledger.balance(customer);

    Ok(BalanceReport {
        current_points: snapshot.current,
        total_earned: snapshot.total_earned,
        transactions: ledger.transactions(customer),
    })
}

/// `POST` redeem.
pub fn redeem(
    ledger: &Ledger,
    session: Option<CustomerId>,
    request: &RedeemRequest,
) -> Result<RedeemReceipt, ApiError> {
    let customer = session.ok_or(ApiError::Unauthenticated)?;
    let current_points = ledger.redeem(customer, &request.reward_id)?;

    Ok(RedeemReceipt {
        message: "Reward redeemed successfully".to_string(),
        current_points,
    })
}
