//! Core domain types for the loyalty ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Customer identifier.
pub type CustomerId = u64;

/// Ledger transaction identifier.
pub type TxnId = u64;

/// Order identifier, attached to credits triggered by order completion.
pub type OrderId = u64;

/// Reward catalog identifier.
pub type RewardId = String;

/// Direction of a ledger transaction. The point count is always a positive
/// magnitude; the kind carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Earned,
    Redeemed,
}

/// Immutable record of a single earn or redeem event.
///
/// Serializes with the field names the storefront client reads.
#[derive(Debug, Clone, Serialize)]
pub struct PointsTransaction {
    pub id: TxnId,
    #[serde(rename = "customerId")]
    pub customer: CustomerId,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    pub points: u64,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "orderId", skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderId>,
}

/// An event representing the possible inputs of the ledger.
#[derive(Debug, Clone)]
pub enum LedgerEvent {
    /// Credit points to a customer's balance and lifetime counter.
    Earn {
        customer: CustomerId,
        points: u64,
        description: String,
        order: Option<OrderId>,
    },
    /// Exchange points for a catalog reward.
    Redeem {
        customer: CustomerId,
        reward: RewardId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txn_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TxnKind::Earned).unwrap(), "\"earned\"");
        assert_eq!(
            serde_json::to_string(&TxnKind::Redeemed).unwrap(),
            "\"redeemed\""
        );
    }

    #[test]
    fn transaction_wire_shape() {
        let txn = PointsTransaction {
            id: 7,
            customer: 42,
            kind: TxnKind::Earned,
            points: 48,
            description: "Order #1001".to_string(),
            date: Utc::now(),
            order: Some(1001),
        };

        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["customerId"], 42);
        assert_eq!(value["type"], "earned");
        assert_eq!(value["points"], 48);
        assert_eq!(value["orderId"], 1001);
        assert!(value["date"].is_string());
    }

    #[test]
    fn transaction_without_order_omits_field() {
        let txn = PointsTransaction {
            id: 8,
            customer: 42,
            kind: TxnKind::Redeemed,
            points: 100,
            description: "Redeemed: Free delivery".to_string(),
            date: Utc::now(),
            order: None,
        };

        let value = serde_json::to_value(&txn).unwrap();
        assert!(value.get("orderId").is_none());
    }
}
