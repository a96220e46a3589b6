//! Redeemable reward catalog.
//!
//! The catalog is read-only at runtime and injected into the ledger at
//! construction, so a deployment can swap the reward table (via
//! [`RewardCatalog::from_csv`]) without code changes. Unavailable entries
//! stay listed so the storefront can grey them out, but redemption always
//! rejects them.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::Money;
use crate::model::RewardId;

/// What redeeming a reward grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardKind {
    Discount,
    FreeDelivery,
    FreeItem,
    Cashback,
}

/// A single catalog entry.
#[derive(Debug, Clone)]
pub struct Reward {
    pub id: RewardId,
    pub name: String,
    pub description: String,
    /// Point cost to redeem.
    pub cost: u64,
    pub kind: RewardKind,
    /// Monetary value of the granted benefit.
    pub value: Money,
    pub available: bool,
}

/// Errors that can occur when loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Read(#[from] csv::Error),

    #[error("line {line}: unrecognized reward kind '{kind}'")]
    UnrecognizedKind { line: usize, kind: String },

    #[error("line {line}: duplicate reward id '{id}'")]
    DuplicateId { line: usize, id: String },
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    description: String,
    cost: u64,
    kind: String,
    value: f64,
    available: bool,
}

/// The reward table, in display order.
#[derive(Debug, Clone)]
pub struct RewardCatalog {
    rewards: Vec<Reward>,
}

impl RewardCatalog {
    pub fn new(rewards: Vec<Reward>) -> Self {
        Self { rewards }
    }

    /// The default reward table shipped with the storefront.
    pub fn builtin() -> Self {
        let reward = |id: &str, name: &str, description: &str, cost, kind, value, available| Reward {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            cost,
            kind,
            value: Money::from_float(value),
            available,
        };

        Self::new(vec![
            reward(
                "1",
                "Free delivery",
                "Free delivery on your next order",
                100,
                RewardKind::FreeDelivery,
                25.0,
                true,
            ),
            reward(
                "2",
                "10% discount",
                "10% off your next order",
                200,
                RewardKind::Discount,
                10.0,
                true,
            ),
            reward(
                "3",
                "Free pizza",
                "Free Margherita pizza",
                400,
                RewardKind::FreeItem,
                129.0,
                true,
            ),
            reward(
                "4",
                "50 DH cashback",
                "50 DH credited back to your account",
                500,
                RewardKind::Cashback,
                50.0,
                true,
            ),
            reward(
                "5",
                "20% discount",
                "20% off your next order",
                600,
                RewardKind::Discount,
                20.0,
                false,
            ),
        ])
    }

    /// Load a replacement reward table from a csv file with columns
    /// `id,name,description,cost,kind,value,available`.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut rewards: Vec<Reward> = Vec::new();
        for (idx, result) in reader.into_deserialize::<CatalogRow>().enumerate() {
            let line = idx + 2; // 1-indexed, skip header
            let row = result?;

            let kind = match row.kind.as_str() {
                "discount" => RewardKind::Discount,
                "free_delivery" => RewardKind::FreeDelivery,
                "free_item" => RewardKind::FreeItem,
                "cashback" => RewardKind::Cashback,
                other => {
                    return Err(CatalogError::UnrecognizedKind {
                        line,
                        kind: other.to_string(),
                    });
                }
            };

            if rewards.iter().any(|r| r.id == row.id) {
                return Err(CatalogError::DuplicateId { line, id: row.id });
            }

            rewards.push(Reward {
                id: row.id,
                name: row.name,
                description: row.description,
                cost: row.cost,
                kind,
                value: Money::from_float(row.value),
                available: row.available,
            });
        }

        Ok(Self::new(rewards))
    }

    /// Look up a reward by id, available or not.
    pub fn get(&self, id: &str) -> Option<&Reward> {
        self.rewards.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reward> + '_ {
        self.rewards.iter()
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}
