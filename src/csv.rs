use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::Tier;
use crate::model::{CustomerId, LedgerEvent, OrderId, RewardId};

/// Errors that can occur when parsing csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized event type '{event_type}'")]
    UnrecognizedType { line: usize, event_type: String },

    #[error("line {line}: {event_type} missing {field}")]
    MissingField {
        line: usize,
        event_type: String,
        field: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    r#type: String,
    customer: CustomerId,
    points: Option<u64>,
    description: Option<String>,
    order: Option<OrderId>,
    reward: Option<RewardId>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    customer: CustomerId,
    current: u64,
    total_earned: u64,
    tier: String,
}

/// Read ledger events from a csv file
pub fn read_events(path: impl AsRef<Path>) -> impl Iterator<Item = Result<LedgerEvent, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .expect("failed to open csv file");

    reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            match row.r#type.as_str() {
                "earn" => {
                    let points = row.points.ok_or_else(|| CsvError::MissingField {
                        line,
                        event_type: "earn".to_string(),
                        field: "points",
                    })?;
                    Ok(LedgerEvent::Earn {
                        customer: row.customer,
                        points,
                        description: row.description.unwrap_or_default(),
                        order: row.order,
                    })
                }
                "redeem" => {
                    let reward = row.reward.ok_or_else(|| CsvError::MissingField {
                        line,
                        event_type: "redeem".to_string(),
                        field: "reward",
                    })?;
                    Ok(LedgerEvent::Redeem {
                        customer: row.customer,
                        reward,
                    })
                }
                other => Err(CsvError::UnrecognizedType {
                    line,
                    event_type: other.to_string(),
                }),
            }
        })
}

/// write customer balances to stdout in csv format
pub fn write_balances(balances: impl IntoIterator<Item = (CustomerId, u64, u64, Tier)>) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    for (customer, current, total_earned, tier) in balances {
        let row = OutputRow {
            customer,
            current,
            total_earned,
            tier: tier.to_string(),
        };
        writer.serialize(&row).expect("failed to write csv row");
    }

    writer.flush().expect("failed to flush csv writer");
}
