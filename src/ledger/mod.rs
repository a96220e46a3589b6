//! Loyalty points ledger engine.
//!
//! The ledger maintains per-customer balances, the lifetime earned counter,
//! and the append-only transaction history. Redemption resolves a reward
//! against the injected catalog and decrements the balance with an atomic
//! conditional update, never a separate read then write.
//! Also supports async stream of events.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::catalog::RewardCatalog;
use crate::model::{CustomerId, LedgerEvent, OrderId, PointsTransaction, TxnId, TxnKind};

mod state;
pub use state::{Account, DebitFailure};

mod error;
pub use error::{EarnError, LedgerError, RedeemError};

/// A customer's balance pair as returned by read and earn operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BalanceSnapshot {
    pub current: u64,
    pub total_earned: u64,
}

/// The loyalty points ledger.
///
/// All operations take `&self`; the ledger is shared behind an `Arc` by
/// concurrent request handlers.
pub struct Ledger {
    catalog: RewardCatalog,
    accounts: RwLock<HashMap<CustomerId, Arc<Account>>>,
    next_txn: AtomicU64,
}

/// Public API
impl Ledger {
    pub fn new(catalog: RewardCatalog) -> Self {
        Self {
            catalog,
            accounts: RwLock::new(HashMap::new()),
            next_txn: AtomicU64::new(1),
        }
    }

    pub fn catalog(&self) -> &RewardCatalog {
        &self.catalog
    }

    /// Run the ledger over the given event stream
    pub async fn run(&self, mut stream: impl Stream<Item = LedgerEvent> + Unpin) {
        while let Some(event) = stream.next().await {
            // a rejected event must not stop ingestion
            let _ = self.apply(event);
        }
    }

    /// Return the state of all customer accounts.
    pub fn accounts(&self) -> Vec<Arc<Account>> {
        self.accounts
            .read()
            .expect("accounts lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    /// A customer's balance pair; an absent account reads as zero.
    pub fn balance(&self, customer: CustomerId) -> BalanceSnapshot {
        match self.account(customer) {
            Some(account) => BalanceSnapshot {
                current: account.current(),
                total_earned: account.total_earned(),
            },
            None => BalanceSnapshot::default(),
        }
    }

    /// A customer's transaction history, newest first; an absent account
    /// reads as empty.
    pub fn transactions(&self, customer: CustomerId) -> Vec<PointsTransaction> {
        self.account(customer)
            .map(|account| account.transactions())
            .unwrap_or_default()
    }

    /// Apply a single event on top of the current ledger state
    pub fn apply(&self, event: LedgerEvent) -> Result<(), LedgerError> {
        match event {
            LedgerEvent::Earn {
                customer,
                points,
                description,
                order,
            } => {
                let result = self.earn(customer, points, &description, order);
                match &result {
                    Ok(snapshot) => {
                        info!(customer, points, balance = snapshot.current, "earn applied");
                    }
                    Err(e) => info!(customer, points, reason = %e, "earn skipped"),
                }
                result?;
            }
            LedgerEvent::Redeem { customer, reward } => {
                let result = self.redeem(customer, &reward);
                match &result {
                    Ok(balance) => {
                        info!(customer, reward = %reward, balance, "redemption applied");
                    }
                    Err(e) => info!(customer, reward = %reward, reason = %e, "redemption skipped"),
                }
                result?;
            }
        }
        Ok(())
    }

    /// Credit points to a customer:
    /// - Reject a zero-point credit
    /// - Create the account on first use
    /// - Increment lifetime and spendable counters
    /// - Append an `earned` transaction
    pub fn earn(
        &self,
        customer: CustomerId,
        points: u64,
        description: &str,
        order: Option<OrderId>,
    ) -> Result<BalanceSnapshot, EarnError> {
        if points == 0 {
            return Err(EarnError::ZeroPoints(customer));
        }

        let account = self.account_or_create(customer);
        account.credit(points);

        account.record(PointsTransaction {
            id: self.next_txn_id(),
            customer,
            kind: TxnKind::Earned,
            points,
            description: description.to_string(),
            date: Utc::now(),
            order,
        });

        Ok(BalanceSnapshot {
            current: account.current(),
            total_earned: account.total_earned(),
        })
    }

    /// Redeem a catalog reward and return the updated spendable balance:
    /// - Resolve the reward; unknown or unavailable ids are not found
    /// - Decrement the balance by the cost with a conditional update,
    ///   re-reading and re-attempting once after a lost race
    /// - Append a `redeemed` transaction naming the reward
    pub fn redeem(&self, customer: CustomerId, reward_id: &str) -> Result<u64, RedeemError> {
        let reward = self
            .catalog
            .get(reward_id)
            .filter(|r| r.available)
            .ok_or_else(|| RedeemError::RewardNotFound(reward_id.to_string()))?;

        // No account means a zero balance, which no positive cost covers.
        let account = self
            .account(customer)
            .ok_or(RedeemError::InsufficientPoints {
                customer,
                available: 0,
                required: reward.cost,
            })?;

        const ATTEMPTS: u32 = 2; // one retry after a lost race
        let mut balance = None;
        for _ in 0..ATTEMPTS {
            let seen = account.current();
            match account.try_debit(seen, reward.cost) {
                Ok(updated) => {
                    balance = Some(updated);
                    break;
                }
                Err(DebitFailure::Insufficient { available }) => {
                    return Err(RedeemError::InsufficientPoints {
                        customer,
                        available,
                        required: reward.cost,
                    });
                }
                Err(DebitFailure::Contended) => continue,
            }
        }
        let balance = balance.ok_or(RedeemError::ConcurrentConflict(customer))?;

        account.record(PointsTransaction {
            id: self.next_txn_id(),
            customer,
            kind: TxnKind::Redeemed,
            points: reward.cost,
            description: format!("Redeemed: {}", reward.name),
            date: Utc::now(),
            order: None,
        });

        Ok(balance)
    }
}

/// Private API
impl Ledger {
    fn account(&self, customer: CustomerId) -> Option<Arc<Account>> {
        self.accounts
            .read()
            .expect("accounts lock poisoned")
            .get(&customer)
            .cloned()
    }

    fn account_or_create(&self, customer: CustomerId) -> Arc<Account> {
        if let Some(account) = self.account(customer) {
            return account;
        }

        let mut accounts = self.accounts.write().expect("accounts lock poisoned");
        Arc::clone(
            accounts
                .entry(customer)
                .or_insert_with(|| Arc::new(Account::new(customer))),
        )
    }

    fn next_txn_id(&self) -> TxnId {
        self.next_txn.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(RewardCatalog::builtin())
    }
}
