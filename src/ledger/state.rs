use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::{CustomerId, PointsTransaction};

/// Why a single conditional decrement attempt did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitFailure {
    /// Balance was below the requested amount at the time of the read.
    Insufficient { available: u64 },
    /// Balance changed between the read and the conditional write.
    Contended,
}

/// A customer's balance cell and transaction history.
///
/// Both counters are atomics so the redemption path can decrement with a
/// compare-and-swap instead of a read-then-write pair. The unsigned type
/// plus the conditional decrement keep `current` non-negative.
#[derive(Debug)]
pub struct Account {
    id: CustomerId,
    current: AtomicU64,
    total_earned: AtomicU64,
    history: Mutex<Vec<PointsTransaction>>,
}

impl Account {
    pub fn new(id: CustomerId) -> Self {
        Self {
            id,
            current: AtomicU64::new(0),
            total_earned: AtomicU64::new(0),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Spendable balance.
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    /// Lifetime earned counter, never decremented.
    pub fn total_earned(&self) -> u64 {
        self.total_earned.load(Ordering::Acquire)
    }

    /// Credit both counters. Lifetime is bumped first so no reader ever
    /// observes `current > total_earned`.
    pub fn credit(&self, points: u64) {
        self.total_earned.fetch_add(points, Ordering::AcqRel);
        self.current.fetch_add(points, Ordering::AcqRel);
    }

    /// One conditional decrement attempt: goes through only if the balance
    /// still equals `seen` and covers `points`. Returns the new balance.
    pub fn try_debit(&self, seen: u64, points: u64) -> Result<u64, DebitFailure> {
        if seen < points {
            return Err(DebitFailure::Insufficient { available: seen });
        }

        let target = seen - points;
        match self
            .current
            .compare_exchange(seen, target, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Ok(target),
            Err(_) => Err(DebitFailure::Contended),
        }
    }

    /// Append a transaction. Records are immutable once pushed.
    pub fn record(&self, txn: PointsTransaction) {
        self.history.lock().expect("history mutex poisoned").push(txn);
    }

    /// Transaction history, newest first.
    pub fn transactions(&self) -> Vec<PointsTransaction> {
        let mut txns = self.history.lock().expect("history mutex poisoned").clone();
        txns.reverse();
        txns
    }
}
