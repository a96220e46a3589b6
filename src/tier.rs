//! Loyalty levels derived from lifetime earned points.
//!
//! Levels never regress: they are a function of the lifetime counter, not
//! the spendable balance, so redeeming points cannot demote a customer.

use std::fmt;

use crate::Money;

/// Customer loyalty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// Unlock thresholds in lifetime earned points, ascending.
    const LEVELS: [(Tier, u64); 4] = [
        (Tier::Bronze, 0),
        (Tier::Silver, 500),
        (Tier::Gold, 1500),
        (Tier::Platinum, 3000),
    ];

    /// The level unlocked by the given lifetime earned count.
    pub fn for_lifetime(total_earned: u64) -> Tier {
        Self::LEVELS
            .iter()
            .rev()
            .find(|(_, min)| total_earned >= *min)
            .map(|(tier, _)| *tier)
            .unwrap_or(Tier::Bronze)
    }

    /// Earn multiplier in half-point units, so the x1.5 level stays in
    /// integer arithmetic (x1 = 2, x1.5 = 3, x2 = 4, x3 = 6).
    pub fn multiplier_halves(self) -> u64 {
        match self {
            Tier::Bronze => 2,
            Tier::Silver => 3,
            Tier::Gold => 4,
            Tier::Platinum => 6,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Bronze => "bronze",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
        };
        write!(f, "{name}")
    }
}

/// Points credited for an order subtotal at the given level: one point per
/// ten whole currency units, scaled by the level multiplier, truncating.
pub fn points_for_spend(subtotal: Money, tier: Tier) -> u64 {
    let base = (subtotal.whole_units().max(0) as u64) / 10;
    base * tier.multiplier_halves() / 2
}
