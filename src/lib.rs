pub mod api;
pub mod catalog;
pub mod csv;
pub mod ledger;
pub mod model;
pub mod money;
pub mod tier;

pub use catalog::{Reward, RewardCatalog};
pub use ledger::Ledger;
pub use model::{CustomerId, LedgerEvent, PointsTransaction, TxnId};
pub use money::Money;
pub use tier::Tier;
