//! # splitledger
//!
//! Balance and debt-simplification engine for shared group expenses.
//!
//! Given a group's members, the expenses they split and the payments they
//! made to each other, the engine computes every member's net position and
//! reduces the web of debts to a short list of "who pays whom" transfers.
//! Every call is a pure function of the records passed in.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: members, expenses, settlements, config, errors
//! - **balance** — Folds expenses and settlements into per-member balances
//! - **optimization** — Greedy debt simplification and the combined group report
//! - **simulation** — Random group generation for testing and benchmarks

pub mod balance;
pub mod core;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::balance::aggregator::{compute_balances, Balance, BalanceStatus};
    pub use crate::core::config::EngineConfig;
    pub use crate::core::error::{LedgerError, LedgerResult};
    pub use crate::core::expense::{total_spent, ExpenseRecord, SplitEntry};
    pub use crate::core::member::{Member, MemberId};
    pub use crate::core::settlement::SettlementRecord;
    pub use crate::core::snapshot::GroupSnapshot;
    pub use crate::optimization::report::{compute_group_debts, GroupDebts, SettlementEngine};
    pub use crate::optimization::simplify::{simplify_debts, DebtPair};
}
