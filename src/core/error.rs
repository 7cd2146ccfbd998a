use crate::core::member::MemberId;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the balance and simplification engine.
///
/// Every variant except `InvalidConfig` means the caller handed over an
/// inconsistent or malformed snapshot. The engine never guesses a fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("{context} references member {member} which is not in the group")]
    UnknownMember { context: String, member: MemberId },
    #[error("member {0} is listed more than once in the group")]
    DuplicateMember(MemberId),
    #[error("expense {expense} has splits totalling {split_total}, expected {amount}")]
    SplitMismatch {
        expense: Uuid,
        amount: Decimal,
        split_total: Decimal,
    },
    #[error("expense {expense} has no split entries")]
    EmptySplit { expense: Uuid },
    #[error("{context} amount must be positive, got {amount}")]
    NonPositiveAmount { context: String, amount: Decimal },
    #[error("expense {expense} assigns a negative share {amount} to {member}")]
    NegativeSplit {
        expense: Uuid,
        member: MemberId,
        amount: Decimal,
    },
    #[error("settlement from {member} to themselves")]
    SelfSettlement { member: MemberId },
    #[error("settlement of {amount} exceeds the outstanding debt of {outstanding}")]
    SettlementExceedsDebt {
        amount: Decimal,
        outstanding: Decimal,
    },
    #[error("{context} pushes a running total outside the representable range")]
    AmountOverflow { context: String },
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl LedgerError {
    /// True for faults caused by an inconsistent member snapshot.
    pub fn is_integrity_fault(&self) -> bool {
        matches!(
            self,
            LedgerError::UnknownMember { .. } | LedgerError::DuplicateMember(_)
        )
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
