use crate::core::error::{LedgerError, LedgerResult};
use crate::core::member::MemberId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One member's share of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitEntry {
    pub member: MemberId,
    pub amount: Decimal,
}

impl SplitEntry {
    pub fn new(member: impl Into<MemberId>, amount: Decimal) -> Self {
        Self {
            member: member.into(),
            amount,
        }
    }
}

/// An expense fronted by one member and split across several.
///
/// Split amounts arrive already resolved: whether the group chose an equal,
/// exact or percentage split is decided before the record reaches the
/// engine. Records are immutable once created.
///
/// # Examples
///
/// ```
/// use splitledger::core::expense::{ExpenseRecord, SplitEntry};
/// use rust_decimal_macros::dec;
///
/// let dinner = ExpenseRecord::new(
///     "alice",
///     dec!(30.00),
///     vec![
///         SplitEntry::new("alice", dec!(10.00)),
///         SplitEntry::new("bob", dec!(10.00)),
///         SplitEntry::new("carol", dec!(10.00)),
///     ],
/// );
/// assert_eq!(dinner.split_total(), dec!(30.00));
/// assert_eq!(dinner.payer_share(), dec!(10.00));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    paid_by: MemberId,
    amount: Decimal,
    splits: Vec<SplitEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl ExpenseRecord {
    /// Create a new expense. Validation is deferred to aggregation.
    pub fn new(paid_by: impl Into<MemberId>, amount: Decimal, splits: Vec<SplitEntry>) -> Self {
        Self::with_id(Uuid::new_v4(), paid_by, amount, splits)
    }

    /// Create an expense under an id assigned by the caller's store.
    pub fn with_id(
        id: Uuid,
        paid_by: impl Into<MemberId>,
        amount: Decimal,
        splits: Vec<SplitEntry>,
    ) -> Self {
        Self {
            id,
            paid_by: paid_by.into(),
            amount,
            splits,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn paid_by(&self) -> &MemberId {
        &self.paid_by
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn splits(&self) -> &[SplitEntry] {
        &self.splits
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sum of all split entries.
    ///
    /// Panics if the shares overflow `Decimal`; `validate` reports that case
    /// as `AmountOverflow` instead, so call it first on untrusted records.
    pub fn split_total(&self) -> Decimal {
        self.splits.iter().map(|s| s.amount).sum()
    }

    /// Total share attributed to `member`; repeated entries are summed.
    pub fn share_of(&self, member: &MemberId) -> Decimal {
        self.splits
            .iter()
            .filter(|s| &s.member == member)
            .map(|s| s.amount)
            .sum()
    }

    /// The payer's own share of this expense.
    pub fn payer_share(&self) -> Decimal {
        self.share_of(&self.paid_by)
    }

    /// Check amount, split shape and split total. Membership is checked by
    /// the aggregator, which owns the member snapshot.
    pub fn validate(&self, tolerance: Decimal) -> LedgerResult<()> {
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount {
                context: format!("expense {}", self.id),
                amount: self.amount,
            });
        }
        if self.splits.is_empty() {
            return Err(LedgerError::EmptySplit { expense: self.id });
        }
        if let Some(split) = self.splits.iter().find(|s| s.amount < Decimal::ZERO) {
            return Err(LedgerError::NegativeSplit {
                expense: self.id,
                member: split.member.clone(),
                amount: split.amount,
            });
        }
        let split_total = self
            .splits
            .iter()
            .try_fold(Decimal::ZERO, |total, s| total.checked_add(s.amount))
            .ok_or_else(|| LedgerError::AmountOverflow {
                context: format!("expense {}", self.id),
            })?;
        if (split_total - self.amount).abs() > tolerance {
            return Err(LedgerError::SplitMismatch {
                expense: self.id,
                amount: self.amount,
                split_total,
            });
        }
        Ok(())
    }
}

/// Total spent by the group across `expenses`.
pub fn total_spent(expenses: &[ExpenseRecord]) -> LedgerResult<Decimal> {
    expenses.iter().try_fold(Decimal::ZERO, |total, e| {
        total
            .checked_add(e.amount())
            .ok_or_else(|| LedgerError::AmountOverflow {
                context: "group spend total".to_string(),
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn dinner() -> ExpenseRecord {
        ExpenseRecord::new(
            "A",
            dec!(30),
            vec![
                SplitEntry::new("A", dec!(10)),
                SplitEntry::new("B", dec!(10)),
                SplitEntry::new("C", dec!(10)),
            ],
        )
    }

    #[test]
    fn test_expense_accessors() {
        let expense = dinner().with_description("Dinner");
        assert_eq!(expense.paid_by().as_str(), "A");
        assert_eq!(expense.amount(), dec!(30));
        assert_eq!(expense.splits().len(), 3);
        assert_eq!(expense.description(), Some("Dinner"));
        assert_eq!(expense.payer_share(), dec!(10));
        assert_eq!(expense.share_of(&MemberId::new("D")), Decimal::ZERO);
    }

    #[test]
    fn test_repeated_split_entries_sum() {
        let expense = ExpenseRecord::new(
            "A",
            dec!(10),
            vec![
                SplitEntry::new("B", dec!(4)),
                SplitEntry::new("B", dec!(6)),
            ],
        );
        assert_eq!(expense.share_of(&MemberId::new("B")), dec!(10));
        assert!(expense.validate(dec!(0.01)).is_ok());
    }

    #[test]
    fn test_three_way_rounding_within_tolerance() {
        let expense = ExpenseRecord::new(
            "A",
            dec!(10),
            vec![
                SplitEntry::new("A", dec!(3.33)),
                SplitEntry::new("B", dec!(3.33)),
                SplitEntry::new("C", dec!(3.33)),
            ],
        );
        assert!(expense.validate(dec!(0.01)).is_ok());
    }

    #[test]
    fn test_split_mismatch() {
        let expense = ExpenseRecord::new(
            "A",
            dec!(30),
            vec![SplitEntry::new("A", dec!(10)), SplitEntry::new("B", dec!(10))],
        );
        match expense.validate(dec!(0.01)) {
            Err(LedgerError::SplitMismatch {
                amount,
                split_total,
                ..
            }) => {
                assert_eq!(amount, dec!(30));
                assert_eq!(split_total, dec!(20));
            }
            other => panic!("expected split mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_shapes() {
        let zero = ExpenseRecord::new("A", dec!(0), vec![SplitEntry::new("A", dec!(0))]);
        assert!(matches!(
            zero.validate(dec!(0.01)),
            Err(LedgerError::NonPositiveAmount { .. })
        ));

        let empty = ExpenseRecord::new("A", dec!(5), vec![]);
        assert!(matches!(
            empty.validate(dec!(0.01)),
            Err(LedgerError::EmptySplit { .. })
        ));

        let negative = ExpenseRecord::new(
            "A",
            dec!(5),
            vec![SplitEntry::new("A", dec!(10)), SplitEntry::new("B", dec!(-5))],
        );
        assert!(matches!(
            negative.validate(dec!(0.01)),
            Err(LedgerError::NegativeSplit { .. })
        ));
    }

    #[test]
    fn test_total_spent() {
        assert_eq!(total_spent(&[]), Ok(Decimal::ZERO));
        assert_eq!(total_spent(&[dinner(), dinner()]), Ok(dec!(60)));

        let huge = ExpenseRecord::new("A", Decimal::MAX, vec![SplitEntry::new("A", Decimal::MAX)]);
        assert!(matches!(
            total_spent(&[huge.clone(), huge]),
            Err(LedgerError::AmountOverflow { .. })
        ));
    }

    #[test]
    fn test_overflowing_splits_rejected() {
        let id = Uuid::new_v4();
        let expense = ExpenseRecord::with_id(
            id,
            "A",
            Decimal::MAX,
            vec![
                SplitEntry::new("A", Decimal::MAX),
                SplitEntry::new("B", Decimal::MAX),
            ],
        );
        assert_eq!(expense.id(), id);
        assert_eq!(
            expense.validate(dec!(0.01)),
            Err(LedgerError::AmountOverflow {
                context: format!("expense {}", id)
            })
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "paid_by": "A",
            "amount": "12.50",
            "splits": [{ "member": "B", "amount": "12.50" }]
        }"#;
        let expense: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount(), dec!(12.50));
        assert!(expense.description().is_none());
        assert!(expense.validate(dec!(0.01)).is_ok());
    }
}
