use crate::balance::aggregator::Balance;
use crate::core::config::EngineConfig;
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::member::MemberId;
use crate::core::settlement::SettlementRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A suggested transfer: `from` pays `to` the given `amount`.
///
/// Only the simplifier produces these, and they are never ledger truth.
/// Once the payment really happens the caller records it with
/// [`DebtPair::settle`], which yields the durable `SettlementRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtPair {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Decimal,
}

impl DebtPair {
    pub fn new(from: impl Into<MemberId>, to: impl Into<MemberId>, amount: Decimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    /// Record a payment of `amount` against this suggestion.
    ///
    /// Partial payments are allowed; paying more than the suggested amount
    /// is not.
    pub fn settle(&self, amount: Decimal) -> LedgerResult<SettlementRecord> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount {
                context: format!("settlement from {} to {}", self.from, self.to),
                amount,
            });
        }
        if amount > self.amount {
            return Err(LedgerError::SettlementExceedsDebt {
                amount,
                outstanding: self.amount,
            });
        }
        Ok(
            SettlementRecord::new(self.from.clone(), self.to.clone(), amount)
                .with_description(format!("Settlement from {} to {}", self.from, self.to)),
        )
    }

    /// Record a payment of the full suggested amount.
    pub fn settle_in_full(&self) -> LedgerResult<SettlementRecord> {
        self.settle(self.amount)
    }
}

impl fmt::Display for DebtPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

/// Working copy of a member's remaining net during matching.
struct Open<'a> {
    member: &'a MemberId,
    remaining: Decimal,
}

/// Reduce net balances to a short list of pairwise transfers.
///
/// Greedy largest-first matching: creditors are sorted by net descending,
/// debtors by net ascending (most negative first), ties broken by member id
/// ascending. Two cursors walk the lists; each step transfers
/// `min(creditor, |debtor|)` and advances whichever side reached zero
/// (both on an exact match). Members within tolerance of zero never appear.
///
/// The sum of emitted amounts equals the sum of positive nets within
/// tolerance. The transfer count is at most `creditors + debtors - 1`; it
/// is not guaranteed to be the global minimum.
///
/// # Examples
///
/// ```
/// use splitledger::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let balances = vec![
///     Balance { member: MemberId::new("A"), total_paid: dec!(20), total_owed: dec!(0), net: dec!(20) },
///     Balance { member: MemberId::new("B"), total_paid: dec!(0), total_owed: dec!(10), net: dec!(-10) },
///     Balance { member: MemberId::new("C"), total_paid: dec!(0), total_owed: dec!(10), net: dec!(-10) },
/// ];
///
/// let debts = simplify_debts(&balances, &EngineConfig::default());
/// assert_eq!(debts, vec![
///     DebtPair::new("B", "A", dec!(10)),
///     DebtPair::new("C", "A", dec!(10)),
/// ]);
/// ```
pub fn simplify_debts(balances: &[Balance], config: &EngineConfig) -> Vec<DebtPair> {
    let mut creditors: Vec<Open<'_>> = balances
        .iter()
        .filter(|b| b.net > config.tolerance)
        .map(|b| Open {
            member: &b.member,
            remaining: b.net,
        })
        .collect();
    let mut debtors: Vec<Open<'_>> = balances
        .iter()
        .filter(|b| b.net < -config.tolerance)
        .map(|b| Open {
            member: &b.member,
            remaining: b.net,
        })
        .collect();

    creditors.sort_by(|a, b| by_net_then_id(b.remaining, a.remaining, a.member, b.member));
    debtors.sort_by(|a, b| by_net_then_id(a.remaining, b.remaining, a.member, b.member));

    let mut debts = Vec::with_capacity(creditors.len() + debtors.len());
    let (mut i, mut j) = (0, 0);
    while i < creditors.len() && j < debtors.len() {
        let creditor = &mut creditors[i];
        let debtor = &mut debtors[j];

        let amount = creditor.remaining.min(debtor.remaining.abs());
        if amount > config.tolerance {
            log::trace!("{} pays {} {}", debtor.member, creditor.member, amount);
            debts.push(DebtPair {
                from: debtor.member.clone(),
                to: creditor.member.clone(),
                amount: config.round(amount),
            });
        }

        creditor.remaining -= amount;
        debtor.remaining += amount;

        if config.is_negligible(creditor.remaining) {
            i += 1;
        }
        if config.is_negligible(debtor.remaining) {
            j += 1;
        }
    }

    log::debug!(
        "simplified {} creditors and {} debtors into {} transfers",
        creditors.len(),
        debtors.len(),
        debts.len()
    );
    debts
}

/// Compare nets (already oriented by the caller), falling back to id order.
fn by_net_then_id(a: Decimal, b: Decimal, a_id: &MemberId, b_id: &MemberId) -> Ordering {
    a.cmp(&b).then_with(|| a_id.cmp(b_id))
}
