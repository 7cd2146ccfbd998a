use crate::core::config::EngineConfig;
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::expense::ExpenseRecord;
use crate::core::member::{Member, MemberId};
use crate::core::settlement::SettlementRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Where a member stands once everything is folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BalanceStatus {
    /// Others owe this member.
    Creditor,
    /// This member owes others.
    Debtor,
    /// Within tolerance of zero.
    Settled,
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BalanceStatus::Creditor => "CREDITOR",
            BalanceStatus::Debtor => "DEBTOR",
            BalanceStatus::Settled => "SETTLED",
        };
        f.write_str(label)
    }
}

/// Derived per-member position. Never persisted; recomputed on every call.
///
/// - `total_paid`: what others owe this member from expenses they fronted,
///   less settlements received.
/// - `total_owed`: this member's shares of expenses others fronted, less
///   settlements paid.
/// - `net = total_paid - total_owed`. Positive means the member is owed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub member: MemberId,
    pub total_paid: Decimal,
    pub total_owed: Decimal,
    pub net: Decimal,
}

impl Balance {
    pub fn zero(member: MemberId) -> Self {
        Self {
            member,
            total_paid: Decimal::ZERO,
            total_owed: Decimal::ZERO,
            net: Decimal::ZERO,
        }
    }

    pub fn status(&self, config: &EngineConfig) -> BalanceStatus {
        if self.net > config.tolerance {
            BalanceStatus::Creditor
        } else if self.net < -config.tolerance {
            BalanceStatus::Debtor
        } else {
            BalanceStatus::Settled
        }
    }

    /// Copy rounded to the configured output scale, for display or storage.
    pub fn rounded(&self, config: &EngineConfig) -> Self {
        Self {
            member: self.member.clone(),
            total_paid: config.round(self.total_paid),
            total_owed: config.round(self.total_owed),
            net: config.round(self.net),
        }
    }
}

/// Fold expenses and settlements into one `Balance` per member.
///
/// Output order follows `members`. Every record is validated against the
/// member snapshot; the first fault aborts the computation.
///
/// # Algorithm
///
/// 1. Start every member at zero.
/// 2. For each expense, charge each other split member their share and
///    credit the payer with the sum of those shares. Split residue within
///    tolerance of the amount is credited to nobody, so nets stay conserved.
/// 3. For each settlement `from -> to`, reduce `from.total_owed` and
///    `to.total_paid` by the amount.
/// 4. `net = total_paid - total_owed`.
///
/// A running total leaving `Decimal`'s range fails with `AmountOverflow`.
///
/// # Examples
///
/// ```
/// use splitledger::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let members = vec![Member::new("A", "Ann"), Member::new("B", "Ben")];
/// let expenses = vec![ExpenseRecord::new(
///     "A",
///     dec!(20),
///     vec![SplitEntry::new("A", dec!(10)), SplitEntry::new("B", dec!(10))],
/// )];
///
/// let balances = compute_balances(&members, &expenses, &[], &EngineConfig::default()).unwrap();
/// assert_eq!(balances[0].net, dec!(10));
/// assert_eq!(balances[1].net, dec!(-10));
/// ```
pub fn compute_balances(
    members: &[Member],
    expenses: &[ExpenseRecord],
    settlements: &[SettlementRecord],
    config: &EngineConfig,
) -> LedgerResult<Vec<Balance>> {
    config.validate()?;

    let mut index: HashMap<&MemberId, usize> = HashMap::with_capacity(members.len());
    let mut balances: Vec<Balance> = Vec::with_capacity(members.len());
    for member in members {
        if index.insert(&member.id, balances.len()).is_some() {
            log::warn!("member {} appears twice in the group snapshot", member.id);
            return Err(LedgerError::DuplicateMember(member.id.clone()));
        }
        balances.push(Balance::zero(member.id.clone()));
    }

    for expense in expenses {
        expense.validate(config.tolerance)?;
        let context = || format!("expense {}", expense.id());

        let payer = lookup(&index, expense.paid_by(), &context)?;
        for split in expense.splits() {
            let idx = lookup(&index, &split.member, &context)?;
            if idx != payer {
                accumulate(&mut balances[idx].total_owed, split.amount, &context)?;
            }
        }
        let others = expense.split_total() - expense.payer_share();
        accumulate(&mut balances[payer].total_paid, others, &context)?;
    }

    for settlement in settlements {
        settlement.validate()?;
        let context = || format!("settlement {}", settlement.id());

        let from = lookup(&index, settlement.from(), &context)?;
        let to = lookup(&index, settlement.to(), &context)?;
        accumulate(&mut balances[from].total_owed, -settlement.amount(), &context)?;
        accumulate(&mut balances[to].total_paid, -settlement.amount(), &context)?;
    }

    for balance in &mut balances {
        balance.net = balance
            .total_paid
            .checked_sub(balance.total_owed)
            .ok_or_else(|| LedgerError::AmountOverflow {
                context: format!("net balance of {}", balance.member),
            })?;
    }

    log::debug!(
        "computed {} balances from {} expenses and {} settlements",
        balances.len(),
        expenses.len(),
        settlements.len()
    );
    Ok(balances)
}

fn accumulate(
    total: &mut Decimal,
    delta: Decimal,
    context: &dyn Fn() -> String,
) -> LedgerResult<()> {
    *total = total
        .checked_add(delta)
        .ok_or_else(|| LedgerError::AmountOverflow { context: context() })?;
    Ok(())
}

fn lookup(
    index: &HashMap<&MemberId, usize>,
    member: &MemberId,
    context: &dyn Fn() -> String,
) -> LedgerResult<usize> {
    match index.get(member) {
        Some(&idx) => Ok(idx),
        None => {
            let context = context();
            log::warn!("{} references unknown member {}", context, member);
            Err(LedgerError::UnknownMember {
                context,
                member: member.clone(),
            })
        }
    }
}
