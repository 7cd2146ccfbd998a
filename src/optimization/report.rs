use crate::balance::aggregator::{compute_balances, Balance};
use crate::core::config::EngineConfig;
use crate::core::error::LedgerResult;
use crate::core::expense::ExpenseRecord;
use crate::core::member::{Member, MemberId};
use crate::core::settlement::SettlementRecord;
use crate::optimization::simplify::{simplify_debts, DebtPair};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balances and suggested transfers for one group, computed together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDebts {
    members: Vec<Member>,
    balances: Vec<Balance>,
    debts: Vec<DebtPair>,
    config: EngineConfig,
}

impl GroupDebts {
    /// Per-member balances, in member snapshot order.
    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    /// Suggested transfers, in emission order.
    pub fn debts(&self) -> &[DebtPair] {
        &self.debts
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn balance_of(&self, member: &MemberId) -> Option<&Balance> {
        self.balances.iter().find(|b| &b.member == member)
    }

    /// Transfers `member` pays or receives.
    pub fn debts_involving(&self, member: &MemberId) -> Vec<&DebtPair> {
        self.debts
            .iter()
            .filter(|d| &d.from == member || &d.to == member)
            .collect()
    }

    /// Sum of all suggested transfer amounts.
    pub fn total_outstanding(&self) -> Decimal {
        self.debts.iter().map(|d| d.amount).sum()
    }

    /// Net balances across the group sum to zero within tolerance.
    pub fn is_balanced(&self) -> bool {
        let sum: Decimal = self.balances.iter().map(|b| b.net).sum();
        self.config.is_negligible(sum)
    }

    pub fn is_settled_up(&self) -> bool {
        self.debts.is_empty()
    }

    /// Display name for a member id; the id itself if the member is unknown.
    pub fn name_of<'a>(&'a self, member: &'a MemberId) -> &'a str {
        self.members
            .iter()
            .find(|m| &m.id == member)
            .map(Member::display_name)
            .unwrap_or_else(|| member.as_str())
    }
}

impl std::fmt::Display for GroupDebts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Balances ===")?;
        for balance in &self.balances {
            let rounded = balance.rounded(&self.config);
            writeln!(
                f,
                "  {:<20} paid {:>12}  owes {:>12}  net {:>12}  [{}]",
                self.name_of(&balance.member),
                rounded.total_paid,
                rounded.total_owed,
                rounded.net,
                balance.status(&self.config)
            )?;
        }

        writeln!(f, "\n=== Suggested Transfers ===")?;
        if self.debts.is_empty() {
            writeln!(f, "  Everyone is settled up.")?;
        }
        for debt in &self.debts {
            writeln!(
                f,
                "  {:<20} -> {:<20} {:>12}",
                self.name_of(&debt.from),
                self.name_of(&debt.to),
                debt.amount
            )?;
        }
        writeln!(f, "\nTransfers:      {}", self.debts.len())?;
        writeln!(f, "Outstanding:    {}", self.total_outstanding())?;
        writeln!(f, "Balanced:       {}", self.is_balanced())?;
        Ok(())
    }
}

/// Runs the aggregator and the simplifier under one numeric policy.
///
/// Holds no state besides its configuration, so one engine can serve any
/// number of groups and every call recomputes from the records it is given.
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    config: EngineConfig,
}

impl SettlementEngine {
    pub fn new(config: EngineConfig) -> LedgerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn compute_balances(
        &self,
        members: &[Member],
        expenses: &[ExpenseRecord],
        settlements: &[SettlementRecord],
    ) -> LedgerResult<Vec<Balance>> {
        compute_balances(members, expenses, settlements, &self.config)
    }

    pub fn simplify_debts(&self, balances: &[Balance]) -> Vec<DebtPair> {
        simplify_debts(balances, &self.config)
    }

    /// Balances followed by simplification, as one report.
    pub fn compute_group_debts(
        &self,
        members: &[Member],
        expenses: &[ExpenseRecord],
        settlements: &[SettlementRecord],
    ) -> LedgerResult<GroupDebts> {
        compute_group_debts(members, expenses, settlements, &self.config)
    }
}

/// Compute balances and suggested transfers in one pass.
pub fn compute_group_debts(
    members: &[Member],
    expenses: &[ExpenseRecord],
    settlements: &[SettlementRecord],
    config: &EngineConfig,
) -> LedgerResult<GroupDebts> {
    let balances = compute_balances(members, expenses, settlements, config)?;
    let debts = simplify_debts(&balances, config);
    Ok(GroupDebts {
        members: members.to_vec(),
        balances,
        debts,
        config: config.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LedgerError;
    use crate::core::expense::SplitEntry;
    use rust_decimal_macros::dec;

    fn trip() -> (Vec<Member>, Vec<ExpenseRecord>) {
        let members = vec![
            Member::new("A", "Ann"),
            Member::new("B", "Ben"),
            Member::new("C", "Cat"),
        ];
        let expenses = vec![ExpenseRecord::new(
            "A",
            dec!(30),
            vec![
                SplitEntry::new("A", dec!(10)),
                SplitEntry::new("B", dec!(10)),
                SplitEntry::new("C", dec!(10)),
            ],
        )];
        (members, expenses)
    }

    #[test]
    fn test_group_report() {
        let (members, expenses) = trip();
        let report = SettlementEngine::default()
            .compute_group_debts(&members, &expenses, &[])
            .unwrap();

        assert_eq!(report.balances().len(), 3);
        assert_eq!(report.debts().len(), 2);
        assert_eq!(report.total_outstanding(), dec!(20));
        assert!(report.is_balanced());
        assert!(!report.is_settled_up());

        let ben = MemberId::new("B");
        assert_eq!(report.balance_of(&ben).map(|b| b.net), Some(dec!(-10)));
        assert_eq!(report.debts_involving(&ben), vec![&DebtPair::new("B", "A", dec!(10))]);
        assert_eq!(report.debts_involving(&MemberId::new("A")).len(), 2);
        assert!(report.balance_of(&MemberId::new("nobody")).is_none());
    }

    #[test]
    fn test_settling_every_suggestion_clears_group() {
        let (members, expenses) = trip();
        let engine = SettlementEngine::default();
        let report = engine.compute_group_debts(&members, &expenses, &[]).unwrap();

        let settlements: Vec<SettlementRecord> = report
            .debts()
            .iter()
            .map(|d| d.settle_in_full().unwrap())
            .collect();
        let after = engine
            .compute_group_debts(&members, &expenses, &settlements)
            .unwrap();
        assert!(after.is_settled_up());
        assert!(after.balances().iter().all(|b| b.net == Decimal::ZERO));
    }

    #[test]
    fn test_display_uses_names() {
        let (members, expenses) = trip();
        let report = compute_group_debts(&members, &expenses, &[], &EngineConfig::default())
            .unwrap();
        let text = report.to_string();
        assert!(text.contains("Ben"));
        assert!(text.contains("CREDITOR"));
        assert!(text.contains("Outstanding:    20"));
    }

    #[test]
    fn test_name_fallback_for_unknown_id() {
        let (members, expenses) = trip();
        let report = compute_group_debts(&members, &expenses, &[], &EngineConfig::default())
            .unwrap();
        let ghost = MemberId::new("ghost");
        assert_eq!(report.name_of(&ghost), "ghost");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_tolerance(dec!(-1));
        assert!(matches!(
            SettlementEngine::new(config),
            Err(LedgerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_integrity_fault_propagates() {
        let (members, _) = trip();
        let settlements = vec![SettlementRecord::new("A", "ghost", dec!(1))];
        let err = SettlementEngine::default()
            .compute_group_debts(&members, &[], &settlements)
            .unwrap_err();
        assert!(err.is_integrity_fault());
    }
}
