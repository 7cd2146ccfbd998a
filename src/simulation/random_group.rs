//! Random expense groups for benchmarks, property tests and the CLI.

use crate::core::expense::{ExpenseRecord, SplitEntry};
use crate::core::member::Member;
use crate::core::settlement::SettlementRecord;
use crate::core::snapshot::GroupSnapshot;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Configuration for generating a random group.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of members in the group.
    pub member_count: usize,
    /// Number of expenses to record.
    pub expense_count: usize,
    /// Number of settlements to record.
    pub settlement_count: usize,
    /// Smallest amount, in cents.
    pub min_cents: i64,
    /// Largest amount, in cents.
    pub max_cents: i64,
    /// Fixed seed for reproducible groups; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            member_count: 5,
            expense_count: 20,
            settlement_count: 0,
            min_cents: 100,
            max_cents: 50_000,
            seed: None,
        }
    }
}

/// Generate a group whose expenses split equally to the cent.
///
/// Each expense picks a random non-empty set of participants; any cents
/// left over from the division go to the first participant, so split
/// totals always match the expense amount exactly.
pub fn generate_random_group(config: &GroupConfig) -> GroupSnapshot {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let members: Vec<Member> = (0..config.member_count)
        .map(|i| Member::new(format!("M{:03}", i), format!("Member {}", i)))
        .collect();
    if members.is_empty() {
        return GroupSnapshot::default();
    }

    let min = config.min_cents.max(1);
    let max = config.max_cents.max(min);

    let mut expenses = Vec::with_capacity(config.expense_count);
    for _ in 0..config.expense_count {
        let payer = &members[rng.gen_range(0..members.len())];
        let participant_count = rng.gen_range(1..=members.len());
        let participants: Vec<&Member> = members
            .choose_multiple(&mut rng, participant_count)
            .collect();

        let cents = rng.gen_range(min..=max);
        let share = cents / participant_count as i64;
        let remainder = cents % participant_count as i64;

        let splits = participants
            .iter()
            .enumerate()
            .map(|(idx, member)| {
                let extra = if idx == 0 { remainder } else { 0 };
                SplitEntry::new(member.id.clone(), Decimal::new(share + extra, 2))
            })
            .collect();
        expenses.push(ExpenseRecord::new(
            payer.id.clone(),
            Decimal::new(cents, 2),
            splits,
        ));
    }

    let mut settlements = Vec::new();
    if members.len() >= 2 {
        for _ in 0..config.settlement_count {
            let from = rng.gen_range(0..members.len());
            let mut to = rng.gen_range(0..members.len());
            while to == from {
                to = rng.gen_range(0..members.len());
            }
            let cents = rng.gen_range(min..=max);
            settlements.push(SettlementRecord::new(
                members[from].id.clone(),
                members[to].id.clone(),
                Decimal::new(cents, 2),
            ));
        }
    }

    GroupSnapshot {
        members,
        expenses,
        settlements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;
    use crate::optimization::report::compute_group_debts;

    #[test]
    fn test_random_group_generation() {
        let config = GroupConfig {
            member_count: 4,
            expense_count: 10,
            settlement_count: 3,
            seed: Some(7),
            ..Default::default()
        };
        let group = generate_random_group(&config);
        assert_eq!(group.members.len(), 4);
        assert_eq!(group.expenses.len(), 10);
        assert_eq!(group.settlements.len(), 3);
        for expense in &group.expenses {
            assert_eq!(expense.split_total(), expense.amount());
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = GroupConfig {
            seed: Some(42),
            ..Default::default()
        };
        let a = generate_random_group(&config);
        let b = generate_random_group(&config);
        let amounts = |g: &GroupSnapshot| g.expenses.iter().map(|e| e.amount()).collect::<Vec<_>>();
        assert_eq!(amounts(&a), amounts(&b));
    }

    #[test]
    fn test_random_group_balances() {
        let config = GroupConfig {
            member_count: 12,
            expense_count: 60,
            settlement_count: 10,
            ..Default::default()
        };
        let group = generate_random_group(&config);
        let report = compute_group_debts(
            &group.members,
            &group.expenses,
            &group.settlements,
            &EngineConfig::default(),
        )
        .unwrap();
        assert!(report.is_balanced());
        assert!(report.debts().len() < group.members.len());
    }

    #[test]
    fn test_empty_group() {
        let config = GroupConfig {
            member_count: 0,
            ..Default::default()
        };
        let group = generate_random_group(&config);
        assert!(group.members.is_empty());
        assert!(group.expenses.is_empty());
    }
}
