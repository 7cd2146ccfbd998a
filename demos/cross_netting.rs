//! Debt chains collapse: A owes B, B owes C, so A pays C directly.

use rust_decimal_macros::dec;
use splitledger::prelude::*;

fn main() {
    println!("━━━ Chain of debts ━━━\n");

    let members: Vec<Member> = ["A", "B", "C", "D"]
        .iter()
        .map(|id| Member::new(*id, format!("Member {}", id)))
        .collect();

    // A -> B -> C -> D, 25.00 each hop.
    let expenses = vec![
        ExpenseRecord::new("B", dec!(25.00), vec![SplitEntry::new("A", dec!(25.00))]),
        ExpenseRecord::new("C", dec!(25.00), vec![SplitEntry::new("B", dec!(25.00))]),
        ExpenseRecord::new("D", dec!(25.00), vec![SplitEntry::new("C", dec!(25.00))]),
    ];

    let config = EngineConfig::default();
    let balances = match compute_balances(&members, &expenses, &[], &config) {
        Ok(balances) => balances,
        Err(err) => {
            eprintln!("Could not compute balances: {}", err);
            return;
        }
    };

    println!("Pairwise debts recorded: {}", expenses.len());
    for balance in &balances {
        println!(
            "  {:<4} net {:>8}  [{}]",
            balance.member,
            balance.net,
            balance.status(&config)
        );
    }

    let debts = simplify_debts(&balances, &config);
    println!("\nSimplified transfers:    {}", debts.len());
    for debt in &debts {
        println!("  {}", debt);
    }
}
