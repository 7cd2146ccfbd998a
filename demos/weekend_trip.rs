//! A weekend trip: shared expenses, one repayment, then suggested transfers.

use rust_decimal_macros::dec;
use splitledger::prelude::*;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║     splitledger: Weekend Trip Example    ║");
    println!("╚══════════════════════════════════════════╝\n");

    let members = vec![
        Member::new("ann", "Ann"),
        Member::new("ben", "Ben"),
        Member::new("cat", "Cat"),
        Member::new("dan", "Dan"),
    ];

    let expenses = vec![
        ExpenseRecord::new(
            "ann",
            dec!(240.00),
            vec![
                SplitEntry::new("ann", dec!(60.00)),
                SplitEntry::new("ben", dec!(60.00)),
                SplitEntry::new("cat", dec!(60.00)),
                SplitEntry::new("dan", dec!(60.00)),
            ],
        )
        .with_description("Cabin"),
        ExpenseRecord::new(
            "ben",
            dec!(100.00),
            vec![
                SplitEntry::new("ann", dec!(33.34)),
                SplitEntry::new("ben", dec!(33.33)),
                SplitEntry::new("cat", dec!(33.33)),
            ],
        )
        .with_description("Groceries"),
        ExpenseRecord::new(
            "cat",
            dec!(45.00),
            vec![
                SplitEntry::new("ben", dec!(15.00)),
                SplitEntry::new("dan", dec!(30.00)),
            ],
        )
        .with_description("Fuel"),
    ];

    let settlements = vec![SettlementRecord::new("dan", "ann", dec!(40.00))];

    let engine = SettlementEngine::default();
    let report = match engine.compute_group_debts(&members, &expenses, &settlements) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Could not compute balances: {}", err);
            return;
        }
    };

    if let Ok(spent) = total_spent(&expenses) {
        println!("Total spent: {}\n", spent);
    }
    println!("{}", report);

    println!("━━━ Dan's view ━━━\n");
    let dan = MemberId::new("dan");
    for debt in report.debts_involving(&dan) {
        println!(
            "  {} pays {} {}",
            report.name_of(&debt.from),
            report.name_of(&debt.to),
            debt.amount
        );
    }
}
