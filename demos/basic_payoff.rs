//! Avalanche versus snowball on the same set of debts.
//!
//! Runs both strategies against one budget and compares how long each
//! takes and how much interest each costs.

use chrono::NaiveDate;
use payoff_engine::core::debt::Debt;
use payoff_engine::core::portfolio::DebtPortfolio;
use payoff_engine::core::strategy::Strategy;
use payoff_engine::engine::amortization::AmortizationEngine;
use payoff_engine::io::writer::{format_currency, format_summary};
use rust_decimal_macros::dec;

fn debts() -> Vec<Debt> {
    vec![
        Debt::new("Student Loan 1", dec!(6844.71), dec!(7.49), dec!(84.94)).unwrap(),
        Debt::new("Car Loan", dec!(12762.90), dec!(7.65), dec!(450.00)).unwrap(),
        Debt::new("Student Loan 2", dec!(2228.32), dec!(7), dec!(46.44)).unwrap(),
        Debt::new("Student Loan 3", dec!(3485.23), dec!(6.814), dec!(779.59)).unwrap(),
    ]
}

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  payoff-engine: Avalanche vs Snowball    ║");
    println!("╚══════════════════════════════════════════╝\n");

    let budget = dec!(4000);
    let start = NaiveDate::from_ymd_opt(2020, 5, 8).unwrap();
    let engine = AmortizationEngine::default();
    let mut interest = Vec::new();

    for strategy in [Strategy::Avalanche, Strategy::Snowball] {
        println!("━━━ {} ━━━\n", strategy);

        let portfolio = DebtPortfolio::new(strategy, debts()).unwrap();
        println!("Payment order:");
        for (i, debt) in portfolio.debts().iter().enumerate() {
            println!("  {}. {}", i + 1, debt);
        }
        println!();

        let outcome = engine.simulate(&portfolio, budget, start).unwrap();
        for row in outcome.schedule.rows() {
            let cells: Vec<String> = row.entries.iter().map(|e| format_currency(e.payment)).collect();
            println!("  {}  {}", row.date, cells.join("  "));
        }
        println!();
        print!("{}", format_summary(&outcome));
        println!();

        interest.push((strategy, outcome.totals.total_interest_paid));
    }

    if let [(a, a_interest), (s, s_interest)] = interest.as_slice() {
        println!(
            "{} saves {} in interest over {}.",
            a,
            format_currency(*s_interest - *a_interest),
            s
        );
    }
}
