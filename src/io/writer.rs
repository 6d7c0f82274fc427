//! Output formatting: schedule CSV, text summary, JSON report, and the
//! input-file format used by `generate`.

use crate::core::portfolio::DebtPortfolio;
use crate::engine::amortization::{SimulationOutcome, SimulationStatus};
use crate::engine::schedule::{round_cents, PaymentSchedule, ScheduleTotals};
use crate::io::loader::{BUDGET_HEADER, START_DATE_HEADER, STRATEGY_HEADER};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const INSUFFICIENT_FUNDS_MESSAGE: &str = "not enough for minimum monthly payments";

/// Two-decimal rendering of an amount.
pub fn cents(amount: Decimal) -> String {
    round_cents(amount).to_string()
}

/// Two-decimal rendering with thousands separators, e.g. `27,047.97`.
pub fn format_currency(amount: Decimal) -> String {
    let plain = cents(amount.abs());
    let (whole, frac) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.round_dp(2) < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Write the schedule as CSV: a `Date` column, then one payment column
/// per debt in priority order.
pub fn write_schedule_csv<W: Write>(schedule: &PaymentSchedule, writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["Date".to_string()];
    header.extend(schedule.debt_names().iter().cloned());
    csv_writer.write_record(&header)?;

    for row in schedule.rows() {
        let mut record = vec![row.date.format("%Y-%m-%d").to_string()];
        record.extend(row.entries.iter().map(|e| cents(e.payment)));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn save_schedule(schedule: &PaymentSchedule, path: &Path) -> csv::Result<()> {
    let file = File::create(path)?;
    write_schedule_csv(schedule, file)
}

fn write_totals(out: &mut String, totals: &ScheduleTotals) {
    let _ = writeln!(out, "Total Payments: {}", format_currency(totals.total_paid));
    let _ = writeln!(out, "Total Principal: {}", format_currency(totals.total_principal_paid));
    let _ = writeln!(out, "Total Interest: {}", format_currency(totals.total_interest_paid));
}

/// Human-readable report of a simulation.
pub fn format_summary(outcome: &SimulationOutcome) -> String {
    let mut out = String::new();
    match &outcome.status {
        SimulationStatus::DebtFree => match outcome.debt_free_date() {
            Some(date) => {
                let _ = writeln!(out, "Debt Free: {}", date.format("%B %Y"));
                out.push('\n');
                write_totals(&mut out, &outcome.totals);
            }
            None => out.push_str("Nothing owed: no payments scheduled.\n"),
        },
        SimulationStatus::InsufficientFunds {
            month,
            required,
            available,
        } => {
            let _ = writeln!(out, "{}", INSUFFICIENT_FUNDS_MESSAGE);
            let _ = writeln!(
                out,
                "Minimums due in {}: {}, monthly budget: {}",
                month.format("%B %Y"),
                format_currency(*required),
                format_currency(*available)
            );
            if !outcome.schedule.is_empty() {
                let _ = writeln!(out, "\nPartial schedule ({} months):", outcome.months());
                write_totals(&mut out, &outcome.totals);
            }
        }
    }
    out
}

/// JSON report of the full outcome. Amounts are serialized as strings.
pub fn to_json(outcome: &SimulationOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}

/// Write a portfolio back out in the loader's input format.
pub fn write_input_csv<W: Write>(
    portfolio: &DebtPortfolio,
    monthly_budget: Decimal,
    start_date: NaiveDate,
    writer: W,
) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    let start_header = format!("{START_DATE_HEADER} (YYYY-MM)");
    let strategy_header = format!("{STRATEGY_HEADER} (Avalanche or Snowball)");
    csv_writer.write_record([BUDGET_HEADER, start_header.as_str(), strategy_header.as_str()])?;
    csv_writer.write_record([
        cents(monthly_budget),
        start_date.format("%Y-%m").to_string(),
        portfolio.strategy().to_string(),
    ])?;
    csv_writer.write_record(["Name", "Principal", "Rate", "Minimum Payment"])?;
    for debt in portfolio.debts() {
        csv_writer.write_record([
            debt.name.clone(),
            cents(debt.principal),
            debt.rate.normalize().to_string(),
            cents(debt.minimum_payment),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
