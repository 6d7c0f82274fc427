use crate::core::debt::Debt;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One debt's figures for one simulated month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebtMonth {
    /// Minimum plus any excess paid this month.
    pub payment: Decimal,
    /// Interest accrued this month, before payment.
    pub interest: Decimal,
    /// Balance left after this month's payment.
    pub balance: Decimal,
}

/// Snapshot of a simulated month, dated at the month's last day.
///
/// `entries` line up with [`PaymentSchedule::debt_names`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub date: NaiveDate,
    pub entries: Vec<DebtMonth>,
}

impl ScheduleRow {
    pub fn capture(date: NaiveDate, debts: &[Debt]) -> Self {
        Self {
            date,
            entries: debts
                .iter()
                .map(|d| DebtMonth {
                    payment: d.adjusted_payment,
                    interest: d.interest_accrued,
                    balance: d.principal,
                })
                .collect(),
        }
    }

    pub fn total_payment(&self) -> Decimal {
        self.entries.iter().map(|e| e.payment).sum()
    }

    pub fn total_interest(&self) -> Decimal {
        self.entries.iter().map(|e| e.interest).sum()
    }
}

/// Round to cents and pin the scale at two places, so `1` renders as `1.00`.
pub fn round_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded
}

/// Summary figures over a whole schedule. Rendered by `io::writer::format_summary`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub total_paid: Decimal,
    pub total_principal_paid: Decimal,
    pub total_interest_paid: Decimal,
}

/// Time series for a single debt, ready for charting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtSeries {
    pub name: String,
    pub payments: Vec<(NaiveDate, Decimal)>,
    pub interest: Vec<(NaiveDate, Decimal)>,
    pub balances: Vec<(NaiveDate, Decimal)>,
}

/// Month-by-month payment schedule. Append-only while the engine runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    debt_names: Vec<String>,
    rows: Vec<ScheduleRow>,
}

impl PaymentSchedule {
    pub fn new(debt_names: Vec<String>) -> Self {
        Self {
            debt_names,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: ScheduleRow) {
        debug_assert_eq!(row.entries.len(), self.debt_names.len());
        self.rows.push(row);
    }

    /// Column headers, in payment priority order.
    pub fn debt_names(&self) -> &[String] {
        &self.debt_names
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.debt_names.iter().position(|n| n == name)
    }

    /// Figures for debt `name` in row `row`.
    pub fn entry(&self, row: usize, name: &str) -> Option<&DebtMonth> {
        let col = self.column(name)?;
        self.rows.get(row).and_then(|r| r.entries.get(col))
    }

    pub fn totals(&self) -> ScheduleTotals {
        let total_paid: Decimal = self.rows.iter().map(ScheduleRow::total_payment).sum();
        let total_interest_paid: Decimal = self.rows.iter().map(ScheduleRow::total_interest).sum();
        ScheduleTotals {
            total_paid,
            total_principal_paid: total_paid - total_interest_paid,
            total_interest_paid,
        }
    }

    /// Total paid across all debts, per month.
    pub fn monthly_totals(&self) -> Vec<(NaiveDate, Decimal)> {
        self.rows.iter().map(|r| (r.date, r.total_payment())).collect()
    }

    /// Date of the last month with a non-zero payment to `name`.
    pub fn payoff_date(&self, name: &str) -> Option<NaiveDate> {
        let col = self.column(name)?;
        self.rows
            .iter()
            .rev()
            .find(|r| r.entries[col].payment > Decimal::ZERO)
            .map(|r| r.date)
    }

    /// Split one debt's column into payment, interest and balance series.
    pub fn series(&self, name: &str) -> Option<DebtSeries> {
        let col = self.column(name)?;
        let mut series = DebtSeries {
            name: name.to_string(),
            ..Default::default()
        };
        for row in &self.rows {
            let entry = &row.entries[col];
            series.payments.push((row.date, entry.payment));
            series.interest.push((row.date, entry.interest));
            series.balances.push((row.date, entry.balance));
        }
        Some(series)
    }
}
