use crate::core::debt::Debt;
use crate::core::portfolio::DebtPortfolio;
use crate::core::strategy::Strategy;
use crate::engine::interest::{compound_daily, month_end};
use crate::engine::payment::{apply_minimums, distribute_excess, release_paid_off};
use crate::engine::schedule::{PaymentSchedule, ScheduleRow, ScheduleTotals};
use chrono::{Months, NaiveDate};
use log::{debug, info, trace, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cap on simulated months (100 years).
pub const DEFAULT_MAX_MONTHS: u32 = 1200;

/// Errors that stop a simulation from producing a usable schedule.
///
/// Running out of budget for the minimums is not one of them; that is a
/// normal outcome reported through [`SimulationStatus::InsufficientFunds`].
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("cannot simulate an empty portfolio")]
    EmptyPortfolio,
    #[error("monthly budget must be positive, got {0}")]
    NonPositiveBudget(Decimal),
    #[error("debts were not paid off within {max_months} months; the schedule is incomplete")]
    IterationCapExceeded { max_months: u32 },
    #[error("balance of '{name}' grew past the largest representable amount in {month}")]
    BalanceOverflow { name: String, month: NaiveDate },
    #[error("cannot advance past {0}")]
    DateOutOfRange(NaiveDate),
}

/// Tunables for the simulation loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Hard limit on the number of simulated months.
    pub max_months: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
        }
    }
}

/// How a simulation ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SimulationStatus {
    /// Every balance reached zero.
    DebtFree,
    /// The minimums due in `month` exceeded the budget. The schedule holds
    /// the months completed before that.
    InsufficientFunds {
        month: NaiveDate,
        required: Decimal,
        available: Decimal,
    },
}

/// Everything a simulation produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub strategy: Strategy,
    pub monthly_budget: Decimal,
    pub start_date: NaiveDate,
    pub status: SimulationStatus,
    pub totals: ScheduleTotals,
    pub schedule: PaymentSchedule,
}

impl SimulationOutcome {
    pub fn is_debt_free(&self) -> bool {
        self.status == SimulationStatus::DebtFree
    }

    /// Month-end of the final payment, if every debt was paid off.
    pub fn debt_free_date(&self) -> Option<NaiveDate> {
        if self.is_debt_free() {
            self.schedule.last_date()
        } else {
            None
        }
    }

    pub fn months(&self) -> usize {
        self.schedule.len()
    }
}

/// The amortization engine.
///
/// Simulates paying a [`DebtPortfolio`] down under a fixed monthly budget.
/// Each month:
///
/// 1. Accrue daily-compounded interest on every open balance.
/// 2. Stop if the open balances' minimums exceed the budget.
/// 3. Zero the minimum of every paid-off debt.
/// 4. Pay every minimum, capped at the balance.
/// 5. Hand `budget - sum(minimums)` to open debts in priority order.
/// 6. Record the month, dated at its last day.
/// 7. Advance one calendar month.
///
/// Row `i` of the schedule is the month `i` months after the start month,
/// so the first row is dated at the end of the month containing the start
/// date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use payoff_engine::core::debt::Debt;
/// use payoff_engine::core::portfolio::DebtPortfolio;
/// use payoff_engine::core::strategy::Strategy;
/// use payoff_engine::engine::amortization::AmortizationEngine;
/// use rust_decimal_macros::dec;
///
/// let portfolio = DebtPortfolio::new(
///     Strategy::Avalanche,
///     vec![Debt::new("Card", dec!(1000), dec!(12), dec!(100)).unwrap()],
/// )
/// .unwrap();
///
/// let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
/// let outcome = AmortizationEngine::default()
///     .simulate(&portfolio, dec!(300), start)
///     .unwrap();
///
/// assert!(outcome.is_debt_free());
/// assert_eq!(outcome.months(), 4);
/// assert_eq!(outcome.debt_free_date(), NaiveDate::from_ymd_opt(2021, 4, 30));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: SimulationConfig,
}

impl AmortizationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn simulate(
        &self,
        portfolio: &DebtPortfolio,
        monthly_budget: Decimal,
        start_date: NaiveDate,
    ) -> Result<SimulationOutcome, SimulationError> {
        if portfolio.is_empty() {
            return Err(SimulationError::EmptyPortfolio);
        }
        if monthly_budget <= Decimal::ZERO {
            return Err(SimulationError::NonPositiveBudget(monthly_budget));
        }

        let mut debts: Vec<Debt> = portfolio.debts().to_vec();
        let mut schedule = PaymentSchedule::new(debts.iter().map(|d| d.name.clone()).collect());
        let mut status = SimulationStatus::DebtFree;
        let mut date = start_date;

        debug!(
            "simulating {} debts ({} strategy), budget {}, starting {}",
            debts.len(),
            portfolio.strategy(),
            monthly_budget,
            start_date
        );

        while !debts.iter().all(Debt::is_paid_off) {
            if schedule.len() >= self.config.max_months as usize {
                warn!(
                    "gave up after {} months with {} debts still open",
                    self.config.max_months,
                    debts.iter().filter(|d| !d.is_paid_off()).count()
                );
                return Err(SimulationError::IterationCapExceeded {
                    max_months: self.config.max_months,
                });
            }

            accrue_interest(&mut debts, date)?;

            let required: Decimal = debts
                .iter()
                .filter(|d| !d.is_paid_off())
                .map(|d| d.minimum_payment)
                .sum();
            if required > monthly_budget {
                warn!(
                    "not enough for minimum monthly payments in {}: need {}, have {}",
                    date.format("%Y-%m"),
                    required,
                    monthly_budget
                );
                status = SimulationStatus::InsufficientFunds {
                    month: month_end(date),
                    required,
                    available: monthly_budget,
                };
                break;
            }

            release_paid_off(&mut debts);
            apply_minimums(&mut debts);
            let minimums: Decimal = debts.iter().map(|d| d.minimum_payment).sum();
            let unplaced = distribute_excess(&mut debts, monthly_budget - minimums);

            let row = ScheduleRow::capture(month_end(date), &debts);
            trace!(
                "{}: paid {}, interest {}, unplaced {}",
                row.date,
                row.total_payment(),
                row.total_interest(),
                unplaced
            );
            schedule.push(row);

            date = date
                .checked_add_months(Months::new(1))
                .ok_or(SimulationError::DateOutOfRange(date))?;
        }

        let totals = schedule.totals();
        match (&status, schedule.last_date()) {
            (SimulationStatus::DebtFree, Some(last)) => info!(
                "debt free by {} after {} months, total paid {}",
                last.format("%B %Y"),
                schedule.len(),
                totals.total_paid.round_dp(2)
            ),
            (SimulationStatus::DebtFree, None) => info!("nothing owed, no payments scheduled"),
            (SimulationStatus::InsufficientFunds { .. }, _) => info!(
                "stopped after {} months: budget does not cover minimums",
                schedule.len()
            ),
        }

        Ok(SimulationOutcome {
            strategy: portfolio.strategy(),
            monthly_budget,
            start_date,
            status,
            totals,
            schedule,
        })
    }
}

/// Simulate with the default configuration.
pub fn simulate(
    portfolio: &DebtPortfolio,
    monthly_budget: Decimal,
    start_date: NaiveDate,
) -> Result<SimulationOutcome, SimulationError> {
    AmortizationEngine::default().simulate(portfolio, monthly_budget, start_date)
}

fn accrue_interest(debts: &mut [Debt], date: NaiveDate) -> Result<(), SimulationError> {
    for debt in debts.iter_mut() {
        if debt.is_paid_off() {
            debt.interest_accrued = Decimal::ZERO;
            continue;
        }
        let (principal, interest) = compound_daily(date, debt.principal, debt.rate).ok_or_else(|| {
            SimulationError::BalanceOverflow {
                name: debt.name.clone(),
                month: month_end(date),
            }
        })?;
        debt.principal = principal;
        debt.interest_accrued = interest;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn single_card() -> DebtPortfolio {
        DebtPortfolio::new(
            Strategy::Avalanche,
            vec![Debt::new("Card", dec!(1000), dec!(12), dec!(100)).unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn test_single_debt_payoff() {
        let outcome = simulate(&single_card(), dec!(300), ymd(2021, 1, 1)).unwrap();

        assert!(outcome.is_debt_free());
        assert_eq!(outcome.months(), 4);

        let dates: Vec<NaiveDate> = outcome.schedule.rows().iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![ymd(2021, 1, 31), ymd(2021, 2, 28), ymd(2021, 3, 31), ymd(2021, 4, 30)]
        );

        let payments: Vec<Decimal> = outcome
            .schedule
            .rows()
            .iter()
            .map(|r| r.entries[0].payment.round_dp(2))
            .collect();
        assert_eq!(payments, vec![dec!(300), dec!(300), dec!(300), dec!(122.28)]);

        assert_eq!(outcome.totals.total_interest_paid.round_dp(2), dec!(22.28));
        assert_eq!(outcome.totals.total_principal_paid.round_dp(2), dec!(1000.00));
        assert_eq!(outcome.schedule.rows()[3].entries[0].balance, Decimal::ZERO);
    }

    #[test]
    fn test_non_positive_budget_rejected() {
        let result = simulate(&single_card(), Decimal::ZERO, ymd(2021, 1, 1));
        assert_eq!(result.unwrap_err(), SimulationError::NonPositiveBudget(Decimal::ZERO));

        let result = simulate(&single_card(), dec!(-5), ymd(2021, 1, 1));
        assert!(matches!(result, Err(SimulationError::NonPositiveBudget(_))));
    }

    #[test]
    fn test_insufficient_funds_is_reported_not_raised() {
        let outcome = simulate(&single_card(), dec!(99.99), ymd(2021, 3, 14)).unwrap();

        assert!(outcome.schedule.is_empty());
        assert_eq!(outcome.debt_free_date(), None);
        assert_eq!(
            outcome.status,
            SimulationStatus::InsufficientFunds {
                month: ymd(2021, 3, 31),
                required: dec!(100),
                available: dec!(99.99),
            }
        );
        assert_eq!(outcome.totals, ScheduleTotals::default());
    }

    #[test]
    fn test_iteration_cap() {
        // Interest outpaces the budget, so the balance never shrinks.
        let portfolio = DebtPortfolio::new(
            Strategy::Avalanche,
            vec![Debt::new("Underwater", dec!(1_000_000), dec!(20), dec!(100)).unwrap()],
        )
        .unwrap();
        let engine = AmortizationEngine::new(SimulationConfig { max_months: 24 });
        let result = engine.simulate(&portfolio, dec!(1000), ymd(2021, 1, 1));
        assert_eq!(
            result.unwrap_err(),
            SimulationError::IterationCapExceeded { max_months: 24 }
        );
    }

    #[test]
    fn test_runaway_balance_overflows_before_cap() {
        // The minimum never covers the interest, so the balance compounds
        // without bound and passes Decimal::MAX within the default cap.
        let portfolio = DebtPortfolio::new(
            Strategy::Avalanche,
            vec![Debt::new("Payday", dec!(1000), dec!(100), dec!(10)).unwrap()],
        )
        .unwrap();
        let err = simulate(&portfolio, dec!(10), ymd(2024, 1, 1)).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::BalanceOverflow { ref name, .. } if name == "Payday"
        ));
    }

    #[test]
    fn test_absurd_rate_overflows_in_first_month() {
        let portfolio = DebtPortfolio::new(
            Strategy::Avalanche,
            vec![Debt::new("Shark", dec!(1000), dec!(100_000_000), dec!(10)).unwrap()],
        )
        .unwrap();
        let err = simulate(&portfolio, dec!(500), ymd(2024, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            SimulationError::BalanceOverflow {
                name: "Shark".to_string(),
                month: ymd(2024, 1, 31),
            }
        );
    }

    #[test]
    fn test_payoff_exactly_at_cap_succeeds() {
        let engine = AmortizationEngine::new(SimulationConfig { max_months: 4 });
        let outcome = engine.simulate(&single_card(), dec!(300), ymd(2021, 1, 1)).unwrap();
        assert!(outcome.is_debt_free());
        assert_eq!(outcome.months(), 4);
    }

    #[test]
    fn test_already_paid_off_portfolio() {
        let portfolio = DebtPortfolio::new(
            Strategy::Snowball,
            vec![Debt::new("Done", Decimal::ZERO, dec!(5), dec!(50)).unwrap()],
        )
        .unwrap();
        let outcome = simulate(&portfolio, dec!(100), ymd(2022, 6, 1)).unwrap();
        assert!(outcome.is_debt_free());
        assert!(outcome.schedule.is_empty());
        assert_eq!(outcome.debt_free_date(), None);
    }

    #[test]
    fn test_paid_off_debt_stays_zero() {
        let portfolio = DebtPortfolio::new(
            Strategy::Snowball,
            vec![
                Debt::new("Small", dec!(150), dec!(18), dec!(50)).unwrap(),
                Debt::new("Large", dec!(3000), dec!(6), dec!(75)).unwrap(),
            ],
        )
        .unwrap();
        let outcome = simulate(&portfolio, dec!(400), ymd(2022, 1, 15)).unwrap();
        assert!(outcome.is_debt_free());

        let rows = outcome.schedule.rows();
        assert!(rows[0].entries[0].balance.is_zero());
        for row in &rows[1..] {
            assert_eq!(row.entries[0].payment, Decimal::ZERO);
            assert_eq!(row.entries[0].interest, Decimal::ZERO);
            assert_eq!(row.entries[0].balance, Decimal::ZERO);
        }
    }

    #[test]
    fn test_start_date_clamped_days_keep_months_consecutive() {
        let portfolio = DebtPortfolio::new(
            Strategy::Avalanche,
            vec![Debt::new("Loan", dec!(1000), dec!(3), dec!(100)).unwrap()],
        )
        .unwrap();
        let outcome = simulate(&portfolio, dec!(260), ymd(2021, 1, 31)).unwrap();
        let dates: Vec<NaiveDate> = outcome.schedule.rows().iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![ymd(2021, 1, 31), ymd(2021, 2, 28), ymd(2021, 3, 31), ymd(2021, 4, 30)]
        );
    }
}
