use crate::core::debt::Debt;
use crate::core::strategy::Strategy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors arising when assembling a [`DebtPortfolio`].
#[derive(Debug, Error, PartialEq)]
pub enum PortfolioError {
    #[error("a portfolio needs at least one debt")]
    Empty,
    #[error("debt name '{0}' appears more than once")]
    DuplicateName(String),
}

/// The full set of debts, fixed in payment priority order.
///
/// The order is computed once from the [`Strategy`] when the portfolio is
/// built and is never re-derived afterwards. Simulations work on copies of
/// the debts, so a portfolio can be simulated any number of times.
///
/// # Examples
///
/// ```
/// use payoff_engine::core::debt::Debt;
/// use payoff_engine::core::portfolio::DebtPortfolio;
/// use payoff_engine::core::strategy::Strategy;
/// use rust_decimal_macros::dec;
///
/// let portfolio = DebtPortfolio::new(
///     Strategy::Avalanche,
///     vec![
///         Debt::new("Mortgage", dec!(150_000), dec!(3.1), dec!(900)).unwrap(),
///         Debt::new("Card", dec!(2_000), dec!(21.9), dec!(60)).unwrap(),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(portfolio.names(), vec!["Card", "Mortgage"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PortfolioRecord")]
pub struct DebtPortfolio {
    strategy: Strategy,
    debts: Vec<Debt>,
}

/// Serialized shape of a portfolio. Deserializing goes through
/// [`DebtPortfolio::new`] so the same validation and ordering apply.
#[derive(Deserialize)]
struct PortfolioRecord {
    strategy: Strategy,
    debts: Vec<Debt>,
}

impl TryFrom<PortfolioRecord> for DebtPortfolio {
    type Error = PortfolioError;

    fn try_from(record: PortfolioRecord) -> Result<Self, Self::Error> {
        DebtPortfolio::new(record.strategy, record.debts)
    }
}

impl DebtPortfolio {
    pub fn new(strategy: Strategy, mut debts: Vec<Debt>) -> Result<Self, PortfolioError> {
        if debts.is_empty() {
            return Err(PortfolioError::Empty);
        }
        let mut seen = HashSet::new();
        for debt in &debts {
            if !seen.insert(debt.name.as_str()) {
                return Err(PortfolioError::DuplicateName(debt.name.clone()));
            }
        }
        strategy.prioritize(&mut debts);
        Ok(Self { strategy, debts })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Debts in priority order.
    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    /// Debt names in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.debts.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    pub fn total_principal(&self) -> Decimal {
        self.debts.iter().map(|d| d.principal).sum()
    }

    pub fn total_minimum_payments(&self) -> Decimal {
        self.debts.iter().map(|d| d.minimum_payment).sum()
    }
}
