use crate::core::debt::Debt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown strategy '{0}', expected 'avalanche' or 'snowball'")]
pub struct UnknownStrategy(pub String);

/// Prioritization rule for excess payments.
///
/// The rule is applied exactly once, when the portfolio is built. The
/// resulting order decides who receives leftover budget every month, even
/// if balances later cross over.
///
/// # Examples
///
/// ```
/// use payoff_engine::core::strategy::Strategy;
///
/// let strategy: Strategy = "Snowball".parse().unwrap();
/// assert_eq!(strategy, Strategy::Snowball);
/// assert_eq!(strategy.to_string(), "snowball");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest interest rate first.
    #[default]
    Avalanche,
    /// Lowest principal balance first.
    Snowball,
}

impl Strategy {
    /// Sort debts into payment priority order.
    ///
    /// The sort is stable: debts with equal keys keep their input order.
    pub fn prioritize(&self, debts: &mut [Debt]) {
        match self {
            Strategy::Avalanche => debts.sort_by(|a, b| b.rate.cmp(&a.rate)),
            Strategy::Snowball => debts.sort_by(|a, b| a.principal.cmp(&b.principal)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}
