use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors arising when constructing a [`Debt`].
#[derive(Debug, Error, PartialEq)]
pub enum DebtError {
    #[error("debt name must not be empty")]
    EmptyName,
    #[error("principal for '{name}' must not be negative, got {value}")]
    NegativePrincipal { name: String, value: Decimal },
    #[error("rate for '{name}' must not be negative, got {value}")]
    NegativeRate { name: String, value: Decimal },
    #[error("minimum payment for '{name}' must not be negative, got {value}")]
    NegativeMinimumPayment { name: String, value: Decimal },
}

/// A single liability being paid down: a loan, a credit card, etc.
///
/// `principal` is the outstanding balance and is mutated month by month
/// while the schedule is simulated. `rate` is the nominal annual rate as a
/// percentage (`4.5` means 4.5%).
///
/// `adjusted_payment` and `interest_accrued` describe the most recently
/// simulated month only; both are recomputed every month.
///
/// # Examples
///
/// ```
/// use payoff_engine::core::debt::Debt;
/// use rust_decimal_macros::dec;
///
/// let debt = Debt::new("Car Loan", dec!(12900), dec!(6.5), dec!(450)).unwrap();
/// assert_eq!(debt.principal, dec!(12900));
/// assert!(!debt.is_paid_off());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Unique label, used as the column header in the schedule.
    pub name: String,
    /// Outstanding balance. Never negative.
    pub principal: Decimal,
    /// Nominal annual interest rate, in percent.
    pub rate: Decimal,
    /// Mandated monthly minimum. Forced to zero once the debt is paid off.
    pub minimum_payment: Decimal,
    /// Amount actually paid in the last simulated month.
    #[serde(default)]
    pub adjusted_payment: Decimal,
    /// Interest added in the last simulated month.
    #[serde(default)]
    pub interest_accrued: Decimal,
}

impl Debt {
    /// Create a new debt with no payment history.
    pub fn new(
        name: impl Into<String>,
        principal: Decimal,
        rate: Decimal,
        minimum_payment: Decimal,
    ) -> Result<Self, DebtError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DebtError::EmptyName);
        }
        if principal < Decimal::ZERO {
            return Err(DebtError::NegativePrincipal {
                name,
                value: principal,
            });
        }
        if rate < Decimal::ZERO {
            return Err(DebtError::NegativeRate { name, value: rate });
        }
        if minimum_payment < Decimal::ZERO {
            return Err(DebtError::NegativeMinimumPayment {
                name,
                value: minimum_payment,
            });
        }
        Ok(Self {
            name,
            principal,
            rate,
            minimum_payment,
            adjusted_payment: Decimal::ZERO,
            interest_accrued: Decimal::ZERO,
        })
    }

    pub fn is_paid_off(&self) -> bool {
        self.principal <= Decimal::ZERO
    }
}

impl fmt::Display for Debt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: balance {}, rate {}%, minimum {}",
            self.name, self.principal, self.rate, self.minimum_payment
        )
    }
}
