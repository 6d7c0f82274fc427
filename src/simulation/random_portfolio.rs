//! Random debt portfolios for stress testing and benchmarks.

use crate::core::debt::Debt;
use crate::core::portfolio::{DebtPortfolio, PortfolioError};
use crate::core::strategy::Strategy;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random portfolio.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// Number of debts.
    pub debt_count: usize,
    pub strategy: Strategy,
    /// Smallest and largest starting balance.
    pub min_principal: Decimal,
    pub max_principal: Decimal,
    /// Annual rate range, in percent.
    pub min_rate: Decimal,
    pub max_rate: Decimal,
    /// Minimum payment as a share of the starting balance.
    pub minimum_payment_ratio: Decimal,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            debt_count: 5,
            strategy: Strategy::Avalanche,
            min_principal: Decimal::from(500),
            max_principal: Decimal::from(25_000),
            min_rate: Decimal::from(2),
            max_rate: Decimal::from(25),
            minimum_payment_ratio: Decimal::new(2, 2),
        }
    }
}

fn random_between<R: Rng>(rng: &mut R, low: Decimal, high: Decimal) -> Decimal {
    if high <= low {
        return low;
    }
    let fraction = Decimal::from(rng.gen_range(0u32..=10_000)) / Decimal::from(10_000);
    low + (high - low) * fraction
}

/// Generate a random portfolio. Names are `DEBT-000`, `DEBT-001`, ...
pub fn generate_random_portfolio(config: &PortfolioConfig) -> Result<DebtPortfolio, PortfolioError> {
    let mut rng = rand::thread_rng();
    let mut debts = Vec::with_capacity(config.debt_count);

    for i in 0..config.debt_count {
        let principal = random_between(&mut rng, config.min_principal, config.max_principal).round_dp(2);
        let rate = random_between(&mut rng, config.min_rate, config.max_rate).round_dp(2);
        let minimum = (principal * config.minimum_payment_ratio)
            .round_dp(2)
            .max(Decimal::ONE);

        // Bounds come from the config; only a negative range could fail here.
        if let Ok(debt) = Debt::new(format!("DEBT-{:03}", i), principal, rate, minimum) {
            debts.push(debt);
        }
    }

    DebtPortfolio::new(config.strategy, debts)
}

/// A budget that covers all minimums plus `headroom` (e.g. `0.25` = 25% extra).
pub fn comfortable_budget(portfolio: &DebtPortfolio, headroom: Decimal) -> Decimal {
    (portfolio.total_minimum_payments() * (Decimal::ONE + headroom)).round_dp(2)
}
