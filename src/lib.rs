//! # payoff-engine
//!
//! Multi-debt payoff simulator.
//!
//! Given a set of debts, a fixed monthly budget and a prioritization
//! strategy, this engine produces a month-by-month payment schedule until
//! every balance reaches zero. Interest compounds daily; any budget left
//! after the minimums goes to the highest-priority open debt.
//!
//! ## Architecture
//!
//! - **core**: Debts, the avalanche/snowball strategy, and portfolios
//! - **engine**: Interest accrual, payment allocation, the amortization loop and its schedule
//! - **io**: CSV input loading and schedule/summary/JSON output
//! - **simulation**: Random portfolio generation for testing and benchmarks

pub mod core;
pub mod engine;
pub mod io;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::debt::Debt;
    pub use crate::core::portfolio::DebtPortfolio;
    pub use crate::core::strategy::Strategy;
    pub use crate::engine::amortization::{
        AmortizationEngine, SimulationConfig, SimulationError, SimulationOutcome, SimulationStatus,
    };
    pub use crate::engine::schedule::{PaymentSchedule, ScheduleRow, ScheduleTotals};
    pub use crate::io::loader::load_input;
}
