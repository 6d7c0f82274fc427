pub mod amortization;
pub mod interest;
pub mod payment;
pub mod schedule;
