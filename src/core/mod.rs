pub mod debt;
pub mod portfolio;
pub mod strategy;
