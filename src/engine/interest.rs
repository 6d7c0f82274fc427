//! Daily-compounded interest accrual and the calendar arithmetic it needs.
//!
//! Interest for a month is computed in a single step as
//! `principal * (1 + daily_rate) ^ days_in_month`, where
//! `daily_rate = (rate / 100) / days_in_year`. Leap years use 366 days.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// 366 for dates in a leap year, 365 otherwise.
pub fn days_in_year(date: NaiveDate) -> u32 {
    if is_leap_year(date.year()) {
        366
    } else {
        365
    }
}

/// Number of days in the calendar month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(date.year()) => 29,
        _ => 28,
    }
}

/// Last calendar day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date)).unwrap_or(date)
}

/// Compound `principal` daily over the month containing `date`.
///
/// Returns `(new_principal, interest)` where
/// `interest = new_principal - principal`, or `None` if the compounded
/// balance does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use payoff_engine::engine::interest::compound_daily;
/// use rust_decimal_macros::dec;
///
/// let date = NaiveDate::from_ymd_opt(2020, 11, 20).unwrap();
/// let (balance, interest) = compound_daily(date, dec!(10000), dec!(4.5)).unwrap();
/// assert_eq!(balance.round_dp(2), dec!(10036.95));
/// assert_eq!(interest.round_dp(2), dec!(36.95));
/// ```
pub fn compound_daily(date: NaiveDate, principal: Decimal, rate: Decimal) -> Option<(Decimal, Decimal)> {
    let daily_rate = (rate / Decimal::ONE_HUNDRED) / Decimal::from(days_in_year(date));
    let factor = Decimal::ONE
        .checked_add(daily_rate)?
        .checked_powi(i64::from(days_in_month(date)))?;
    let new_principal = principal.checked_mul(factor)?;
    Some((new_principal, new_principal - principal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_compound_daily_leap_year() {
        let (principal, interest) = compound_daily(ymd(2020, 11, 20), dec!(10000), dec!(4.5)).unwrap();
        assert_abs_diff_eq!(principal.to_f64().unwrap(), 10036.95, epsilon = 0.1);
        assert_abs_diff_eq!(interest.to_f64().unwrap(), 36.95, epsilon = 0.1);
    }

    #[test]
    fn test_compound_daily_common_year() {
        let (principal, interest) = compound_daily(ymd(2021, 11, 20), dec!(10000), dec!(4.5)).unwrap();
        assert_abs_diff_eq!(principal.to_f64().unwrap(), 10037.05, epsilon = 0.1);
        assert_abs_diff_eq!(interest.to_f64().unwrap(), 37.05, epsilon = 0.1);
    }

    #[test]
    fn test_interest_is_balance_difference() {
        let principal = dec!(2737.64);
        let (new_principal, interest) = compound_daily(ymd(2020, 6, 1), principal, dec!(5.8)).unwrap();
        assert_eq!(new_principal - principal, interest);
        assert!(interest > Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_accrues_nothing() {
        let (principal, interest) = compound_daily(ymd(2023, 3, 15), dec!(500), Decimal::ZERO).unwrap();
        assert_eq!(principal, dec!(500));
        assert_eq!(interest, Decimal::ZERO);
    }

    #[test]
    fn test_zero_principal_accrues_nothing() {
        let (principal, interest) = compound_daily(ymd(2023, 3, 15), Decimal::ZERO, dec!(24.99)).unwrap();
        assert_eq!(principal, Decimal::ZERO);
        assert_eq!(interest, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_rate_is_none() {
        assert_eq!(compound_daily(ymd(2024, 1, 1), dec!(1000), dec!(100_000_000)), None);
    }

    #[test]
    fn test_overflowing_balance_is_none() {
        let huge = Decimal::MAX / dec!(1.01);
        assert_eq!(compound_daily(ymd(2024, 1, 1), huge, dec!(100)), None);
        assert!(compound_daily(ymd(2024, 1, 1), huge, Decimal::ZERO).is_some());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(ymd(2020, 2, 10)), 29);
        assert_eq!(days_in_month(ymd(2021, 2, 10)), 28);
        assert_eq!(days_in_month(ymd(1900, 2, 1)), 28);
        assert_eq!(days_in_month(ymd(2000, 2, 1)), 29);
        assert_eq!(days_in_month(ymd(2021, 4, 30)), 30);
        assert_eq!(days_in_month(ymd(2021, 12, 1)), 31);
    }

    #[test]
    fn test_days_in_year() {
        assert_eq!(days_in_year(ymd(2020, 1, 1)), 366);
        assert_eq!(days_in_year(ymd(2021, 1, 1)), 365);
        assert_eq!(days_in_year(ymd(2100, 6, 1)), 365);
    }

    #[test]
    fn test_month_end() {
        assert_eq!(month_end(ymd(2020, 5, 8)), ymd(2020, 5, 31));
        assert_eq!(month_end(ymd(2020, 2, 1)), ymd(2020, 2, 29));
        assert_eq!(month_end(ymd(2021, 11, 30)), ymd(2021, 11, 30));
    }
}
