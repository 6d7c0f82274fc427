//! Payment allocation: minimums first, then greedy excess in priority order.

use crate::core::debt::Debt;
use rust_decimal::Decimal;

/// Pay a minimum against a balance, never paying more than is owed.
///
/// Returns `(remaining_principal, payment_made)`.
pub fn pay_minimums(principal: Decimal, payment: Decimal) -> (Decimal, Decimal) {
    let payment = payment.min(principal);
    (principal - payment, payment)
}

/// Apply leftover budget to one debt on top of the amount already paid.
///
/// Returns `(remaining_principal, adjusted_payment, remaining_budget)`.
/// The excess is capped at the outstanding balance; whatever is not needed
/// carries forward to the next debt.
pub fn pay_excess(principal: Decimal, minimum: Decimal, remainder: Decimal) -> (Decimal, Decimal, Decimal) {
    let excess = remainder.min(principal);
    (principal - excess, minimum + excess, remainder - excess)
}

/// Force the minimum of every paid-off debt to zero so it never draws funds.
pub fn release_paid_off(debts: &mut [Debt]) {
    for debt in debts.iter_mut().filter(|d| d.is_paid_off()) {
        debt.minimum_payment = Decimal::ZERO;
    }
}

/// Pay every debt's minimum, recording it as the month's adjusted payment.
pub fn apply_minimums(debts: &mut [Debt]) {
    for debt in debts.iter_mut() {
        let (principal, payment) = pay_minimums(debt.principal, debt.minimum_payment);
        debt.principal = principal;
        debt.adjusted_payment = payment;
    }
}

/// Walk debts in priority order, handing `remainder` to each open balance
/// until it runs out. Returns whatever could not be placed.
pub fn distribute_excess(debts: &mut [Debt], mut remainder: Decimal) -> Decimal {
    for debt in debts.iter_mut() {
        if remainder <= Decimal::ZERO {
            break;
        }
        if debt.is_paid_off() {
            continue;
        }
        let (principal, adjusted, left) = pay_excess(debt.principal, debt.adjusted_payment, remainder);
        debt.principal = principal;
        debt.adjusted_payment = adjusted;
        remainder = left;
    }
    remainder
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pay_minimums() {
        assert_eq!(pay_minimums(dec!(12), dec!(2)), (dec!(10), dec!(2)));
        assert_eq!(pay_minimums(dec!(10), dec!(10)), (dec!(0), dec!(10)));
        assert_eq!(pay_minimums(dec!(10), dec!(20)), (dec!(0), dec!(10)));
    }

    #[test]
    fn test_pay_minimums_on_zero_balance() {
        assert_eq!(pay_minimums(Decimal::ZERO, Decimal::ZERO), (Decimal::ZERO, Decimal::ZERO));
    }

    #[test]
    fn test_pay_excess() {
        assert_eq!(pay_excess(dec!(10), dec!(2), dec!(4)), (dec!(6), dec!(6), dec!(0)));
        assert_eq!(pay_excess(dec!(10), dec!(2), dec!(10)), (dec!(0), dec!(12), dec!(0)));
        assert_eq!(pay_excess(dec!(10), dec!(2), dec!(12)), (dec!(0), dec!(12), dec!(2)));
    }

    fn debt(name: &str, principal: Decimal, minimum: Decimal) -> Debt {
        Debt::new(name, principal, dec!(5), minimum).unwrap()
    }

    #[test]
    fn test_release_paid_off() {
        let mut debts = vec![debt("open", dec!(50), dec!(10)), debt("closed", dec!(0), dec!(25))];
        release_paid_off(&mut debts);
        assert_eq!(debts[0].minimum_payment, dec!(10));
        assert_eq!(debts[1].minimum_payment, Decimal::ZERO);
    }

    #[test]
    fn test_apply_minimums_clamps_each_debt() {
        let mut debts = vec![debt("a", dec!(100), dec!(30)), debt("b", dec!(20), dec!(30))];
        apply_minimums(&mut debts);
        assert_eq!(debts[0].principal, dec!(70));
        assert_eq!(debts[0].adjusted_payment, dec!(30));
        assert_eq!(debts[1].principal, Decimal::ZERO);
        assert_eq!(debts[1].adjusted_payment, dec!(20));
    }

    #[test]
    fn test_distribute_excess_in_priority_order() {
        let mut debts = vec![
            debt("first", dec!(40), dec!(10)),
            debt("second", dec!(100), dec!(10)),
            debt("third", dec!(100), dec!(10)),
        ];
        apply_minimums(&mut debts);
        let left = distribute_excess(&mut debts, dec!(50));

        assert_eq!(left, Decimal::ZERO);
        // first is cleared, second takes the rest, third gets only its minimum
        assert_eq!(debts[0].principal, Decimal::ZERO);
        assert_eq!(debts[0].adjusted_payment, dec!(40));
        assert_eq!(debts[1].principal, dec!(70));
        assert_eq!(debts[1].adjusted_payment, dec!(30));
        assert_eq!(debts[2].principal, dec!(90));
        assert_eq!(debts[2].adjusted_payment, dec!(10));
    }

    #[test]
    fn test_distribute_excess_skips_paid_off() {
        let mut debts = vec![debt("done", dec!(0), dec!(0)), debt("open", dec!(100), dec!(0))];
        let left = distribute_excess(&mut debts, dec!(25));
        assert_eq!(left, Decimal::ZERO);
        assert_eq!(debts[0].adjusted_payment, Decimal::ZERO);
        assert_eq!(debts[1].adjusted_payment, dec!(25));
    }

    #[test]
    fn test_distribute_excess_returns_unplaced_funds() {
        let mut debts = vec![debt("a", dec!(5), dec!(0)), debt("b", dec!(5), dec!(0))];
        let left = distribute_excess(&mut debts, dec!(25));
        assert_eq!(left, dec!(15));
        assert!(debts.iter().all(|d| d.is_paid_off()));
    }
}
