//! Available-balance derivation.
//!
//! Two distinct balances exist and must not be conflated: the
//! campaign-scoped balance charges a single campaign's spend against its
//! account's limit, while the account-scoped balance charges the whole
//! account's spend. A negative result means overspend; it is flagged for
//! display, never treated as an error.

use rust_decimal::Decimal;

/// Ad account spend limit minus one campaign's spend
pub fn campaign_scoped_balance(spend_limit: Decimal, campaign_spend: Decimal) -> Decimal {
    spend_limit - campaign_spend
}

/// Ad account spend limit minus the account's total spend
pub fn account_scoped_balance(spend_limit: Decimal, total_spend: Decimal) -> Decimal {
    spend_limit - total_spend
}

pub fn is_overspent(balance: Decimal) -> bool {
    balance < Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn overspend_goes_negative_without_error() {
        let balance = campaign_scoped_balance(dec!(1000), dec!(1200));
        assert_eq!(balance, dec!(-200));
        assert!(is_overspent(balance));
    }

    #[test]
    fn under_limit_is_positive() {
        let balance = campaign_scoped_balance(dec!(1000), dec!(300));
        assert_eq!(balance, dec!(700));
        assert!(!is_overspent(balance));
    }

    #[test]
    fn zero_balance_is_not_overspent() {
        assert!(!is_overspent(account_scoped_balance(dec!(500), dec!(500))));
    }

    #[test]
    fn the_two_scopes_diverge() {
        // Same account, one campaign of several: the campaign-scoped
        // balance and account-scoped balance are different quantities.
        let limit = dec!(1000);
        let campaign_spend = dec!(200);
        let account_total_spend = dec!(700);

        assert_eq!(campaign_scoped_balance(limit, campaign_spend), dec!(800));
        assert_eq!(account_scoped_balance(limit, account_total_spend), dec!(300));
    }
}
