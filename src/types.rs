use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Rate;

/// interest rate quoted by a bank for a single deposit
///
/// Equality is kind-sensitive: `Absolute(3%)` never equals a
/// `FractionOfInflation` even when both resolve to the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "magnitude", rename_all = "snake_case")]
pub enum RateValue {
    /// fixed annual rate
    Absolute(Rate),
    /// annual rate expressed as a fraction of that year's inflation
    FractionOfInflation(Rate),
}

impl RateValue {
    /// absolute rate from a percentage, e.g. 5 for 5%
    pub fn from_percentage(p: u32) -> Self {
        RateValue::Absolute(Rate::from_percentage(p))
    }

    /// fraction of inflation, e.g. `inflation_share(1, 7)` for 1/7 of inflation
    pub fn inflation_share(numerator: u32, denominator: u32) -> Self {
        RateValue::FractionOfInflation(Rate::from_ratio(numerator, denominator))
    }

    /// effective annual rate given the inflation of the period
    pub fn resolve(&self, inflation: Rate) -> Rate {
        match self {
            RateValue::Absolute(r) => *r,
            RateValue::FractionOfInflation(share) => share.scaled_by(inflation),
        }
    }
}

impl Default for RateValue {
    fn default() -> Self {
        RateValue::Absolute(Rate::ZERO)
    }
}

impl fmt::Display for RateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateValue::Absolute(r) => write!(f, "{}", r),
            RateValue::FractionOfInflation(r) => write!(f, "{} of inflation", r),
        }
    }
}

/// semantic column groups of the ledgers, used by presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnGroup {
    Deposits,
    BankInterest,
    Bonus,
    Totals,
}

impl ColumnGroup {
    pub const ALL: [ColumnGroup; 4] = [
        ColumnGroup::Deposits,
        ColumnGroup::BankInterest,
        ColumnGroup::Bonus,
        ColumnGroup::Totals,
    ];

    /// field names of `MonthlyRow` belonging to this group
    pub fn monthly_fields(&self) -> &'static [&'static str] {
        match self {
            ColumnGroup::Deposits => &["month", "year", "deposit", "cumulative_deposit"],
            ColumnGroup::BankInterest => &["bank_rate", "monthly_interest", "cumulative_interest"],
            ColumnGroup::Bonus => &["bonus_accrual", "cumulative_bonus", "bonus_net_of_fee"],
            ColumnGroup::Totals => &["total_with_bonus", "grand_total"],
        }
    }

    /// field names of `YearlyRow` belonging to this group
    pub fn yearly_fields(&self) -> &'static [&'static str] {
        match self {
            ColumnGroup::Deposits => &["cumulative_deposit"],
            ColumnGroup::BankInterest => &["cumulative_interest"],
            ColumnGroup::Bonus => &["cumulative_bonus", "bonus_net_of_fee"],
            ColumnGroup::Totals => &["grand_total"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_resolve_absolute_ignores_inflation() {
        let rate = RateValue::from_percentage(5);
        assert_eq!(rate.resolve(Rate::from_bps(960)), Rate::from_percentage(5));
    }

    #[test]
    fn test_resolve_fraction_of_inflation() {
        let rate = RateValue::inflation_share(1, 4);
        assert_eq!(rate.resolve(Rate::from_percentage(8)).as_decimal(), dec!(0.02));
    }

    #[test]
    fn test_equality_is_kind_sensitive() {
        let absolute = RateValue::Absolute(Rate::from_percentage(3));
        let relative = RateValue::FractionOfInflation(Rate::from_percentage(3));
        assert_ne!(absolute, relative);
        assert_eq!(absolute, RateValue::from_percentage(3));
        // same number once resolved at 100% inflation, still different values
        assert_eq!(absolute.resolve(Rate::ONE), relative.resolve(Rate::ONE));
    }

    #[test]
    fn test_display() {
        assert_eq!(RateValue::from_percentage(5).to_string(), "5.00%");
        assert_eq!(
            RateValue::inflation_share(1, 4).to_string(),
            "25.00% of inflation"
        );
    }

    #[test]
    fn test_column_groups_cover_distinct_fields() {
        let mut fields: Vec<&str> = ColumnGroup::ALL
            .iter()
            .flat_map(|g| g.monthly_fields().iter().copied())
            .collect();
        let count = fields.len();
        fields.sort_unstable();
        fields.dedup();
        assert_eq!(fields.len(), count);
    }
}
