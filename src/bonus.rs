use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::assumptions::YearlyAssumptions;
use crate::decimal::{Money, Rate};
use crate::errors::Result;

/// deposits required in the first calendar year for it to earn a bonus
pub const MIN_FIRST_YEAR_DEPOSITS: usize = 9;

/// share of the bonus kept by the paying bank (art. 16.7.7)
pub const BONUS_FEE: Decimal = dec!(0.01);

/// bonus component accrued for one month (art. 14.2)
pub fn monthly_bonus_accrual(cumulative_deposit: Money, bonus_rate: Rate) -> Money {
    cumulative_deposit.apply_rate(bonus_rate) / dec!(12)
}

/// cumulative bonus after the bank's fee
pub fn bonus_net_of_fee(cumulative_bonus: Money) -> Money {
    cumulative_bonus * (Decimal::ONE - BONUS_FEE)
}

/// accrues the housing bonus over a deposit history
#[derive(Debug, Clone, Copy)]
pub struct BonusAccrualRule<'a> {
    assumptions: &'a YearlyAssumptions,
}

impl<'a> BonusAccrualRule<'a> {
    pub fn new(assumptions: &'a YearlyAssumptions) -> Self {
        Self { assumptions }
    }

    /// true when the first calendar year has too few deposits to earn a bonus
    pub fn skips_first_year(years: &[i32]) -> bool {
        match years.iter().min() {
            Some(first) => years.iter().filter(|y| *y == first).count() < MIN_FIRST_YEAR_DEPOSITS,
            None => false,
        }
    }

    /// bonus accrual for each deposit, given the running deposit total and
    /// the calendar year of every row
    pub fn accrue(&self, cumulative_deposits: &[Money], years: &[i32]) -> Result<Vec<Money>> {
        let skip_first = Self::skips_first_year(years);
        let first_year = years.iter().min().copied();
        if skip_first {
            debug!(year = ?first_year, "first year below deposit threshold, no bonus accrued");
        }

        cumulative_deposits
            .iter()
            .zip(years)
            .map(|(&total, &year)| {
                if skip_first && Some(year) == first_year {
                    Ok(Money::ZERO)
                } else {
                    let rate = self.assumptions.bonus_rate(year)?;
                    Ok(monthly_bonus_accrual(total, rate))
                }
            })
            .collect()
    }
}
