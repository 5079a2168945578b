pub mod compound;
pub mod schedule;

use crate::assumptions::YearlyAssumptions;
use crate::decimal::Rate;
use crate::errors::Result;
use crate::types::RateValue;

pub use compound::{annuity_due_future_value, CompoundInterestAccumulator, RateRun};
pub use schedule::{Bank, BankId, RateSchedule, ALIOR, PEKAO};

/// resolve each quoted rate against the inflation assumed for its year
pub fn resolve_rates(
    quoted: &[RateValue],
    years: &[i32],
    assumptions: &YearlyAssumptions,
) -> Result<Vec<Rate>> {
    quoted
        .iter()
        .zip(years)
        .map(|(rate, &year)| Ok(rate.resolve(assumptions.inflation(year)?)))
        .collect()
}
