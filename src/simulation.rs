use chrono::{Datelike, Months, NaiveDate};
use tracing::{debug, info_span};

use crate::assumptions::YearlyAssumptions;
use crate::bonus::{bonus_net_of_fee, BonusAccrualRule};
use crate::decimal::Money;
use crate::errors::{Result, SavingsError};
use crate::interest::{resolve_rates, Bank, CompoundInterestAccumulator};
use crate::ledger::{yearly_rollup, MonthlyRow, Simulation};
use crate::types::RateValue;

/// `count` consecutive month-begin dates
///
/// A start date past the first of the month rolls forward to the next
/// month's first day.
pub fn deposit_dates(start: NaiveDate, count: u32) -> Result<Vec<NaiveDate>> {
    let month_start = start.with_day(1).ok_or_else(|| SavingsError::InvalidDate {
        message: format!("cannot take month start of {start}"),
    })?;
    let first = if start.day() == 1 {
        month_start
    } else {
        month_start
            .checked_add_months(Months::new(1))
            .ok_or_else(|| SavingsError::InvalidDate {
                message: format!("no month after {start}"),
            })?
    };

    (0..count)
        .map(|i| {
            first
                .checked_add_months(Months::new(i))
                .ok_or_else(|| SavingsError::InvalidDate {
                    message: format!("deposit {} overflows the calendar", i + 1),
                })
        })
        .collect()
}

/// runs a housing savings account over a series of equal monthly deposits
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationEngine {
    accumulator: CompoundInterestAccumulator,
}

impl SimulationEngine {
    pub fn new() -> Self {
        Self {
            accumulator: CompoundInterestAccumulator::new(),
        }
    }

    /// simulate `num_payments` deposits of `monthly_payment` starting at `start_date`
    ///
    /// Without a bank the account earns no interest.
    pub fn simulate(
        &self,
        start_date: NaiveDate,
        num_payments: u32,
        monthly_payment: Money,
        assumptions: &YearlyAssumptions,
        bank: Option<&Bank>,
    ) -> Result<Simulation> {
        let span = info_span!(
            "simulate",
            start = %start_date,
            payments = num_payments,
            bank = bank.map(|b| b.name).unwrap_or("none")
        );
        let _guard = span.enter();

        if num_payments == 0 {
            return Err(SavingsError::invalid_input("number of deposits must be positive"));
        }
        if !monthly_payment.is_positive() {
            return Err(SavingsError::invalid_input(format!(
                "deposit amount must be positive, got {monthly_payment}"
            )));
        }

        let n = num_payments as usize;
        let dates = deposit_dates(start_date, num_payments)?;
        let years: Vec<i32> = dates.iter().map(|d| d.year()).collect();
        let deposits = vec![monthly_payment; n];
        let cumulative_deposits = deposits
            .iter()
            .scan(Money::ZERO, |total, &d| {
                *total = total.checked_add(d)?;
                Some(*total)
            })
            .collect::<Vec<Money>>();
        if cumulative_deposits.len() != n {
            return Err(SavingsError::CalculationError {
                message: "cumulative deposits overflowed".to_string(),
            });
        }

        let accruals = BonusAccrualRule::new(assumptions).accrue(&cumulative_deposits, &years)?;

        let quoted = match bank {
            Some(bank) => bank.rates(&dates),
            None => vec![RateValue::default(); n],
        };
        if quoted.len() != n {
            return Err(SavingsError::InvalidConfiguration {
                message: format!(
                    "rate schedule returned {} rates for {} deposits",
                    quoted.len(),
                    n
                ),
            });
        }
        let rates = resolve_rates(&quoted, &years, assumptions)?;
        let values = self.accumulator.accumulate(&deposits, &rates)?;

        let mut monthly = Vec::with_capacity(n);
        let mut cumulative_bonus = Money::ZERO;
        let mut previous_interest = Money::ZERO;
        for i in 0..n {
            cumulative_bonus += accruals[i];
            let cumulative_interest = values[i] - cumulative_deposits[i];
            let net_bonus = bonus_net_of_fee(cumulative_bonus);

            monthly.push(MonthlyRow {
                sequence_no: i as u32 + 1,
                month: dates[i],
                year: years[i],
                deposit: deposits[i],
                cumulative_deposit: cumulative_deposits[i],
                bonus_accrual: accruals[i],
                cumulative_bonus,
                bonus_net_of_fee: net_bonus,
                bank_rate: rates[i],
                account_value_with_interest: values[i],
                cumulative_interest,
                monthly_interest: cumulative_interest - previous_interest,
                total_with_bonus: cumulative_deposits[i] + cumulative_bonus,
                grand_total: cumulative_deposits[i] + cumulative_interest + net_bonus,
            });
            previous_interest = cumulative_interest;
        }

        let yearly = yearly_rollup(&monthly);
        debug!(
            rows = monthly.len(),
            years = yearly.len(),
            closing = %monthly.last().map(|r| r.grand_total).unwrap_or_default(),
            "simulation finished"
        );

        Ok(Simulation {
            bank: bank.map(|b| b.name.to_string()),
            monthly,
            yearly,
        })
    }
}
