use rust_decimal::Decimal;
use tracing::trace;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, SavingsError};

/// consecutive periods sharing the same deposit and annual rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRun {
    pub payment: Money,
    pub annual_rate: Rate,
    pub periods: usize,
}

/// compound interest on monthly deposits paid at the start of each period
///
/// Each deposit is credited first, then the whole balance earns one month
/// of the annual rate. The running balance is carried across rate changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundInterestAccumulator;

impl CompoundInterestAccumulator {
    pub fn new() -> Self {
        Self
    }

    /// running account value after each deposit
    pub fn accumulate(&self, deposits: &[Money], annual_rates: &[Rate]) -> Result<Vec<Money>> {
        let runs = self.runs(deposits, annual_rates)?;
        let mut values = Vec::with_capacity(deposits.len());
        let mut balance = Money::ZERO;

        for run in &runs {
            trace!(
                payment = %run.payment,
                rate = %run.annual_rate,
                periods = run.periods,
                opening = %balance,
                "compounding run"
            );
            balance = compound_run(balance, run, &mut values)?;
        }

        Ok(values)
    }

    /// partition the inputs into maximal runs of identical (deposit, rate)
    pub fn runs(&self, deposits: &[Money], annual_rates: &[Rate]) -> Result<Vec<RateRun>> {
        if deposits.is_empty() {
            return Err(SavingsError::invalid_input(
                "at least one deposit is required",
            ));
        }
        if deposits.len() != annual_rates.len() {
            return Err(SavingsError::invalid_input(format!(
                "{} deposits but {} rates",
                deposits.len(),
                annual_rates.len()
            )));
        }

        let mut runs: Vec<RateRun> = Vec::new();
        for (&payment, &annual_rate) in deposits.iter().zip(annual_rates) {
            match runs.last_mut() {
                Some(run) if run.payment == payment && run.annual_rate == annual_rate => {
                    run.periods += 1;
                }
                _ => runs.push(RateRun {
                    payment,
                    annual_rate,
                    periods: 1,
                }),
            }
        }

        Ok(runs)
    }
}

fn overflow(what: &str) -> SavingsError {
    SavingsError::CalculationError {
        message: format!("{what} overflowed"),
    }
}

/// walk one run period by period, pushing each value; returns the closing balance
fn compound_run(opening: Money, run: &RateRun, values: &mut Vec<Money>) -> Result<Money> {
    let mut balance = opening;
    if run.annual_rate.is_zero() {
        for _ in 0..run.periods {
            balance = balance
                .checked_add(run.payment)
                .ok_or_else(|| overflow("account value"))?;
            values.push(balance);
        }
    } else {
        let growth = Decimal::ONE + run.annual_rate.monthly_rate().as_decimal();
        for _ in 0..run.periods {
            balance = balance
                .checked_add(run.payment)
                .and_then(|b| b.checked_mul(growth))
                .ok_or_else(|| overflow("account value"))?;
            values.push(balance);
        }
    }
    Ok(balance)
}

/// closed-form future value of an annuity-due with an opening balance
///
/// `pv(1+r)^k + pmt(1+r)((1+r)^k - 1)/r` with `r` the monthly rate, or
/// `pv + pmt*k` when the rate is zero.
pub fn annuity_due_future_value(
    present_value: Money,
    payment: Money,
    annual_rate: Rate,
    periods: u32,
) -> Result<Money> {
    let pv = present_value.as_decimal();
    let pmt = payment.as_decimal();

    if annual_rate.is_zero() {
        return pmt
            .checked_mul(Decimal::from(periods))
            .and_then(|paid| pv.checked_add(paid))
            .map(Money::from_decimal)
            .ok_or_else(|| overflow("future value"));
    }

    let r = annual_rate.monthly_rate().as_decimal();
    let base = Decimal::ONE + r;
    // calculate (1 + r)^n using iteration
    let mut compound_factor = Decimal::ONE;
    for _ in 0..periods {
        compound_factor = compound_factor
            .checked_mul(base)
            .ok_or_else(|| overflow("compound factor"))?;
    }

    let grown = pv.checked_mul(compound_factor);
    let annuity = pmt
        .checked_mul(base)
        .and_then(|p| p.checked_mul(compound_factor - Decimal::ONE))
        .and_then(|p| p.checked_div(r));
    grown
        .zip(annuity)
        .and_then(|(g, a)| g.checked_add(a))
        .map(Money::from_decimal)
        .ok_or_else(|| overflow("future value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn recurrence(deposits: &[Money], annual_rates: &[Rate]) -> Vec<Money> {
        let mut v = Money::ZERO;
        deposits
            .iter()
            .zip(annual_rates)
            .map(|(&pmt, rate)| {
                v = (v + pmt) * (Decimal::ONE + rate.as_decimal() / dec!(12));
                v
            })
            .collect()
    }

    #[test]
    fn test_constant_run_matches_recurrence() {
        let deposits = vec![Money::from_major(1_000); 6];
        let rates = vec![Rate::from_percentage(3); 6];

        let values = CompoundInterestAccumulator::new()
            .accumulate(&deposits, &rates)
            .unwrap();

        let mut v = Money::ZERO;
        let mut expected = Vec::new();
        for _ in 0..6 {
            v = (v + Money::from_major(1_000)) * dec!(1.0025);
            expected.push(v);
        }
        assert_eq!(values, expected);
        assert_eq!(values[0], Money::from_str_exact("1002.5").unwrap());
    }

    #[test]
    fn test_rate_change_mid_sequence() {
        let deposits = vec![Money::from_major(1_000); 6];
        let mut rates = vec![Rate::from_percentage(3); 3];
        rates.extend(vec![Rate::from_percentage(2); 3]);

        let values = CompoundInterestAccumulator::new()
            .accumulate(&deposits, &rates)
            .unwrap();

        assert_eq!(values.len(), 6);
        assert_eq!(values, recurrence(&deposits, &rates));
    }

    #[test]
    fn test_payment_change_starts_new_run() {
        let deposits = vec![
            Money::from_major(500),
            Money::from_major(500),
            Money::from_major(800),
            Money::from_major(800),
        ];
        let rates = vec![Rate::from_percentage(4); 4];
        let accumulator = CompoundInterestAccumulator::new();

        let runs = accumulator.runs(&deposits, &rates).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].periods, 2);
        assert_eq!(runs[1].payment, Money::from_major(800));

        assert_eq!(
            accumulator.accumulate(&deposits, &rates).unwrap(),
            recurrence(&deposits, &rates)
        );
    }

    #[test]
    fn test_runs_cover_every_period() {
        let deposits = vec![Money::from_major(1_000); 10];
        let rates: Vec<Rate> = (0..10)
            .map(|i| if i < 6 { Rate::from_percentage(5) } else { Rate::from_percentage(3) })
            .collect();

        let runs = CompoundInterestAccumulator::new().runs(&deposits, &rates).unwrap();
        let periods: Vec<usize> = runs.iter().map(|r| r.periods).collect();
        assert_eq!(periods, vec![6, 4]);
    }

    #[test]
    fn test_zero_rate_is_additive() {
        let deposits = vec![Money::from_major(250); 4];
        let rates = vec![Rate::ZERO; 4];

        let values = CompoundInterestAccumulator::new()
            .accumulate(&deposits, &rates)
            .unwrap();

        assert_eq!(
            values,
            vec![
                Money::from_major(250),
                Money::from_major(500),
                Money::from_major(750),
                Money::from_major(1_000),
            ]
        );
    }

    #[test]
    fn test_invalid_inputs() {
        let accumulator = CompoundInterestAccumulator::new();
        assert!(matches!(
            accumulator.accumulate(&[], &[]),
            Err(SavingsError::InvalidInput { .. })
        ));
        assert!(matches!(
            accumulator.accumulate(&[Money::from_major(1)], &[]),
            Err(SavingsError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_closed_form_agrees_with_recurrence() {
        let deposits = vec![Money::from_major(1_000); 24];
        let rates = vec![Rate::from_percentage(5); 24];
        let values = CompoundInterestAccumulator::new()
            .accumulate(&deposits, &rates)
            .unwrap();

        for k in [1u32, 6, 12, 24] {
            let closed = annuity_due_future_value(
                Money::ZERO,
                Money::from_major(1_000),
                Rate::from_percentage(5),
                k,
            );
            let diff = (closed.unwrap() - values[k as usize - 1]).as_decimal().abs();
            assert!(diff < dec!(0.000001), "k={k} diff={diff}");
        }
    }

    #[test]
    fn test_closed_form_with_opening_balance() {
        let fv = annuity_due_future_value(
            Money::from_major(10_000),
            Money::ZERO,
            Rate::from_percentage(12),
            12,
        )
        .unwrap();
        assert_eq!(fv.round_dp(2), Money::from_str_exact("11268.25").unwrap());

        let flat = annuity_due_future_value(
            Money::from_major(100),
            Money::from_major(50),
            Rate::ZERO,
            3,
        )
        .unwrap();
        assert_eq!(flat, Money::from_major(250));
    }

    #[test]
    fn test_runaway_rate_is_an_error() {
        // 1/6 of 10000% inflation, the way a fraction-of-inflation quote resolves
        let deposits = vec![Money::from_major(1_000); 1_200];
        let rates = vec![Rate::from_ratio(100, 6); 1_200];

        let err = CompoundInterestAccumulator::new()
            .accumulate(&deposits, &rates)
            .unwrap_err();
        assert!(matches!(err, SavingsError::CalculationError { .. }));

        let closed = annuity_due_future_value(
            Money::ZERO,
            Money::from_major(1_000),
            Rate::from_ratio(100, 6),
            1_200,
        );
        assert!(matches!(closed, Err(SavingsError::CalculationError { .. })));
    }

    #[test]
    fn test_high_rate_within_range_still_compounds() {
        let deposits = vec![Money::from_major(1_000); 120];
        let rates = vec![Rate::from_percentage(300); 120];

        let values = CompoundInterestAccumulator::new()
            .accumulate(&deposits, &rates)
            .unwrap();
        assert_eq!(values, recurrence(&deposits, &rates));
    }
}
