use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Result, SavingsError};
use crate::types::RateValue;

/// maps the ordered deposit dates to the rate paid on each deposit
pub type RateSchedule = fn(&[NaiveDate]) -> Vec<RateValue>;

/// a bank offering the housing savings account
#[derive(Clone, Copy)]
pub struct Bank {
    pub name: &'static str,
    pub rate_schedule: RateSchedule,
}

impl Bank {
    /// rates for each of the given deposit dates
    pub fn rates(&self, dates: &[NaiveDate]) -> Vec<RateValue> {
        (self.rate_schedule)(dates)
    }
}

impl fmt::Debug for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bank").field("name", &self.name).finish()
    }
}

impl PartialEq for Bank {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Pekao conditions as published on 2023-07-29
///
/// - accounts opened by 2023-10-31: 5% for the first 6 deposits
/// - then 3% until 2024-07-08 inclusive
/// - then 76% of the standard rate, assumed to be 1/7 of inflation
pub const PEKAO: Bank = Bank {
    name: "Pekao",
    rate_schedule: pekao_rates,
};

/// Alior conditions as published on 2023-07-29
///
/// - promotional 5% until 2023-12-31
/// - then 2%, assumed to be 1/6 of inflation
pub const ALIOR: Bank = Bank {
    name: "Alior",
    rate_schedule: alior_rates,
};

/// serializable bank selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankId {
    Pekao,
    Alior,
}

impl BankId {
    pub const ALL: [BankId; 2] = [BankId::Pekao, BankId::Alior];

    pub fn bank(&self) -> Bank {
        match self {
            BankId::Pekao => PEKAO,
            BankId::Alior => ALIOR,
        }
    }

    /// case-insensitive lookup by bank name
    pub fn from_name(name: &str) -> Result<Self> {
        BankId::ALL
            .into_iter()
            .find(|id| id.bank().name.eq_ignore_ascii_case(name))
            .ok_or_else(|| SavingsError::InvalidConfiguration {
                message: format!("unknown bank: {name}"),
            })
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn tiered(tiers: &[(RateValue, usize)]) -> Vec<RateValue> {
    tiers
        .iter()
        .flat_map(|&(rate, count)| std::iter::repeat(rate).take(count))
        .collect()
}

fn pekao_rates(dates: &[NaiveDate]) -> Vec<RateValue> {
    let Some(first) = dates.first() else {
        return Vec::new();
    };
    let promo_opening_deadline = date(2023, 11, 1);
    // first day no longer paying 3%
    let standard_rate_from = date(2024, 7, 9);

    let promo_count = if *first < promo_opening_deadline {
        dates.len().min(6)
    } else {
        0
    };
    let rest = &dates[promo_count..];
    let mid_count = rest.iter().filter(|d| **d < standard_rate_from).count();
    let tail_count = rest.len() - mid_count;

    tiered(&[
        (RateValue::from_percentage(5), promo_count),
        (RateValue::from_percentage(3), mid_count),
        (RateValue::inflation_share(1, 7), tail_count),
    ])
}

fn alior_rates(dates: &[NaiveDate]) -> Vec<RateValue> {
    let promo_end = date(2024, 1, 1);
    let promo_count = dates.iter().filter(|d| **d < promo_end).count();

    tiered(&[
        (RateValue::from_percentage(5), promo_count),
        (RateValue::inflation_share(1, 6), dates.len() - promo_count),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::deposit_dates;

    fn months(year: i32, month: u32, n: u32) -> Vec<NaiveDate> {
        deposit_dates(date(year, month, 1), n).unwrap()
    }

    fn count(rates: &[RateValue], rate: RateValue) -> usize {
        rates.iter().filter(|r| **r == rate).count()
    }

    #[test]
    fn test_pekao_early_account() {
        // 2023-01 .. 2025-12
        let dates = months(2023, 1, 36);
        let rates = PEKAO.rates(&dates);

        assert_eq!(rates.len(), 36);
        assert!(rates[..6].iter().all(|r| *r == RateValue::from_percentage(5)));
        // 2023-07 .. 2024-07 inclusive
        assert!(rates[6..19].iter().all(|r| *r == RateValue::from_percentage(3)));
        assert!(rates[19..].iter().all(|r| *r == RateValue::inflation_share(1, 7)));

        let partition = count(&rates, RateValue::from_percentage(5))
            + count(&rates, RateValue::from_percentage(3))
            + count(&rates, RateValue::inflation_share(1, 7));
        assert_eq!(partition, dates.len());
    }

    #[test]
    fn test_pekao_late_account_skips_promo() {
        let dates = months(2023, 12, 12);
        let rates = PEKAO.rates(&dates);

        assert_eq!(count(&rates, RateValue::from_percentage(5)), 0);
        // 2023-12 .. 2024-07
        assert_eq!(count(&rates, RateValue::from_percentage(3)), 8);
        assert_eq!(count(&rates, RateValue::inflation_share(1, 7)), 4);
    }

    #[test]
    fn test_pekao_short_early_account() {
        let rates = PEKAO.rates(&months(2023, 10, 4));
        assert_eq!(rates, vec![RateValue::from_percentage(5); 4]);
    }

    #[test]
    fn test_pekao_cutoff_day_is_not_dropped() {
        let dates = vec![date(2024, 7, 8), date(2024, 7, 9), date(2024, 7, 10)];
        let rates = PEKAO.rates(&dates);
        assert_eq!(
            rates,
            vec![
                RateValue::from_percentage(3),
                RateValue::inflation_share(1, 7),
                RateValue::inflation_share(1, 7),
            ]
        );
    }

    #[test]
    fn test_alior_schedule() {
        let rates = ALIOR.rates(&months(2023, 9, 10));
        assert_eq!(count(&rates, RateValue::from_percentage(5)), 4);
        assert_eq!(count(&rates, RateValue::inflation_share(1, 6)), 6);
        assert_eq!(rates[4], RateValue::inflation_share(1, 6));
    }

    #[test]
    fn test_empty_dates() {
        assert!(PEKAO.rates(&[]).is_empty());
        assert!(ALIOR.rates(&[]).is_empty());
    }

    #[test]
    fn test_bank_lookup() {
        assert_eq!(BankId::from_name("pekao").unwrap(), BankId::Pekao);
        assert_eq!(BankId::from_name("ALIOR").unwrap().bank(), ALIOR);
        assert!(matches!(
            BankId::from_name("mbank"),
            Err(SavingsError::InvalidConfiguration { .. })
        ));
    }
}
