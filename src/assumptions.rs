use std::collections::BTreeMap;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{Result, SavingsError};

/// statutory floor of the yearly bonus rate (art. 14.4)
pub const MIN_BONUS_RATE: Rate = Rate::from_decimal(dec!(0.01));
/// statutory ceiling of the yearly bonus rate (art. 14.4)
pub const MAX_BONUS_RATE: Rate = Rate::from_decimal(dec!(0.15));

/// yearly bonus rate: the greater of inflation and m2 price growth
/// (art. 14.3), clamped to the statutory band
pub fn annual_bonus_rate(inflation: Rate, m2_growth: Option<Rate>) -> Rate {
    let raw = inflation.max(m2_growth.unwrap_or(Rate::ZERO));
    raw.clamp(MIN_BONUS_RATE, MAX_BONUS_RATE)
}

/// assumptions for a single calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearAssumption {
    pub inflation: Rate,
    pub m2_growth: Option<Rate>,
    pub bonus_rate: Rate,
}

impl YearAssumption {
    pub fn new(inflation: Rate, m2_growth: Option<Rate>) -> Self {
        Self {
            inflation,
            m2_growth,
            bonus_rate: annual_bonus_rate(inflation, m2_growth),
        }
    }
}

/// per-year inflation and m2 growth, with the derived bonus rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyAssumptions {
    years: BTreeMap<i32, YearAssumption>,
}

impl YearlyAssumptions {
    /// build from parallel per-year sequences starting at `start_year`
    pub fn new(start_year: i32, inflation: &[Rate], m2_growth: &[Option<Rate>]) -> Result<Self> {
        if inflation.is_empty() {
            return Err(SavingsError::invalid_input(
                "at least one year of assumptions is required",
            ));
        }
        if inflation.len() != m2_growth.len() {
            return Err(SavingsError::invalid_input(format!(
                "inflation has {} years but m2 growth has {}",
                inflation.len(),
                m2_growth.len()
            )));
        }

        let years = inflation
            .iter()
            .zip(m2_growth)
            .zip(start_year..)
            .map(|((&infl, &m2), year)| (year, YearAssumption::new(infl, m2)))
            .collect();

        Ok(Self { years })
    }

    /// constant inflation for `years` consecutive years, no m2 data
    pub fn flat(start_year: i32, years: usize, inflation: Rate) -> Result<Self> {
        Self::new(start_year, &vec![inflation; years], &vec![None; years])
    }

    /// assumption for `year`, which must be present
    pub fn get(&self, year: i32) -> Result<&YearAssumption> {
        self.years
            .get(&year)
            .ok_or(SavingsError::MissingAssumption { year })
    }

    pub fn inflation(&self, year: i32) -> Result<Rate> {
        self.get(year).map(|a| a.inflation)
    }

    pub fn bonus_rate(&self, year: i32) -> Result<Rate> {
        self.get(year).map(|a| a.bonus_rate)
    }

    pub fn first_year(&self) -> Option<i32> {
        self.years.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.years.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// entries in year order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &YearAssumption)> {
        self.years.iter().map(|(year, a)| (*year, a))
    }
}
