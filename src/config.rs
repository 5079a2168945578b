use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assumptions::YearlyAssumptions;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, SavingsError};
use crate::interest::{Bank, BankId};
use crate::ledger::Simulation;
use crate::simulation::SimulationEngine;

/// simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub start_date: NaiveDate,
    pub num_payments: u32,
    pub monthly_payment: Money,
    #[serde(default)]
    pub bank: Option<BankId>,
    pub assumptions: AssumptionsConfig,
}

/// per-year inputs, one entry per year from `start_year`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionsConfig {
    pub start_year: i32,
    pub inflation: Vec<Rate>,
    /// empty means no m2 data for any year
    #[serde(default)]
    pub m2_growth: Vec<Option<Rate>>,
}

impl AssumptionsConfig {
    pub fn build(&self) -> Result<YearlyAssumptions> {
        if self.m2_growth.is_empty() {
            YearlyAssumptions::new(
                self.start_year,
                &self.inflation,
                &vec![None; self.inflation.len()],
            )
        } else {
            YearlyAssumptions::new(self.start_year, &self.inflation, &self.m2_growth)
        }
    }
}

impl SimulationConfig {
    /// parse a configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SavingsError::InvalidConfiguration {
            message: e.to_string(),
        })
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }

    /// run the simulation described by this configuration
    pub fn simulate(&self) -> Result<Simulation> {
        let assumptions = self.assumptions.build()?;
        let bank = self.bank.map(|id| id.bank());
        SimulationEngine::new().simulate(
            self.start_date,
            self.num_payments,
            self.monthly_payment,
            &assumptions,
            bank.as_ref(),
        )
    }
}

/// builder for simulations
#[derive(Debug, Default)]
pub struct SimulationBuilder {
    start_date: Option<Result<NaiveDate>>,
    num_payments: Option<u32>,
    monthly_payment: Option<Money>,
    assumptions: Option<YearlyAssumptions>,
    bank: Option<Bank>,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(Ok(date));
        self
    }

    /// first deposit in the given month; an impossible month fails in `build`
    pub fn start_month(mut self, year: i32, month: u32) -> Self {
        self.start_date = Some(NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            SavingsError::InvalidDate {
                message: format!("no such month: {year}-{month:02}"),
            }
        }));
        self
    }

    pub fn payments(mut self, count: u32) -> Self {
        self.num_payments = Some(count);
        self
    }

    pub fn monthly_payment(mut self, amount: Money) -> Self {
        self.monthly_payment = Some(amount);
        self
    }

    pub fn assumptions(mut self, assumptions: YearlyAssumptions) -> Self {
        self.assumptions = Some(assumptions);
        self
    }

    pub fn bank(mut self, bank: Bank) -> Self {
        self.bank = Some(bank);
        self
    }

    pub fn build(self) -> Result<Simulation> {
        let start_date = self.start_date.ok_or_else(|| missing("start date"))??;
        let num_payments = self.num_payments.ok_or_else(|| missing("number of payments"))?;
        let monthly_payment = self.monthly_payment.ok_or_else(|| missing("monthly payment"))?;
        let assumptions = self.assumptions.ok_or_else(|| missing("yearly assumptions"))?;

        SimulationEngine::new().simulate(
            start_date,
            num_payments,
            monthly_payment,
            &assumptions,
            self.bank.as_ref(),
        )
    }
}

fn missing(field: &str) -> SavingsError {
    SavingsError::InvalidConfiguration {
        message: format!("{field} is required"),
    }
}
