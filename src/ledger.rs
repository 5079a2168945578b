use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bonus::bonus_net_of_fee;
use crate::decimal::{Money, Rate};

/// one row per deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub sequence_no: u32,
    pub month: NaiveDate,
    pub year: i32,
    pub deposit: Money,
    pub cumulative_deposit: Money,
    pub bonus_accrual: Money,
    pub cumulative_bonus: Money,
    pub bonus_net_of_fee: Money,
    /// annual rate paid by the bank on this deposit, already resolved
    pub bank_rate: Rate,
    pub account_value_with_interest: Money,
    pub cumulative_interest: Money,
    pub monthly_interest: Money,
    /// deposits plus gross bonus
    pub total_with_bonus: Money,
    /// deposits plus interest plus bonus after the bank's fee
    pub grand_total: Money,
}

/// one row per calendar year, derived from the monthly rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyRow {
    pub year: i32,
    pub deposits: Money,
    pub interest: Money,
    pub bonus_accrual: Money,
    pub cumulative_deposit: Money,
    pub cumulative_interest: Money,
    pub cumulative_bonus: Money,
    pub bonus_net_of_fee: Money,
    pub total_with_bonus: Money,
    pub grand_total: Money,
}

/// group monthly rows by year and rebuild the running totals
pub fn yearly_rollup(monthly: &[MonthlyRow]) -> Vec<YearlyRow> {
    let mut yearly: Vec<YearlyRow> = Vec::new();

    for row in monthly {
        match yearly.last_mut() {
            Some(current) if current.year == row.year => {
                current.deposits += row.deposit;
                current.interest += row.monthly_interest;
                current.bonus_accrual += row.bonus_accrual;
            }
            _ => yearly.push(YearlyRow {
                year: row.year,
                deposits: row.deposit,
                interest: row.monthly_interest,
                bonus_accrual: row.bonus_accrual,
                cumulative_deposit: Money::ZERO,
                cumulative_interest: Money::ZERO,
                cumulative_bonus: Money::ZERO,
                bonus_net_of_fee: Money::ZERO,
                total_with_bonus: Money::ZERO,
                grand_total: Money::ZERO,
            }),
        }
    }

    let mut deposits = Money::ZERO;
    let mut interest = Money::ZERO;
    let mut bonus = Money::ZERO;
    for row in &mut yearly {
        deposits += row.deposits;
        interest += row.interest;
        bonus += row.bonus_accrual;

        row.cumulative_deposit = deposits;
        row.cumulative_interest = interest;
        row.cumulative_bonus = bonus;
        row.bonus_net_of_fee = bonus_net_of_fee(bonus);
        row.total_with_bonus = deposits + bonus;
        row.grand_total = deposits + interest + row.bonus_net_of_fee;
    }

    yearly
}

/// result of a single account simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    pub bank: Option<String>,
    pub monthly: Vec<MonthlyRow>,
    pub yearly: Vec<YearlyRow>,
}

impl Simulation {
    /// last monthly row, i.e. the state of the account at the final deposit
    pub fn closing(&self) -> Option<&MonthlyRow> {
        self.monthly.last()
    }

    pub fn year(&self, year: i32) -> Option<&YearlyRow> {
        self.yearly.iter().find(|r| r.year == year)
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }

    pub fn json(&self) -> String {
        self.to_json_pretty()
    }
}
