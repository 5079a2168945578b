pub mod assumptions;
pub mod bonus;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod ledger;
pub mod simulation;
pub mod types;

// re-export key types
pub use assumptions::{annual_bonus_rate, YearAssumption, YearlyAssumptions};
pub use bonus::{bonus_net_of_fee, monthly_bonus_accrual, BonusAccrualRule};
pub use config::{AssumptionsConfig, SimulationBuilder, SimulationConfig};
pub use decimal::{Money, Rate};
pub use errors::{Result, SavingsError};
pub use interest::{
    annuity_due_future_value, Bank, BankId, CompoundInterestAccumulator, RateRun, ALIOR, PEKAO,
};
pub use ledger::{MonthlyRow, Simulation, YearlyRow};
pub use simulation::{deposit_dates, SimulationEngine};
pub use types::{ColumnGroup, RateValue};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
