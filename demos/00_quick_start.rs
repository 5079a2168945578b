/// quick start - minimal example to get started
use housing_savings_rs::{Money, Rate, SimulationBuilder, YearlyAssumptions, PEKAO};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1000 zl a month for three years at a flat 9.6% inflation
    let simulation = SimulationBuilder::new()
        .start_month(2023, 1)
        .payments(36)
        .monthly_payment(Money::from_major(1_000))
        .assumptions(YearlyAssumptions::flat(2023, 3, Rate::from_bps(960))?)
        .bank(PEKAO)
        .build()?;

    for row in &simulation.yearly {
        println!(
            "{}: deposits {} interest {} bonus {} total {}",
            row.year,
            row.cumulative_deposit.to_cents(),
            row.cumulative_interest.to_cents(),
            row.bonus_net_of_fee.to_cents(),
            row.grand_total.to_cents(),
        );
    }

    Ok(())
}
