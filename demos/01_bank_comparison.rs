/// bank comparison - same deposits, different rate schedules
use housing_savings_rs::chrono::NaiveDate;
use housing_savings_rs::{BankId, Money, Rate, SimulationEngine, YearlyAssumptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "housing_savings_rs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let assumptions = YearlyAssumptions::new(
        2023,
        &[Rate::from_bps(1140), Rate::from_bps(600), Rate::from_bps(450), Rate::from_bps(350)],
        &[Some(Rate::from_bps(800)), Some(Rate::from_bps(700)), None, None],
    )?;
    for (year, a) in assumptions.iter() {
        println!("{year}: inflation {} bonus rate {}", a.inflation, a.bonus_rate);
    }

    let start = NaiveDate::from_ymd_opt(2023, 8, 1).ok_or("bad start date")?;
    let engine = SimulationEngine::new();

    println!("\n=== no bank ===");
    let baseline = engine.simulate(start, 40, Money::from_major(800), &assumptions, None)?;
    if let Some(closing) = baseline.closing() {
        println!("closing total: {}", closing.grand_total.to_cents());
    }

    for id in BankId::ALL {
        let bank = id.bank();
        let simulation = engine.simulate(start, 40, Money::from_major(800), &assumptions, Some(&bank))?;
        println!("\n=== {} ===", bank.name);
        for row in &simulation.yearly {
            println!(
                "{}: interest {} bonus {} total {}",
                row.year,
                row.cumulative_interest.to_cents(),
                row.bonus_net_of_fee.to_cents(),
                row.grand_total.to_cents(),
            );
        }
    }

    Ok(())
}
