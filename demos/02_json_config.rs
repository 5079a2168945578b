/// json config - run a simulation described by a document and print the ledgers
use housing_savings_rs::{ColumnGroup, SimulationConfig};

const CONFIG: &str = r#"{
    "start_date": "2023-11-01",
    "num_payments": 24,
    "monthly_payment": "1500",
    "bank": "alior",
    "assumptions": {
        "start_year": 2023,
        "inflation": ["0.114", "0.05", "0.04"],
        "m2_growth": ["0.08", null, "0.06"]
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SimulationConfig::from_json(CONFIG)?;
    let simulation = config.simulate()?;

    for group in ColumnGroup::ALL {
        println!("{:?}: {}", group, group.yearly_fields().join(", "));
    }
    println!();
    println!("{}", simulation.json());

    Ok(())
}
