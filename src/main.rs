use tracing::Level;
use tsp_evolve::driver::{Driver, DriverConfig};

fn main() -> tsp_evolve::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let config = DriverConfig::default();
    let report = Driver::run(&config)?;

    println!("Gen 1 distances");
    for distance in &report.initial_distances {
        println!("{distance}");
    }

    println!("Gen {} distances", report.generations + 1);
    for distance in &report.final_distances {
        println!("{distance}");
    }

    Ok(())
}
