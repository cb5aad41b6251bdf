use anyhow::{Context, Result};
use log::info;

mod overlay;
mod render;
mod scenario;

use scenario::{Runner, Scenario};

fn main() -> Result<()> {
    // Set RUST_LOG=debug to trace every transition
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("Usage: datetime-picker <scenario.yaml>")?;
    info!("Replaying scenario {}", path);

    let scenario = Scenario::load(&path)?;
    let mut runner = Runner::new(&scenario)?;
    runner.run(&scenario.steps);

    print!("{}", render::render_picker(runner.picker()));
    let report = serde_json::to_string_pretty(&runner.report()).context("Failed to serialize report")?;
    println!("{}", report);

    info!("Scenario finished after {} steps", scenario.steps.len());
    Ok(())
}
