use anyhow::{Context, Result};
use clap::Parser;
use showreel::scenario::Scenario;
use std::path::PathBuf;

/// Replay a scripted scroll/click/media scenario and print each card's view.
#[derive(Parser, Debug)]
#[command(name = "showreel", version, about)]
struct Args {
    /// Scenario JSON file
    scenario: PathBuf,

    /// Print the full transcript as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Print only the transcript digest (hex SHA-256)
    #[arg(long, conflicts_with = "json")]
    digest: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("loading {}", args.scenario.display()))?;
    let transcript = scenario.run().context("replaying scenario")?;
    log::info!("replayed {} steps", transcript.reports.len());

    if args.digest {
        println!("{}", transcript.digest()?);
        return Ok(());
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    for (i, report) in transcript.reports.iter().enumerate() {
        println!("step {}: {:?}", i + 1, report.step);
        for view in &report.views {
            println!("  {}", view);
        }
    }
    Ok(())
}
