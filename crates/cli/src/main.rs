mod config;
mod report;
mod telemetry;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use sched_core::{prepare, Scheduler};
use solver_heur::HeurSolver;
use types::OptimizeRequest;

fn main() {
    let matches = config::cli().get_matches();
    let log_format = matches
        .get_one::<String>("log-format")
        .map(String::as_str)
        .unwrap_or("pretty");
    telemetry::init(log_format);

    let res = match matches.subcommand() {
        Some(("solve", m)) => solve(m),
        Some(("validate", m)) => validate(m),
        Some(("schema", _)) => schema(),
        _ => Err(anyhow!("Invalid subcommand")),
    };
    if let Err(e) = res {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn request(m: &ArgMatches) -> Result<OptimizeRequest> {
    let source = m
        .get_one::<String>("REQUEST")
        .ok_or_else(|| anyhow!("missing request"))?;
    config::load_request(source)
}

fn solve(m: &ArgMatches) -> Result<()> {
    let mut req = request(m)?;
    config::apply_overrides(&mut req.params, m);
    tracing::info!(
        songs = req.songs.len(),
        timeslots = req.timeslots.len(),
        iterations = req.params.iterations,
        "solving"
    );
    let outcome = HeurSolver::new().schedule(&req)?;

    let text = match m.get_one::<String>("format").map(String::as_str) {
        Some("report") => {
            let mut s = String::new();
            report::render(&outcome, &mut s)?;
            s
        }
        _ => serde_json::to_string_pretty(&outcome)?,
    };
    match m.get_one::<std::path::PathBuf>("out") {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}

fn validate(m: &ArgMatches) -> Result<()> {
    let req = request(m)?;
    let problem = prepare(&req)?;
    println!(
        "ok: {} songs, {} timeslots",
        problem.songs.len(),
        problem.timeslots.len()
    );
    Ok(())
}

fn schema() -> Result<()> {
    let schema = schemars::schema_for!(OptimizeRequest);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
