use anyhow::{Context, Result};
use clap::{arg, builder::PossibleValuesParser, value_parser, ArgMatches, Command};
use std::io::Read;
use std::path::Path;
use types::{DayCap, OptimizeParams, OptimizeRequest};

pub fn cli() -> Command {
    Command::new("rehearsal-planner")
        .about("Assigns rehearsal songs to timeslots under student workload caps")
        .arg_required_else_help(true)
        .arg(
            arg!(--"log-format" <FORMAT> "Log output on stderr")
                .value_parser(PossibleValuesParser::new(["pretty", "json"]))
                .default_value("pretty")
                .env("REHEARSAL__LOG__FORMAT")
                .global(true),
        )
        .subcommand(
            Command::new("solve")
                .about("Runs the multi-start search and prints the retained schedules")
                .arg(request_arg())
                .arg(number("iterations", "Random restarts to run", "REHEARSAL__ITERATIONS"))
                .arg(number("top-recorded", "Schedules to retain", "REHEARSAL__TOP_RECORDED"))
                .arg(number("max-days", "Distinct weekdays per student", "REHEARSAL__MAX_DAYS"))
                .arg(number("max-per-day", "Rehearsals per student per weekday", "REHEARSAL__MAX_PER_DAY"))
                .arg(
                    arg!(--seed <SEED> "Base seed for restart streams")
                        .required(false)
                        .value_parser(value_parser!(u64))
                        .env("REHEARSAL__SEED"),
                )
                .arg(
                    arg!(--threads <N> "Worker threads, 0 for all cores")
                        .required(false)
                        .value_parser(value_parser!(usize))
                        .env("REHEARSAL__THREADS"),
                )
                .arg(
                    arg!(--"day-cap" <RULE> "How the distinct-day cap treats an already used day")
                        .required(false)
                        .value_parser(PossibleValuesParser::new(["legacy", "exclude_candidate_day"]))
                        .env("REHEARSAL__DAY_CAP"),
                )
                .arg(arg!(--distinct "Never retain two identical schedules"))
                .arg(
                    arg!(--format <FORMAT> "Output format")
                        .value_parser(PossibleValuesParser::new(["json", "report"]))
                        .default_value("json"),
                )
                .arg(
                    arg!(--out <PATH> "Write output to a file instead of stdout")
                        .required(false)
                        .value_parser(value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Checks a request without running the search")
                .arg(request_arg()),
        )
        .subcommand(Command::new("schema").about("Prints the request JSON schema"))
}

fn request_arg() -> clap::Arg {
    arg!(<REQUEST> "Request json string, path to json file, or '-' for stdin")
        .value_parser(value_parser!(String))
}

fn number(id: &'static str, help: &'static str, env: &'static str) -> clap::Arg {
    clap::Arg::new(id)
        .long(id)
        .value_name("N")
        .help(help)
        .value_parser(value_parser!(i64))
        .allow_negative_numbers(true)
        .env(env)
}

pub fn load_request(source: &str) -> Result<OptimizeRequest> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        buf
    } else if Path::new(source).exists() {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))?
    } else {
        source.to_string()
    };
    serde_json::from_str(&text).context("request is not a valid OptimizeRequest document")
}

/// Command-line flags and their environment variables win over the document.
pub fn apply_overrides(params: &mut OptimizeParams, m: &ArgMatches) {
    for (id, field) in [
        ("iterations", &mut params.iterations),
        ("top-recorded", &mut params.top_recorded),
        ("max-days", &mut params.max_days),
        ("max-per-day", &mut params.max_per_day),
    ] {
        if let Some(&v) = m.get_one::<i64>(id) {
            *field = v;
        }
    }
    if let Some(&seed) = m.get_one::<u64>("seed") {
        params.seed = seed;
    }
    if let Some(&threads) = m.get_one::<usize>("threads") {
        params.threads = threads;
    }
    match m.get_one::<String>("day-cap").map(String::as_str) {
        Some("legacy") => params.day_cap = DayCap::Legacy,
        Some("exclude_candidate_day") => params.day_cap = DayCap::ExcludeCandidateDay,
        _ => {}
    }
    if m.get_flag("distinct") {
        params.distinct = true;
    }
}
