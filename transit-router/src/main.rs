use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use transit_router::domain::ClockTime;
use transit_router::loader;
use transit_router::planner::{CostConfig, Criterion, Router};
use transit_router::schedule;

/// Find the cheapest itinerary between two stops of a scheduled transit
/// network.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Timetable CSV file.
    #[arg(long, default_value = "data/connection_graph.csv")]
    timetable: PathBuf,

    /// Departure stop name, spelled as in the timetable.
    start: String,

    /// Arrival stop name.
    goal: String,

    /// Optimization criterion.
    #[arg(value_enum)]
    criterion: CriterionArg,

    /// Departure time, HH:MM.
    time: String,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CriterionArg {
    /// Minimize total travel time.
    #[value(name = "t", alias = "time")]
    Time,
    /// Minimize the number of line changes.
    #[value(name = "p", alias = "changes")]
    Changes,
}

impl From<CriterionArg> for Criterion {
    fn from(arg: CriterionArg) -> Self {
        match arg {
            CriterionArg::Time => Criterion::TravelTime,
            CriterionArg::Changes => Criterion::LineChanges,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let start_time = match ClockTime::parse(&args.time) {
        Ok(time) => time,
        Err(err) => {
            eprintln!("{}: {err}", args.time);
            return ExitCode::FAILURE;
        }
    };

    let graph = match loader::load_graph(&args.timetable) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("{}: {err}", args.timetable.display());
            return ExitCode::FAILURE;
        }
    };

    let config = CostConfig::default();
    let router = Router::new(&graph, args.criterion.into(), &config);

    let started = Instant::now();
    let route = match router.route_between(&args.start, &args.goal, start_time) {
        Ok(route) => route,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = started.elapsed();

    let groups = schedule::boarding_groups(&graph, &route);
    print!("{}", schedule::format_schedule(&groups));

    tracing::info!(cost = route.cost, ?elapsed, "route computed");

    ExitCode::SUCCESS
}
