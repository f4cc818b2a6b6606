use std::path::PathBuf;

use anyhow::Result;
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::EnvFilter;

use csa_planner::{
    csa::{Journey, Scanner, StopId},
    time::TimeOffset,
    timetable::Timetable,
};

#[derive(Parser)]
#[command(version, about = "Earliest-arrival journey planner (connection scan)")]
struct Cli {
    /// Timetable feed: .json, .zip or a .bin cache
    #[arg(long, global = true, default_value = "timetable.json")]
    timetable: PathBuf,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plan the earliest-arrival journey between two stops
    Route {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Departure time, HH:MM:SS
        #[arg(long)]
        at: String,
        /// Minimum interchange time in seconds
        #[arg(long, default_value_t = 300)]
        min_interchange_time: u32,
        /// Print legs as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the earliest arrival at every reachable stop
    Arrivals {
        #[arg(long)]
        from: String,
        /// Departure time, HH:MM:SS
        #[arg(long)]
        at: String,
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Write the timetable as a binary cache
    Compile {
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let now = std::time::Instant::now();
    let timetable = Timetable::read(&cli.timetable)?;
    info!("timetable ready in {:?}", now.elapsed());

    match cli.command {
        Command::Route {
            from,
            to,
            at,
            min_interchange_time,
            json,
        } => {
            let scanner = Scanner::new(&timetable.connections)
                .with_transfers(&timetable.transfers)
                .with_min_interchange_time(TimeDelta::seconds(i64::from(min_interchange_time)));
            let (from, to) = (StopId::new(from), StopId::new(to));

            let now = std::time::Instant::now();
            let scan = scanner.compute_connections(&from, &to, &at)?;
            info!("scan done in {:?}", now.elapsed());

            let Some(index) = scan else {
                println!("No route found from {from} to {to} leaving at {at}");
                return Ok(());
            };

            let Some(legs) = Journey::new(index)?.compute_legs(&to) else {
                println!("No route found from {from} to {to} leaving at {at}");
                return Ok(());
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&legs)?);
            } else {
                for leg in &legs {
                    println!(
                        "{} {} -> {} {} ({})",
                        leg.departure_time,
                        leg.source_id,
                        leg.arrival_time,
                        leg.destination_id,
                        leg.trip_id
                    );
                }
            }
        }
        Command::Arrivals { from, at, limit } => {
            let start = TimeOffset::parse(&at)?;
            let from = StopId::new(from);
            let arrivals = Scanner::new(&timetable.connections).compute_arrival_times(&from, start);

            println!("Querying stops reachable from {from} leaving at {start}");
            for (stop, time) in arrivals
                .iter()
                .sorted_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)))
                .take(limit)
            {
                println!("Arrive at {stop} by {time} (+{}d)", time.day_offset());
            }
        }
        Command::Compile { output } => {
            timetable.save(&output)?;
            println!(
                "Wrote {} connections and {} transfers to {output:?}",
                timetable.connections.len(),
                timetable.transfers.len()
            );
        }
    }

    Ok(())
}
