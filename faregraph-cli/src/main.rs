use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};
use faregraph_core::prelude::*;

#[derive(Parser)]
#[command(
    name = "faregraph",
    version,
    about = "Cheapest fare and route lookup for multi-line transit networks"
)]
struct Cli {
    /// Fare data: a directory of fare matrix text files or a JSON directory
    /// index
    #[arg(short, long)]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List transit lines and their stations
    Stations {
        /// Restrict the listing to one transit line
        line: Option<String>,
    },
    /// Cheapest route between two stations, one journey per fare policy
    Route {
        /// Origin station as LINE/CODE (the station name works as the code
        /// too)
        from: String,
        /// Destination station as LINE/CODE
        to: String,
        /// Report a single fare policy instead of both
        #[arg(long, value_enum)]
        fare: Option<PolicyArg>,
        /// Apply the flat 50% concessionary discount to the reported fares
        #[arg(long)]
        discounted: bool,
        /// Print the journeys as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Stored value card
    Svc,
    /// Single journey ticket
    Sjt,
}

impl From<PolicyArg> for FarePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Svc => FarePolicy::StoredValueCard,
            PolicyArg::Sjt => FarePolicy::SingleJourneyTicket,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let directory = load_directory(&cli.data)
        .with_context(|| format!("loading fare directory {}", cli.data.display()))?;
    log::debug!(
        "{} lines, {} transfer records",
        directory.matrices.len(),
        directory.transfers.len()
    );

    match cli.command {
        Command::Stations { line } => list_stations(&directory, line.as_deref()),
        Command::Route {
            from,
            to,
            fare,
            discounted,
            json,
        } => {
            let network = build_fare_network(&directory)?;
            let from = resolve_station(&directory, &from)?;
            let to = resolve_station(&directory, &to)?;
            let only = fare.map(FarePolicy::from);

            let mut fares = network.shortest_paths(&from, &to)?;
            if discounted {
                fares.stored_value.total = fares.stored_value.total.halved();
                fares.single_journey.total = fares.single_journey.total.halved();
            }

            if json {
                print_json(&fares, only)
            } else {
                print_plain(&network, &fares, only, discounted);
                Ok(())
            }
        }
    }
}

fn list_stations(directory: &FareDirectory, line: Option<&str>) -> Result<()> {
    let mut found = false;
    for matrix in &directory.matrices {
        if line.is_some_and(|wanted| !matrix.transit_line.eq_ignore_ascii_case(wanted)) {
            continue;
        }
        found = true;
        println!("{}", matrix.transit_line);
        for entry in &matrix.stations {
            if entry.code == entry.name {
                println!("  {}", entry.name);
            } else {
                println!("  {:<6} {}", entry.code, entry.name);
            }
        }
    }
    if !found {
        bail!("no transit line named {:?}", line.unwrap_or_default());
    }
    Ok(())
}

/// Parses `LINE/CODE` and resolves it against the loaded directory. The
/// code part also matches station names case-insensitively, which is what
/// the text layout (where names double as codes) needs.
fn resolve_station(directory: &FareDirectory, spec: &str) -> Result<Station> {
    let (line, code) = spec
        .split_once('/')
        .ok_or_else(|| anyhow!("station {spec:?} is not in LINE/CODE form"))?;
    let (line, code) = (line.trim(), code.trim());

    let matrix = directory
        .matrices
        .iter()
        .find(|matrix| matrix.transit_line.eq_ignore_ascii_case(line))
        .ok_or_else(|| anyhow!("no transit line named {line:?}"))?;

    matrix
        .resolve(code)
        .or_else(|| {
            matrix
                .stations
                .iter()
                .find(|entry| entry.name.eq_ignore_ascii_case(code))
                .map(|entry| Station::new(&matrix.transit_line, &entry.code, &entry.name))
        })
        .ok_or_else(|| anyhow!("no station {code:?} on line {}", matrix.transit_line))
}

fn selected<'a>(
    fares: &'a JourneyFares,
    only: Option<FarePolicy>,
) -> Vec<(FarePolicy, &'a Journey)> {
    FarePolicy::ALL
        .into_iter()
        .filter(|policy| only.is_none_or(|wanted| wanted == *policy))
        .map(|policy| match policy {
            FarePolicy::StoredValueCard => (policy, &fares.stored_value),
            FarePolicy::SingleJourneyTicket => (policy, &fares.single_journey),
        })
        .collect()
}

fn print_plain(
    network: &FareNetwork,
    fares: &JourneyFares,
    only: Option<FarePolicy>,
    discounted: bool,
) {
    for (policy, journey) in selected(fares, only) {
        println!("{policy}: {}", journey.total);
        for (i, station) in journey.stations.iter().enumerate() {
            if i == 0 {
                println!("  {station}");
                continue;
            }
            let leg = network
                .fare_between(&journey.stations[i - 1], station)
                .map(|info| info.fare(policy))
                .unwrap_or(Fare::ZERO);
            let leg = if discounted { leg.halved() } else { leg };
            if leg.is_zero() {
                println!("  -> {station}  (transfer)");
            } else {
                println!("  -> {station}  +{leg}");
            }
        }
        println!();
    }
}

fn print_json(fares: &JourneyFares, only: Option<FarePolicy>) -> Result<()> {
    let value = match only {
        Some(FarePolicy::StoredValueCard) => serde_json::to_value(&fares.stored_value)?,
        Some(FarePolicy::SingleJourneyTicket) => serde_json::to_value(&fares.single_journey)?,
        None => serde_json::to_value(fares)?,
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faregraph_core::loading::{FareTables, LineMatrix, StationEntry};

    fn directory() -> FareDirectory {
        let zero = vec![vec![Fare::ZERO, Fare::ZERO], vec![Fare::ZERO, Fare::ZERO]];
        FareDirectory {
            matrices: vec![LineMatrix {
                transit_line: "LRT-1".into(),
                stations: vec![
                    StationEntry {
                        code: "BCL".into(),
                        name: "Baclaran".into(),
                    },
                    StationEntry {
                        code: "EDS".into(),
                        name: "EDSA".into(),
                    },
                ],
                fares: FareTables {
                    stored_value_card: zero.clone(),
                    single_journey_ticket: zero,
                },
            }],
            transfers: vec![],
        }
    }

    #[test]
    fn resolves_by_code_and_by_name() {
        let directory = directory();
        let by_code = resolve_station(&directory, "LRT-1/EDS").unwrap();
        let by_name = resolve_station(&directory, "lrt-1/edsa").unwrap();
        assert_eq!(by_code, Station::new("LRT-1", "EDS", "EDSA"));
        assert_eq!(by_code, by_name);
    }

    #[test]
    fn rejects_unknown_specs() {
        let directory = directory();
        assert!(resolve_station(&directory, "EDSA").is_err());
        assert!(resolve_station(&directory, "MRT-3/EDS").is_err());
        assert!(resolve_station(&directory, "LRT-1/Nowhere").is_err());
    }
}
