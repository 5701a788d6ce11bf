use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{error::ErrorKind, CommandFactory, Parser, ValueHint};
use log::info;

use pinin::output::{Format, Printer, Report};
use pinin::{default_engine, Pincode, PincodeData};

#[derive(Parser, Debug)]
#[command(
    name = "pinin",
    version,
    about = "Indian pincode lookup and information tool",
    after_help = r#"EXAMPLES
  pinin 110001                                  # Complete information for 110001
  pinin --state 110001                          # State for a pincode
  pinin --offices 110001                        # Post offices for a pincode
  pinin --search-state "Delhi"                  # All pincodes in Delhi
  pinin --search-district "Mumbai" --in-state "Maharashtra"
  pinin --list-states                           # All states
  pinin --list-districts                        # All districts
  pinin --stats                                 # Dataset statistics

ENVIRONMENT
  PININ_DATA_FILE   CSV used when --data-file is not given
  RUST_LOG          Log filter (overrides --verbose)"#
)]
struct Cli {
    /// Pincode to look up (6-digit number)
    pincode: Option<String>,

    /// Print the state name for the pincode
    #[arg(short, long, group = "field")]
    state: bool,

    /// Print the district name for the pincode
    #[arg(short, long, group = "field")]
    district: bool,

    /// Print the taluk name for the pincode
    #[arg(short, long, group = "field")]
    taluk: bool,

    /// Print the post office names for the pincode
    #[arg(short, long, group = "field")]
    offices: bool,

    /// Search pincodes by state name
    #[arg(long, value_name = "NAME")]
    search_state: Option<String>,

    /// Search pincodes by district name
    #[arg(long, value_name = "NAME")]
    search_district: Option<String>,

    /// Restrict --search-district to one state
    #[arg(long, value_name = "NAME", requires = "search_district")]
    in_state: Option<String>,

    /// Search post offices whose name contains TEXT
    #[arg(long, value_name = "TEXT")]
    search_office: Option<String>,

    /// List all states in the dataset
    #[arg(long)]
    list_states: bool,

    /// List all districts, optionally only those in STATE
    #[arg(
        long,
        value_name = "STATE",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    list_districts: Option<String>,

    /// Show dataset statistics
    #[arg(long)]
    stats: bool,

    /// Output results as JSON
    #[arg(short, long)]
    json: bool,

    /// Show titles and debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to a custom CSV data file
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    data_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let format = if cli.json { Format::Json } else { Format::Plain };
    let printer = Printer::new(format, cli.verbose);
    let mut out = io::stdout().lock();

    // Validate before paying for a load.
    let pincode = match &cli.pincode {
        Some(raw) if !has_action(cli) => Some(Pincode::parse(raw)?),
        _ => None,
    };

    if !has_action(cli) && pincode.is_none() {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "Pincode is required unless using search or list options",
            )
            .exit();
    }

    let data = engine(cli)?;

    if cli.list_states {
        let states = data.all_states();
        let title = format!("All states ({} found)", states.len());
        printer.print(&mut out, Report::List(&states), &title)?;
    } else if let Some(state) = &cli.list_districts {
        let state = Some(state.as_str()).filter(|s| !s.is_empty());
        let districts = data.all_districts(state);
        let title = match state {
            Some(state) => format!("Districts in {state} ({} found)", districts.len()),
            None => format!("All districts ({} found)", districts.len()),
        };
        printer.print(&mut out, Report::List(&districts), &title)?;
    } else if cli.stats {
        let stats = data.statistics();
        printer.print(&mut out, Report::Stats(&stats), "Dataset Statistics")?;
    } else if let Some(state) = &cli.search_state {
        let pins = data.search_by_state(state);
        if pins.is_empty() && format == Format::Plain {
            writeln!(out, "No pincodes found for state: {state}")?;
        } else {
            let title = format!("Pincodes in {state} ({} found)", pins.len());
            printer.print(&mut out, Report::List(&pins), &title)?;
        }
    } else if let Some(district) = &cli.search_district {
        let in_state = cli.in_state.as_deref();
        let pins = data.search_by_district(district, in_state);
        if pins.is_empty() && format == Format::Plain {
            let location = match in_state {
                Some(state) => format!("{district} in {state}"),
                None => district.clone(),
            };
            writeln!(out, "No pincodes found for district: {location}")?;
        } else {
            let location = match in_state {
                Some(state) => format!("{district}, {state}"),
                None => district.clone(),
            };
            let title = format!("Pincodes in {location} ({} found)", pins.len());
            printer.print(&mut out, Report::List(&pins), &title)?;
        }
    } else if let Some(fragment) = &cli.search_office {
        let offices = data.search_by_office(fragment);
        if offices.is_empty() && format == Format::Plain {
            writeln!(out, "No offices found matching: {fragment}")?;
        } else {
            let title = format!("Offices matching {fragment} ({} found)", offices.len());
            printer.print(&mut out, Report::Records(&offices), &title)?;
        }
    } else if let Some(pincode) = &pincode {
        lookup(&data, pincode, cli, &printer, &mut out)?;
    }

    out.flush()?;
    Ok(())
}

/// Any flag that answers without a pincode.
fn has_action(cli: &Cli) -> bool {
    cli.list_states
        || cli.list_districts.is_some()
        || cli.stats
        || cli.search_state.is_some()
        || cli.search_district.is_some()
        || cli.search_office.is_some()
}

fn engine(cli: &Cli) -> Result<Arc<PincodeData>> {
    match &cli.data_file {
        Some(path) => {
            info!("using custom data file: {}", path.display());
            Ok(Arc::new(PincodeData::from_path(path)?))
        }
        None => Ok(default_engine()?),
    }
}

fn lookup<W: Write>(
    data: &PincodeData,
    pincode: &Pincode,
    cli: &Cli,
    printer: &Printer,
    out: &mut W,
) -> Result<()> {
    if cli.state {
        let state = data.state(pincode)?;
        printer.print(out, Report::Value(&state), &format!("State for {pincode}"))?;
    } else if cli.district {
        let district = data.district(pincode)?;
        printer.print(out, Report::Value(&district), &format!("District for {pincode}"))?;
    } else if cli.taluk {
        let taluk = data.taluk(pincode)?;
        printer.print(out, Report::Value(&taluk), &format!("Taluk for {pincode}"))?;
    } else if cli.offices {
        let offices = data.offices(pincode)?;
        printer.print(out, Report::List(&offices), &format!("Offices for {pincode}"))?;
    } else {
        let records = data.info(pincode)?;
        let title = format!("Complete information for {pincode}");
        printer.print(out, Report::Records(&records), &title)?;
    }
    Ok(())
}
