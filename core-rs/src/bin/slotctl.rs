//! slotctl - parking slot tracker CLI
//!
//! Runs command sessions against a lot and manages lot.yaml files

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use slot_tracker::{LotConfig, OutputFormat, Session, SlotTracker};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slotctl")]
#[command(version = slot_tracker::VERSION)]
#[command(about = "Parking slot tracker", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run park/leave/status commands from a script or stdin
    Run {
        /// Lot config file (lot.yaml)
        #[arg(long, conflicts_with_all = ["capacity", "address"])]
        config: Option<PathBuf>,
        /// Number of slots (when no config is given)
        #[arg(long)]
        capacity: Option<usize>,
        /// Lot address (when no config is given)
        #[arg(long, default_value = "unknown")]
        address: String,
        /// Command script; reads stdin when omitted
        #[arg(long)]
        script: Option<PathBuf>,
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write a new lot config file
    Init {
        /// Lot name
        #[arg(long)]
        name: String,
        /// Number of slots
        #[arg(long)]
        capacity: usize,
        /// Lot address
        #[arg(long)]
        address: String,
        /// Output path
        #[arg(long, default_value = slot_tracker::config::DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
    /// Show the slot table of a freshly opened lot
    Show {
        /// Lot config file (lot.yaml)
        #[arg(long, default_value = slot_tracker::config::DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn open_tracker(config: Option<PathBuf>, capacity: Option<usize>, address: String) -> anyhow::Result<SlotTracker> {
    match (config, capacity) {
        (Some(path), _) => Ok(LotConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?
            .into_tracker()),
        (None, Some(capacity)) => Ok(SlotTracker::new(capacity, address)),
        (None, None) => {
            let default = PathBuf::from(slot_tracker::config::DEFAULT_CONFIG_FILE);
            if !default.exists() {
                bail!("no lot given: pass --config <FILE> or --capacity <N>");
            }
            Ok(LotConfig::load(&default)?.into_tracker())
        }
    }
}

fn print_table(tracker: &SlotTracker) {
    println!("\n{} ({} slots)", tracker.address().bold(), tracker.capacity());
    println!("{:<6} {:<12} {:<6}", "SLOT", "LICENSE", "PASS");
    for (slot, entry) in tracker.slots() {
        match entry {
            Some(occupancy) => println!(
                "{:<6} {:<12} {:<6}",
                slot,
                occupancy.vehicle.license(),
                if occupancy.vehicle.has_pass() { "yes" } else { "no" }
            ),
            None => println!("{:<6} {}", slot, "(empty)".dimmed()),
        }
    }
    println!(
        "\nAvailable: {}  Passholders: {:.1}%",
        tracker.slots_available().to_string().green(),
        tracker.passholder_percentage()
    );
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run { config, capacity, address, script, format } => {
            let format: OutputFormat = format.parse()?;
            let tracker = open_tracker(config, capacity, address)?;
            let mut session = Session::new(tracker, format);

            let stdout = io::stdout();
            let summary = match script {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("opening script {}", path.display()))?;
                    session.run(BufReader::new(file), stdout.lock())?
                }
                None => session.run(io::stdin().lock(), stdout.lock())?,
            };

            if format == OutputFormat::Text {
                let failed = if summary.failed > 0 {
                    summary.failed.to_string().red()
                } else {
                    summary.failed.to_string().normal()
                };
                eprintln!("{} commands executed, {} failed", summary.executed, failed);
            }
            if summary.failed > 0 {
                std::process::exit(1);
            }
        }

        Commands::Init { name, capacity, address, output } => {
            if output.exists() {
                bail!("{} already exists", output.display());
            }
            let config = LotConfig::new(name, capacity, address);
            config.validate()?;
            config.save(&output)?;

            println!("{} Lot config written", "✓".green());
            println!("  Name: {}", config.metadata.name);
            println!("  Capacity: {}", config.spec.capacity);
            println!("  Address: {}", config.spec.address);
            println!("  Location: {}", output.display());
        }

        Commands::Show { config, format } => {
            let tracker = LotConfig::load(&config)?.into_tracker();
            match format.parse::<OutputFormat>()? {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tracker.report())?),
                OutputFormat::Text => print_table(&tracker),
            }
        }
    }

    Ok(())
}
