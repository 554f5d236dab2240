//! mesa-rs command line
//!
//! Plots and tables for a MESA `LOGS` directory, plus the binary-orbit calculator.

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mesa_rs::data::{get_index, load_history_file};
use mesa_rs::output::export::{
    export_composition_csv, export_hr_snapshots_csv, export_hr_track_csv, CsvConfig, CsvMetadata,
};
use mesa_rs::output::visualization::{
    plot_composition_view, plot_hr_diagram, CompositionAxis, CompositionView, HrDiagram, PlotConfig,
    NO_HIGHLIGHT,
};
use mesa_rs::physics::BinaryOrbit;
use mesa_rs::{MesaError, Result};

/// Plots and tables for MESA stellar-evolution runs
#[derive(Parser, Debug)]
#[command(name = "mesa-rs")]
#[command(version)]
#[command(after_help = "EXAMPLES:
  # HR diagram with snapshot 3 highlighted
  mesa-rs hr --profile 3 -o hr.png

  # Composition of the second snapshot against mass, with CSV
  mesa-rs composition --profile 2 --axis mass --csv composition.csv

  # Separation and Roche lobe of a 1.4 + 0.7 Msun binary with a 10 day period
  mesa-rs orbit --m1 1.4 --ratio 0.5 --period 10
")]
struct Cli {
    /// MESA LOGS directory
    #[arg(long = "logs-dir", env = "MESA_LOGS_DIR", default_value = "LOGS", global = true)]
    logs_dir: PathBuf,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot the HR diagram
    Hr {
        /// Profile number to highlight (default: none)
        #[arg(long = "profile", default_value_t = NO_HIGHLIGHT, allow_negative_numbers = true)]
        profile: i64,

        /// Snapshot table CSV (profile, model, Teff, L)
        #[arg(long = "snapshots-csv", value_name = "FILE")]
        snapshots_csv: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Plot the hydrogen and helium profile of one snapshot
    Composition {
        /// 1-based position of the snapshot in profiles.index
        #[arg(long = "profile")]
        profile: usize,

        /// Horizontal coordinate [radius, mass]
        #[arg(long = "axis", default_value = "radius")]
        axis: CompositionAxis,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the profile snapshots of the run
    Index,

    /// Semi-major axis and Roche-lobe radius of a circular binary
    Orbit {
        /// Primary mass [Msun]
        #[arg(long = "m1")]
        m1: f64,

        /// Mass ratio M2 / M1
        #[arg(long = "ratio")]
        ratio: f64,

        /// Orbital period [days]
        #[arg(long = "period")]
        period: f64,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Plot file (.svg for SVG, anything else for PNG)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also write the plotted data as CSV
    #[arg(long = "csv", value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long = "width")]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long = "height")]
    height: Option<u32>,

    /// Plot title
    #[arg(long = "title")]
    title: Option<String>,
}

impl OutputArgs {
    fn apply(&self, mut config: PlotConfig) -> PlotConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        config
    }
}

/// Log level from `-q` / `-v`; `RUST_LOG` still overrides it
fn log_level(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(log_level(cli.quiet, cli.verbose))
        .parse_default_env()
        .init();
}

fn stdout_err(e: io::Error) -> MesaError {
    MesaError::from_io(Path::new("<stdout>"), e)
}

/// Process exit status of a finished command
fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let logs_dir = &cli.logs_dir;

    match cli.command {
        Command::Hr { profile, snapshots_csv, output } => {
            let diagram = HrDiagram::load(logs_dir, profile)?;
            let config = output.apply(PlotConfig::hr_diagram(output.title.clone()));
            let plot_path = output.output.clone().unwrap_or_else(|| PathBuf::from("hr.png"));

            plot_hr_diagram(&diagram, &plot_path, Some(&config))?;
            writeln!(out, "{}", plot_path.display()).map_err(stdout_err)?;

            let csv_config =
                CsvConfig::default().with_metadata(CsvMetadata::for_snapshot(logs_dir, profile));
            if let Some(path) = &output.csv {
                export_hr_track_csv(&diagram, path, Some(&csv_config))?;
            }
            if let Some(path) = &snapshots_csv {
                export_hr_snapshots_csv(&diagram, path, Some(&csv_config))?;
            }
        }

        Command::Composition { profile, axis, output } => {
            let view = CompositionView::load(logs_dir, profile, axis)?;
            let config = output.apply(PlotConfig::composition(output.title.clone()));
            let plot_path = output
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("composition.png"));

            plot_composition_view(&view, &plot_path, Some(&config))?;
            writeln!(out, "{}", plot_path.display()).map_err(stdout_err)?;

            if let Some(path) = &output.csv {
                let mut metadata = CsvMetadata::for_snapshot(logs_dir, view.profile_number);
                metadata.add_custom("Axis", axis.as_str());
                let csv_config = CsvConfig::default().with_metadata(metadata);
                export_composition_csv(&view, path, Some(&csv_config))?;
            }
        }

        Command::Index => {
            let index = get_index(logs_dir)?;
            let history = load_history_file(logs_dir)?;

            writeln!(out, "{:>8} {:>8} {:>8} {:>14}", "profile", "model", "priority", "age (yr)")
                .map_err(stdout_err)?;
            for entry in &index {
                let age = history
                    .rows_for_model(entry.model_number)?
                    .star_age()?
                    .iter()
                    .next()
                    .map(|age| format!("{:.6e}", age))
                    .unwrap_or_else(|| "-".to_string());

                writeln!(
                    out,
                    "{:>8} {:>8} {:>8} {:>14}",
                    entry.profile_number, entry.model_number, entry.priority, age
                )
                .map_err(stdout_err)?;
            }
        }

        Command::Orbit { m1, ratio, period } => {
            let orbit = BinaryOrbit::solve(m1, ratio, period)?;
            writeln!(
                out,
                "M1 = {} Msun, M2 = {} Msun, P = {} d",
                orbit.primary_mass, orbit.secondary_mass, orbit.period_days
            )
            .map_err(stdout_err)?;
            writeln!(out, "semi-major axis   = {:.4} Rsun", orbit.semi_major_axis)
                .map_err(stdout_err)?;
            writeln!(out, "Roche-lobe radius = {:.4} Rsun", orbit.roche_lobe_radius)
                .map_err(stdout_err)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = run(cli, &mut io::stdout().lock());
    if let Err(e) = &result {
        eprintln!("error: {}", e);
    }

    ExitCode::from(exit_status(&result))
}

// =================================================================================================
// Tests
// =================================================================================================
