mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fortnight",
    version,
    about = "Extract two-week school timetables from CSV, PDF and OCR sources"
)]
struct Cli {
    /// Log skipped lines and grid cells (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a timetable (CSV, PDF or OCR fragment JSON) into entries
    Parse {
        /// Path to a .csv, .pdf or fragment .json file
        input_file: PathBuf,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the parse result as JSON to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// JSON file with extraction options
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Override the OCR column gap threshold (normalized page width)
        #[arg(long, value_name = "X")]
        column_gap: Option<f64>,

        /// Keep only the first entry for each week/day/period
        #[arg(long)]
        dedupe: bool,
    },
    /// Parse a timetable and print the validation report
    Validate {
        /// Path to a .csv, .pdf or fragment .json file
        input_file: PathBuf,

        /// JSON file with extraction options
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print a complete sample fortnight
    Sample {
        /// Output format: csv (default), table or json
        #[arg(short, long, default_value = "csv")]
        output: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
            config,
            column_gap,
            dedupe,
        } => commands::parse::run(
            input_file,
            &output,
            out,
            commands::OptionArgs { config, column_gap },
            dedupe,
        ),
        Commands::Validate {
            input_file,
            config,
            output,
        } => commands::validate::run(
            input_file,
            &output,
            commands::OptionArgs {
                config,
                column_gap: None,
            },
        ),
        Commands::Sample { output } => commands::sample::run(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
