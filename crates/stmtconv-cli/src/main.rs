mod commands;
mod output;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stmtconv",
    version,
    about = "Convert HSBC Hong Kong credit card PDF statements to CSV"
)]
struct Cli {
    /// Enable DEBUG-level logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF statement and write the CSV next to it
    Convert {
        /// Path to the PDF statement
        input_file: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Write the CSV here instead of next to the input
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the converted transactions without writing a file
    Parse {
        /// Path to the PDF statement
        input_file: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

/// Conversion settings; flags override values from `--config`.
#[derive(Args)]
pub struct ConfigArgs {
    /// JSON config file with bank_name, date_format, missing_statement_date
    #[arg(short, long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Bank name used in the output file name
    #[arg(long)]
    pub bank_name: Option<String>,

    /// Output date pattern, strftime syntax (e.g. "%d/%m/%Y")
    #[arg(long)]
    pub date_format: Option<String>,

    /// Fail when the statement date cannot be found
    #[arg(long, conflicts_with = "statement_date")]
    pub strict: bool,

    /// Statement date (YYYY-MM-DD) to use when none is found in the PDF
    #[arg(long, value_name = "DATE")]
    pub statement_date: Option<NaiveDate>,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert {
            input_file,
            config,
            out,
        } => commands::convert::run(input_file, &config, out),
        Commands::Parse {
            input_file,
            config,
            output,
        } => commands::parse::run(input_file, &config, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
