use clap::{Parser, Subcommand};
use party_printout::cli::{self, OutputFormat};
use party_printout::error::PrintoutResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "party-printout")]
#[command(about = "Turn the \"Day Printout\" booking sheet into a readable party printout.")]
#[command(long_about = "Party Printout - day sheet to kitchen printout

Reads the \"Day Printout\" worksheet of a booking export and lists every
party with its prep time (20 minutes before eating), eat time, room,
headcount and food orders.

COMMANDS:
  show     - Print the day's parties
  export   - Write the printout to .xlsx, .json or .yaml
  watch    - Re-print whenever the workbook changes

EXAMPLES:
  party-printout show bookings.xlsx
  party-printout show bookings.xlsx --format json
  party-printout export bookings.xlsx parties.xlsx
  party-printout watch bookings.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Print the day's parties from a booking workbook.

Only the sheet named \"Day Printout\" is read. Rows without a kid's name,
and repeated header rows, are skipped. Times that cannot be read are
shown as \"Invalid Time\".

OUTPUT FORMATS:
  text (default) - one card per party
  json / yaml    - rendered parties for scripting")]
    /// Print the day's parties
    Show {
        /// Path to the booking workbook (.xlsx, .xlsm, .xlsb, .xls, .ods)
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Export the printout as a document.

The format follows the output extension:
  .xlsx        - printable workbook, one banded row per party
  .json        - rendered parties as JSON
  .yaml / .yml - rendered parties as YAML

A day without parties is not exported.

EXAMPLE:
  party-printout export bookings.xlsx parties.xlsx")]
    /// Export the printout to .xlsx, .json or .yaml
    Export {
        /// Path to the booking workbook
        input: PathBuf,

        /// Output file path
        output: PathBuf,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Watch a booking workbook and re-print on changes.

Every save of the workbook is decoded again. A save that cannot be read
is reported and the last good printout is kept.

Press Ctrl+C to stop watching.")]
    /// Watch a workbook and re-print on changes
    Watch {
        /// Path to the booking workbook
        file: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> PrintoutResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "party_printout=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            file,
            format,
            verbose,
        } => cli::show(file, format, verbose),

        Commands::Export {
            input,
            output,
            verbose,
        } => cli::export(input, output, verbose),

        Commands::Watch { file, verbose } => cli::watch(file, verbose),
    }
}
