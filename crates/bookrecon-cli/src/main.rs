mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "bookrecon",
    version,
    about = "Reconcile subject-line exports against booking data and report per office"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// The two input workbooks and how to read them.
#[derive(Args)]
pub struct InputArgs {
    /// Workbook with the Subject and Office columns
    pub subjects: PathBuf,

    /// Workbook with the latest booking data (House BL, Booking, Status, ...)
    pub reference: PathBuf,

    /// Custom JSON column layout (default: built-in layout)
    #[arg(short, long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Sheet to read from both workbooks (overrides the layout)
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,
}

/// Flag filters shared by the booking views.
#[derive(Args)]
pub struct FlagArgs {
    /// Doc received filter: both, yes or no
    #[arg(long, default_value = "both")]
    pub doc_received: bookrecon_core::filter::TriState,

    /// Posted filter: both, yes or no
    #[arg(long, default_value = "both")]
    pub posted: bookrecon_core::filter::TriState,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the found/not-found tally and the office-wise summary
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Leave out the Total row
        #[arg(long)]
        no_totals: bool,

        /// Offices as columns, metrics as rows
        #[arg(long)]
        transpose: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List filtered bookings, optionally with breakdowns and an xlsx export
    Bookings {
        #[command(flatten)]
        input: InputArgs,

        /// Restrict to these offices (repeatable; default: all offices)
        #[arg(long = "office", value_name = "NAME")]
        offices: Vec<String>,

        #[command(flatten)]
        flags: FlagArgs,

        /// Also show per-office disposition and status counts
        #[arg(long)]
        breakdown: bool,

        /// Write the filtered bookings to an xlsx file
        #[arg(
            long,
            value_name = "FILE",
            num_args = 0..=1,
            default_missing_value = bookrecon_core::export::EXPORT_FILE_NAME
        )]
        export: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List booking numbers for one office and one disposition or status value
    Drill {
        #[command(flatten)]
        input: InputArgs,

        /// Office to list bookings for
        #[arg(long, value_name = "NAME")]
        office: String,

        #[command(flatten)]
        flags: FlagArgs,

        /// Field to match: disposition or status
        #[arg(long, value_name = "FIELD")]
        by: bookrecon_core::drilldown::Dimension,

        /// Value of the field to list bookings for
        #[arg(long, value_name = "VALUE")]
        value: String,
    },
    /// Inspect and validate column layouts
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
}

#[derive(Subcommand)]
enum LayoutAction {
    /// Print the built-in column layout as JSON
    Show,
    /// Validate a custom layout file
    Validate {
        /// Path to JSON layout file
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Summary {
            input,
            no_totals,
            transpose,
            output,
        } => commands::summary::run(&input, !no_totals, transpose, &output),
        Commands::Bookings {
            input,
            offices,
            flags,
            breakdown,
            export,
            output,
        } => commands::bookings::run(&input, offices, &flags, breakdown, export, &output),
        Commands::Drill {
            input,
            office,
            flags,
            by,
            value,
        } => commands::bookings::drill(&input, &office, &flags, by, &value),
        Commands::Layout { action } => match action {
            LayoutAction::Show => commands::layout::show(),
            LayoutAction::Validate { file } => commands::layout::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
