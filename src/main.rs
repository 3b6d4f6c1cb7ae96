use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sheet_probe::inspect::{self, InspectOptions};
use sheet_probe::report::ReportFormat;
use sheet_probe::select::{DEFAULT_EXACT_SHEET, DEFAULT_SHEET_PATTERN, SheetSelector};
use sheet_probe::summary::DEFAULT_HEAD_ROWS;
use sheet_probe::{Result, logging};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose)?;
    match cli.command {
        Command::Inspect(args) => {
            execute_inspect(args);
            Ok(())
        }
    }
}

fn execute_inspect(args: InspectArgs) {
    let options = InspectOptions {
        selectors: vec![
            SheetSelector::Exact(args.sheet),
            SheetSelector::Contains(args.contains),
        ],
        head_rows: args.rows,
        format: args.format,
    };
    let stdout = std::io::stdout();
    inspect::run(&args.path, &options, stdout.lock());
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Print sheet names and column summaries of a spreadsheet workbook."
)]
struct Cli {
    /// Increase log detail on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List sheets and summarise the selected ones.
    Inspect(InspectArgs),
}

#[derive(clap::Args)]
struct InspectArgs {
    /// Workbook file path.
    path: PathBuf,

    /// Sheet summarised by exact name.
    #[arg(long, default_value = DEFAULT_EXACT_SHEET)]
    sheet: String,

    /// Case-sensitive substring; the first sheet containing it is summarised.
    #[arg(long, default_value = DEFAULT_SHEET_PATTERN)]
    contains: String,

    /// Number of leading rows shown per sheet.
    #[arg(long, default_value_t = DEFAULT_HEAD_ROWS)]
    rows: usize,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}
