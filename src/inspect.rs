use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::io::Workbook;
use crate::report::{JsonReport, ReportFormat, ReportWriter, TextReport};
use crate::select::{SheetSelector, default_selectors};
use crate::summary::{DEFAULT_HEAD_ROWS, SheetSummary};

/// Prefix of the single line written when an inspection fails.
pub const ERROR_PREFIX: &str = "Error processing file:";

/// What to report on and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectOptions {
    /// Sheets to summarise, each looked up independently.
    pub selectors: Vec<SheetSelector>,
    /// Number of leading rows shown per sheet.
    pub head_rows: usize,
    pub format: ReportFormat,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            selectors: default_selectors(),
            head_rows: DEFAULT_HEAD_ROWS,
            format: ReportFormat::Text,
        }
    }
}

/// Inspects the workbook at `path` and writes the report to `out`.
///
/// Any failure is caught here and written as one
/// `Error processing file: <message>` line; the caller never sees it.
pub fn run<W: Write>(path: &Path, options: &InspectOptions, mut out: W) {
    if let Err(error) = inspect(path, options, &mut out) {
        warn!(%error, "inspection failed");
        if let Err(write_error) = writeln!(out, "{ERROR_PREFIX} {error}") {
            warn!(%write_error, "could not report the failure");
        }
    }
}

/// Inspects the workbook at `path`, writing the report in the configured format.
pub fn inspect<W: Write>(path: &Path, options: &InspectOptions, out: W) -> Result<()> {
    match options.format {
        ReportFormat::Text => inspect_workbook(path, options, &mut TextReport::new(out)),
        ReportFormat::Json => inspect_workbook(path, options, &mut JsonReport::new(out, path)),
    }
}

/// Opens the workbook, lists its sheets, then summarises the sheet picked by
/// each selector or reports that none matched.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn inspect_workbook(
    path: &Path,
    options: &InspectOptions,
    report: &mut dyn ReportWriter,
) -> Result<()> {
    let mut workbook = Workbook::open(path)?;
    let sheet_names = workbook.sheet_names().to_vec();
    info!(sheet_count = sheet_names.len(), "workbook opened");
    report.sheet_names(&sheet_names)?;

    for selector in &options.selectors {
        report.section(&selector.title())?;

        let Some(sheet) = selector.find(&sheet_names) else {
            info!(%selector, "no sheet matched");
            report.missing(&selector.not_found_message())?;
            continue;
        };

        info!(%selector, sheet, "sheet matched");
        if let Some(message) = selector.found_message(sheet) {
            report.found(&message)?;
        }

        let table = workbook.load_table(sheet)?;
        if table.column_count() == 0 {
            warn!(sheet, "sheet has no header row");
        }
        report.summary(&SheetSummary::from_table(&table, options.head_rows))?;
    }

    report.finish()
}
