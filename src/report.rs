use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;
use crate::summary::SheetSummary;

/// Output flavour of the inspection report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human readable text, written as the inspection progresses.
    #[default]
    Text,
    /// A single JSON document written once the inspection completes.
    Json,
}

/// Receives the steps of an inspection in the order they happen.
pub trait ReportWriter {
    fn sheet_names(&mut self, names: &[String]) -> Result<()>;
    fn section(&mut self, title: &str) -> Result<()>;
    fn found(&mut self, message: &str) -> Result<()>;
    fn summary(&mut self, summary: &SheetSummary) -> Result<()>;
    fn missing(&mut self, message: &str) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

/// Streams the report as text.
pub struct TextReport<W> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ReportWriter for TextReport<W> {
    fn sheet_names(&mut self, names: &[String]) -> Result<()> {
        let quoted: Vec<String> = names.iter().map(|name| quote(name)).collect();
        writeln!(self.out, "All Sheet Names: [{}]", quoted.join(", "))?;
        Ok(())
    }

    fn section(&mut self, title: &str) -> Result<()> {
        writeln!(self.out, "\n\n=== ANALYZING: {title} ===")?;
        Ok(())
    }

    fn found(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }

    fn summary(&mut self, summary: &SheetSummary) -> Result<()> {
        write!(self.out, "{}", summary.info_text())?;
        write!(self.out, "{}", summary.head_text())?;
        Ok(())
    }

    fn missing(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Quotes a sheet name the way a list literal would show it.
fn quote(name: &str) -> String {
    if name.contains('\'') && !name.contains('"') {
        format!("\"{name}\"")
    } else {
        format!("'{}'", name.replace('\'', "\\'"))
    }
}

/// Outcome of one selector, as it appears in the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SheetSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<String>,
}

/// Whole inspection, as written by [`JsonReport`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkbookReport {
    pub path: String,
    pub sheet_names: Vec<String>,
    pub sections: Vec<SectionReport>,
}

/// Collects the report and writes it as pretty JSON on [`ReportWriter::finish`].
pub struct JsonReport<W> {
    out: W,
    report: WorkbookReport,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W, path: &Path) -> Self {
        Self {
            out,
            report: WorkbookReport {
                path: path.display().to_string(),
                ..WorkbookReport::default()
            },
        }
    }

    fn current(&mut self) -> Option<&mut SectionReport> {
        self.report.sections.last_mut()
    }
}

impl<W: Write> ReportWriter for JsonReport<W> {
    fn sheet_names(&mut self, names: &[String]) -> Result<()> {
        self.report.sheet_names = names.to_vec();
        Ok(())
    }

    fn section(&mut self, title: &str) -> Result<()> {
        self.report.sections.push(SectionReport {
            title: title.to_string(),
            found: None,
            summary: None,
            missing: None,
        });
        Ok(())
    }

    fn found(&mut self, message: &str) -> Result<()> {
        if let Some(section) = self.current() {
            section.found = Some(message.to_string());
        }
        Ok(())
    }

    fn summary(&mut self, summary: &SheetSummary) -> Result<()> {
        if let Some(section) = self.current() {
            section.summary = Some(summary.clone());
        }
        Ok(())
    }

    fn missing(&mut self, message: &str) -> Result<()> {
        if let Some(section) = self.current() {
            section.missing = Some(message.to_string());
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &self.report)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
