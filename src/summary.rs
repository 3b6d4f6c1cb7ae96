//! Per-sheet digest: schema overview plus the first rows, rendered as text or
//! serialised as JSON.

use std::collections::BTreeMap;

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::model::{CellValue, Column, ColumnType, Table};

/// Cells longer than this are cut and suffixed with `...`.
pub const MAX_CELL_WIDTH: usize = 50;
/// Rows shown when no count is configured.
pub const DEFAULT_HEAD_ROWS: usize = 5;

/// Schema entry of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub index: usize,
    pub name: String,
    pub non_null: usize,
    pub dtype: ColumnType,
}

/// Structural summary of a loaded sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSummary {
    pub sheet: String,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
    pub dtypes: BTreeMap<ColumnType, usize>,
    /// Leading rows, already formatted per column type.
    pub head: Vec<Vec<String>>,
}

impl SheetSummary {
    /// Summarises `table`, keeping at most `head_rows` leading rows.
    pub fn from_table(table: &Table, head_rows: usize) -> Self {
        let shown = table.row_count().min(head_rows);
        let mut dtypes = BTreeMap::new();
        let mut columns = Vec::with_capacity(table.column_count());
        let mut formatted = Vec::with_capacity(table.column_count());

        for (index, column) in table.columns.iter().enumerate() {
            let dtype = column.dtype();
            *dtypes.entry(dtype).or_insert(0) += 1;
            columns.push(ColumnSummary {
                index,
                name: column.name.clone(),
                non_null: column.non_null_count(),
                dtype,
            });
            formatted.push(format_column(column, dtype, shown));
        }

        let head = (0..shown)
            .map(|row| formatted.iter().map(|cells| cells[row].clone()).collect())
            .collect();

        Self {
            sheet: table.sheet_name.clone(),
            rows: table.row_count(),
            columns,
            dtypes,
            head,
        }
    }

    /// Renders the schema overview: entries, per-column non-null counts and
    /// types, and the type tally.
    pub fn info_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Sheet: {}\n", self.sheet));
        if self.rows == 0 {
            out.push_str("RangeIndex: 0 entries\n");
        } else {
            out.push_str(&format!(
                "RangeIndex: {} entries, 0 to {}\n",
                self.rows,
                self.rows - 1
            ));
        }

        if self.columns.is_empty() {
            out.push_str("Empty DataFrame\n");
            return out;
        }

        out.push_str(&format!(
            "Data columns (total {} columns):\n",
            self.columns.len()
        ));

        let counts: Vec<String> = self
            .columns
            .iter()
            .map(|column| format!("{} non-null", column.non_null))
            .collect();
        let index_width = (self.columns.len() - 1).to_string().len().max(1);
        let name_width = self
            .columns
            .iter()
            .map(|column| column.name.chars().count())
            .chain(std::iter::once("Column".len()))
            .max()
            .unwrap_or(0);
        let count_width = counts
            .iter()
            .map(String::len)
            .chain(std::iter::once("Non-Null Count".len()))
            .max()
            .unwrap_or(0);
        let dtype_width = self
            .columns
            .iter()
            .map(|column| column.dtype.as_str().len())
            .chain(std::iter::once("Dtype".len()))
            .max()
            .unwrap_or(0);

        out.push_str(&format!(
            " {:>index_width$}   {:<name_width$}  {:<count_width$}  Dtype\n",
            "#", "Column", "Non-Null Count"
        ));
        out.push_str(&format!(
            "{}  {}  {}  {}\n",
            "-".repeat(index_width + 2),
            "-".repeat(name_width),
            "-".repeat(count_width),
            "-".repeat(dtype_width)
        ));
        for (column, count) in self.columns.iter().zip(&counts) {
            out.push_str(&format!(
                " {:>index_width$}   {:<name_width$}  {:<count_width$}  {}\n",
                column.index, column.name, count, column.dtype
            ));
        }

        let tally: Vec<String> = self
            .dtypes
            .iter()
            .map(|(dtype, count)| format!("{dtype}({count})"))
            .collect();
        out.push_str(&format!("dtypes: {}\n", tally.join(", ")));
        out
    }

    /// Renders the leading rows as an aligned table with a row index.
    pub fn head_text(&self) -> String {
        if self.head.is_empty() || self.columns.is_empty() {
            let names: Vec<&str> = self
                .columns
                .iter()
                .map(|column| column.name.as_str())
                .collect();
            return format!(
                "Empty DataFrame\nColumns: [{}]\nIndex: []\n",
                names.join(", ")
            );
        }

        let index_width = (self.head.len() - 1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(col, column)| {
                self.head
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(column.name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = format!("{:index_width$}", "");
        for (column, width) in self.columns.iter().zip(widths.iter().copied()) {
            out.push_str(&format!("  {:>width$}", column.name));
        }
        out.push('\n');

        for (row_index, row) in self.head.iter().enumerate() {
            out.push_str(&format!("{row_index:<index_width$}"));
            for (cell, width) in row.iter().zip(widths.iter().copied()) {
                out.push_str(&format!("  {cell:>width$}"));
            }
            out.push('\n');
        }
        out
    }
}

fn format_column(column: &Column, dtype: ColumnType, rows: usize) -> Vec<String> {
    let values = &column.values[..rows.min(column.values.len())];
    let date_only = dtype == ColumnType::DateTime
        && column.values.iter().all(|value| match value {
            CellValue::DateTime(stamp) => stamp.time() == NaiveTime::MIN,
            _ => true,
        });

    values
        .iter()
        .map(|value| truncate(format_cell(value, dtype, date_only)))
        .collect()
}

fn format_cell(value: &CellValue, dtype: ColumnType, date_only: bool) -> String {
    match (value, dtype) {
        (CellValue::Empty, ColumnType::DateTime) => "NaT".to_string(),
        (CellValue::Empty, _) => "NaN".to_string(),
        (CellValue::Int(value), ColumnType::Float64) => format_float(*value as f64),
        (CellValue::Int(value), _) => value.to_string(),
        (CellValue::Float(value), _) => format_float(*value),
        (CellValue::Bool(true), _) => "True".to_string(),
        (CellValue::Bool(false), _) => "False".to_string(),
        (CellValue::Text(value), _) => value.clone(),
        (CellValue::DateTime(stamp), _) if date_only => {
            stamp.format("%Y-%m-%d").to_string()
        }
        (CellValue::DateTime(stamp), _) if stamp.nanosecond() != 0 => {
            stamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
        }
        (CellValue::DateTime(stamp), _) => stamp.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Six decimal places at most, trailing zeros trimmed, one decimal kept.
fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let mut text = format!("{value:.6}");
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    text
}

fn truncate(text: String) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text;
    }
    let mut cut: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}
