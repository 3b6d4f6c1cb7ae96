use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{DataType, Range, Reader, Sheets, open_workbook_auto};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, instrument};

use crate::error::{Result, ToolError};
use crate::model::{CellValue, Table};

/// Largest serial number Excel accepts (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_466.0;

/// An open spreadsheet workbook.
///
/// The format is picked from the file extension by calamine, so `.xlsx`,
/// `.xlsm`, `.xlsb`, `.xls` and `.ods` files are all accepted.
pub struct Workbook {
    sheets: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl Workbook {
    /// Opens the workbook at `path`.
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }

        let sheets = open_workbook_auto(path)?;
        let sheet_names = sheets.sheet_names().to_vec();
        debug!(sheet_count = sheet_names.len(), "workbook opened");

        Ok(Self {
            sheets,
            sheet_names,
        })
    }

    /// Sheet names in the order the workbook declares them.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Loads a sheet as a [`Table`], using its first row as the header.
    #[instrument(level = "debug", skip(self))]
    pub fn load_table(&mut self, name: &str) -> Result<Table> {
        let range = self
            .sheets
            .worksheet_range(name)
            .ok_or_else(|| {
                ToolError::InvalidWorkbook(format!("missing sheet '{name}'"))
            })??;
        let table = range_to_table(name, &range);
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "sheet loaded"
        );
        Ok(table)
    }
}

/// Converts a raw sheet range into a table. The first row of the used range
/// is the header row.
pub fn range_to_table(sheet_name: &str, range: &Range<DataType>) -> Table {
    let mut rows = range.rows();
    let header = match rows.next() {
        Some(first_row) => first_row.iter().map(header_name).collect(),
        None => Vec::new(),
    };
    let data = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Table::from_rows(sheet_name, header, data)
}

fn header_name(cell: &DataType) -> String {
    match cell_value(cell) {
        CellValue::Empty => String::new(),
        CellValue::Int(value) => value.to_string(),
        CellValue::Float(value) => value.to_string(),
        CellValue::Bool(value) => value.to_string(),
        CellValue::Text(value) => value,
        CellValue::DateTime(value) => value.to_string(),
    }
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::Int(value) => CellValue::Int(*value),
        DataType::Float(value) => CellValue::number(*value),
        DataType::Bool(value) => CellValue::Bool(*value),
        DataType::String(value) => CellValue::text(value.as_str()),
        DataType::DateTime(serial) => match serial_to_datetime(*serial) {
            Some(value) if *serial < 1.0 => {
                CellValue::Text(value.time().format("%H:%M:%S").to_string())
            }
            Some(value) => CellValue::DateTime(value),
            None => CellValue::number(*serial),
        },
        other => CellValue::text(other.to_string()),
    }
}

/// Converts an Excel serial date (1900 date system) into a timestamp,
/// rounded to the millisecond.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !(0.0..MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnType;

    #[test]
    fn serial_dates_use_the_1900_system() {
        let date = serial_to_datetime(45_658.0).unwrap();
        assert_eq!(date.to_string(), "2025-01-01 00:00:00");

        let noon = serial_to_datetime(45_658.5).unwrap();
        assert_eq!(noon.to_string(), "2025-01-01 12:00:00");

        assert!(serial_to_datetime(-1.0).is_none());
    }

    #[test]
    fn first_row_becomes_the_header() {
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), DataType::String("id".into()));
        range.set_value((0, 1), DataType::String("name".into()));
        range.set_value((1, 0), DataType::Float(1.0));
        range.set_value((1, 1), DataType::String("Alice".into()));
        range.set_value((1, 2), DataType::String("stray".into()));
        range.set_value((2, 0), DataType::Float(2.0));
        range.set_value((2, 1), DataType::String("NA".into()));

        let table = range_to_table("Members", &range);

        assert_eq!(table.sheet_name, "Members");
        let names: Vec<&str> = table
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .collect();
        assert_eq!(names, vec!["id", "name", "Unnamed: 2"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.columns[0].values,
            vec![CellValue::Int(1), CellValue::Int(2)]
        );
        assert_eq!(
            table.columns[1].values,
            vec![CellValue::Text("Alice".into()), CellValue::Empty]
        );
        assert_eq!(table.columns[2].non_null_count(), 1);
    }

    #[test]
    fn date_cells_become_timestamps() {
        let mut range = Range::new((0, 0), (1, 0));
        range.set_value((0, 0), DataType::String("joined".into()));
        range.set_value((1, 0), DataType::DateTime(45_658.0));

        let table = range_to_table("Dates", &range);

        assert_eq!(
            table.columns[0].values,
            vec![CellValue::DateTime(serial_to_datetime(45_658.0).unwrap())]
        );
    }

    #[test]
    fn time_only_cells_stay_text() {
        let mut range = Range::new((0, 0), (2, 0));
        range.set_value((0, 0), DataType::String("start".into()));
        range.set_value((1, 0), DataType::DateTime(0.5));
        range.set_value((2, 0), DataType::DateTime(0.375));

        let table = range_to_table("Schedule", &range);

        assert_eq!(
            table.columns[0].values,
            vec![
                CellValue::Text("12:00:00".into()),
                CellValue::Text("09:00:00".into()),
            ]
        );
        assert_eq!(table.columns[0].dtype(), ColumnType::Object);
    }

    #[test]
    fn empty_range_has_no_columns() {
        let range: Range<DataType> = Range::empty();
        let table = range_to_table("Blank", &range);
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
    }
}
