use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Text values treated as missing when a sheet is loaded.
pub const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single cell of a loaded sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell or a recognised missing-value marker.
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Builds a text cell, folding missing-value markers into [`CellValue::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if MISSING_MARKERS.contains(&value.as_str()) {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// Builds a numeric cell. Integral values become [`CellValue::Int`].
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            return CellValue::Empty;
        }
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            CellValue::Int(value as i64)
        } else {
            CellValue::Float(value)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// Column type inferred from the non-null values of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ColumnType {
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "datetime64[ns]")]
    DateTime,
    #[serde(rename = "float64")]
    Float64,
    #[serde(rename = "int64")]
    Int64,
    #[serde(rename = "object")]
    Object,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Bool => "bool",
            ColumnType::DateTime => "datetime64[ns]",
            ColumnType::Float64 => "float64",
            ColumnType::Int64 => "int64",
            ColumnType::Object => "object",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named column of a loaded sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn non_null_count(&self) -> usize {
        self.values.iter().filter(|value| !value.is_null()).count()
    }

    /// Infers the column type.
    ///
    /// Integer and boolean columns cannot hold nulls: a null in an integer
    /// column widens it to `float64`, a null in a boolean column makes it
    /// `object`. A column whose rows are all null is `float64`; a column with
    /// no rows at all is `object`.
    pub fn dtype(&self) -> ColumnType {
        if self.values.is_empty() {
            return ColumnType::Object;
        }
        let has_nulls = self.values.iter().any(CellValue::is_null);
        let mut ints = 0;
        let mut floats = 0;
        let mut bools = 0;
        let mut dates = 0;
        let mut others = 0;

        for value in &self.values {
            match value {
                CellValue::Empty => {}
                CellValue::Int(_) => ints += 1,
                CellValue::Float(_) => floats += 1,
                CellValue::Bool(_) => bools += 1,
                CellValue::DateTime(_) => dates += 1,
                CellValue::Text(_) => others += 1,
            }
        }

        let non_null = ints + floats + bools + dates + others;
        if non_null == 0 {
            return ColumnType::Float64;
        }
        if ints == non_null && !has_nulls {
            return ColumnType::Int64;
        }
        if ints + floats == non_null {
            return ColumnType::Float64;
        }
        if bools == non_null && !has_nulls {
            return ColumnType::Bool;
        }
        if dates == non_null {
            return ColumnType::DateTime;
        }
        ColumnType::Object
    }
}

/// A sheet loaded as named columns of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub sheet_name: String,
    pub columns: Vec<Column>,
}

impl Table {
    /// Builds a table from a header row and data rows.
    ///
    /// Header names are normalised with [`normalize_headers`]. Rows shorter
    /// than the header are padded with [`CellValue::Empty`]; cells beyond the
    /// header width are dropped.
    pub fn from_rows(
        sheet_name: impl Into<String>,
        header: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Self {
        let names = normalize_headers(header);
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.values.push(cells.next().unwrap_or(CellValue::Empty));
            }
        }

        Self {
            sheet_name: sheet_name.into(),
            columns,
        }
    }

    pub fn row_count(&self) -> usize {
        self.columns
            .first()
            .map(|column| column.values.len())
            .unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Gives blank header cells an `Unnamed: <index>` name and suffixes repeated
/// names with `.1`, `.2`, ... in order of appearance. A suffixed name that
/// is itself taken is suffixed again, so `a, a.1, a` gives `a, a.1, a.1.1`.
pub fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut names = Vec::with_capacity(raw.len());

    for (index, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {index}")
        } else {
            name
        };

        let mut candidate = base;
        let mut count = counts.get(&candidate).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(candidate.clone(), count + 1);
            candidate = format!("{candidate}.{count}");
            count = counts.get(&candidate).copied().unwrap_or(0);
        }
        counts.insert(candidate.clone(), count + 1);
        names.push(candidate);
    }

    names
}
