#![allow(dead_code)]

use std::fs::{self, File};
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;
use zip::ZipArchive;
use zip::write::{FileOptions, ZipWriter};

/// A cell written into a fixture sheet.
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
    Blank,
}

/// A fixture sheet: name, header row, data rows.
pub struct Sheet<'a> {
    pub name: &'a str,
    pub header: &'a [&'a str],
    pub rows: Vec<Vec<Cell<'a>>>,
}

impl<'a> Sheet<'a> {
    pub fn new(name: &'a str, header: &'a [&'a str]) -> Self {
        Self {
            name,
            header,
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: Vec<Cell<'a>>) -> Self {
        self.rows.push(cells);
        self
    }
}

/// Writes the sheets, in order, to `<dir>/<file_name>`.
pub fn write_workbook(dir: &Path, file_name: &str, sheets: &[Sheet<'_>]) -> PathBuf {
    let path = dir.join(file_name);
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).expect("sheet named");

        for (col_idx, header) in sheet.header.iter().enumerate() {
            worksheet
                .write_string(0, col_idx as u16, *header)
                .expect("header written");
        }

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let row_idx = (row_idx + 1) as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let col_idx = col_idx as u16;
                match cell {
                    Cell::Text(value) => {
                        worksheet
                            .write_string(row_idx, col_idx, *value)
                            .expect("text written");
                    }
                    Cell::Number(value) => {
                        worksheet
                            .write_number(row_idx, col_idx, *value)
                            .expect("number written");
                    }
                    Cell::Bool(value) => {
                        worksheet
                            .write_boolean(row_idx, col_idx, *value)
                            .expect("boolean written");
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save(&path).expect("workbook saved");
    path
}

/// Rewrites the archive at `path` without the entry named `entry`, leaving a
/// workbook that still lists the sheet but cannot read it.
pub fn remove_archive_entry(path: &Path, entry: &str) {
    let mut archive = ZipArchive::new(File::open(path).expect("workbook opened"))
        .expect("workbook archive read");
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for index in 0..archive.len() {
        let mut file = archive.by_index(index).expect("archive entry read");
        if file.name() == entry {
            continue;
        }
        let name = file.name().to_string();
        let mut data = Vec::new();
        file.read_to_end(&mut data).expect("archive entry content read");
        zip.start_file::<_, ()>(name, FileOptions::default())
            .expect("archive entry started");
        zip.write_all(&data).expect("archive entry written");
    }

    let bytes = zip.finish().expect("archive finished").into_inner();
    fs::write(path, bytes).expect("workbook rewritten");
}

pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("temporary directory")
}

/// Member sheet shaped like the transfer data the tool was written for.
pub fn peralihan_sheet() -> Sheet<'static> {
    Sheet::new("DATA PERALIHAN NEW", &["Nama", "Paket", "Biaya", "Aktif"])
        .row(vec![
            Cell::Text("Andi"),
            Cell::Text("Reguler"),
            Cell::Number(1_500_000.0),
            Cell::Bool(true),
        ])
        .row(vec![
            Cell::Text("Budi"),
            Cell::Blank,
            Cell::Number(2_250_000.0),
            Cell::Bool(false),
        ])
}

pub fn rdn_sheet(name: &'static str) -> Sheet<'static> {
    Sheet::new(name, &["Bank", "Saldo"])
        .row(vec![Cell::Text("BCA"), Cell::Number(100.0)])
        .row(vec![Cell::Text("BNI"), Cell::Number(250.5)])
}
