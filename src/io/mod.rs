pub mod excel_read;

pub use excel_read::Workbook;
