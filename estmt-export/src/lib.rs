//! estmt-export: the I/O around the statement scanner (PDF text in, CSV out).

pub mod csv_writer;
pub mod pdf_text;

pub use csv_writer::{CsvSectionWriter, WriteSummary, account_suffix};
pub use pdf_text::{extract_pdf_pages, load_pages, read_text_pages};
