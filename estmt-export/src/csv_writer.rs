//! Append parsed sections to per-account, per-section CSV files.
//!
//! File layout: `<out_dir>/<last 4 of account>_<section name>.csv` with columns
//! date,description,amount,statement. The header is written only when the
//! file is created, so repeated runs over a statement archive keep appending.

use anyhow::{Context, Result};
use estmt_ingest::{Section, Statement};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CSV_HEADER: [&str; 4] = ["date", "description", "amount", "statement"];
pub const DEFAULT_ACCOUNT_SUFFIX_LEN: usize = 4;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: &'a str,
    description: &'a str,
    amount: &'a str,
    statement: &'a str,
}

/// What one `append_statement` call touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub files: Vec<PathBuf>,
    pub rows: usize,
}

#[derive(Debug, Clone)]
pub struct CsvSectionWriter {
    out_dir: PathBuf,
    account_suffix_len: usize,
}

impl CsvSectionWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            account_suffix_len: DEFAULT_ACCOUNT_SUFFIX_LEN,
        }
    }

    pub fn with_account_suffix_len(mut self, len: usize) -> Self {
        self.account_suffix_len = len;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn section_path(&self, section: &Section) -> PathBuf {
        let suffix = account_suffix(&section.account, self.account_suffix_len);
        let name = section.name.replace(['/', '\\'], "_");
        self.out_dir.join(format!("{suffix}_{name}.csv"))
    }

    pub fn append_statement(&self, statement: &Statement) -> Result<WriteSummary> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("create {}", self.out_dir.display()))?;

        let statement_date = statement.date.to_string();
        let mut summary = WriteSummary::default();
        for section in &statement.sections {
            let (path, rows) = self.append_section(section, &statement_date)?;
            summary.rows += rows;
            if !summary.files.contains(&path) {
                summary.files.push(path);
            }
        }
        Ok(summary)
    }

    fn append_section(&self, section: &Section, statement_date: &str) -> Result<(PathBuf, usize)> {
        let path = self.section_path(section);
        let file_exists = path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        if !file_exists {
            wtr.write_record(CSV_HEADER)?;
        }
        for t in &section.transactions {
            wtr.serialize(CsvRow {
                date: &t.date,
                description: &t.description,
                amount: &t.amount,
                statement: statement_date,
            })
            .with_context(|| format!("write {}", path.display()))?;
        }
        wtr.flush().with_context(|| format!("write {}", path.display()))?;

        debug!(path = %path.display(), rows = section.transactions.len(), "appended section");
        Ok((path, section.transactions.len()))
    }
}

/// Last `len` characters of the account number, used to key output files.
pub fn account_suffix(account: &str, len: usize) -> String {
    let chars: Vec<char> = account.chars().collect();
    chars[chars.len().saturating_sub(len)..].iter().collect()
}
