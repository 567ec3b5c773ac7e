use thiserror::Error;

use crate::types::StatementDate;

/// Conditions that abort parsing of a single statement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("failed to get account number for statement {statement_date} (section {section:?})")]
    UnresolvedAccount {
        statement_date: StatementDate,
        section: String,
    },

    #[error("cannot create multiline transaction for empty transaction list: {line:?}")]
    OrphanContinuation { line: String },

    #[error("line has more than 2 duplicates, not supported: {line:?}")]
    UnsupportedDuplication { line: String },

    #[error("transaction fragment has no separate date and amount: {fragment:?}")]
    MalformedTransaction { fragment: String },

    #[error("section {section:?} has no Total line ({transactions} transactions buffered)")]
    UnterminatedSection { section: String, transactions: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;
