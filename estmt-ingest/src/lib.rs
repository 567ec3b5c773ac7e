//! estmt-ingest: reconstructs statement tables (sections, transactions, accounts)
//! from the plain text lines of bank statement pages.

pub mod account;
pub mod classify;
pub mod error;
pub mod layout;
pub mod scanner;
pub mod statement;
pub mod types;

pub use account::{AccountResolver, parse_combined_account_number, parse_global_account_number};
pub use error::ParseError;
pub use scanner::{ParseOptions, SectionScanner};
pub use statement::{parse_statement_lines, parse_statement_pages, statement_date_from_source};
pub use types::{Section, Statement, StatementDate, Transaction};
