//! Statement assembly: date from the source name, sections from the scanner.

use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::error::Result;
use crate::scanner::{ParseOptions, SectionScanner};
use crate::types::{Statement, StatementDate};

fn statement_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"eStmt_(\d{4}-\d{2}-\d{2})").expect("statement tag regex"))
}

/// Date embedded in the source's base name as `eStmt_YYYY-MM-DD`.
pub fn statement_date_from_source(source: &str) -> StatementDate {
    let base = Path::new(source)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source);

    let Some(caps) = statement_tag_re().captures(base) else {
        return StatementDate::Unknown;
    };

    match NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d") {
        Ok(d) => StatementDate::Known(d),
        Err(_) => {
            warn!(source, tag = &caps[1], "statement tag is not a calendar date");
            StatementDate::Unknown
        }
    }
}

/// Parse an ordered stream of lines belonging to one document. Trailing
/// whitespace is trimmed from every line before it reaches the scanner.
pub fn parse_statement_lines<I, S>(source: &str, lines: I, options: ParseOptions) -> Result<Statement>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let date = statement_date_from_source(source);
    let mut scanner = SectionScanner::new(date, options);
    for line in lines {
        scanner.feed_line(line.as_ref().trim_end())?;
    }

    let statement = scanner.finish()?;
    info!(
        source,
        date = %statement.date,
        sections = statement.sections.len(),
        transactions = statement.transaction_count(),
        "statement parsed"
    );
    Ok(statement)
}

/// Parse page texts; pages are joined into one line stream so tables may
/// run across a page break.
pub fn parse_statement_pages<I, S>(source: &str, pages: I, options: ParseOptions) -> Result<Statement>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pages: Vec<S> = pages.into_iter().collect();
    let lines = pages.iter().flat_map(|p| p.as_ref().lines());
    parse_statement_lines(source, lines, options)
}
