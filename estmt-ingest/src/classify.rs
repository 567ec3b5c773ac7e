//! Line classification for statement tables.

use regex::{Match, Regex};
use std::sync::OnceLock;

const HEADER_START: &str = "Date";
const HEADER_END: &str = "Amount";
const FOOTER_START: &str = "Total";
const CONTINUED_SUFFIX: &str = " - continued";

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{2}/\d{2}/\d{2}").expect("date regex"))
}

/// What a line means given whether a table is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `Date … Amount` column header row
    SectionOpen,
    /// `Total …` footer row
    SectionClose,
    /// Any other line inside a table
    Body,
    /// Any other line outside a table
    Text,
}

/// What a single transaction-bearing fragment carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Transaction,
    Continuation,
}

pub fn classify_line(line: &str, inside_section: bool) -> LineKind {
    if inside_section {
        if is_section_close(line) {
            LineKind::SectionClose
        } else {
            LineKind::Body
        }
    } else if is_section_open(line) {
        LineKind::SectionOpen
    } else {
        LineKind::Text
    }
}

pub fn classify_fragment(fragment: &str) -> FragmentKind {
    if has_date(fragment) {
        FragmentKind::Transaction
    } else {
        FragmentKind::Continuation
    }
}

pub fn is_section_open(line: &str) -> bool {
    line.starts_with(HEADER_START) && line.ends_with(HEADER_END)
}

pub fn is_section_close(line: &str) -> bool {
    line.starts_with(FOOTER_START)
}

pub fn has_date(line: &str) -> bool {
    date_re().is_match(line)
}

/// Every `MM/DD/YY` occurrence, left to right.
pub fn date_matches(line: &str) -> Vec<Match<'_>> {
    date_re().find_iter(line).collect()
}

/// Section name from the line that preceded the header row. Tables that
/// wrap onto the next page repeat their title with ` - continued`.
pub fn section_name(candidate: &str) -> &str {
    candidate
        .strip_suffix(CONTINUED_SUFFIX)
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_footer_rows() {
        assert!(is_section_open("Date Description Amount"));
        assert!(is_section_open("Date Check # Amount Date Check # Amount"));
        assert!(!is_section_open("Date Description Amount Balance"));
        assert!(!is_section_open("Posting Date Description Amount"));

        assert!(is_section_close("Total deposits and other additions $5,000.00"));
        assert!(!is_section_close("Subtotal $10.00"));
    }

    #[test]
    fn test_classify_depends_on_state() {
        assert_eq!(classify_line("Date Description Amount", false), LineKind::SectionOpen);
        assert_eq!(classify_line("Date Description Amount", true), LineKind::Body);
        assert_eq!(classify_line("Total $1.00", true), LineKind::SectionClose);
        assert_eq!(classify_line("Total $1.00", false), LineKind::Text);
        assert_eq!(classify_line("06/03/19 Payroll 100.00", true), LineKind::Body);
    }

    #[test]
    fn test_fragment_kind() {
        assert_eq!(classify_fragment("06/03/19 Payroll 100.00"), FragmentKind::Transaction);
        assert_eq!(classify_fragment("CO ID:CXXXXXXXXX WEB"), FragmentKind::Continuation);
        assert_eq!(classify_fragment("ref 6/3/19"), FragmentKind::Continuation);
    }

    #[test]
    fn test_date_matches_positions() {
        let line = "06/11/19 193 -15,750.00 06/11/19 194 -260.00";
        let starts: Vec<usize> = date_matches(line).iter().map(|m| m.start()).collect();
        assert_eq!(starts, vec![0, 24]);
    }

    #[test]
    fn test_section_name_strips_continued() {
        assert_eq!(section_name("Withdrawals and other subtractions - continued"), "Withdrawals and other subtractions");
        assert_eq!(section_name("Checks"), "Checks");
        assert_eq!(section_name("Checks - continued later"), "Checks - continued later");
    }
}
