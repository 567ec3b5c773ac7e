//! Table layout handling: side-by-side duplicated tables and row field extraction.
//!
//! Check listings are often printed as two identical tables next to each other:
//!   Date Check # Amount Date Check # Amount
//!   06/11/19 193 -15,750.00 06/11/19 194 -260.00

use crate::classify::date_matches;
use crate::error::{ParseError, Result};
use crate::types::Transaction;

fn token_offsets(line: &str, token: &str) -> Vec<usize> {
    line.match_indices(token).map(|(i, _)| i).collect()
}

/// Whether a header row describes two identical tables printed side by side.
pub fn has_side_by_side_tables(header: &str) -> Result<bool> {
    let date_offsets = token_offsets(header, "Date");
    let amount_offsets = token_offsets(header, "Amount");

    if date_offsets.len() < 2 {
        return Ok(false);
    }
    if date_offsets.len() > 2 || amount_offsets.len() > 2 {
        return Err(ParseError::UnsupportedDuplication {
            line: header.to_string(),
        });
    }

    let (left, right) = header.split_at(date_offsets[1]);
    Ok(left.trim() == right.trim())
}

/// Split a body row of a side-by-side table into its left and right halves.
///
/// A row with at most one date belongs to one table (or is a continuation)
/// and is returned whole.
pub fn split_side_by_side(line: &str) -> Result<Vec<&str>> {
    let matches = date_matches(line);
    match matches.len() {
        0 | 1 => Ok(vec![line]),
        2 => {
            let (left, right) = line.split_at(matches[1].start());
            Ok(vec![left.trim(), right.trim()])
        }
        _ => Err(ParseError::UnsupportedDuplication {
            line: line.to_string(),
        }),
    }
}

/// Build a transaction from a date-bearing fragment: first token is the
/// date, last token the amount, everything between the description.
pub fn parse_transaction_fragment(fragment: &str) -> Result<Transaction> {
    let parts: Vec<&str> = fragment.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(ParseError::MalformedTransaction {
            fragment: fragment.to_string(),
        });
    }

    let date = parts[0];
    let amount = parts[parts.len() - 1];
    let description = parts[1..parts.len() - 1].join(" ");

    Ok(Transaction::new(date, description, amount))
}
