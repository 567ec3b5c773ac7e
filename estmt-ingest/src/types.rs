use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single statement row. Fields are kept exactly as printed on the statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// MM/DD/YY as printed
    pub date: String,
    pub description: String,
    /// Raw amount token, e.g. `-15,750.00` or `$100`
    pub amount: String,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount: amount.into(),
        }
    }

    /// Extend the description with a wrapped line.
    pub fn append_description(&mut self, text: &str) {
        self.description.push(' ');
        self.description.push_str(text);
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {},{}", self.date, self.description, self.amount)
    }
}

/// One table of transactions, bounded by a `Date … Amount` header row and a `Total` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub transactions: Vec<Transaction>,
    pub account: String,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for t in &self.transactions {
            write!(f, "\n{t}")?;
        }
        Ok(())
    }
}

/// Statement date taken from the source file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementDate {
    Known(NaiveDate),
    Unknown,
}

impl fmt::Display for StatementDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementDate::Known(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            StatementDate::Unknown => f.write_str("Unknown Date"),
        }
    }
}

/// All sections recovered from one source document, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub date: StatementDate,
    pub sections: Vec<Section>,
}

impl Statement {
    pub fn transaction_count(&self) -> usize {
        self.sections.iter().map(|s| s.transactions.len()).sum()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        for s in &self.sections {
            write!(f, "\n{s}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_description_uses_single_space() {
        let mut t = Transaction::new("07/24/19", "COMPANY PAYROLL", "$100");
        t.append_description("CO ID:CXXXXXXXXX WEB");
        assert_eq!(t.description, "COMPANY PAYROLL CO ID:CXXXXXXXXX WEB");
    }

    #[test]
    fn test_statement_display() {
        let stmt = Statement {
            date: StatementDate::Known(NaiveDate::from_ymd_opt(2019, 6, 21).unwrap()),
            sections: vec![Section {
                name: "Deposits and other additions".to_string(),
                transactions: vec![Transaction::new("06/03/19", "Payroll", "1,200.00")],
                account: "1234 5678 9012".to_string(),
            }],
        };
        assert_eq!(
            stmt.to_string(),
            "2019-06-21\nDeposits and other additions\n06/03/19, Payroll,1,200.00"
        );
        assert_eq!(stmt.transaction_count(), 1);
    }

    #[test]
    fn test_unknown_date_serializes() {
        assert_eq!(StatementDate::Unknown.to_string(), "Unknown Date");
        let json = serde_json::to_string(&StatementDate::Unknown).unwrap();
        assert_eq!(json, "\"Unknown\"");
    }
}
