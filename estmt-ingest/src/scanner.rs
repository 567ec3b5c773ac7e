//! Section state machine.
//!
//! Walks the statement one line at a time (pages concatenated) and turns
//! `Date … Amount` / `Total` delimited tables into `Section`s. All state
//! lives in `SectionScanner`; one instance per document.

use std::mem;
use tracing::{debug, warn};

use crate::account::AccountResolver;
use crate::classify::{FragmentKind, LineKind, classify_fragment, classify_line, has_date, section_name};
use crate::error::{ParseError, Result};
use crate::layout::{has_side_by_side_tables, parse_transaction_fragment, split_side_by_side};
use crate::types::{Section, Statement, StatementDate, Transaction};

/// Behaviour switches for a single parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail when the input ends inside a table instead of dropping it.
    pub strict: bool,
}

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Outside,
    Inside(OpenSection),
}

#[derive(Debug)]
struct OpenSection {
    name: Option<String>,
    side_by_side: bool,
    transactions: Vec<Transaction>,
}

#[derive(Debug)]
pub struct SectionScanner {
    statement_date: StatementDate,
    options: ParseOptions,
    state: ScanState,
    accounts: AccountResolver,
    /// Most recent line seen outside a table; names the next table.
    candidate_header: Option<String>,
    sections: Vec<Section>,
}

impl SectionScanner {
    pub fn new(statement_date: StatementDate, options: ParseOptions) -> Self {
        Self {
            statement_date,
            options,
            state: ScanState::Outside,
            accounts: AccountResolver::new(),
            candidate_header: None,
            sections: Vec::new(),
        }
    }

    pub fn is_inside_section(&self) -> bool {
        matches!(self.state, ScanState::Inside(_))
    }

    /// Sections closed so far.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        self.accounts.observe(line);

        if self.is_inside_section() {
            return match classify_line(line, true) {
                LineKind::SectionClose => self.close_section(),
                _ => self.consume_body(line),
            };
        }

        if classify_line(line, false) == LineKind::SectionOpen {
            self.open_section(line)?;
        }

        // The header row itself only becomes the candidate when it carries a date.
        if has_date(line) || !self.is_inside_section() {
            self.candidate_header = Some(line.to_string());
        }

        Ok(())
    }

    /// End of input. A table without a `Total` row is dropped unless strict.
    pub fn finish(self) -> Result<Statement> {
        if let ScanState::Inside(open) = self.state {
            let section = open.name.unwrap_or_default();
            if self.options.strict {
                return Err(ParseError::UnterminatedSection {
                    section,
                    transactions: open.transactions.len(),
                });
            }
            warn!(
                statement = %self.statement_date,
                section = %section,
                dropped = open.transactions.len(),
                "section has no Total line, dropping it"
            );
        }

        Ok(Statement {
            date: self.statement_date,
            sections: self.sections,
        })
    }

    fn open_section(&mut self, header: &str) -> Result<()> {
        let side_by_side = has_side_by_side_tables(header)?;
        let name = self
            .candidate_header
            .as_deref()
            .map(|c| section_name(c).to_string())
            .filter(|n| !n.is_empty());

        debug!(section = ?name, side_by_side, "section started");
        self.state = ScanState::Inside(OpenSection {
            name,
            side_by_side,
            transactions: Vec::new(),
        });
        Ok(())
    }

    fn close_section(&mut self) -> Result<()> {
        let ScanState::Inside(open) = mem::take(&mut self.state) else {
            return Ok(());
        };

        let Some(name) = open.name else {
            debug!(dropped = open.transactions.len(), "closing section without a name");
            return Ok(());
        };

        let account = self
            .accounts
            .account()
            .ok_or_else(|| ParseError::UnresolvedAccount {
                statement_date: self.statement_date,
                section: name.clone(),
            })?
            .to_string();

        debug!(section = %name, transactions = open.transactions.len(), "section closed");
        self.sections.push(Section {
            name,
            transactions: open.transactions,
            account,
        });
        Ok(())
    }

    fn consume_body(&mut self, line: &str) -> Result<()> {
        let ScanState::Inside(open) = &mut self.state else {
            return Ok(());
        };

        let fragments = if open.side_by_side {
            split_side_by_side(line)?
        } else {
            vec![line]
        };

        for fragment in fragments {
            match classify_fragment(fragment) {
                FragmentKind::Transaction => {
                    open.transactions.push(parse_transaction_fragment(fragment)?);
                }
                FragmentKind::Continuation => {
                    let last = open.transactions.last_mut().ok_or_else(|| {
                        ParseError::OrphanContinuation {
                            line: fragment.to_string(),
                        }
                    })?;
                    last.append_description(fragment);
                }
            }
        }
        Ok(())
    }
}
