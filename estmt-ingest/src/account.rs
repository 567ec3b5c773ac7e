//! Account number recognition.
//!
//! Ordinary statements print the account once near the top:
//!   ! JOHN DOE ! Account # 1234 5678 9012 ! January 1, 2020
//!
//! Combined statements additionally print one line per account:
//!   Account number: 9876 5432 1000

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const COMBINED_PREFIX: &str = "Account number:";

fn global_account_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"! Account #\s*([\d\s]+)\s*!").expect("global account regex"))
}

fn combined_account_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Account number:\s*([\d\s]+)").expect("combined account regex"))
}

/// Account number from the `! Account # … !` banner, present once per statement.
pub fn parse_global_account_number(line: &str) -> Option<String> {
    let caps = global_account_re().captures(line)?;
    Some(caps[1].trim().to_string())
}

/// Account number from an `Account number:` line of a combined statement.
pub fn parse_combined_account_number(line: &str) -> Option<String> {
    let caps = combined_account_re().captures(line)?;
    Some(caps[1].trim().to_string())
}

/// Tracks the account that owns the sections currently being read.
#[derive(Debug, Clone, Default)]
pub struct AccountResolver {
    account: Option<String>,
    combined: bool,
}

impl AccountResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line. Once a combined-statement line was seen, the global
    /// banner no longer changes the account.
    pub fn observe(&mut self, line: &str) {
        if !self.combined {
            if let Some(account) = parse_global_account_number(line) {
                debug!(account = %account, "global account number");
                self.account = Some(account);
            }
        }

        if line.starts_with(COMBINED_PREFIX) {
            if let Some(account) = parse_combined_account_number(line) {
                debug!(account = %account, "combined statement account number");
                self.account = Some(account);
                self.combined = true;
            }
        }
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn is_combined(&self) -> bool {
        self.combined
    }
}
