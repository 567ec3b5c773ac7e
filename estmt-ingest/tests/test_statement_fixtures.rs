use estmt_ingest::{ParseError, ParseOptions, StatementDate, Transaction, parse_statement_pages};

const CHECKING: &str = include_str!("fixtures/eStmt_2019-06-21.txt");
const COMBINED: &str = include_str!("fixtures/eStmt_2020-01-21_combined.txt");

fn pages(text: &str) -> Vec<&str> {
    text.split('\u{000C}').collect()
}

#[test]
fn test_checking_statement_sections() {
    let stmt = parse_statement_pages("statements/eStmt_2019-06-21.txt", pages(CHECKING), ParseOptions::default())
        .expect("fixture should parse");

    assert_eq!(stmt.date.to_string(), "2019-06-21");
    let names: Vec<&str> = stmt.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Deposits and other additions",
            "Withdrawals and other subtractions",
            "Withdrawals and other subtractions",
            "Checks",
        ]
    );
    assert!(stmt.sections.iter().all(|s| s.account == "1234 5678 9012"));
    assert_eq!(stmt.transaction_count(), 10);
}

#[test]
fn test_checking_statement_rows() {
    let stmt = parse_statement_pages("eStmt_2019-06-21.txt", pages(CHECKING), ParseOptions::default()).unwrap();

    let deposits = &stmt.sections[0].transactions;
    assert_eq!(deposits.len(), 3);
    assert_eq!(
        deposits[0].description,
        "COMPANY PAYROLL DES:PAYROLL ID:XXXXX INDN:JOHN DOE CO ID:CXXXXXXXXX PPD"
    );
    assert_eq!(deposits[0].amount, "$2,500.00");
    assert_eq!(deposits[2].amount, "1,000.00");

    let continued = &stmt.sections[2].transactions;
    assert_eq!(continued[1].description, "CHECKCARD 0617 COFFEE SHOP RECURRING");

    let checks = &stmt.sections[3].transactions;
    assert_eq!(
        checks,
        &vec![
            Transaction::new("06/11/19", "193", "-15,750.00"),
            Transaction::new("06/11/19", "194", "-260.00"),
            Transaction::new("06/14/19", "195", "-42.00"),
        ]
    );
}

#[test]
fn test_combined_statement_accounts() {
    let stmt = parse_statement_pages("eStmt_2020-01-21_combined.txt", pages(COMBINED), ParseOptions::default())
        .unwrap();

    assert_eq!(stmt.sections.len(), 2);
    assert_eq!(stmt.sections[0].account, "1111 2222 3333");
    // The repeated page banner must not undo the per-account override.
    assert_eq!(stmt.sections[1].account, "4444 5555 6666");
    assert_eq!(stmt.sections[1].transactions.len(), 2);
}

#[test]
fn test_unterminated_section_is_lost_unless_strict() {
    // "Service fees" never reaches a Total row.
    let stmt = parse_statement_pages("eStmt_2020-01-21_combined.txt", pages(COMBINED), ParseOptions::default())
        .unwrap();
    assert!(stmt.sections.iter().all(|s| s.name != "Service fees"));

    let err = parse_statement_pages(
        "eStmt_2020-01-21_combined.txt",
        pages(COMBINED),
        ParseOptions { strict: true },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ParseError::UnterminatedSection {
            section: "Service fees".to_string(),
            transactions: 1,
        }
    );
}

#[test]
fn test_statement_json_shape() {
    let stmt = parse_statement_pages("scan.txt", pages(COMBINED), ParseOptions::default()).unwrap();
    assert_eq!(stmt.date, StatementDate::Unknown);

    let json = serde_json::to_value(&stmt).unwrap();
    assert_eq!(json["sections"][0]["name"], "Deposits and other additions");
    assert_eq!(json["sections"][0]["transactions"][0]["amount"], "150.00");
}
