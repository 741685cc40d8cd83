use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn sample_book() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample.gnucash")
}

/// Command with an isolated config directory, reading the sample book
fn reports(config: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gnucash-reports").unwrap();
    cmd.env("GNUCASH_REPORTS_DIR", config.path())
        .env_remove("GNUCASH_BOOK")
        .env_remove("RUST_LOG")
        .arg("--book")
        .arg(sample_book())
        .arg("--as-of")
        .arg("2025-01-02");
    cmd
}

#[test]
fn dump_lists_accounts_with_splits() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .arg("dump")
        .assert()
        .success()
        .stdout(predicate::str::contains("Assets:Current Assets:Checking Account"))
        .stdout(predicate::str::contains("Imbalance-USD"))
        .stdout(predicate::str::contains("ACC_NAME").not());
}

#[test]
fn verbose_logs_are_plain_when_piped() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .args(["-v", "dump"])
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded book"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn dump_details_selected_account() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .args(["dump", "--account", "Federal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ACC_NAME: Federal"))
        .stdout(predicate::str::contains("--TRX-SPLIT 0 / 2"));
}

#[test]
fn imbalance_dry_run_prints_warning() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .args(["imbalance", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subject: 'Imbalance-USD' Status"))
        .stdout(predicate::str::contains(
            "Warning: 1 Transactions were found in 'Imbalance-USD' account",
        ));
}

#[test]
fn imbalance_dry_run_for_clean_account() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .args(["imbalance", "--dry-run", "--account", "Savings Account"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No Transactions Found in 'Savings Account' account",
        ));
}

#[test]
fn imbalance_without_recipients_fails() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .arg("imbalance")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn accounts_lists_register_choices() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .arg("accounts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking Account"))
        .stdout(predicate::str::contains("Property Tax"));
}

#[test]
fn summary_writes_workbook() {
    let config = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    reports(&config)
        .arg("summary")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed processing 10 accounts."))
        .stdout(predicate::str::contains("was created successfully"));

    assert!(out.path().join("2025-01-02_AccountSummary.xlsx").exists());
}

#[test]
fn summary_empty_directory_uses_default() {
    let config = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    reports(&config)
        .env("HOME", home.path())
        .args(["summary", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("was created successfully"));

    assert!(home
        .path()
        .join("GnuCash")
        .join("Reports")
        .join("2025-01-02_AccountSummary.xlsx")
        .exists());
}

#[test]
fn summary_text_output() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .args(["summary", "--text"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "GnuCash Account Summary - Current to 01/02/2025",
        ))
        .stdout(predicate::str::contains("Checking Account"));
}

#[test]
fn tax_report_writes_text_and_workbook() {
    let config = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let list = config.path().join("tax_accounts.txt");
    std::fs::write(&list, "Property Tax\nFederal\n").unwrap();

    reports(&config)
        .arg("tax")
        .arg("--accounts-file")
        .arg(&list)
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Tax-Related Transactions from 01/01/2024 through 12/31/2024",
        ))
        .stdout(predicate::str::contains("Report Successfully Saved to"));

    let text =
        std::fs::read_to_string(out.path().join("2025-01-02_TaxRelatedTransactionReport.txt"))
            .unwrap();
    assert!(text.contains("--- Property Tax TOTAL:"));
    assert!(out
        .path()
        .join("2025-01-02_TaxRelatedTransactionReport.xlsx")
        .exists());
}

#[test]
fn tax_report_file_failure_exits_with_2() {
    let config = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let list = config.path().join("tax_accounts.txt");
    std::fs::write(&list, "Property Tax\n").unwrap();
    // A directory where the report file should go
    std::fs::create_dir(out.path().join("2025-01-02_TaxRelatedTransactionReport.txt")).unwrap();

    reports(&config)
        .arg("tax")
        .arg("--accounts-file")
        .arg(&list)
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to write report file"));
}

#[test]
fn tax_uncreatable_output_dir_exits_with_2() {
    let config = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let list = config.path().join("tax_accounts.txt");
    std::fs::write(&list, "Property Tax\n").unwrap();
    let blocker = out.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    reports(&config)
        .arg("tax")
        .arg("--accounts-file")
        .arg(&list)
        .arg("--output-dir")
        .arg(blocker.join("reports"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to write report file"));
}

#[test]
fn tax_without_account_list_fails() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .arg("tax")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No tax account list given"));
}

#[test]
fn register_prints_to_stdout() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .args(["register", "--account", "Checking Account", "--start", "02/01/2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Transaction Report from Account 'Checking Account'",
        ))
        .stdout(predicate::str::contains("-- PRIOR BALANCE --"))
        .stdout(predicate::str::contains("-- CURRENT BALANCE/TOTAL --"));
}

#[test]
fn register_saves_report_and_workbook() {
    let config = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    reports(&config)
        .args(["register", "--account", "Checking Account", "--report", "--workbook"])
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"))
        .stdout(predicate::str::contains("Workbook saved to"));

    let stem = "2025-01-02_CheckingAccount_Transactions";
    assert!(out.path().join(format!("{}.txt", stem)).exists());
    assert!(out.path().join(format!("{}.xlsx", stem)).exists());
}

#[test]
fn register_unknown_account_fails() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .args(["register", "--account", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account not found: Nope"));
}

#[test]
fn register_rejects_reversed_dates() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .args([
            "register",
            "--account",
            "Checking Account",
            "--start",
            "2024-12-31",
            "--end",
            "2024-01-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn missing_book_fails() {
    let config = TempDir::new().unwrap();
    Command::cargo_bin("gnucash-reports")
        .unwrap()
        .env("GNUCASH_REPORTS_DIR", config.path())
        .env_remove("GNUCASH_BOOK")
        .args(["--book", "/nonexistent/book.gnucash", "dump"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn no_book_configured_fails() {
    let config = TempDir::new().unwrap();
    Command::cargo_bin("gnucash-reports")
        .unwrap()
        .env("GNUCASH_REPORTS_DIR", config.path())
        .env_remove("GNUCASH_BOOK")
        .arg("dump")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No book file given"));
}

#[test]
fn invalid_as_of_is_rejected() {
    let config = TempDir::new().unwrap();
    Command::cargo_bin("gnucash-reports")
        .unwrap()
        .env("GNUCASH_REPORTS_DIR", config.path())
        .args(["--as-of", "tomorrow", "dump"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not YYYY-MM-DD"));
}

#[test]
fn init_then_config() {
    let config = TempDir::new().unwrap();
    reports(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written to"));

    let written = std::fs::read_to_string(config.path().join("config.json")).unwrap();
    assert!(written.contains("sample.gnucash"));

    // The saved book is used without --book
    Command::cargo_bin("gnucash-reports")
        .unwrap()
        .env("GNUCASH_REPORTS_DIR", config.path())
        .env_remove("GNUCASH_BOOK")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("sample.gnucash"))
        .stdout(predicate::str::contains("Imbalance-USD"));
}
