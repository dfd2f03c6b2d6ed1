use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "savings";

fn savings(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).unwrap();
    cmd.env("SAVINGS_CLI_DATA_DIR", dir.path())
        .env_remove("SAVINGS_USER")
        .env_remove("RUST_LOG");
    cmd
}

fn run(dir: &TempDir, args: &[&str]) -> String {
    let output = savings(dir).args(args).assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn entry_ledger_accumulates_from_initial_balance() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["balance", "set", "1000"]);
    run(
        &dir,
        &["entry", "add", "--month", "Jan 2025", "--salary", "5000", "--expense", "3000"],
    );
    // Month and salary default to the month after the newest entry and its salary
    savings(&dir)
        .args(["entry", "add", "--expense", "4000"])
        .assert()
        .success()
        .stdout(contains("Recorded Feb 2025"));

    savings(&dir)
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(contains("₹4000.00").and(contains("₹3000.00")));

    savings(&dir)
        .args(["entry", "show", "Feb 2025"])
        .assert()
        .success()
        .stdout(contains("Total savings:  ₹4000.00"));
}

#[test]
fn duplicate_month_is_rejected() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["entry", "add", "--month", "Mar 2025", "--salary", "10"]);

    savings(&dir)
        .args(["entry", "add", "--month", "March 2025", "--salary", "10"])
        .assert()
        .failure();

    savings(&dir)
        .args(["entry", "add", "--month", "Someday", "--salary", "10"])
        .assert()
        .failure();
}

#[test]
fn distributions_reconcile_against_savings() {
    let dir = TempDir::new().unwrap();
    run(
        &dir,
        &["entry", "add", "--month", "Jan 2025", "--salary", "1500", "--expense", "500"],
    );
    run(&dir, &["dist", "add", "Funds", "600"]);
    run(&dir, &["dist", "add", "Bank", "400", "--salary"]);

    savings(&dir)
        .args(["dist", "list"])
        .assert()
        .success()
        .stdout(contains("Balanced").and(contains("Funds")));

    savings(&dir)
        .args(["dist", "add", "Gold", "100"])
        .assert()
        .success()
        .stdout(contains("Over-allocated by ₹100.00"));

    savings(&dir)
        .args(["dist", "delete", "gold"])
        .assert()
        .success()
        .stdout(contains("Deleted Gold"));
}

#[test]
fn card_bills_move_to_paid() {
    let dir = TempDir::new().unwrap();
    let added = run(
        &dir,
        &["card", "add", "HDFC", "120+30", "-d", "Groceries", "--month", "Mar 2025"],
    );
    assert!(added.contains("₹150.00"));
    let charge_id = added.split_whitespace().nth(1).unwrap().to_string();

    savings(&dir)
        .args(["card", "list", "--month", "March 2025"])
        .assert()
        .success()
        .stdout(contains("[ ] Groceries").and(contains("Outstanding")));

    run(&dir, &["card", "pay", "HDFC", "--month", "Mar 2025"]);
    savings(&dir)
        .args(["card", "list", "--month", "Mar 2025"])
        .assert()
        .success()
        .stdout(contains("HDFC (paid)"));

    savings(&dir)
        .args(["card", "toggle", charge_id.as_str()])
        .assert()
        .success()
        .stdout(contains("as unpaid"));

    run(&dir, &["card", "rename-card", "HDFC", "HDFC Regalia"]);
    savings(&dir)
        .args(["card", "cards"])
        .assert()
        .success()
        .stdout(contains("HDFC Regalia"));

    savings(&dir)
        .args(["card", "pay", "Missing", "--month", "Mar 2025"])
        .assert()
        .failure();
}

#[test]
fn expenses_group_by_category() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["expense", "add", "Travel", "250+40", "--date", "2025-03-14"]);
    run(&dir, &["expense", "add", "Food + Grocery", "710", "--date", "2025-03-02"]);

    savings(&dir)
        .args(["expense", "list", "--month", "Mar 2025"])
        .assert()
        .success()
        .stdout(contains("₹1000.00").and(contains("Travel")).and(contains("71%")));

    run(&dir, &["expense", "rename-category", "Travel", "Commute"]);
    savings(&dir)
        .args(["expense", "categories"])
        .assert()
        .success()
        .stdout(contains("Commute").and(contains("Travel").not()));

    savings(&dir)
        .args(["expense", "show", "Commute", "--month", "March 2025"])
        .assert()
        .success()
        .stdout(contains("2025-03-14"));
}

#[test]
fn users_are_partitioned() {
    let dir = TempDir::new().unwrap();
    run(
        &dir,
        &["--user", "alice", "entry", "add", "--month", "Jan 2025", "--salary", "10"],
    );

    savings(&dir)
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(contains("No monthly entries"));

    savings(&dir)
        .env("SAVINGS_USER", "alice")
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(contains("Jan 2025"));
}

#[test]
fn export_ledger_to_stdout() {
    let dir = TempDir::new().unwrap();
    run(
        &dir,
        &["entry", "add", "--month", "Jan 2025", "--salary", "20", "--expense", "5"],
    );

    savings(&dir)
        .args(["export", "ledger"])
        .assert()
        .success()
        .stdout(contains("id,month,salary,expense,savings,total_savings").and(contains("15.00")));

    savings(&dir)
        .args(["export", "all", "--format", "json"])
        .assert()
        .success()
        .stdout(contains("\"schema_version\""));

    savings(&dir)
        .args(["export", "all", "--format", "csv"])
        .assert()
        .failure();
}

#[test]
fn repair_and_audit() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["card", "add", "Amex", "10", "--month", "Jan 2025"]);
    run(&dir, &["card", "remove-card", "Amex"]);

    savings(&dir)
        .args(["repair"])
        .assert()
        .success()
        .stdout(contains("up to date"));

    savings(&dir)
        .args(["audit"])
        .assert()
        .success()
        .stdout(contains("CREATE CardCharge"));
}

#[test]
fn entry_amounts_accept_sums_and_negative_values() {
    let dir = TempDir::new().unwrap();
    run(
        &dir,
        &["entry", "add", "--month", "Jan 2025", "--salary", "50000 + 2500", "-e", "-200"],
    );

    savings(&dir)
        .args(["entry", "show", "Jan 2025"])
        .assert()
        .success()
        .stdout(contains("Total savings:  ₹52700.00"));

    savings(&dir)
        .args(["balance", "set", "1000 * 2"])
        .assert()
        .success();
    savings(&dir)
        .args(["balance", "show"])
        .assert()
        .success()
        .stdout(contains("₹2000.00"));
}

#[test]
fn past_month_lists_only_cards_with_charges() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["card", "add", "HDFC", "100", "--month", "Mar 2025"]);
    run(&dir, &["card", "add-card", "Amex"]);

    savings(&dir)
        .args(["card", "list", "--month", "Mar 2025"])
        .assert()
        .success()
        .stdout(contains("HDFC").and(contains("Amex").not()));

    savings(&dir)
        .args(["card", "list", "--month", "Mar 2025", "--all-cards"])
        .assert()
        .success()
        .stdout(contains("Amex"));
}
