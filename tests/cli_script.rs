use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::{prelude::PredicateBooleanExt, str::contains};

const BIN_NAME: &str = "sales_core_cli";

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("SALES_CORE_CLI_SCRIPT", "1")
        .env("SALES_CORE_HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_registers_a_product_and_persists_it() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("2\n1\n01/03/2024\nTea\n12\n2.50\n5\n6\n")
        .assert()
        .success()
        .stdout(contains("Product registered with ID 1."));

    home.child("store.json")
        .assert(predicates::str::contains("\"Tea\"").and(contains("\"2024-03-01T00:00:00\"")));

    script_command(&home)
        .write_stdin("2\n2\n5\n6\n")
        .assert()
        .success()
        .stdout(contains("Tea").and(contains("2.50")));
}

#[test]
fn script_mode_exits_cleanly_at_end_of_input() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("Goodbye."));
}

#[test]
fn unknown_sale_product_is_reported() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("1\n1\n15/03/2024\nAna\n42\n1\n1\n5\n6\n")
        .assert()
        .success()
        .stdout(contains("Product 42 not found"));
}

#[test]
fn report_command_prints_empty_report() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .args(["report", "monthly"])
        .assert()
        .success()
        .stdout(
            contains("Monthly Sales Report")
                .and(contains("No sales in this period."))
                .and(contains("Net (sales - deliveries): 0.00")),
        );
}

#[test]
fn report_command_exports_into_the_export_dir() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .args(["report", "daily", "--export", "csv"])
        .assert()
        .success()
        .stdout(contains("Report exported to"));

    let exports: Vec<_> = std::fs::read_dir(home.path().join("exports"))
        .expect("export dir")
        .filter_map(Result::ok)
        .collect();
    assert_eq!(exports.len(), 1);
}

#[test]
fn report_command_exports_pdf() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .args(["report", "weekly", "--export=pdf"])
        .assert()
        .success()
        .stdout(contains(".pdf"));

    let exports: Vec<_> = std::fs::read_dir(home.path().join("exports"))
        .expect("export dir")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(exports.len(), 1);
    assert!(exports[0].starts_with("Weekly_Sales_Report_") && exports[0].ends_with(".pdf"));
}

#[test]
fn misspelled_report_kind_suggests_the_closest() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .args(["report", "wekly"])
        .assert()
        .failure()
        .stderr(contains("did you mean `weekly`?"));
}

#[test]
fn version_and_help_commands() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains("Sales Core").and(contains("Build hash")));
    script_command(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(contains("report <daily|weekly|monthly> [--export text|csv|pdf]"));
}

#[test]
fn unknown_command_fails() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .arg("explode")
        .assert()
        .failure()
        .stderr(contains("unknown command `explode`"));
}
