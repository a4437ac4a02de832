mod common;

use std::fs;

use assert_cmd::Command;
use common::{TestWorkspace, read_csv};
use predicates::{prelude::PredicateBooleanExt, str::contains};

#[test]
fn cli_cleans_input_and_reports_row_count() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "listings.csv",
        "Price,Instant Bookable\n$80,YES\n$2500,no\n$15,maybe\n",
    );
    let output = workspace.path().join("out").join("listings_clean.csv");

    Command::cargo_bin("listing-cleaner")
        .expect("binary exists")
        .args([
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Saved cleaned data to").and(contains("(rows: 2)")));

    let (headers, rows) = read_csv(&output);
    assert_eq!(
        headers,
        vec!["price", "instant_bookable", "price_gbp", "instant_bookable_bin"]
    );
    assert_eq!(
        rows,
        vec![
            vec!["$80", "YES", "80.0", "1"],
            vec!["$15", "maybe", "15.0", "0"],
        ]
    );
}

#[test]
fn cli_uses_default_paths_relative_to_working_directory() {
    let workspace = TestWorkspace::new();
    fs::create_dir_all(workspace.path().join("data").join("raw")).expect("create raw dir");
    workspace.write("data/raw/listings.csv", "price\n£50\n");

    Command::cargo_bin("listing-cleaner")
        .expect("binary exists")
        .current_dir(workspace.path())
        .assert()
        .success()
        .stdout(contains("data/processed/listings_clean.csv"));

    let output = workspace
        .path()
        .join("data")
        .join("processed")
        .join("listings_clean.csv");
    let contents = fs::read_to_string(output).expect("read default output");
    assert_eq!(contents, "price,price_gbp\n£50,50.0\n");
}

#[test]
fn cli_fails_on_missing_input() {
    let workspace = TestWorkspace::new();
    let input = workspace.path().join("nope.csv");
    let output = workspace.path().join("out.csv");

    Command::cargo_bin("listing-cleaner")
        .expect("binary exists")
        .args(["-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("does not exist"));
    assert!(!output.exists());
}

#[test]
fn cli_fails_on_malformed_table() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("listings.csv", "price\n10,20\n");
    let output = workspace.path().join("out.csv");

    Command::cargo_bin("listing-cleaner")
        .expect("binary exists")
        .args(["-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("not a valid delimited table"));
}
