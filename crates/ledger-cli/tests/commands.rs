//! Integration tests for the CLI command layer.

use std::fs;

use ledger_cli::cli::FileArgs;
use ledger_cli::commands::{run_analyze, run_commit, run_patterns, run_preview};

fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

const SALES_CSV: &str = "Hotel Name,Date,Quantity,Rate Per Kg,Total Amount\n\
                         Grand Plaza Hotel,2024-11-15,5.5,4.0,22\n\
                         Seaside Resort,2024-11-16,3,4.0,12\n";

#[test]
fn analyze_preview_and_commit_run_on_a_csv_upload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = write_fixture(&dir, "sales.csv", SALES_CSV);

    for json in [false, true] {
        let args = FileArgs {
            file: file.clone(),
            json,
        };
        run_analyze(&args).expect("analyze");
        run_preview(&args).expect("preview");
        run_commit(&args).expect("commit");
    }
}

#[test]
fn analyze_fails_on_missing_file() {
    let args = FileArgs {
        file: "does-not-exist.xlsx".into(),
        json: false,
    };
    assert!(run_analyze(&args).is_err());
}

#[test]
fn patterns_listing_runs() {
    run_patterns().expect("patterns");
}
