//! Command implementations: analyze, preview, commit, patterns.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use ledger_analyze::{PATTERNS, analyze};
use ledger_ingest::Workbook;
use ledger_model::{ImportAnalysis, ImportPreview};
use ledger_preview::{ImportOutcome, MemoryStore, build_preview, commit_import};

use crate::cli::FileArgs;
use crate::summary::{print_analysis, print_outcome, print_patterns, print_preview};

pub fn run_analyze(args: &FileArgs) -> Result<()> {
    let (_, analysis) = load_and_analyze(&args.file)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

pub fn run_preview(args: &FileArgs) -> Result<()> {
    let (workbook, analysis) = load_and_analyze(&args.file)?;
    let preview: ImportPreview = build_preview(&analysis, &workbook);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        print_preview(&preview);
    }
    Ok(())
}

/// Commit against an in-memory store: shows exactly what a confirmed
/// import would create without touching real storage.
pub fn run_commit(args: &FileArgs) -> Result<()> {
    let (workbook, analysis) = load_and_analyze(&args.file)?;
    let mut store = MemoryStore::new();
    let outcome: ImportOutcome = commit_import(&workbook, &analysis, &mut store)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

pub fn run_patterns() -> Result<()> {
    print_patterns(PATTERNS);
    Ok(())
}

fn load_and_analyze(path: &Path) -> Result<(Workbook, ImportAnalysis)> {
    let bytes = fs::read(path).with_context(|| format!("read file: {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let workbook = Workbook::from_bytes(&bytes, &file_name)
        .with_context(|| format!("parse workbook: {}", path.display()))?;
    let analysis = analyze(&workbook);
    info!(
        file = %analysis.file_name,
        sheets = analysis.sheets.len(),
        pattern = %analysis.overall_pattern,
        "analyzed workbook"
    );
    Ok((workbook, analysis))
}
