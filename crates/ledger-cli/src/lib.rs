//! CLI library components for the ledger import analyzer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
