#![deny(unsafe_code)]

//! Preview side of the import pipeline: row mapping and validation,
//! preview aggregation, and the confirmed-import commit step.

pub mod commit;
pub mod mapper;
pub mod preview;

pub use commit::{
    EntityId, EntityKind, ImportOutcome, ImportStore, MemoryStore, commit_import, parse_date,
};
pub use mapper::{
    ERROR_LIST_CAP, PREVIEW_ROW_CAP, SAMPLE_RECORD_CAP, map_and_validate, map_row,
    validate_record,
};
pub use preview::{build_preview, preview_workbook};
