#![deny(unsafe_code)]

pub mod workbook;

pub use workbook::{MAX_FILE_SIZE, Sheet, Workbook};
