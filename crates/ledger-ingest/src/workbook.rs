//! Reading an uploaded byte buffer into a neutral workbook structure.
//!
//! XLSX/XLSM/XLS/XLSB/ODS go through calamine's format auto-detection.
//! CSV uploads become a one-sheet workbook named after the file stem.
//! The result is row-oriented with row 0 of each sheet as headers.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use csv::ReaderBuilder;
use tracing::debug;

use ledger_model::{CellValue, ImportError, MappedRecord, Result};

/// Upload size cap. Parsing is in-memory, so this is the sole bound on
/// pathological inputs.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// One worksheet, already split into headers and typed data rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    /// Data rows, each padded or truncated to the header width. Fully
    /// blank rows are dropped during ingestion.
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Build a header-keyed map for one data row.
    pub fn record(&self, row: &[CellValue]) -> MappedRecord {
        self.headers
            .iter()
            .zip(row.iter())
            .filter(|(_, cell)| !matches!(cell, CellValue::Missing))
            .map(|(header, cell)| (header.clone(), cell.clone()))
            .collect()
    }
}

/// An uploaded file parsed into sheets.
#[derive(Debug, Clone)]
pub struct Workbook {
    pub file_name: String,
    pub file_size: usize,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Parse raw upload bytes. Fails fast on oversized or unparseable
    /// input; empty sheets are kept so analysis can warn about them.
    pub fn from_bytes(bytes: &[u8], file_name: &str) -> Result<Self> {
        if bytes.len() > MAX_FILE_SIZE {
            return Err(ImportError::FileTooLarge {
                size: bytes.len(),
                limit: MAX_FILE_SIZE,
            });
        }

        let sheets = if has_extension(file_name, "csv") {
            vec![read_csv_sheet(bytes, file_name)?]
        } else if SPREADSHEET_EXTENSIONS
            .iter()
            .any(|ext| has_extension(file_name, ext))
        {
            read_spreadsheet_sheets(bytes)?
        } else {
            return Err(ImportError::UnsupportedFormat(file_name.to_string()));
        };

        debug!(file_name, sheet_count = sheets.len(), "parsed workbook");
        Ok(Self {
            file_name: file_name.to_string(),
            file_size: bytes.len(),
            sheets,
        })
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

fn has_extension(file_name: &str, wanted: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

fn read_spreadsheet_sheets(bytes: &[u8]) -> Result<Vec<Sheet>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|error| ImportError::Workbook(error.to_string()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|error| ImportError::Workbook(error.to_string()))?;
        sheets.push(sheet_from_range(&name, &range));
    }
    Ok(sheets)
}

fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        return Sheet {
            name: name.to_string(),
            headers: Vec::new(),
            rows: Vec::new(),
        };
    }

    let headers: Vec<String> = (0..width)
        .map(|col| header_text(range.get((0, col)), col))
        .collect();

    let mut rows = Vec::new();
    for row_idx in 1..height {
        let row: Vec<CellValue> = (0..width)
            .map(|col| convert_cell(range.get((row_idx, col))))
            .collect();
        if row.iter().any(CellValue::is_present) {
            rows.push(row);
        }
    }

    Sheet {
        name: name.to_string(),
        headers,
        rows,
    }
}

fn header_text(cell: Option<&Data>, col: usize) -> String {
    let text = cell
        .map(|data| convert_cell(Some(data)))
        .and_then(|value| value.as_text())
        .unwrap_or_default();
    if text.trim().is_empty() {
        format!("Column {}", col + 1)
    } else {
        text.trim().to_string()
    }
}

fn convert_cell(cell: Option<&Data>) -> CellValue {
    match cell {
        None | Some(Data::Empty) | Some(Data::Error(_)) => CellValue::Missing,
        Some(Data::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                CellValue::Missing
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        Some(Data::Float(value)) => CellValue::Number(*value),
        Some(Data::Int(value)) => CellValue::Number(*value as f64),
        Some(Data::Bool(value)) => CellValue::Bool(*value),
        Some(Data::DateTime(dt)) => match dt.as_datetime() {
            Some(stamp) if stamp.time() == chrono::NaiveTime::MIN => {
                CellValue::Text(stamp.date().format("%Y-%m-%d").to_string())
            }
            Some(stamp) => CellValue::Text(stamp.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => CellValue::Missing,
        },
        Some(Data::DateTimeIso(text)) | Some(Data::DurationIso(text)) => {
            CellValue::Text(text.clone())
        }
    }
}

fn read_csv_sheet(bytes: &[u8], file_name: &str) -> Result<Sheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| ImportError::Csv(error.to_string()))?;
        let row: Vec<String> = record
            .iter()
            .map(|cell| cell.trim().trim_matches('\u{feff}').to_string())
            .collect();
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }

    let name = file_stem(file_name);
    let Some(header_row) = raw_rows.first() else {
        return Ok(Sheet {
            name,
            headers: Vec::new(),
            rows: Vec::new(),
        });
    };

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            if cell.is_empty() {
                format!("Column {}", idx + 1)
            } else {
                cell.clone()
            }
        })
        .collect();

    let rows = raw_rows
        .iter()
        .skip(1)
        .map(|record| {
            (0..headers.len())
                .map(|idx| CellValue::from_raw(record.get(idx).map_or("", String::as_str)))
                .collect()
        })
        .collect();

    Ok(Sheet {
        name,
        headers,
        rows,
    })
}
