//! Confirmed-import commit: re-walk the analysis mapping over the full
//! sheet data and create entities through the persistence seam.
//!
//! Preview truncates for display; commit does not. Rows are validated
//! with the same per-pattern rules, and failures land in the outcome's
//! error list instead of aborting the run.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use ledger_ingest::Workbook;
use ledger_model::{
    CellValue, DetectedPattern, ImportAnalysis, MappedRecord, PatternKind, RowErrors,
};

use crate::mapper::{map_row, validate_record};

/// Opaque identifier handed back by the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Entity types the commit step can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntityKind {
    Hotel,
    Supplier,
    Company,
    Sale,
    Purchase,
    Payment,
}

impl EntityKind {
    /// Canonical field holding the natural key, for kinds that have one.
    pub fn natural_key_field(&self) -> Option<&'static str> {
        match self {
            Self::Hotel | Self::Supplier | Self::Company => Some("name"),
            Self::Sale | Self::Purchase | Self::Payment => None,
        }
    }
}

/// Persistence seam consumed by commit. Implementations decide how
/// records become rows and how foreign keys are wired.
pub trait ImportStore {
    fn find_by_natural_key(&mut self, kind: EntityKind, key: &str) -> Result<Option<EntityId>>;
    fn create(&mut self, kind: EntityKind, record: &MappedRecord) -> Result<EntityId>;

    /// Look up by natural key, creating on miss. The boolean reports
    /// whether a new entity was created.
    fn find_or_create(
        &mut self,
        kind: EntityKind,
        key: &str,
        record: &MappedRecord,
    ) -> Result<(EntityId, bool)> {
        if let Some(id) = self.find_by_natural_key(kind, key)? {
            return Ok((id, false));
        }
        Ok((self.create(kind, record)?, true))
    }
}

/// Result of a confirmed import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    /// Rows committed successfully across all sheets.
    pub success: usize,
    /// Rejected rows with itemized messages, 1-based, uncapped.
    pub errors: Vec<RowErrors>,
    pub new_hotels: usize,
    pub new_suppliers: usize,
    pub new_companies: usize,
    pub new_sales: usize,
    pub new_purchases: usize,
    pub new_payments: usize,
}

/// Commit every analyzable sheet of a confirmed import.
pub fn commit_import<S: ImportStore>(
    workbook: &Workbook,
    analysis: &ImportAnalysis,
    store: &mut S,
) -> Result<ImportOutcome> {
    let mut outcome = ImportOutcome::default();

    for sheet_analysis in &analysis.sheets {
        let Some(sheet) = workbook.sheet(&sheet_analysis.name) else {
            continue;
        };
        let Some(kind) = sheet_analysis.detected_pattern.kind() else {
            debug!(sheet = %sheet_analysis.name, "skipping sheet with unknown pattern");
            continue;
        };

        for (idx, row) in sheet.rows.iter().enumerate() {
            let record = map_row(&sheet_analysis.mapping, &sheet.headers, row);
            let mut errors = validate_record(sheet_analysis.detected_pattern, &record);
            if errors.is_empty() {
                if let Err(row_error) = commit_row(kind, &record, store, &mut outcome) {
                    errors.push(row_error);
                }
            }
            if errors.is_empty() {
                outcome.success += 1;
            } else {
                outcome.errors.push(RowErrors {
                    row: idx + 1,
                    errors,
                });
            }
        }
    }

    info!(
        success = outcome.success,
        failed = outcome.errors.len(),
        "import committed"
    );
    Ok(outcome)
}

/// Commit one validated row. Data problems and store failures both
/// come back as a row-level message so the remaining rows still run.
fn commit_row<S: ImportStore>(
    kind: PatternKind,
    record: &MappedRecord,
    store: &mut S,
    outcome: &mut ImportOutcome,
) -> std::result::Result<(), String> {
    match kind {
        PatternKind::Sales => commit_sale(record, store, outcome),
        PatternKind::Purchases => commit_purchase(record, store, outcome),
        PatternKind::Companies => {
            commit_named_entity(EntityKind::Company, record, store).map(|created| {
                outcome.new_companies += usize::from(created);
            })
        }
        PatternKind::Suppliers => {
            commit_named_entity(EntityKind::Supplier, record, store).map(|created| {
                outcome.new_suppliers += usize::from(created);
            })
        }
        PatternKind::Hotels => {
            commit_named_entity(EntityKind::Hotel, record, store).map(|created| {
                outcome.new_hotels += usize::from(created);
            })
        }
        // Payments never import standalone; they ride along with sales.
        PatternKind::Payments => Ok(()),
    }
}

fn commit_sale<S: ImportStore>(
    record: &MappedRecord,
    store: &mut S,
    outcome: &mut ImportOutcome,
) -> std::result::Result<(), String> {
    let hotel_name = text_field(record, "hotelName").ok_or("Hotel name is required")?;
    let sale_date =
        parse_date(&text_field(record, "date").ok_or("Date is required")?).ok_or_else(|| {
            "Date must be a recognized format (YYYY-MM-DD or DD/MM/YYYY)".to_string()
        })?;

    let mut hotel_record = MappedRecord::new();
    hotel_record.insert("name".to_string(), CellValue::Text(hotel_name.clone()));
    let (_, created) = store
        .find_or_create(EntityKind::Hotel, &hotel_name, &hotel_record)
        .map_err(|error| error.to_string())?;
    outcome.new_hotels += usize::from(created);

    store
        .create(EntityKind::Sale, record)
        .map_err(|error| error.to_string())?;
    outcome.new_sales += 1;

    if let Some(payment) = payment_for_sale(record, &sale_date) {
        store
            .create(EntityKind::Payment, &payment)
            .map_err(|error| error.to_string())?;
        outcome.new_payments += 1;
    }
    Ok(())
}

fn commit_purchase<S: ImportStore>(
    record: &MappedRecord,
    store: &mut S,
    outcome: &mut ImportOutcome,
) -> std::result::Result<(), String> {
    let supplier_name = text_field(record, "supplierName").ok_or("Supplier name is required")?;

    let mut supplier_record = MappedRecord::new();
    supplier_record.insert("name".to_string(), CellValue::Text(supplier_name.clone()));
    let (_, created) = store
        .find_or_create(EntityKind::Supplier, &supplier_name, &supplier_record)
        .map_err(|error| error.to_string())?;
    outcome.new_suppliers += usize::from(created);

    store
        .create(EntityKind::Purchase, record)
        .map_err(|error| error.to_string())?;
    outcome.new_purchases += 1;
    Ok(())
}

fn commit_named_entity<S: ImportStore>(
    kind: EntityKind,
    record: &MappedRecord,
    store: &mut S,
) -> std::result::Result<bool, String> {
    let name = text_field(record, "name").ok_or("Name is required")?;
    let (_, created) = store
        .find_or_create(kind, &name, record)
        .map_err(|error| error.to_string())?;
    Ok(created)
}

/// A payment rides along with a sale when an explicit payment date and
/// amount are present, or when the row is marked paid in full.
fn payment_for_sale(record: &MappedRecord, sale_date: &NaiveDate) -> Option<MappedRecord> {
    let explicit_date = text_field(record, "paymentDate").and_then(|raw| parse_date(&raw));
    let explicit_amount = record
        .get("paymentAmount")
        .and_then(CellValue::as_number)
        .filter(|amount| *amount > 0.0);

    if let (Some(date), Some(amount)) = (explicit_date, explicit_amount) {
        return Some(payment_record(record, date, amount));
    }

    let marked_paid = text_field(record, "paymentStatus")
        .is_some_and(|status| status.eq_ignore_ascii_case("paid"));
    if marked_paid {
        let amount = record.get("totalAmount").and_then(CellValue::as_number)?;
        return Some(payment_record(record, *sale_date, amount));
    }
    None
}

fn payment_record(sale: &MappedRecord, date: NaiveDate, amount: f64) -> MappedRecord {
    let mut record = MappedRecord::new();
    if let Some(hotel) = sale.get("hotelName") {
        record.insert("hotelName".to_string(), hotel.clone());
    }
    record.insert(
        "paymentDate".to_string(),
        CellValue::Text(date.format("%Y-%m-%d").to_string()),
    );
    record.insert("paymentAmount".to_string(), CellValue::Number(amount));
    record
}

fn text_field(record: &MappedRecord, field: &str) -> Option<String> {
    record
        .get(field)
        .filter(|cell| cell.is_present())
        .and_then(CellValue::as_text)
}

/// Accepts ISO dates first, then the day-first format common in the
/// source ledgers.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

/// In-memory store for tests and the CLI's dry-run commit mode.
#[derive(Debug, Default)]
pub struct MemoryStore {
    next_id: u64,
    keys: BTreeMap<(EntityKind, String), EntityId>,
    pub created: Vec<(EntityKind, MappedRecord)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register an existing entity so find-or-create sees it.
    pub fn seed(&mut self, kind: EntityKind, key: &str) {
        let id = self.allocate();
        self.keys.insert((kind, key.to_string()), id);
    }

    fn allocate(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId(self.next_id)
    }
}

impl ImportStore for MemoryStore {
    fn find_by_natural_key(&mut self, kind: EntityKind, key: &str) -> Result<Option<EntityId>> {
        Ok(self.keys.get(&(kind, key.to_string())).copied())
    }

    fn create(&mut self, kind: EntityKind, record: &MappedRecord) -> Result<EntityId> {
        let id = self.allocate();
        if let Some(field) = kind.natural_key_field() {
            if let Some(key) = text_field(record, field) {
                self.keys.insert((kind, key), id);
            }
        }
        self.created.push((kind, record.clone()));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_and_day_first_dates() {
        assert_eq!(
            parse_date("2024-11-15"),
            NaiveDate::from_ymd_opt(2024, 11, 15)
        );
        assert_eq!(
            parse_date("15/11/2024"),
            NaiveDate::from_ymd_opt(2024, 11, 15)
        );
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn paid_status_produces_full_payment() {
        let mut record = MappedRecord::new();
        record.insert("hotelName".to_string(), CellValue::Text("Plaza".into()));
        record.insert("totalAmount".to_string(), CellValue::Number(22.0));
        record.insert("paymentStatus".to_string(), CellValue::Text("Paid".into()));

        let date = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
        let payment = payment_for_sale(&record, &date).expect("payment expected");
        assert_eq!(
            payment.get("paymentAmount"),
            Some(&CellValue::Number(22.0))
        );
        assert_eq!(
            payment.get("paymentDate"),
            Some(&CellValue::Text("2024-11-15".into()))
        );
    }

    #[test]
    fn no_payment_without_signal() {
        let mut record = MappedRecord::new();
        record.insert("totalAmount".to_string(), CellValue::Number(22.0));
        let date = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
        assert!(payment_for_sale(&record, &date).is_none());
    }
}
