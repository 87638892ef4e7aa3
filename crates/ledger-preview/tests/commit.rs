use ledger_analyze::analyze;
use ledger_ingest::{Sheet, Workbook};
use ledger_model::CellValue;
use ledger_preview::{EntityKind, MemoryStore, commit_import};

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn workbook(sheets: Vec<Sheet>) -> Workbook {
    Workbook {
        file_name: "ledger.xlsx".to_string(),
        file_size: 512,
        sheets,
    }
}

fn sales_sheet(rows: Vec<Vec<CellValue>>) -> Sheet {
    Sheet {
        name: "Sales".to_string(),
        headers: [
            "Hotel Name",
            "Date",
            "Quantity",
            "Rate Per Kg",
            "Total Amount",
            "Payment Status",
        ]
        .iter()
        .map(|h| (*h).to_string())
        .collect(),
        rows,
    }
}

#[test]
fn commit_creates_hotels_sales_and_payments() {
    let rows = vec![
        vec![
            text("Grand Plaza Hotel"),
            text("2024-11-15"),
            CellValue::Number(5.5),
            CellValue::Number(4.0),
            CellValue::Number(22.0),
            text("paid"),
        ],
        vec![
            text("Grand Plaza Hotel"),
            text("2024-11-16"),
            CellValue::Number(2.0),
            CellValue::Number(4.0),
            CellValue::Number(8.0),
            text("pending"),
        ],
    ];
    let wb = workbook(vec![sales_sheet(rows)]);
    let analysis = analyze(&wb);

    let mut store = MemoryStore::new();
    let outcome = commit_import(&wb, &analysis, &mut store).expect("commit");

    assert_eq!(outcome.success, 2);
    assert!(outcome.errors.is_empty());
    // Same hotel on both rows: created once.
    assert_eq!(outcome.new_hotels, 1);
    assert_eq!(outcome.new_sales, 2);
    // Only the row marked paid produces a payment.
    assert_eq!(outcome.new_payments, 1);

    let payments: Vec<_> = store
        .created
        .iter()
        .filter(|(kind, _)| *kind == EntityKind::Payment)
        .collect();
    assert_eq!(payments.len(), 1);
    assert_eq!(
        payments[0].1.get("paymentAmount"),
        Some(&CellValue::Number(22.0))
    );
}

#[test]
fn commit_walks_all_rows_past_the_preview_cap() {
    let rows: Vec<Vec<CellValue>> = (0..120)
        .map(|idx| {
            vec![
                text(&format!("Hotel {idx}")),
                text("2024-11-15"),
                CellValue::Number(1.0),
                CellValue::Number(4.0),
                CellValue::Number(4.0),
                CellValue::Missing,
            ]
        })
        .collect();
    let wb = workbook(vec![sales_sheet(rows)]);
    let analysis = analyze(&wb);

    let mut store = MemoryStore::new();
    let outcome = commit_import(&wb, &analysis, &mut store).expect("commit");

    assert_eq!(outcome.success, 120);
    assert_eq!(outcome.new_sales, 120);
    assert_eq!(outcome.new_hotels, 120);
}

#[test]
fn existing_hotels_are_reused_not_recreated() {
    let rows = vec![vec![
        text("Grand Plaza Hotel"),
        text("2024-11-15"),
        CellValue::Number(5.5),
        CellValue::Number(4.0),
        CellValue::Number(22.0),
        CellValue::Missing,
    ]];
    let wb = workbook(vec![sales_sheet(rows)]);
    let analysis = analyze(&wb);

    let mut store = MemoryStore::new();
    store.seed(EntityKind::Hotel, "Grand Plaza Hotel");
    let outcome = commit_import(&wb, &analysis, &mut store).expect("commit");

    assert_eq!(outcome.new_hotels, 0);
    assert_eq!(outcome.new_sales, 1);
}

#[test]
fn bad_dates_become_row_errors_at_commit() {
    let rows = vec![vec![
        text("Grand Plaza Hotel"),
        text("sometime in november"),
        CellValue::Number(5.5),
        CellValue::Number(4.0),
        CellValue::Number(22.0),
        CellValue::Missing,
    ]];
    let wb = workbook(vec![sales_sheet(rows)]);
    let analysis = analyze(&wb);

    let mut store = MemoryStore::new();
    let outcome = commit_import(&wb, &analysis, &mut store).expect("commit");

    assert_eq!(outcome.success, 0);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].row, 1);
    assert_eq!(outcome.new_sales, 0);
}

#[test]
fn supplier_sheet_deduplicates_by_name() {
    // "Vendor Code" keeps the suppliers score strictly above companies;
    // contact/phone/email headers would clamp both at 1.0 and the tie
    // would fall back to companies.
    let sheet = Sheet {
        name: "Suppliers".to_string(),
        headers: ["Supplier Name", "Vendor Code"]
            .iter()
            .map(|h| (*h).to_string())
            .collect(),
        rows: vec![
            vec![text("Acme Charcoal"), text("AC01")],
            vec![text("Acme Charcoal"), text("AC01")],
        ],
    };
    let wb = workbook(vec![sheet]);
    let analysis = analyze(&wb);

    let mut store = MemoryStore::new();
    let outcome = commit_import(&wb, &analysis, &mut store).expect("commit");

    assert_eq!(outcome.new_suppliers, 1);
    assert_eq!(outcome.success, 2);
}
