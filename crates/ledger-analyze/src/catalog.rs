//! Static pattern and column-alias catalogs.
//!
//! Defined once, shared read-only across concurrent analysis calls.
//! Catalog order matters: cross-pattern ties break toward the earlier
//! entry, so `PATTERNS` must stay aligned with `PatternKind::ALL`.

use ledger_model::PatternKind;

/// One record-type entry in the detection catalog.
#[derive(Debug, Clone, Copy)]
pub struct PatternDefinition {
    pub kind: PatternKind,
    /// Free-text hints; each occurrence in a normalized header adds a
    /// soft 0.1 to the score.
    pub keywords: &'static [&'static str],
    /// Canonical fields that must resolve through the alias table for
    /// the hard score contribution.
    pub required_fields: &'static [&'static str],
    /// Expected ceiling for a well-formed sheet of this type. Kept for
    /// review UIs; the scorer clamps at 1.0 regardless.
    pub base_confidence: f64,
}

pub const PATTERNS: &[PatternDefinition] = &[
    PatternDefinition {
        kind: PatternKind::Sales,
        keywords: &[
            "hotel", "sale", "quantity", "rate", "amount", "total", "customer", "delivery",
            "charcoal",
        ],
        required_fields: &["hotelName", "quantity", "ratePerKg", "totalAmount"],
        base_confidence: 0.8,
    },
    PatternDefinition {
        kind: PatternKind::Purchases,
        keywords: &[
            "supplier", "purchase", "buy", "quantity", "rate", "amount", "invoice", "vendor",
        ],
        required_fields: &["supplierName", "quantity", "ratePerKg", "totalAmount"],
        base_confidence: 0.8,
    },
    PatternDefinition {
        kind: PatternKind::Companies,
        keywords: &[
            "company", "business", "organization", "code", "contact", "phone", "email", "address",
        ],
        required_fields: &["name", "code"],
        base_confidence: 0.9,
    },
    PatternDefinition {
        kind: PatternKind::Suppliers,
        keywords: &[
            "supplier", "vendor", "provider", "code", "contact", "phone", "email", "address",
        ],
        required_fields: &["name", "code"],
        base_confidence: 0.9,
    },
    PatternDefinition {
        kind: PatternKind::Hotels,
        keywords: &[
            "hotel", "resort", "restaurant", "customer", "client", "contact", "phone", "email",
        ],
        required_fields: &["name", "contactPerson"],
        base_confidence: 0.9,
    },
    PatternDefinition {
        kind: PatternKind::Payments,
        keywords: &[
            "payment", "paid", "amount", "date", "reference", "transaction", "receipt",
        ],
        required_fields: &["paymentAmount", "date"],
        base_confidence: 0.7,
    },
];

/// Acceptable header variants for one canonical field, in priority
/// order; the first variant that matches a sheet column wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub field: &'static str,
    pub variants: &'static [&'static str],
}

/// Shared alias table, pattern-agnostic.
pub const COLUMN_ALIASES: &[FieldAliases] = &[
    // Sales fields
    FieldAliases {
        field: "hotelName",
        variants: &[
            "hotel name",
            "hotel",
            "customer name",
            "customer",
            "client name",
            "client",
        ],
    },
    FieldAliases {
        field: "quantity",
        variants: &["quantity", "qty", "amount", "kg", "kilograms", "weight"],
    },
    FieldAliases {
        field: "ratePerKg",
        variants: &["rate per kg", "rate", "price per kg", "unit price", "cost per kg"],
    },
    FieldAliases {
        field: "totalAmount",
        variants: &["total amount", "total", "amount", "value", "price", "cost"],
    },
    FieldAliases {
        field: "date",
        variants: &["date", "delivery date", "sale date", "transaction date"],
    },
    FieldAliases {
        field: "paymentStatus",
        variants: &["payment status", "status", "payment", "paid"],
    },
    FieldAliases {
        field: "paymentDate",
        variants: &["payment date", "paid date", "payment received"],
    },
    FieldAliases {
        field: "paymentAmount",
        variants: &["payment amount", "paid amount", "received amount"],
    },
    // Company / supplier / hotel fields
    FieldAliases {
        field: "name",
        variants: &[
            "name",
            "company name",
            "business name",
            "supplier name",
            "hotel name",
        ],
    },
    FieldAliases {
        field: "code",
        variants: &[
            "code",
            "company code",
            "business code",
            "supplier code",
            "hotel code",
            "id",
        ],
    },
    FieldAliases {
        field: "contactPerson",
        variants: &["contact person", "contact", "representative", "manager"],
    },
    FieldAliases {
        field: "phone",
        variants: &["phone", "mobile", "contact number", "telephone"],
    },
    FieldAliases {
        field: "email",
        variants: &["email", "email address", "contact email"],
    },
    FieldAliases {
        field: "address",
        variants: &["address", "location", "full address", "street address"],
    },
    FieldAliases {
        field: "taxId",
        variants: &["tax id", "gst number", "tax number", "vat number"],
    },
    // Purchase fields
    FieldAliases {
        field: "supplierName",
        variants: &["supplier name", "supplier", "vendor name", "vendor"],
    },
    FieldAliases {
        field: "invoiceNumber",
        variants: &["invoice number", "invoice", "bill number", "reference"],
    },
    // General
    FieldAliases {
        field: "notes",
        variants: &["notes", "remarks", "comments", "description"],
    },
    FieldAliases {
        field: "isActive",
        variants: &["active", "status", "is active", "enabled"],
    },
];

/// Look up the variant list for a canonical field. Fields without an
/// alias entry fall back to matching their own name.
pub fn aliases_for(field: &str) -> &'static [&'static str] {
    COLUMN_ALIASES
        .iter()
        .find(|entry| entry.field == field)
        .map_or(&[], |entry| entry.variants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_matches_kind_order() {
        let kinds: Vec<PatternKind> = PATTERNS.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, PatternKind::ALL);
    }

    #[test]
    fn ceilings_are_sane() {
        for pattern in PATTERNS {
            assert!(
                pattern.base_confidence > 0.0 && pattern.base_confidence <= 1.0,
                "{} ceiling out of range",
                pattern.kind
            );
            assert!(!pattern.required_fields.is_empty());
            assert!(!pattern.keywords.is_empty());
        }
    }

    #[test]
    fn every_required_field_has_aliases() {
        for pattern in PATTERNS {
            for field in pattern.required_fields {
                assert!(
                    !aliases_for(field).is_empty(),
                    "{field} missing from alias table"
                );
            }
        }
    }
}
