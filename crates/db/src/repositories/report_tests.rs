//! Tests for the report repository's row mapping.
//!
//! Query filtering and sort orders are enforced by the SQL layer and
//! covered at the integration level; the pure entity-to-record mapping is
//! tested here.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use quadra_core::reports::{ReportError, TransactionKind};

use super::{map_energy_bill, map_transaction, map_water_bill};
use crate::entities::{energy_bills, transactions, water_bills};

fn transaction_model(transaction_type: &str) -> transactions::Model {
    transactions::Model {
        id: Uuid::new_v4(),
        property_id: Some(Uuid::new_v4()),
        tenant_id: None,
        transaction_type: transaction_type.to_string(),
        amount: dec!(1250.50),
        category: Some("Rent".to_string()),
        description: "March rent".to_string(),
        date: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap().into(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap().into(),
        updated_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap().into(),
    }
}

#[test]
fn test_map_transaction_parses_kind() {
    let record = map_transaction(transaction_model("income")).unwrap();
    assert_eq!(record.kind, TransactionKind::Income);
    assert_eq!(record.amount, dec!(1250.50));

    let record = map_transaction(transaction_model("expense")).unwrap();
    assert_eq!(record.kind, TransactionKind::Expense);
}

#[test]
fn test_map_transaction_rejects_unknown_kind() {
    let error = map_transaction(transaction_model("transfer")).unwrap_err();
    assert!(matches!(error, ReportError::Adapter(_)));
}

#[test]
fn test_bill_mapping_selects_the_right_quantity() {
    let energy = energy_bills::Model {
        id: Uuid::new_v4(),
        property_id: Uuid::new_v4(),
        group_id: "bloco-a".to_string(),
        year: 2026,
        month: 2,
        reading_date: NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
        total_amount: dec!(420.10),
        total_kwh: dec!(310.5),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap().into(),
        updated_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap().into(),
    };
    let record = map_energy_bill(energy);
    assert_eq!(record.total_quantity, dec!(310.5));
    assert_eq!(record.month, 2);

    let water = water_bills::Model {
        id: Uuid::new_v4(),
        property_id: Uuid::new_v4(),
        group_id: "bloco-a".to_string(),
        year: 2026,
        month: 2,
        reading_date: NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
        total_amount: dec!(180.00),
        total_liters: dec!(12500),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap().into(),
        updated_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap().into(),
    };
    let record = map_water_bill(water);
    assert_eq!(record.total_quantity, dec!(12500));
}
