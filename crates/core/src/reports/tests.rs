//! Tests for the report engine.
//!
//! Aggregation invariants are property-based; orchestration is exercised
//! against an in-memory store stub.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::aggregate::{
    summarize_alerts, summarize_bill_group, summarize_properties, summarize_tenants,
    summarize_transactions,
};
use super::error::ReportError;
use super::period::ReportPeriod;
use super::sections::{self, DETAIL_ROW_LIMIT};
use super::service::{ReportService, ReportStore};
use super::types::{
    AlertRecord, BillKind, PropertyRecord, ReportFilter, ReportKind, Section, TenantRecord,
    TransactionKind, TransactionRecord, UtilityBillRecord,
};

// ============================================================================
// Fixtures
// ============================================================================

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
}

fn transaction(kind: TransactionKind, amount: Decimal, category: &str) -> TransactionRecord {
    transaction_on(kind, amount, category, fixed_now())
}

fn transaction_on(
    kind: TransactionKind,
    amount: Decimal,
    category: &str,
    date: DateTime<Utc>,
) -> TransactionRecord {
    TransactionRecord {
        id: Uuid::new_v4(),
        property_id: None,
        tenant_id: None,
        kind,
        amount,
        category: if category.is_empty() {
            None
        } else {
            Some(category.to_string())
        },
        description: "test".to_string(),
        date,
    }
}

fn property(status: Option<&str>, rent: Option<Decimal>) -> PropertyRecord {
    PropertyRecord {
        id: Uuid::new_v4(),
        address: "Rua das Flores, 100".to_string(),
        kind: Some("apartment".to_string()),
        status: status.map(str::to_string),
        rent,
        created_at: fixed_now(),
    }
}

fn tenant(status: Option<&str>) -> TenantRecord {
    TenantRecord {
        id: Uuid::new_v4(),
        property_id: None,
        name: "Maria Souza".to_string(),
        email: "maria@example.com".to_string(),
        phone: Some("11 99999-0000".to_string()),
        status: status.map(str::to_string),
        created_at: fixed_now(),
    }
}

fn alert(priority: Option<&str>, resolved: bool) -> AlertRecord {
    AlertRecord {
        id: Uuid::new_v4(),
        property_id: None,
        tenant_id: None,
        message: "check boiler".to_string(),
        priority: priority.map(str::to_string),
        resolved,
        created_at: fixed_now(),
    }
}

fn bill(amount: Decimal, quantity: Decimal) -> UtilityBillRecord {
    UtilityBillRecord {
        id: Uuid::new_v4(),
        property_id: Uuid::new_v4(),
        group_id: "g1".to_string(),
        year: 2026,
        month: 2,
        total_amount: amount,
        total_quantity: quantity,
        created_at: fixed_now(),
    }
}

/// In-memory [`ReportStore`] backing orchestrator tests.
#[derive(Default)]
struct StubStore {
    transactions: Vec<TransactionRecord>,
    properties: Vec<PropertyRecord>,
    tenants: Vec<TenantRecord>,
    alerts: Vec<AlertRecord>,
    bills: Vec<UtilityBillRecord>,
    fail: bool,
}

impl StubStore {
    fn check(&self) -> Result<(), ReportError> {
        if self.fail {
            Err(ReportError::Adapter("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ReportStore for StubStore {
    async fn find_transactions(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<TransactionRecord>, ReportError> {
        self.check()?;
        Ok(self
            .transactions
            .iter()
            .filter(|t| filter.start_date.is_none_or(|start| t.date >= start))
            .filter(|t| filter.end_date.is_none_or(|end| t.date <= end))
            .cloned()
            .collect())
    }

    async fn find_properties(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<PropertyRecord>, ReportError> {
        self.check()?;
        Ok(self
            .properties
            .iter()
            .filter(|p| {
                filter
                    .status
                    .as_deref()
                    .is_none_or(|status| p.status.as_deref() == Some(status))
            })
            .cloned()
            .collect())
    }

    async fn find_tenants(&self, _filter: &ReportFilter) -> Result<Vec<TenantRecord>, ReportError> {
        self.check()?;
        Ok(self.tenants.clone())
    }

    async fn find_unresolved_alerts(&self) -> Result<Vec<AlertRecord>, ReportError> {
        self.check()?;
        Ok(self.alerts.iter().filter(|a| !a.resolved).cloned().collect())
    }

    async fn find_bills(
        &self,
        _kind: BillKind,
        filter: &ReportFilter,
    ) -> Result<Vec<UtilityBillRecord>, ReportError> {
        self.check()?;
        Ok(self
            .bills
            .iter()
            .filter(|b| {
                filter
                    .group_id
                    .as_deref()
                    .is_none_or(|group| b.group_id == group)
            })
            .filter(|b| filter.year.is_none_or(|year| b.year == year))
            .cloned()
            .collect())
    }

    async fn count_properties(&self, filter: &ReportFilter) -> Result<u64, ReportError> {
        Ok(self.find_properties(filter).await?.len() as u64)
    }

    async fn count_tenants(&self, filter: &ReportFilter) -> Result<u64, ReportError> {
        Ok(self.find_tenants(filter).await?.len() as u64)
    }

    async fn count_unresolved_alerts(&self) -> Result<u64, ReportError> {
        Ok(self.find_unresolved_alerts().await?.len() as u64)
    }
}

fn summary_rows(section: &Section) -> Vec<(String, String)> {
    match section {
        Section::SummaryTable { rows, .. } => rows
            .iter()
            .map(|row| (row.label.clone(), row.value.clone()))
            .collect(),
        other => panic!("expected summary table, got {other:?}"),
    }
}

// ============================================================================
// Aggregation properties
// ============================================================================

fn transaction_strategy() -> impl Strategy<Value = TransactionRecord> {
    (
        any::<bool>(),
        0i64..1_000_000_00,
        prop::sample::select(vec!["Rent", "Maintenance", "Taxes", "", "  "]),
    )
        .prop_map(|(income, cents, category)| {
            transaction(
                if income {
                    TransactionKind::Income
                } else {
                    TransactionKind::Expense
                },
                Decimal::new(cents, 2),
                category,
            )
        })
}

proptest! {
    /// Net result always equals income minus expense.
    #[test]
    fn test_net_result_identity(transactions in prop::collection::vec(transaction_strategy(), 0..50)) {
        let summary = summarize_transactions(&transactions);
        prop_assert_eq!(summary.net_result, summary.total_income - summary.total_expense);
        prop_assert_eq!(summary.count, transactions.len() as u64);
    }

    /// The category partition is exhaustive and non-overlapping: category
    /// balances sum to the net result.
    #[test]
    fn test_category_partition_sums_to_net(transactions in prop::collection::vec(transaction_strategy(), 0..50)) {
        let summary = summarize_transactions(&transactions);
        let from_categories: Decimal = summary.categories.iter().map(super::types::CategoryBreakdown::balance).sum();
        prop_assert_eq!(from_categories, summary.net_result);
    }

    /// A detail table never carries more than the row limit, and the
    /// overflow count accounts for every omitted record.
    #[test]
    fn test_detail_truncation(count in 0usize..40) {
        let properties: Vec<_> = (0..count).map(|_| property(Some("occupied"), None)).collect();
        let section = sections::properties_detail(&properties);

        let Section::DetailTable { rows, truncated_count, .. } = section else {
            panic!("expected detail table");
        };
        prop_assert_eq!(rows.len(), count.min(DETAIL_ROW_LIMIT));
        if count > DETAIL_ROW_LIMIT {
            prop_assert_eq!(truncated_count, (count - DETAIL_ROW_LIMIT) as u64);
        } else {
            prop_assert_eq!(truncated_count, 0);
        }
    }
}

// ============================================================================
// Aggregation unit tests
// ============================================================================

#[test]
fn test_blank_category_buckets_to_fallback() {
    let transactions = vec![
        transaction(TransactionKind::Income, dec!(10), ""),
        transaction(TransactionKind::Expense, dec!(4), "  "),
    ];
    let summary = summarize_transactions(&transactions);

    assert_eq!(summary.categories.len(), 1);
    assert_eq!(summary.categories[0].name, "Outros");
    assert_eq!(summary.categories[0].income, dec!(10));
    assert_eq!(summary.categories[0].expense, dec!(4));
}

#[test]
fn test_category_order_is_first_encounter() {
    let transactions = vec![
        transaction(TransactionKind::Income, dec!(1), "Rent"),
        transaction(TransactionKind::Expense, dec!(2), "Taxes"),
        transaction(TransactionKind::Income, dec!(3), "Rent"),
    ];
    let summary = summarize_transactions(&transactions);

    let names: Vec<_> = summary.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Rent", "Taxes"]);
}

#[test]
fn test_property_summary_defaults_and_rent() {
    let properties = vec![
        property(Some("occupied"), Some(dec!(1200))),
        property(Some("occupied"), None),
        property(None, Some(dec!(800))),
    ];
    let summary = summarize_properties(&properties);

    assert_eq!(summary.count, 3);
    assert_eq!(summary.total_rent, dec!(2000));
    assert_eq!(summary.status_counts.len(), 2);
    assert_eq!(summary.status_counts[0].key, "occupied");
    assert_eq!(summary.status_counts[0].count, 2);
    assert_eq!(summary.status_counts[1].key, "unknown");
}

#[test]
fn test_tenant_partition_is_binary() {
    let tenants = vec![
        tenant(Some("active")),
        tenant(Some("inactive")),
        tenant(Some("pending")),
        tenant(None),
    ];
    let summary = summarize_tenants(&tenants);

    assert_eq!(summary.count, 4);
    assert_eq!(summary.active_count, 1);
    assert_eq!(summary.inactive_count, 3);
}

#[test]
fn test_bill_group_averages() {
    let bills = vec![bill(dec!(100), dec!(250)), bill(dec!(50), dec!(150))];
    let summary = summarize_bill_group("g1", &bills);

    assert_eq!(summary.count, 2);
    assert_eq!(summary.total_amount, dec!(150));
    assert_eq!(summary.total_quantity, dec!(400));
    assert_eq!(summary.average_amount, dec!(75));
    assert_eq!(summary.average_quantity, dec!(200));
}

#[test]
fn test_empty_bill_group_short_circuits_to_zero() {
    let summary = summarize_bill_group("g1", &[]);

    assert_eq!(summary.count, 0);
    assert_eq!(summary.total_amount, Decimal::ZERO);
    assert_eq!(summary.average_amount, Decimal::ZERO);
    assert_eq!(summary.average_quantity, Decimal::ZERO);
}

#[test]
fn test_alert_summary_skips_resolved_and_defaults_priority() {
    let alerts = vec![
        alert(Some("critical"), false),
        alert(None, false),
        alert(Some("high"), true),
    ];
    let summary = summarize_alerts(&alerts);

    assert_eq!(summary.count, 2);
    assert_eq!(summary.priority_counts.len(), 2);
    assert_eq!(summary.priority_counts[0].key, "critical");
    assert_eq!(summary.priority_counts[1].key, "medium");
}

// ============================================================================
// Period resolver
// ============================================================================

#[test]
fn test_current_month_starts_at_first_midnight() {
    let now = fixed_now();
    let (start, end) = ReportPeriod::CurrentMonth.resolve(now);

    assert_eq!(start.day(), 1);
    assert_eq!(start.month(), now.month());
    assert_eq!(start.year(), now.year());
    assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
    assert_eq!(end, now);
}

#[test]
fn test_last_month_never_overlaps_current_month() {
    let now = fixed_now();
    let (start, end) = ReportPeriod::LastMonth.resolve(now);
    let (current_start, _) = ReportPeriod::CurrentMonth.resolve(now);

    assert!(end < current_start);
    assert_eq!(end, current_start - Duration::microseconds(1));
    assert_eq!(start.day(), 1);
    assert_eq!(start.month(), 2);
    assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
}

#[test]
fn test_last_month_across_year_boundary() {
    let january = Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap();
    let (start, end) = ReportPeriod::LastMonth.resolve(january);

    assert_eq!((start.year(), start.month(), start.day()), (2025, 12, 1));
    assert_eq!((end.year(), end.month(), end.day()), (2025, 12, 31));
}

#[test]
fn test_current_year_starts_january_first() {
    let (start, end) = ReportPeriod::CurrentYear.resolve(fixed_now());

    assert_eq!((start.year(), start.month(), start.day()), (2026, 1, 1));
    assert_eq!(end, fixed_now());
}

#[rstest]
#[case(ReportPeriod::Last30Days, 30)]
#[case(ReportPeriod::Last90Days, 90)]
fn test_trailing_windows(#[case] period: ReportPeriod, #[case] days: i64) {
    let now = fixed_now();
    let (start, end) = period.resolve(now);

    assert_eq!(end - start, Duration::days(days));
    assert_eq!(end, now);
}

#[rstest]
#[case("current_month", ReportPeriod::CurrentMonth)]
#[case("last_month", ReportPeriod::LastMonth)]
#[case("current_year", ReportPeriod::CurrentYear)]
#[case("last_30_days", ReportPeriod::Last30Days)]
#[case("last_90_days", ReportPeriod::Last90Days)]
fn test_period_tokens_parse(#[case] token: &str, #[case] expected: ReportPeriod) {
    assert_eq!(token.parse::<ReportPeriod>().unwrap(), expected);
}

#[test]
fn test_unknown_period_token_never_defaults() {
    let error = "bogus".parse::<ReportPeriod>().unwrap_err();
    assert!(matches!(error, ReportError::InvalidPeriod(token) if token == "bogus"));
}

// ============================================================================
// Orchestrator
// ============================================================================

#[tokio::test]
async fn test_financial_report_round_trip() {
    let store = StubStore {
        transactions: vec![
            transaction(TransactionKind::Income, dec!(100), "Rent"),
            transaction(TransactionKind::Expense, dec!(40), "Maintenance"),
            transaction(TransactionKind::Income, dec!(50), "Rent"),
        ],
        ..StubStore::default()
    };
    let service = ReportService::new(store);

    let document = service
        .financial_report(&ReportFilter::default(), fixed_now())
        .await
        .unwrap();

    assert_eq!(document.kind, ReportKind::Financial);
    assert_eq!(document.sections.len(), 6);
    assert!(matches!(document.sections[0], Section::Header { .. }));
    assert!(matches!(document.sections[1], Section::PeriodBanner { .. }));

    let rows = summary_rows(&document.sections[2]);
    assert_eq!(rows[0], ("Total de Receitas".into(), "R$ 150.00".into()));
    assert_eq!(rows[1], ("Total de Despesas".into(), "R$ 40.00".into()));
    assert_eq!(rows[2], ("Resultado Líquido".into(), "R$ 110.00".into()));
    assert_eq!(rows[3], ("Total de Transações".into(), "3 transações".into()));

    let Section::DetailTable { rows, .. } = &document.sections[3] else {
        panic!("expected category detail table");
    };
    assert_eq!(
        rows[0],
        vec!["Rent", "R$ 150.00", "R$ 0.00", "R$ 150.00"]
    );
    assert_eq!(
        rows[1],
        vec!["Maintenance", "R$ 0.00", "R$ 40.00", "R$ -40.00"]
    );

    assert!(matches!(document.sections[5], Section::Footer { .. }));
}

#[tokio::test]
async fn test_empty_store_yields_full_documents() {
    let service = ReportService::new(StubStore::default());
    let now = fixed_now();
    let filter = ReportFilter::default();

    let financial = service.financial_report(&filter, now).await.unwrap();
    assert_eq!(financial.sections.len(), 6);
    assert!(
        financial
            .sections
            .iter()
            .any(|s| matches!(s, Section::Narrative { text } if text == "Sem movimentações no período."))
    );

    let properties = service.properties_report(&filter, now).await.unwrap();
    assert_eq!(properties.sections.len(), 4);

    let tenants = service.tenants_report(&filter, now).await.unwrap();
    let rows = summary_rows(&tenants.sections[1]);
    assert_eq!(rows[0].1, "0");

    let comprehensive = service.comprehensive_report(&filter, now).await.unwrap();
    assert_eq!(comprehensive.sections.len(), 8);
}

#[tokio::test]
async fn test_comprehensive_zero_alerts_is_celebratory() {
    let service = ReportService::new(StubStore::default());

    let document = service
        .comprehensive_report(&ReportFilter::default(), fixed_now())
        .await
        .unwrap();

    // The alerts slot is the section before the footer.
    let alerts_section = &document.sections[document.sections.len() - 2];
    assert!(
        matches!(alerts_section, Section::Narrative { text } if text == "Não há alertas pendentes!")
    );
}

#[tokio::test]
async fn test_comprehensive_with_alerts_lists_priorities() {
    let store = StubStore {
        alerts: vec![alert(Some("critical"), false), alert(Some("low"), false)],
        ..StubStore::default()
    };
    let service = ReportService::new(store);

    let document = service
        .comprehensive_report(&ReportFilter::default(), fixed_now())
        .await
        .unwrap();

    let rows = summary_rows(&document.sections[document.sections.len() - 2]);
    assert_eq!(rows[0], ("Crítica".into(), "1".into()));
    assert_eq!(rows[1], ("Baixa".into(), "1".into()));
}

#[tokio::test]
async fn test_dashboard_is_pinned_to_current_month() {
    let now = fixed_now();
    let in_month = transaction_on(
        TransactionKind::Income,
        dec!(500),
        "Rent",
        Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap(),
    );
    let out_of_month = transaction_on(
        TransactionKind::Income,
        dec!(900),
        "Rent",
        Utc.with_ymd_and_hms(2026, 1, 2, 12, 0, 0).unwrap(),
    );
    let store = StubStore {
        transactions: vec![in_month, out_of_month],
        ..StubStore::default()
    };
    let service = ReportService::new(store);

    // Caller asks for January; the dashboard must still show March.
    let filter = ReportFilter::for_range(
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap(),
    );
    let document = service.comprehensive_report(&filter, now).await.unwrap();

    let dashboard = summary_rows(&document.sections[2]);
    assert_eq!(dashboard[4], ("Receita Mensal".into(), "R$ 500.00".into()));

    let financial = summary_rows(&document.sections[3]);
    assert_eq!(financial[0], ("Total de Receitas".into(), "R$ 900.00".into()));
}

#[tokio::test]
async fn test_quick_financial_resolves_period_before_data_access() {
    let now = fixed_now();
    let recent = transaction_on(TransactionKind::Income, dec!(70), "Rent", now - Duration::days(5));
    let stale = transaction_on(TransactionKind::Income, dec!(30), "Rent", now - Duration::days(60));
    let store = StubStore {
        transactions: vec![recent, stale],
        ..StubStore::default()
    };
    let service = ReportService::new(store);

    let document = service
        .quick_financial_report(ReportPeriod::Last30Days, now)
        .await
        .unwrap();

    let rows = summary_rows(&document.sections[2]);
    assert_eq!(rows[0], ("Total de Receitas".into(), "R$ 70.00".into()));
}

#[tokio::test]
async fn test_inverted_date_range_is_rejected() {
    let service = ReportService::new(StubStore::default());
    let filter = ReportFilter::for_range(fixed_now(), fixed_now() - Duration::days(1));

    let error = service
        .financial_report(&filter, fixed_now())
        .await
        .unwrap_err();
    assert!(matches!(error, ReportError::InvalidDateRange { .. }));
}

#[tokio::test]
async fn test_adapter_failure_aborts_the_build() {
    let store = StubStore {
        fail: true,
        ..StubStore::default()
    };
    let service = ReportService::new(store);

    let error = service
        .comprehensive_report(&ReportFilter::default(), fixed_now())
        .await
        .unwrap_err();
    assert!(matches!(error, ReportError::Adapter(_)));
}

#[tokio::test]
async fn test_bill_group_summary_filters_by_year() {
    let mut old_bill = bill(dec!(300), dec!(90));
    old_bill.year = 2025;
    let store = StubStore {
        bills: vec![bill(dec!(100), dec!(30)), old_bill],
        ..StubStore::default()
    };
    let service = ReportService::new(store);

    let (summary, bills) = service
        .bill_group_summary(BillKind::Energy, "g1", Some(2026))
        .await
        .unwrap();

    assert_eq!(bills.len(), 1);
    assert_eq!(summary.count, 1);
    assert_eq!(summary.total_amount, dec!(100));
}

// ============================================================================
// Section building details
// ============================================================================

#[test]
fn test_detail_rows_are_clipped_for_display() {
    let mut long = property(Some("available"), Some(dec!(1500)));
    long.address = "Avenida Brigadeiro Faria Lima, 4500 - Itaim Bibi".to_string();

    let section = sections::properties_detail(std::slice::from_ref(&long));
    let Section::DetailTable { rows, .. } = &section else {
        panic!("expected detail table");
    };

    assert_eq!(rows[0][0].chars().count(), 30);
    assert_eq!(rows[0][2], "Disponível");
    // The underlying record is untouched.
    assert_eq!(
        long.address,
        "Avenida Brigadeiro Faria Lima, 4500 - Itaim Bibi"
    );
}

#[test]
fn test_properties_summary_localizes_statuses() {
    let properties = vec![
        property(Some("available"), None),
        property(Some("maintenance"), None),
        property(Some("pending review"), None),
    ];
    let section = sections::properties_summary(&summarize_properties(&properties));

    let rows = summary_rows(&section);
    let labels: Vec<_> = rows.iter().map(|(label, _)| label.as_str()).collect();
    assert!(labels.contains(&"Disponíveis"));
    assert!(labels.contains(&"Em Manutenção"));
    assert!(labels.contains(&"Pending Review"));
}

#[test]
fn test_financial_narrative_percentage() {
    let summary = summarize_transactions(&[
        transaction(TransactionKind::Income, dec!(75), "Rent"),
        transaction(TransactionKind::Expense, dec!(25), "Maintenance"),
    ]);
    let section = sections::financial_narrative(&summary);

    assert!(
        matches!(section, Section::Narrative { text } if text == "Receitas representam 75.0% do total de movimentações.")
    );
}
