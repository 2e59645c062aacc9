//! Report orchestration.
//!
//! [`ReportService`] is the public entry point of the report engine. For
//! each report kind it drives period resolution, data access, aggregation,
//! and section building, strictly in that order, and returns the finished
//! [`ReportDocument`]. It holds no state across calls and never mutates
//! persisted records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::aggregate::{
    summarize_alerts, summarize_bill_group, summarize_properties, summarize_tenants,
    summarize_transactions,
};
use super::error::ReportError;
use super::period::ReportPeriod;
use super::sections;
use super::types::{
    AlertRecord, BillGroupSummary, BillKind, DashboardSummary, PropertyRecord, ReportDocument,
    ReportFilter, ReportKind, TenantRecord, TransactionRecord, UtilityBillRecord,
};

/// Read-only data access adapter for report queries.
///
/// Implementations must return record sets already sorted: transactions and
/// bills by date descending, properties and tenants by creation time
/// descending, alerts by priority ascending then creation time descending.
/// Reads are assumed idempotent; no snapshot isolation is provided here.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Fetches transactions matching the filter, newest first.
    async fn find_transactions(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<TransactionRecord>, ReportError>;

    /// Fetches properties matching the filter, newest first.
    async fn find_properties(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<PropertyRecord>, ReportError>;

    /// Fetches tenants matching the filter, newest first.
    async fn find_tenants(&self, filter: &ReportFilter) -> Result<Vec<TenantRecord>, ReportError>;

    /// Fetches unresolved alerts, highest priority first.
    async fn find_unresolved_alerts(&self) -> Result<Vec<AlertRecord>, ReportError>;

    /// Fetches utility bills of one kind matching the filter, newest first.
    async fn find_bills(
        &self,
        kind: BillKind,
        filter: &ReportFilter,
    ) -> Result<Vec<UtilityBillRecord>, ReportError>;

    /// Counts properties matching the filter.
    async fn count_properties(&self, filter: &ReportFilter) -> Result<u64, ReportError>;

    /// Counts tenants matching the filter.
    async fn count_tenants(&self, filter: &ReportFilter) -> Result<u64, ReportError>;

    /// Counts unresolved alerts.
    async fn count_unresolved_alerts(&self) -> Result<u64, ReportError>;
}

/// Orchestrates report builds against a [`ReportStore`].
///
/// Stateless: each build is independent and side-effect-free, so concurrent
/// builds need no coordination.
#[derive(Debug, Clone)]
pub struct ReportService<S> {
    store: S,
}

impl<S: ReportStore> ReportService<S> {
    /// Creates a report service over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Builds the financial report for the filtered transactions.
    ///
    /// An empty record set still yields a complete document with zeroed
    /// aggregates.
    pub async fn financial_report(
        &self,
        filter: &ReportFilter,
        now: DateTime<Utc>,
    ) -> Result<ReportDocument, ReportError> {
        validate(filter)?;
        let transactions = self.store.find_transactions(filter).await?;
        debug!(count = transactions.len(), "building financial report");

        let summary = summarize_transactions(&transactions);
        let sections = vec![
            sections::header("Relatório Financeiro", now),
            sections::period_banner(filter.start_date, filter.end_date),
            sections::financial_summary(&summary),
            sections::category_detail(&summary),
            sections::financial_narrative(&summary),
            sections::footer(),
        ];

        Ok(ReportDocument {
            kind: ReportKind::Financial,
            generated_at: now,
            sections,
        })
    }

    /// Builds the financial report for a symbolic period.
    ///
    /// The period token takes precedence over any raw date range and is
    /// resolved before any data access happens.
    pub async fn quick_financial_report(
        &self,
        period: ReportPeriod,
        now: DateTime<Utc>,
    ) -> Result<ReportDocument, ReportError> {
        let (start, end) = period.resolve(now);
        debug!(%period, %start, %end, "resolved quick report period");
        self.financial_report(&ReportFilter::for_range(start, end), now)
            .await
    }

    /// Builds the properties report.
    pub async fn properties_report(
        &self,
        filter: &ReportFilter,
        now: DateTime<Utc>,
    ) -> Result<ReportDocument, ReportError> {
        validate(filter)?;
        let properties = self.store.find_properties(filter).await?;
        debug!(count = properties.len(), "building properties report");

        let summary = summarize_properties(&properties);
        let sections = vec![
            sections::header("Relatório de Propriedades", now),
            sections::properties_summary(&summary),
            sections::properties_detail(&properties),
            sections::footer(),
        ];

        Ok(ReportDocument {
            kind: ReportKind::Properties,
            generated_at: now,
            sections,
        })
    }

    /// Builds the tenants report.
    pub async fn tenants_report(
        &self,
        filter: &ReportFilter,
        now: DateTime<Utc>,
    ) -> Result<ReportDocument, ReportError> {
        validate(filter)?;
        let tenants = self.store.find_tenants(filter).await?;
        debug!(count = tenants.len(), "building tenants report");

        let summary = summarize_tenants(&tenants);
        let sections = vec![
            sections::header("Relatório de Inquilinos", now),
            sections::tenants_summary(&summary),
            sections::tenants_detail(&tenants),
            sections::footer(),
        ];

        Ok(ReportDocument {
            kind: ReportKind::Tenants,
            generated_at: now,
            sections,
        })
    }

    /// Builds the comprehensive report: dashboard, financial, properties,
    /// tenants, and alert summaries in one document.
    ///
    /// The dashboard block always covers the current calendar month; only
    /// the financial block honors the caller-supplied date range.
    pub async fn comprehensive_report(
        &self,
        filter: &ReportFilter,
        now: DateTime<Utc>,
    ) -> Result<ReportDocument, ReportError> {
        validate(filter)?;

        let dashboard = self.dashboard_summary(now).await?;
        let transactions = self.store.find_transactions(filter).await?;
        let properties = self.store.find_properties(&ReportFilter::default()).await?;
        let tenants = self.store.find_tenants(&ReportFilter::default()).await?;
        let alerts = self.store.find_unresolved_alerts().await?;
        debug!(
            transactions = transactions.len(),
            properties = properties.len(),
            tenants = tenants.len(),
            alerts = alerts.len(),
            "building comprehensive report"
        );

        let sections = vec![
            sections::header("Relatório Completo", now),
            sections::period_banner(filter.start_date, filter.end_date),
            sections::dashboard_summary(&dashboard),
            sections::financial_summary(&summarize_transactions(&transactions)),
            sections::properties_summary(&summarize_properties(&properties)),
            sections::tenants_summary(&summarize_tenants(&tenants)),
            sections::alerts_summary(&summarize_alerts(&alerts)),
            sections::footer(),
        ];

        Ok(ReportDocument {
            kind: ReportKind::Comprehensive,
            generated_at: now,
            sections,
        })
    }

    /// Aggregates one utility bill group (plus optional year).
    pub async fn bill_group_summary(
        &self,
        kind: BillKind,
        group_id: &str,
        year: Option<i32>,
    ) -> Result<(BillGroupSummary, Vec<UtilityBillRecord>), ReportError> {
        let filter = ReportFilter {
            group_id: Some(group_id.to_string()),
            year,
            ..ReportFilter::default()
        };
        let bills = self.store.find_bills(kind, &filter).await?;
        Ok((summarize_bill_group(group_id, &bills), bills))
    }

    /// Computes the system-wide dashboard figures over the current calendar
    /// month, regardless of any caller-supplied range.
    async fn dashboard_summary(&self, now: DateTime<Utc>) -> Result<DashboardSummary, ReportError> {
        let (month_start, month_end) = ReportPeriod::CurrentMonth.resolve(now);

        let total_properties = self
            .store
            .count_properties(&ReportFilter::default())
            .await?;
        let occupied_properties = self
            .store
            .count_properties(&ReportFilter {
                status: Some("occupied".to_string()),
                ..ReportFilter::default()
            })
            .await?;
        let total_tenants = self.store.count_tenants(&ReportFilter::default()).await?;
        let pending_alerts = self.store.count_unresolved_alerts().await?;

        let monthly = self
            .store
            .find_transactions(&ReportFilter::for_range(month_start, month_end))
            .await?;
        let monthly_summary = summarize_transactions(&monthly);

        Ok(DashboardSummary {
            total_properties,
            occupied_properties,
            vacant_properties: total_properties.saturating_sub(occupied_properties),
            total_tenants,
            monthly_income: monthly_summary.total_income,
            monthly_expenses: monthly_summary.total_expense,
            net_result: monthly_summary.net_result,
            pending_alerts,
        })
    }
}

/// Rejects filters whose date range is inverted. The core never clamps.
fn validate(filter: &ReportFilter) -> Result<(), ReportError> {
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
    }
    Ok(())
}
