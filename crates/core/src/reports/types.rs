//! Report data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kinds of report the orchestrator can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Transactions and category breakdown for a period.
    Financial,
    /// Property inventory with status/type statistics.
    Properties,
    /// Tenant roster with active/inactive partition.
    Tenants,
    /// System-wide dashboard plus all summaries.
    Comprehensive,
}

impl ReportKind {
    /// Returns the identifier used in suggested filenames.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Properties => "properties",
            Self::Tenants => "tenants",
            Self::Comprehensive => "comprehensive",
        }
    }
}

/// Caller-supplied constraint set narrowing which records enter a report.
///
/// All fields are optional; an absent field places no constraint on that
/// dimension. When both dates are present the caller must keep
/// `start_date <= end_date`; the core validates but never clamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Inclusive start of the date range.
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive end of the date range.
    pub end_date: Option<DateTime<Utc>>,
    /// Restrict to a single property.
    pub property_id: Option<Uuid>,
    /// Restrict to a single tenant.
    pub tenant_id: Option<Uuid>,
    /// Restrict by entity status (property status, tenant status).
    pub status: Option<String>,
    /// Restrict by entity type (property type).
    pub entity_type: Option<String>,
    /// Restrict utility bills to a billing group.
    pub group_id: Option<String>,
    /// Restrict utility bills to a year.
    pub year: Option<i32>,
    /// Restrict utility bills to a month (1-12).
    pub month: Option<u32>,
}

impl ReportFilter {
    /// A filter covering exactly the given date range.
    #[must_use]
    pub fn for_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Self::default()
        }
    }
}

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received (rent, deposits).
    Income,
    /// Money spent (maintenance, taxes).
    Expense,
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

/// Which utility a bill belongs to; selects the quantity semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillKind {
    /// Electricity bills, quantities in kWh.
    Energy,
    /// Water bills, quantities in liters.
    Water,
}

// ============================================================================
// Raw records (the shapes the data access adapter maps rows into)
// ============================================================================

/// A financial transaction row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction ID.
    pub id: Uuid,
    /// Property the transaction belongs to, if any.
    pub property_id: Option<Uuid>,
    /// Tenant the transaction belongs to, if any.
    pub tenant_id: Option<Uuid>,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Transaction amount (always positive).
    pub amount: Decimal,
    /// Free-form category; blank/absent buckets to "Outros".
    pub category: Option<String>,
    /// Description.
    pub description: String,
    /// When the transaction happened.
    pub date: DateTime<Utc>,
}

/// A property row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Property ID.
    pub id: Uuid,
    /// Street address.
    pub address: String,
    /// Property type (apartment, house, commercial, ...).
    pub kind: Option<String>,
    /// Status (available, occupied, maintenance, unavailable).
    pub status: Option<String>,
    /// Monthly rent, when set.
    pub rent: Option<Decimal>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A tenant row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantRecord {
    /// Tenant ID.
    pub id: Uuid,
    /// Property the tenant occupies, if any.
    pub property_id: Option<Uuid>,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Status; anything other than "active" counts as inactive.
    pub status: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An energy or water bill row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilityBillRecord {
    /// Bill ID.
    pub id: Uuid,
    /// Property the bill belongs to.
    pub property_id: Uuid,
    /// Billing group this bill is aggregated under.
    pub group_id: String,
    /// Billing year.
    pub year: i32,
    /// Billing month (1-12).
    pub month: u32,
    /// Total billed amount.
    pub total_amount: Decimal,
    /// Total consumed quantity (kWh or liters, per [`BillKind`]).
    pub total_quantity: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An alert row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Alert ID.
    pub id: Uuid,
    /// Related property, if any.
    pub property_id: Option<Uuid>,
    /// Related tenant, if any.
    pub tenant_id: Option<Uuid>,
    /// Alert message.
    pub message: String,
    /// Priority (critical, high, medium, low); absent buckets to "medium".
    pub priority: Option<String>,
    /// Whether the alert has been resolved.
    pub resolved: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Aggregates (derived numeric/categorical summaries)
// ============================================================================

/// Income/expense accumulated for one transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Category name.
    pub name: String,
    /// Accumulated income.
    pub income: Decimal,
    /// Accumulated expense.
    pub expense: Decimal,
}

impl CategoryBreakdown {
    /// Net balance of the category (income minus expense).
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

/// One grouping bucket with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBucket {
    /// Bucket key (status, type, or priority value).
    pub key: String,
    /// Number of records in the bucket.
    pub count: u64,
}

/// Financial summary over a set of transactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Sum of income amounts.
    pub total_income: Decimal,
    /// Sum of expense amounts.
    pub total_expense: Decimal,
    /// Income minus expense.
    pub net_result: Decimal,
    /// Number of transactions.
    pub count: u64,
    /// Per-category breakdown, in first-encounter order.
    pub categories: Vec<CategoryBreakdown>,
}

/// Summary over a set of properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertySummary {
    /// Number of properties.
    pub count: u64,
    /// Sum of the rents that are present.
    pub total_rent: Decimal,
    /// Count per status, in first-encounter order.
    pub status_counts: Vec<CountBucket>,
    /// Count per property type, in first-encounter order.
    pub type_counts: Vec<CountBucket>,
}

/// Summary over a set of tenants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantSummary {
    /// Number of tenants.
    pub count: u64,
    /// Tenants with status "active".
    pub active_count: u64,
    /// Everything else.
    pub inactive_count: u64,
}

/// Summary over a utility bill group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillGroupSummary {
    /// The billing group.
    pub group_id: String,
    /// Number of bills in the group.
    pub count: u64,
    /// Sum of billed amounts.
    pub total_amount: Decimal,
    /// Sum of consumed quantities.
    pub total_quantity: Decimal,
    /// Mean billed amount; zero when the group has no bills.
    pub average_amount: Decimal,
    /// Mean consumed quantity; zero when the group has no bills.
    pub average_quantity: Decimal,
}

/// Summary over unresolved alerts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertSummary {
    /// Number of unresolved alerts.
    pub count: u64,
    /// Count per priority, in first-encounter order.
    pub priority_counts: Vec<CountBucket>,
}

/// System-wide dashboard figures for the comprehensive report.
///
/// Always computed over the current calendar month, independently of the
/// report's own date filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Total properties in the system.
    pub total_properties: u64,
    /// Properties with status "occupied".
    pub occupied_properties: u64,
    /// Total minus occupied.
    pub vacant_properties: u64,
    /// Total tenants in the system.
    pub total_tenants: u64,
    /// Income over the current calendar month.
    pub monthly_income: Decimal,
    /// Expenses over the current calendar month.
    pub monthly_expenses: Decimal,
    /// Monthly income minus monthly expenses.
    pub net_result: Decimal,
    /// Unresolved alerts.
    pub pending_alerts: u64,
}

// ============================================================================
// Document sections
// ============================================================================

/// One label/value row of a summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Row label.
    pub label: String,
    /// Display-ready value.
    pub value: String,
}

impl SummaryRow {
    /// Creates a summary row.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One displayable unit of a report document.
///
/// Sections are produced in a fixed sequence per report kind and never
/// reordered after construction. They are display-ready (values formatted,
/// long strings clipped) but carry no layout geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    /// Document header with the report title.
    Header {
        /// Report title.
        title: String,
        /// When the report was generated.
        generated_at: DateTime<Utc>,
    },
    /// Banner describing the covered period.
    PeriodBanner {
        /// Human-readable period description.
        text: String,
    },
    /// Label/value summary table.
    SummaryTable {
        /// Table heading.
        title: String,
        /// Table rows.
        rows: Vec<SummaryRow>,
    },
    /// Multi-column detail table, truncated to at most ten data rows.
    DetailTable {
        /// Table heading.
        title: String,
        /// Column headings.
        columns: Vec<String>,
        /// Data rows (at most ten).
        rows: Vec<Vec<String>>,
        /// How many additional rows were omitted; zero when none were.
        truncated_count: u64,
    },
    /// Free-form narrative paragraph.
    Narrative {
        /// Paragraph text.
        text: String,
    },
    /// Document footer.
    Footer {
        /// Footer text.
        text: String,
    },
}

/// The complete ordered section sequence produced for one report request.
///
/// Immutable once built; consumed exactly once by a renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Which report this document is.
    pub kind: ReportKind,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Ordered sections.
    pub sections: Vec<Section>,
}
