//! Pure aggregation over record sets.
//!
//! Every function here is deterministic for a given record ordering and
//! raises nothing: zero-denominator averages short-circuit to zero instead
//! of failing.

use rust_decimal::Decimal;

use super::types::{
    AlertRecord, AlertSummary, BillGroupSummary, CategoryBreakdown, CountBucket, FinancialSummary,
    PropertyRecord, PropertySummary, TenantRecord, TenantSummary, TransactionKind,
    TransactionRecord, UtilityBillRecord,
};

/// Bucket for transactions without a usable category.
pub const FALLBACK_CATEGORY: &str = "Outros";

/// Bucket for properties without a status or type.
pub const FALLBACK_BUCKET: &str = "unknown";

/// Bucket for alerts without a priority.
pub const FALLBACK_PRIORITY: &str = "medium";

/// Summarizes a set of transactions into totals and a category breakdown.
///
/// Categories accumulate in first-encounter order; a blank or absent
/// category falls into [`FALLBACK_CATEGORY`].
#[must_use]
pub fn summarize_transactions(transactions: &[TransactionRecord]) -> FinancialSummary {
    let mut summary = FinancialSummary::default();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => summary.total_income += transaction.amount,
            TransactionKind::Expense => summary.total_expense += transaction.amount,
        }

        let name = transaction
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(FALLBACK_CATEGORY);

        if !summary.categories.iter().any(|bucket| bucket.name == name) {
            summary.categories.push(CategoryBreakdown {
                name: name.to_string(),
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
            });
        }
        if let Some(bucket) = summary
            .categories
            .iter_mut()
            .find(|bucket| bucket.name == name)
        {
            match transaction.kind {
                TransactionKind::Income => bucket.income += transaction.amount,
                TransactionKind::Expense => bucket.expense += transaction.amount,
            }
        }
    }

    summary.net_result = summary.total_income - summary.total_expense;
    summary.count = transactions.len() as u64;
    summary
}

/// Summarizes a set of properties: counts per status and type plus the rent
/// total. Missing rents are excluded from the sum but counted in the total.
#[must_use]
pub fn summarize_properties(properties: &[PropertyRecord]) -> PropertySummary {
    let mut summary = PropertySummary {
        count: properties.len() as u64,
        ..PropertySummary::default()
    };

    for property in properties {
        bump(
            &mut summary.status_counts,
            property.status.as_deref().unwrap_or(FALLBACK_BUCKET),
        );
        bump(
            &mut summary.type_counts,
            property.kind.as_deref().unwrap_or(FALLBACK_BUCKET),
        );

        if let Some(rent) = property.rent {
            summary.total_rent += rent;
        }
    }

    summary
}

/// Summarizes a set of tenants into the active/inactive partition.
///
/// Any status other than "active" counts as inactive.
#[must_use]
pub fn summarize_tenants(tenants: &[TenantRecord]) -> TenantSummary {
    let count = tenants.len() as u64;
    let active_count = tenants
        .iter()
        .filter(|tenant| tenant.status.as_deref() == Some("active"))
        .count() as u64;

    TenantSummary {
        count,
        active_count,
        inactive_count: count - active_count,
    }
}

/// Summarizes a utility bill group.
///
/// An empty group reports all sums and averages as zero rather than
/// dividing by zero.
#[must_use]
pub fn summarize_bill_group(group_id: &str, bills: &[UtilityBillRecord]) -> BillGroupSummary {
    if bills.is_empty() {
        return BillGroupSummary {
            group_id: group_id.to_string(),
            count: 0,
            total_amount: Decimal::ZERO,
            total_quantity: Decimal::ZERO,
            average_amount: Decimal::ZERO,
            average_quantity: Decimal::ZERO,
        };
    }

    let count = Decimal::from(bills.len());
    let total_amount: Decimal = bills.iter().map(|bill| bill.total_amount).sum();
    let total_quantity: Decimal = bills.iter().map(|bill| bill.total_quantity).sum();

    BillGroupSummary {
        group_id: group_id.to_string(),
        count: bills.len() as u64,
        total_amount,
        total_quantity,
        average_amount: total_amount / count,
        average_quantity: total_quantity / count,
    }
}

/// Summarizes alerts by priority. Resolved alerts are ignored; an absent
/// priority falls into [`FALLBACK_PRIORITY`].
#[must_use]
pub fn summarize_alerts(alerts: &[AlertRecord]) -> AlertSummary {
    let mut summary = AlertSummary::default();

    for alert in alerts.iter().filter(|alert| !alert.resolved) {
        summary.count += 1;
        bump(
            &mut summary.priority_counts,
            alert.priority.as_deref().unwrap_or(FALLBACK_PRIORITY),
        );
    }

    summary
}

/// Increments the bucket for `key`, creating it at the end when new.
fn bump(buckets: &mut Vec<CountBucket>, key: &str) {
    match buckets.iter_mut().find(|bucket| bucket.key == key) {
        Some(bucket) => bucket.count += 1,
        None => buckets.push(CountBucket {
            key: key.to_string(),
            count: 1,
        }),
    }
}
