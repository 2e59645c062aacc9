//! Section building: fixed per-report-kind templates.
//!
//! Builders here are pure: they turn aggregates and record sets into
//! display-ready [`Section`]s (formatted values, clipped strings, localized
//! labels) without touching the underlying records. Detail tables never
//! carry more than [`DETAIL_ROW_LIMIT`] data rows; the amount trimmed is
//! reported through `truncated_count`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::types::{
    AlertSummary, DashboardSummary, FinancialSummary, PropertyRecord, PropertySummary, Section,
    SummaryRow, TenantRecord, TenantSummary,
};

/// Maximum number of data rows a detail table renders.
pub const DETAIL_ROW_LIMIT: usize = 10;

/// Display clip length for property addresses.
const ADDRESS_CLIP: usize = 30;
/// Display clip length for tenant names.
const NAME_CLIP: usize = 20;
/// Display clip length for tenant emails.
const EMAIL_CLIP: usize = 25;

/// Document header for the given report title.
#[must_use]
pub fn header(title: &str, generated_at: DateTime<Utc>) -> Section {
    Section::Header {
        title: title.to_string(),
        generated_at,
    }
}

/// Banner describing the covered date range.
#[must_use]
pub fn period_banner(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Section {
    let text = match (start, end) {
        (Some(start), Some(end)) => format!(
            "Período: {} a {}",
            start.format("%d/%m/%Y"),
            end.format("%d/%m/%Y")
        ),
        (Some(start), None) => format!("A partir de: {}", start.format("%d/%m/%Y")),
        (None, Some(end)) => format!("Até: {}", end.format("%d/%m/%Y")),
        (None, None) => "Período: Todos os dados disponíveis".to_string(),
    };

    Section::PeriodBanner { text }
}

/// Document footer.
#[must_use]
pub fn footer() -> Section {
    Section::Footer {
        text: format!(
            "Relatório gerado pelo Quadra v{}",
            env!("CARGO_PKG_VERSION")
        ),
    }
}

// ============================================================================
// Financial report sections
// ============================================================================

/// Financial totals summary table.
#[must_use]
pub fn financial_summary(summary: &FinancialSummary) -> Section {
    Section::SummaryTable {
        title: "Resumo Financeiro".to_string(),
        rows: vec![
            SummaryRow::new("Total de Receitas", format_money(summary.total_income)),
            SummaryRow::new("Total de Despesas", format_money(summary.total_expense)),
            SummaryRow::new("Resultado Líquido", format_money(summary.net_result)),
            SummaryRow::new(
                "Total de Transações",
                format!("{} transações", summary.count),
            ),
        ],
    }
}

/// Per-category income/expense detail table.
#[must_use]
pub fn category_detail(summary: &FinancialSummary) -> Section {
    let (shown, truncated_count) = truncate(&summary.categories);
    let rows = shown
        .iter()
        .map(|category| {
            vec![
                category.name.clone(),
                format_money(category.income),
                format_money(category.expense),
                format_money(category.balance()),
            ]
        })
        .collect();

    Section::DetailTable {
        title: "Detalhamento por Categoria".to_string(),
        columns: vec![
            "Categoria".to_string(),
            "Receitas".to_string(),
            "Despesas".to_string(),
            "Saldo".to_string(),
        ],
        rows,
        truncated_count,
    }
}

/// Narrative stating the income share of total movement.
///
/// Emits a neutral message when there was no movement at all, so the
/// percentage never divides by zero.
#[must_use]
pub fn financial_narrative(summary: &FinancialSummary) -> Section {
    let movement = summary.total_income + summary.total_expense;
    let text = if movement.is_zero() {
        "Sem movimentações no período.".to_string()
    } else {
        let percent = summary.total_income * Decimal::ONE_HUNDRED / movement;
        format!("Receitas representam {percent:.1}% do total de movimentações.")
    };

    Section::Narrative { text }
}

// ============================================================================
// Properties report sections
// ============================================================================

/// Property statistics summary table, one row per distinct status.
#[must_use]
pub fn properties_summary(summary: &PropertySummary) -> Section {
    let mut rows = vec![
        SummaryRow::new("Total de Propriedades", summary.count.to_string()),
        SummaryRow::new("Valor Total de Aluguel", format_money(summary.total_rent)),
    ];
    for bucket in &summary.status_counts {
        rows.push(SummaryRow::new(
            status_summary_label(&bucket.key),
            bucket.count.to_string(),
        ));
    }

    Section::SummaryTable {
        title: "Resumo de Propriedades".to_string(),
        rows,
    }
}

/// Property listing detail table, clipped and truncated for display.
#[must_use]
pub fn properties_detail(properties: &[PropertyRecord]) -> Section {
    let (shown, truncated_count) = truncate(properties);
    let rows = shown
        .iter()
        .map(|property| {
            vec![
                clip(&property.address, ADDRESS_CLIP),
                property.kind.clone().unwrap_or_else(|| "N/A".to_string()),
                status_detail_label(property.status.as_deref()),
                format_money(property.rent.unwrap_or(Decimal::ZERO)),
            ]
        })
        .collect();

    Section::DetailTable {
        title: "Lista de Propriedades".to_string(),
        columns: vec![
            "Endereço".to_string(),
            "Tipo".to_string(),
            "Status".to_string(),
            "Aluguel".to_string(),
        ],
        rows,
        truncated_count,
    }
}

// ============================================================================
// Tenants report sections
// ============================================================================

/// Tenant statistics summary table.
#[must_use]
pub fn tenants_summary(summary: &TenantSummary) -> Section {
    Section::SummaryTable {
        title: "Resumo de Inquilinos".to_string(),
        rows: vec![
            SummaryRow::new("Total de Inquilinos", summary.count.to_string()),
            SummaryRow::new("Inquilinos Ativos", summary.active_count.to_string()),
            SummaryRow::new("Inquilinos Inativos", summary.inactive_count.to_string()),
        ],
    }
}

/// Tenant listing detail table, clipped and truncated for display.
#[must_use]
pub fn tenants_detail(tenants: &[TenantRecord]) -> Section {
    let (shown, truncated_count) = truncate(tenants);
    let rows = shown
        .iter()
        .map(|tenant| {
            vec![
                clip(&tenant.name, NAME_CLIP),
                clip(&tenant.email, EMAIL_CLIP),
                tenant.phone.clone().unwrap_or_else(|| "N/A".to_string()),
                if tenant.status.as_deref() == Some("active") {
                    "Ativo".to_string()
                } else {
                    "Inativo".to_string()
                },
            ]
        })
        .collect();

    Section::DetailTable {
        title: "Lista de Inquilinos".to_string(),
        columns: vec![
            "Nome".to_string(),
            "Email".to_string(),
            "Telefone".to_string(),
            "Status".to_string(),
        ],
        rows,
        truncated_count,
    }
}

// ============================================================================
// Comprehensive report sections
// ============================================================================

/// System-wide dashboard summary table.
#[must_use]
pub fn dashboard_summary(summary: &DashboardSummary) -> Section {
    Section::SummaryTable {
        title: "Visão Geral do Sistema".to_string(),
        rows: vec![
            SummaryRow::new("Total de Propriedades", summary.total_properties.to_string()),
            SummaryRow::new(
                "Propriedades Ocupadas",
                summary.occupied_properties.to_string(),
            ),
            SummaryRow::new("Propriedades Vagas", summary.vacant_properties.to_string()),
            SummaryRow::new("Total de Inquilinos", summary.total_tenants.to_string()),
            SummaryRow::new("Receita Mensal", format_money(summary.monthly_income)),
            SummaryRow::new("Despesas Mensais", format_money(summary.monthly_expenses)),
            SummaryRow::new("Resultado Líquido", format_money(summary.net_result)),
            SummaryRow::new("Alertas Pendentes", summary.pending_alerts.to_string()),
        ],
    }
}

/// Unresolved alert summary, or a celebratory narrative when there are none.
#[must_use]
pub fn alerts_summary(summary: &AlertSummary) -> Section {
    if summary.count == 0 {
        return Section::Narrative {
            text: "Não há alertas pendentes!".to_string(),
        };
    }

    let rows = summary
        .priority_counts
        .iter()
        .map(|bucket| SummaryRow::new(priority_label(&bucket.key), bucket.count.to_string()))
        .collect();

    Section::SummaryTable {
        title: "Alertas Pendentes".to_string(),
        rows,
    }
}

// ============================================================================
// Formatting helpers
// ============================================================================

/// Formats an amount as Brazilian currency, e.g. `R$ 1,234.56`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("R$ {sign}{grouped}.{frac_part}")
}

/// Clips text to at most `max_chars` characters for display.
fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Splits a record slice at the detail-table row limit.
fn truncate<T>(records: &[T]) -> (&[T], u64) {
    if records.len() > DETAIL_ROW_LIMIT {
        (
            &records[..DETAIL_ROW_LIMIT],
            (records.len() - DETAIL_ROW_LIMIT) as u64,
        )
    } else {
        (records, 0)
    }
}

/// Plural status labels for the properties summary table.
fn status_summary_label(status: &str) -> String {
    match status {
        "available" => "Disponíveis".to_string(),
        "occupied" => "Ocupadas".to_string(),
        "maintenance" => "Em Manutenção".to_string(),
        "unavailable" => "Indisponíveis".to_string(),
        other => title_case(other),
    }
}

/// Singular status labels for property detail rows.
fn status_detail_label(status: Option<&str>) -> String {
    match status {
        Some("available") => "Disponível".to_string(),
        Some("occupied") => "Ocupada".to_string(),
        Some("maintenance") => "Manutenção".to_string(),
        Some("unavailable") => "Indisponível".to_string(),
        _ => "N/A".to_string(),
    }
}

/// Alert priority labels.
fn priority_label(priority: &str) -> String {
    match priority {
        "critical" => "Crítica".to_string(),
        "high" => "Alta".to_string(),
        "medium" => "Média".to_string(),
        "low" => "Baixa".to_string(),
        other => title_case(other),
    }
}

/// Capitalizes the first letter of each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(dec!(1234567.891)), "R$ 1,234,567.89");
        assert_eq!(format_money(dec!(0)), "R$ 0.00");
        assert_eq!(format_money(dec!(-950.5)), "R$ -950.50");
    }

    #[test]
    fn test_clip_respects_char_boundaries() {
        assert_eq!(clip("Avenida São João, 1000 - Centro", 10), "Avenida Sã");
        assert_eq!(clip("abc", 10), "abc");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("pending review"), "Pending Review");
        assert_eq!(title_case("urgent"), "Urgent");
    }
}
