//! Symbolic report periods and their resolution to concrete date ranges.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// A symbolic shorthand for a date range, resolved relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    /// First instant of the current month up to now.
    CurrentMonth,
    /// The whole previous month.
    LastMonth,
    /// January 1st of the current year up to now.
    CurrentYear,
    /// The thirty days leading up to now.
    Last30Days,
    /// The ninety days leading up to now.
    Last90Days,
}

impl ReportPeriod {
    /// Every recognized period, in presentation order.
    pub const ALL: [Self; 5] = [
        Self::CurrentMonth,
        Self::LastMonth,
        Self::CurrentYear,
        Self::Last30Days,
        Self::Last90Days,
    ];

    /// The wire token for this period.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::CurrentMonth => "current_month",
            Self::LastMonth => "last_month",
            Self::CurrentYear => "current_year",
            Self::Last30Days => "last_30_days",
            Self::Last90Days => "last_90_days",
        }
    }

    /// Display label for filter-discovery responses.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CurrentMonth => "Mês Atual",
            Self::LastMonth => "Mês Anterior",
            Self::CurrentYear => "Ano Atual",
            Self::Last30Days => "Últimos 30 Dias",
            Self::Last90Days => "Últimos 90 Dias",
        }
    }

    /// Resolves this period into a concrete `(start, end)` range.
    ///
    /// Both bounds are inclusive. `LastMonth` ends one microsecond before
    /// the first instant of the current month, so it never overlaps it.
    #[must_use]
    pub fn resolve(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            Self::CurrentMonth => (month_start(now), now),
            Self::LastMonth => {
                let end = month_start(now) - Duration::microseconds(1);
                (month_start(end), end)
            }
            Self::CurrentYear => (year_start(now), now),
            Self::Last30Days => (now - Duration::days(30), now),
            Self::Last90Days => (now - Duration::days(90), now),
        }
    }
}

impl std::str::FromStr for ReportPeriod {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.token() == s)
            .ok_or_else(|| ReportError::InvalidPeriod(s.to_string()))
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// First instant of the month `now` falls in.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .unwrap_or_else(|| now.date_naive())
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// First instant of the year `now` falls in.
fn year_start(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .unwrap_or_else(|| now.date_naive())
        .and_time(NaiveTime::MIN)
        .and_utc()
}
