use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::BudgetAlert;
use crate::errors::{Result, ValidationError};
use crate::records::MalformedRecord;
use crate::transactions::Transaction;
use crate::utils::time_utils::{
    end_of_day_utc, start_of_day_utc, start_of_month_utc, start_of_week_utc,
};

/// Period selector of the reports page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "range", rename_all = "camelCase")]
pub enum TimeRange {
    Today,
    ThisWeek,
    ThisMonth,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl TimeRange {
    /// Parses the query form used by the HTTP API: `today`, `this_week`,
    /// `this_month` or `custom` with both dates.
    pub fn parse(
        name: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<TimeRange> {
        match name {
            "today" => Ok(TimeRange::Today),
            "this_week" | "thisWeek" => Ok(TimeRange::ThisWeek),
            "this_month" | "thisMonth" => Ok(TimeRange::ThisMonth),
            "custom" => Ok(TimeRange::Custom { start, end }),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown time range '{}'",
                other
            ))
            .into()),
        }
    }

    /// Instants covered by this range. Presets run from their start up to `now`;
    /// a custom range covers both of its days completely.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<DateWindow> {
        let window = match *self {
            TimeRange::Today => DateWindow::new(start_of_day_utc(now.date_naive()), now),
            TimeRange::ThisWeek => DateWindow::new(start_of_week_utc(now), now),
            TimeRange::ThisMonth => DateWindow::new(start_of_month_utc(now), now),
            TimeRange::Custom { start, end } => {
                let start =
                    start.ok_or_else(|| ValidationError::MissingField("start".to_string()))?;
                let end = end.ok_or_else(|| ValidationError::MissingField("end".to_string()))?;
                if start > end {
                    return Err(ValidationError::InvalidInput(format!(
                        "Start date {} is after end date {}",
                        start, end
                    ))
                    .into());
                }
                DateWindow::new(start_of_day_utc(start), end_of_day_utc(end))
            }
        };
        Ok(window)
    }
}

/// Inclusive span of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    /// `YYYY-MM`
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub expense_by_category: Vec<CategoryTotal>,
    pub monthly: Vec<MonthlyTotals>,
    pub recent_transactions: Vec<Transaction>,
    pub budget_alerts: Vec<BudgetAlert>,
    pub malformed: Vec<MalformedRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub window: DateWindow,
    /// Transactions inside the window, newest first.
    pub transactions: Vec<Transaction>,
    pub daily: Vec<DailyTotals>,
    pub expense_by_category: Vec<CategoryTotal>,
    /// Total expense divided by the number of days with at least one expense.
    pub average_daily_expense: Decimal,
    pub highest_expense_category: Option<String>,
    pub highest_income: Decimal,
}
