use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::BudgetError;
use crate::errors::{Result, ValidationError};
use crate::records::MalformedRecord;
use crate::utils::time_utils::start_of_day_utc;

/// A spending ceiling for one category over an inclusive date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Input model for creating a budget. Dates are calendar days stored as midnight UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category: String,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        validate_category(&self.category)?;
        validate_amount(self.amount)
    }

    pub fn start_date_utc(&self) -> DateTime<Utc> {
        start_of_day_utc(self.start_date)
    }

    pub fn end_date_utc(&self) -> DateTime<Utc> {
        start_of_day_utc(self.end_date)
    }
}

/// Changes to an existing budget; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl BudgetUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.amount.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    pub fn apply_to(&self, budget: &mut Budget) {
        if let Some(category) = &self.category {
            budget.category = category.clone();
        }
        if let Some(amount) = self.amount {
            budget.amount = amount;
        }
        if let Some(date) = self.start_date {
            budget.start_date = start_of_day_utc(date);
        }
        if let Some(date) = self.end_date {
            budget.end_date = start_of_day_utc(date);
        }
    }
}

fn validate_category(category: &str) -> Result<()> {
    if category.trim().is_empty() {
        return Err(ValidationError::MissingField("category".to_string()).into());
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(BudgetError::NegativeAmount(amount).into());
    }
    Ok(())
}

/// How much of a budget has been consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUsage {
    pub budget_id: String,
    pub category: String,
    pub amount: Decimal,
    pub spent: Decimal,
    /// `spent / amount * 100`, unclamped and unrounded. `None` when the
    /// ceiling is zero or the share cannot be represented.
    pub percentage: Option<Decimal>,
    /// Percentage clamped to 100 and rounded for display.
    pub display_percentage: Decimal,
}

/// Threshold classification of a budget's usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percentage", rename_all = "camelCase")]
pub enum AlertKind {
    None,
    Approaching(Decimal),
    Exceeded,
}

impl AlertKind {
    pub fn is_alert(&self) -> bool {
        !matches!(self, AlertKind::None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub budget_id: String,
    pub category: String,
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResult {
    pub budget: Budget,
    pub usage: BudgetUsage,
    pub alert: AlertKind,
}

/// Per-budget results in input order, plus the alerts among them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAggregation {
    pub results: Vec<BudgetResult>,
    pub alerts: Vec<BudgetAlert>,
}

/// Chart row: spending attributed to one budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSpending {
    pub budget_id: String,
    pub category: String,
    pub spent: Decimal,
}

/// Everything the budget page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub results: Vec<BudgetResult>,
    pub alerts: Vec<BudgetAlert>,
    pub total_budget: Decimal,
    /// All expenses of the user, regardless of budget windows.
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub spending_by_budget: Vec<BudgetSpending>,
    /// Stored budgets and transactions that could not be read and were left out.
    pub malformed: Vec<MalformedRecord>,
}
