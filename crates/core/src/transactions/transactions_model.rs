use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::transactions::TransactionError;
use crate::utils::time_utils::{end_of_day_utc, start_of_day_utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// A stored income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub note: Option<String>,
    pub receipt_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }
}

/// Input model for recording a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub amount: Decimal,
    /// Calendar date picked in the form; stored as midnight UTC.
    pub date: NaiveDate,
    pub note: Option<String>,
    pub receipt_url: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category".to_string()).into());
        }
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(TransactionError::NegativeAmount(self.amount).into());
        }
        Ok(())
    }

    pub fn date_utc(&self) -> DateTime<Utc> {
        start_of_day_utc(self.date)
    }

    /// Note with surrounding whitespace removed, or `None` if blank.
    pub fn trimmed_note(&self) -> Option<String> {
        self.note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

/// Optional criteria for listing transactions. All given criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// Exact category name.
    pub category: Option<String>,
    /// First day included.
    pub from: Option<NaiveDate>,
    /// Last day included.
    pub to: Option<NaiveDate>,
    /// Case-insensitive substring of the category.
    pub keyword: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(kind) = self.transaction_type {
            if transaction.transaction_type != kind {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if transaction.category != category {
                return false;
            }
        }
        if let Some(from) = self.from {
            if transaction.date < start_of_day_utc(from) {
                return false;
            }
        }
        if let Some(to) = self.to {
            if transaction.date > end_of_day_utc(to) {
                return false;
            }
        }
        if let Some(keyword) = self.keyword.as_deref().map(str::trim) {
            if !keyword.is_empty()
                && !transaction
                    .category
                    .to_lowercase()
                    .contains(&keyword.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}
