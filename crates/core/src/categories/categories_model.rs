use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::CategoryIcon;
use crate::errors::{Result, ValidationError};
use crate::transactions::{Transaction, TransactionType};

pub const DEFAULT_CATEGORY_COLOR: &str = "#000000";

/// A user-defined category.
///
/// Transactions and budgets refer to a category by its name, not its id;
/// renaming a category does not touch existing records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub color: String,
    pub icon: CategoryIcon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub icon: CategoryIcon,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        validate_color(&self.color)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category_type: Option<TransactionType>,
    pub color: Option<String>,
    pub icon: Option<CategoryIcon>,
}

impl CategoryUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingField("name".to_string()).into());
            }
        }
        if let Some(color) = &self.color {
            validate_color(color)?;
        }
        Ok(())
    }

    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(kind) = self.category_type {
            category.category_type = kind;
        }
        if let Some(color) = &self.color {
            category.color = color.clone();
        }
        if let Some(icon) = self.icon {
            category.icon = icon;
        }
    }
}

/// True for `#rrggbb` strings.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn validate_color(color: &str) -> Result<()> {
    if !is_hex_color(color) {
        return Err(ValidationError::InvalidInput(format!(
            "Color must be a #rrggbb value, got '{}'",
            color
        ))
        .into());
    }
    Ok(())
}

/// How many transactions use a category and their total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUsage {
    pub category: Category,
    pub transaction_count: usize,
    pub total_amount: Decimal,
}

/// Counts, per category, the transactions with the same name and type.
pub fn category_usage(categories: &[Category], transactions: &[Transaction]) -> Vec<CategoryUsage> {
    categories
        .iter()
        .map(|category| {
            let (count, total) = transactions
                .iter()
                .filter(|t| {
                    t.category == category.name && t.transaction_type == category.category_type
                })
                .fold((0usize, Decimal::ZERO), |(n, sum), t| {
                    (n + 1, sum.saturating_add(t.amount))
                });
            CategoryUsage {
                category: category.clone(),
                transaction_count: count,
                total_amount: total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn category(name: &str, kind: TransactionType) -> Category {
        Category {
            id: format!("c-{}", name),
            user_id: "u1".to_string(),
            name: name.to_string(),
            category_type: kind,
            color: "#ff0000".to_string(),
            icon: CategoryIcon::Fastfood,
        }
    }

    fn transaction(category: &str, kind: TransactionType, amount: Decimal) -> Transaction {
        Transaction {
            id: "t".to_string(),
            user_id: "u1".to_string(),
            transaction_type: kind,
            category: category.to_string(),
            amount,
            date: Utc::now(),
            note: None,
            receipt_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#4caf50"));
        assert!(is_hex_color("#ABCDEF"));
        assert!(!is_hex_color("4caf50"));
        assert!(!is_hex_color("#4caf5"));
        assert!(!is_hex_color("#4caf5g"));
    }

    #[test]
    fn test_new_category_defaults_from_json() {
        let parsed: NewCategory =
            serde_json::from_str(r#"{"name":"Food","type":"expense"}"#).unwrap();
        assert_eq!(parsed.color, DEFAULT_CATEGORY_COLOR);
        assert_eq!(parsed.icon, CategoryIcon::Category);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_usage_matches_name_and_type() {
        let categories = vec![
            category("Food", TransactionType::Expense),
            category("Salary", TransactionType::Income),
        ];
        let transactions = vec![
            transaction("Food", TransactionType::Expense, dec!(10)),
            transaction("Food", TransactionType::Expense, dec!(15.5)),
            transaction("Food", TransactionType::Income, dec!(99)),
            transaction("Salary", TransactionType::Income, dec!(1000)),
        ];

        let usage = category_usage(&categories, &transactions);

        assert_eq!(usage[0].transaction_count, 2);
        assert_eq!(usage[0].total_amount, dec!(25.5));
        assert_eq!(usage[1].transaction_count, 1);
        assert_eq!(usage[1].total_amount, dec!(1000));
    }
}
