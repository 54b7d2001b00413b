use chrono::{DateTime, Utc};
use fintrack_core::budgets::{Budget, BudgetError, BudgetUpdate, NewBudget};
use fintrack_core::constants::collections::BUDGETS;
use fintrack_core::records::MalformedRecord;
use fintrack_core::utils::time_utils::start_of_day_utc;

use crate::document::{Document, Fields, Value};

pub(crate) fn parse_budget(document: &Document) -> Result<Budget, MalformedRecord> {
    let r = document.reader(BUDGETS);
    Ok(Budget {
        id: r.id().to_string(),
        user_id: r.string("userId")?,
        category: r.string("category")?,
        amount: r.non_negative_decimal("amount")?,
        start_date: r.timestamp("startDate")?,
        end_date: r.timestamp("endDate")?,
        created_at: r.opt_timestamp("createdAt")?,
    })
}

/// Converts a stored document into a budget, rejecting documents without a
/// category, a non-negative amount or both window dates.
pub fn budget_from_document(document: &Document) -> Result<Budget, BudgetError> {
    parse_budget(document).map_err(BudgetError::MalformedBudget)
}

pub fn new_budget_fields(new_budget: &NewBudget, created_at: DateTime<Utc>) -> Fields {
    Fields::from([
        ("category".to_string(), Value::string(new_budget.category.trim())),
        ("amount".to_string(), Value::decimal(new_budget.amount)),
        ("startDate".to_string(), Value::timestamp(new_budget.start_date_utc())),
        ("endDate".to_string(), Value::timestamp(new_budget.end_date_utc())),
        ("createdAt".to_string(), Value::timestamp(created_at)),
    ])
}

/// Fields and update mask for the fields present in `update`.
pub fn budget_update_fields(update: &BudgetUpdate) -> (Fields, Vec<&'static str>) {
    let mut fields = Fields::new();
    let mut mask = Vec::new();
    if let Some(category) = &update.category {
        fields.insert("category".to_string(), Value::string(category.trim()));
        mask.push("category");
    }
    if let Some(amount) = update.amount {
        fields.insert("amount".to_string(), Value::decimal(amount));
        mask.push("amount");
    }
    if let Some(date) = update.start_date {
        fields.insert("startDate".to_string(), Value::timestamp(start_of_day_utc(date)));
        mask.push("startDate");
    }
    if let Some(date) = update.end_date {
        fields.insert("endDate".to_string(), Value::timestamp(start_of_day_utc(date)));
        mask.push("endDate");
    }
    (fields, mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn stored(fields: &str) -> Document {
        serde_json::from_str(&format!(
            r#"{{"name":"projects/demo/databases/(default)/documents/budgets/b1","fields":{{{}}}}}"#,
            fields
        ))
        .unwrap()
    }

    const COMPLETE: &str = r#"
        "userId": {"stringValue": "u1"},
        "category": {"stringValue": "Food"},
        "amount": {"doubleValue": 1000},
        "startDate": {"timestampValue": "2024-01-01T00:00:00Z"},
        "endDate": {"timestampValue": "2024-01-31T00:00:00Z"}
    "#;

    #[test]
    fn test_parse_complete_budget() {
        let budget = budget_from_document(&stored(COMPLETE)).unwrap();
        assert_eq!(budget.id, "b1");
        assert_eq!(budget.amount, dec!(1000));
        assert_eq!(budget.created_at, None);
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        for field in ["category", "amount", "startDate", "endDate"] {
            let mut document = stored(COMPLETE);
            document.fields.remove(field);
            match budget_from_document(&document) {
                Err(BudgetError::MalformedBudget(record)) => {
                    assert_eq!(record.field.as_deref(), Some(field));
                }
                other => panic!("expected malformed budget for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_negative_amount_is_malformed() {
        let document = stored(&COMPLETE.replace("1000", "-5"));
        assert!(matches!(
            budget_from_document(&document),
            Err(BudgetError::MalformedBudget(_))
        ));
    }

    #[test]
    fn test_update_mask_lists_present_fields() {
        let (fields, mask) = budget_update_fields(&BudgetUpdate {
            amount: Some(dec!(250)),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31),
            ..Default::default()
        });
        assert_eq!(mask, vec!["amount", "endDate"]);
        assert_eq!(fields.len(), 2);
    }
}
