use chrono::{DateTime, Utc};
use fintrack_core::constants::collections::TRANSACTIONS;
use fintrack_core::records::MalformedRecord;
use fintrack_core::transactions::{NewTransaction, Transaction, TransactionError, TransactionType};

use crate::document::{Document, Fields, Value};

pub(crate) fn parse_transaction(document: &Document) -> Result<Transaction, MalformedRecord> {
    let r = document.reader(TRANSACTIONS);
    let date = r.timestamp("date")?;
    Ok(Transaction {
        id: r.id().to_string(),
        user_id: r.string("userId")?,
        transaction_type: r.parsed::<TransactionType>("type")?,
        category: r.string("category")?,
        amount: r.non_negative_decimal("amount")?,
        date,
        note: r.opt_string("note")?,
        receipt_url: r.opt_string("receiptUrl")?,
        created_at: r.opt_timestamp("createdAt")?.unwrap_or(date),
    })
}

/// Converts a stored document into a transaction.
pub fn transaction_from_document(document: &Document) -> Result<Transaction, TransactionError> {
    parse_transaction(document).map_err(TransactionError::MalformedTransaction)
}

/// Fields written for a new transaction; the owner is added by the client.
pub fn new_transaction_fields(new_transaction: &NewTransaction, created_at: DateTime<Utc>) -> Fields {
    let note = new_transaction.trimmed_note();
    Fields::from([
        (
            "type".to_string(),
            Value::string(new_transaction.transaction_type.as_str()),
        ),
        ("category".to_string(), Value::string(new_transaction.category.trim())),
        ("amount".to_string(), Value::decimal(new_transaction.amount)),
        ("date".to_string(), Value::timestamp(new_transaction.date_utc())),
        ("note".to_string(), Value::optional_string(note.as_deref())),
        (
            "receiptUrl".to_string(),
            Value::optional_string(new_transaction.receipt_url.as_deref()),
        ),
        ("createdAt".to_string(), Value::timestamp(created_at)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const STORED: &str = r#"{
        "name": "projects/demo/databases/(default)/documents/transactions/t1",
        "fields": {
            "userId": {"stringValue": "u1"},
            "type": {"stringValue": "expense"},
            "category": {"stringValue": "Food"},
            "amount": {"integerValue": "250"},
            "date": {"timestampValue": "2024-01-03T00:00:00Z"},
            "note": {"stringValue": "lunch"},
            "receiptUrl": {"stringValue": ""},
            "createdAt": {"timestampValue": "2024-01-03T05:12:44.120Z"}
        },
        "createTime": "2024-01-03T05:12:44.130551Z",
        "updateTime": "2024-01-03T05:12:44.130551Z"
    }"#;

    #[test]
    fn test_parse_stored_transaction() {
        let document: Document = serde_json::from_str(STORED).unwrap();
        let transaction = transaction_from_document(&document).unwrap();

        assert_eq!(transaction.id, "t1");
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.amount, dec!(250));
        assert_eq!(transaction.note.as_deref(), Some("lunch"));
        assert_eq!(transaction.created_at.to_rfc3339(), "2024-01-03T05:12:44.120+00:00");
    }

    #[test]
    fn test_missing_date_is_malformed() {
        let mut document: Document = serde_json::from_str(STORED).unwrap();
        document.fields.remove("date");

        match transaction_from_document(&document) {
            Err(TransactionError::MalformedTransaction(record)) => {
                assert_eq!(record.id, "t1");
                assert_eq!(record.collection, "transactions");
                assert_eq!(record.field.as_deref(), Some("date"));
            }
            other => panic!("expected malformed transaction, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_malformed() {
        let mut document: Document = serde_json::from_str(STORED).unwrap();
        document
            .fields
            .insert("type".to_string(), Value::string("transfer"));
        assert!(transaction_from_document(&document).is_err());
    }

    #[test]
    fn test_new_transaction_fields() {
        let fields = new_transaction_fields(
            &NewTransaction {
                transaction_type: TransactionType::Income,
                category: " Salary ".to_string(),
                amount: dec!(1200.5),
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                note: Some("   ".to_string()),
                receipt_url: None,
            },
            chrono::Utc::now(),
        );

        assert_eq!(fields["type"], Value::string("income"));
        assert_eq!(fields["category"], Value::string("Salary"));
        assert_eq!(fields["amount"], Value::DoubleValue(1200.5));
        assert_eq!(
            fields["date"],
            Value::TimestampValue("2024-02-01T00:00:00.000000Z".to_string())
        );
        assert_eq!(fields["note"], Value::NullValue(()));
    }
}
