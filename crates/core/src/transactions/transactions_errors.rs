use thiserror::Error;

use crate::records::MalformedRecord;

#[derive(Error, Debug)]
pub enum TransactionError {
    /// A stored transaction is missing a required field or has one of the wrong type.
    #[error("Malformed transaction {0}")]
    MalformedTransaction(MalformedRecord),

    #[error("Transaction amount must not be negative, got {0}")]
    NegativeAmount(rust_decimal::Decimal),
}
