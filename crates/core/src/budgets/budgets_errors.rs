use rust_decimal::Decimal;
use thiserror::Error;

use crate::records::MalformedRecord;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BudgetError {
    /// A stored budget lacks its category, amount or date window, or has a negative amount.
    #[error("Malformed budget {0}")]
    MalformedBudget(MalformedRecord),

    /// The budget's ceiling is zero, so no percentage can be computed.
    #[error("Budget {budget_id} has a zero ceiling (spent {spent})")]
    DivisionByZero { budget_id: String, spent: Decimal },

    /// The spending share is too large to be represented.
    #[error("Spending share for budget {budget_id} overflows (spent {spent})")]
    PercentageOverflow { budget_id: String, spent: Decimal },

    #[error("Budget amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
}
