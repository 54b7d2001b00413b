//! Budget-vs-spending aggregation.
//!
//! Everything here is pure: inputs are borrowed and never modified, and the
//! same inputs always produce the same results.

use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::budgets::{
    AlertKind, Budget, BudgetAggregation, BudgetAlert, BudgetError, BudgetResult, BudgetUsage,
};
use crate::constants::{APPROACHING_THRESHOLD_PERCENT, EXCEEDED_THRESHOLD_PERCENT};
use crate::transactions::Transaction;
use crate::utils::decimal_utils::round_for_display;

const ONE_HUNDRED: Decimal = dec!(100);

/// True when `transaction` counts against `budget`: same category (exact,
/// case-sensitive), an expense, and dated inside the inclusive window.
pub fn transaction_matches_budget(transaction: &Transaction, budget: &Budget) -> bool {
    transaction.category == budget.category
        && transaction.is_expense()
        && budget.start_date <= transaction.date
        && transaction.date <= budget.end_date
}

fn spent_for(transactions: &[Transaction], budget: &Budget) -> Decimal {
    transactions
        .iter()
        .filter(|t| transaction_matches_budget(t, budget))
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}

fn share_of(spent: Decimal, ceiling: Decimal) -> Option<Decimal> {
    spent
        .checked_mul(ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(ceiling))
        .or_else(|| spent.checked_div(ceiling)?.checked_mul(ONE_HUNDRED))
}

fn display_of(percentage: Decimal) -> Decimal {
    round_for_display(percentage.min(EXCEEDED_THRESHOLD_PERCENT))
}

/// Spent amount and percentage consumed for one budget.
///
/// A zero ceiling yields [`BudgetError::DivisionByZero`]; a share too large
/// for a decimal yields [`BudgetError::PercentageOverflow`]. Both carry the
/// amount spent.
pub fn compute_budget_usage(
    transactions: &[Transaction],
    budget: &Budget,
) -> Result<BudgetUsage, BudgetError> {
    usage_for(budget, spent_for(transactions, budget))
}

fn usage_for(budget: &Budget, spent: Decimal) -> Result<BudgetUsage, BudgetError> {
    if budget.amount.is_zero() {
        return Err(BudgetError::DivisionByZero {
            budget_id: budget.id.clone(),
            spent,
        });
    }

    let percentage = share_of(spent, budget.amount).ok_or_else(|| {
        BudgetError::PercentageOverflow {
            budget_id: budget.id.clone(),
            spent,
        }
    })?;

    Ok(BudgetUsage {
        budget_id: budget.id.clone(),
        category: budget.category.clone(),
        amount: budget.amount,
        spent,
        percentage: Some(percentage),
        display_percentage: display_of(percentage),
    })
}

/// Classifies a spending percentage against the alert thresholds.
///
/// 80 is already approaching and 100 is already exceeded.
pub fn classify_alert(percentage: Decimal) -> AlertKind {
    if percentage >= EXCEEDED_THRESHOLD_PERCENT {
        AlertKind::Exceeded
    } else if percentage >= APPROACHING_THRESHOLD_PERCENT {
        AlertKind::Approaching(percentage)
    } else {
        AlertKind::None
    }
}

/// User-facing text for an alert, or `None` when there is nothing to report.
pub fn alert_message(kind: &AlertKind, category: &str) -> Option<String> {
    match kind {
        AlertKind::None => None,
        AlertKind::Approaching(percentage) => Some(format!(
            "You have used {:.2}% of the budget for {}",
            round_for_display(*percentage),
            category
        )),
        AlertKind::Exceeded => Some(format!("Spending has exceeded the budget for {}", category)),
    }
}

fn over_budget_usage(budget: &Budget, spent: Decimal) -> BudgetUsage {
    BudgetUsage {
        budget_id: budget.id.clone(),
        category: budget.category.clone(),
        amount: budget.amount,
        spent,
        percentage: None,
        display_percentage: EXCEEDED_THRESHOLD_PERCENT,
    }
}

fn evaluate(transactions: &[Transaction], budget: &Budget) -> BudgetResult {
    let spent = spent_for(transactions, budget);
    let (usage, alert) = match usage_for(budget, spent) {
        Ok(usage) => {
            let alert = usage
                .percentage
                .map(classify_alert)
                .unwrap_or(AlertKind::Exceeded);
            (usage, alert)
        }
        Err(err) => {
            if matches!(err, BudgetError::PercentageOverflow { .. }) {
                warn!("Spending share for budget {} is not representable", budget.id);
            }
            (over_budget_usage(budget, spent), AlertKind::Exceeded)
        }
    };

    BudgetResult {
        budget: budget.clone(),
        usage,
        alert,
    }
}

/// Evaluates every budget independently against the same transactions.
///
/// Results keep the order of `budgets`; the alert list holds one entry per
/// budget whose classification is not [`AlertKind::None`], in the same order.
pub fn aggregate_all_budgets(transactions: &[Transaction], budgets: &[Budget]) -> BudgetAggregation {
    let results: Vec<BudgetResult> = budgets.iter().map(|b| evaluate(transactions, b)).collect();

    let alerts = results
        .iter()
        .filter_map(|result| {
            alert_message(&result.alert, &result.budget.category).map(|message| BudgetAlert {
                budget_id: result.budget.id.clone(),
                category: result.budget.category.clone(),
                kind: result.alert,
                message,
            })
        })
        .collect();

    BudgetAggregation { results, alerts }
}
