use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::budgets::{aggregate_all_budgets, Budget};
use crate::errors::Result;
use crate::reports::{
    CategoryTotal, DailyTotals, DashboardSummary, MonthlyTotals, PeriodReport, TimeRange,
};
use crate::transactions::{Transaction, TransactionType};
use crate::utils::decimal_utils::round_for_display;
use crate::utils::time_utils::month_key;

fn sum_of<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Decimal {
    transactions.fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}

fn newest_first(transactions: impl Iterator<Item = Transaction>) -> Vec<Transaction> {
    let mut sorted: Vec<Transaction> = transactions.collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    sorted
}

/// Income and expense per bucket, buckets in ascending key order.
fn bucket_totals<K: Ord>(
    transactions: &[Transaction],
    key: impl Fn(DateTime<Utc>) -> K,
) -> BTreeMap<K, (Decimal, Decimal)> {
    let mut buckets: BTreeMap<K, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let entry = buckets
            .entry(key(t.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.transaction_type {
            TransactionType::Income => entry.0 = entry.0.saturating_add(t.amount),
            TransactionType::Expense => entry.1 = entry.1.saturating_add(t.amount),
        }
    }
    buckets
}

/// Expense totals per category, largest first; equal totals are ordered by name.
pub fn expense_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        let total = totals.entry(t.category.as_str()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(t.amount);
    }

    let mut rows: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
        })
        .collect();
    rows.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    rows
}

/// Figures shown on the dashboard for all of a user's data.
pub fn dashboard_summary(
    transactions: &[Transaction],
    budgets: &[Budget],
    recent_limit: usize,
) -> DashboardSummary {
    let total_income = sum_of(transactions.iter().filter(|t| t.is_income()));
    let total_expense = sum_of(transactions.iter().filter(|t| t.is_expense()));

    let monthly = bucket_totals(transactions, month_key)
        .into_iter()
        .map(|(month, (income, expense))| MonthlyTotals {
            month,
            income,
            expense,
        })
        .collect();

    let mut recent_transactions = newest_first(transactions.iter().cloned());
    recent_transactions.truncate(recent_limit);

    DashboardSummary {
        total_income,
        total_expense,
        balance: total_income.saturating_sub(total_expense),
        expense_by_category: expense_by_category(transactions),
        monthly,
        recent_transactions,
        budget_alerts: aggregate_all_budgets(transactions, budgets).alerts,
        malformed: Vec::new(),
    }
}

/// Statistics for the transactions falling inside `range`, resolved against `now`.
pub fn period_report(
    transactions: &[Transaction],
    range: TimeRange,
    now: DateTime<Utc>,
) -> Result<PeriodReport> {
    let window = range.resolve(now)?;
    let in_window: Vec<Transaction> =
        newest_first(transactions.iter().filter(|t| window.contains(t.date)).cloned());

    let daily = bucket_totals(&in_window, |instant| instant.date_naive())
        .into_iter()
        .map(|(date, (income, expense))| DailyTotals {
            date,
            income,
            expense,
        })
        .collect();

    let by_category = expense_by_category(&in_window);

    let total_expense = sum_of(in_window.iter().filter(|t| t.is_expense()));
    let expense_days: BTreeSet<NaiveDate> = in_window
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.date.date_naive())
        .collect();
    let day_count = Decimal::from(expense_days.len().max(1));
    let average_daily_expense =
        round_for_display(total_expense.checked_div(day_count).unwrap_or(Decimal::ZERO));

    let highest_income = in_window
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .max()
        .unwrap_or(Decimal::ZERO);

    Ok(PeriodReport {
        window,
        highest_expense_category: by_category.first().map(|row| row.category.clone()),
        expense_by_category: by_category,
        transactions: in_window,
        daily,
        average_daily_expense,
        highest_income,
    })
}
