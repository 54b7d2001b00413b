//! Budgets module - spending ceilings per category and the usage aggregation.

mod budget_aggregator;
mod budgets_errors;
mod budgets_model;
mod budgets_service;
mod budgets_traits;


pub use budget_aggregator::{
    aggregate_all_budgets, alert_message, classify_alert, compute_budget_usage,
    transaction_matches_budget,
};
pub use budgets_errors::BudgetError;
pub use budgets_model::{
    AlertKind, Budget, BudgetAggregation, BudgetAlert, BudgetOverview, BudgetResult,
    BudgetSpending, BudgetUpdate, BudgetUsage, NewBudget,
};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
