//! Reports module - dashboard and period statistics computed from transactions.

mod reports_calculator;
mod reports_model;
mod reports_service;


pub use reports_calculator::{dashboard_summary, expense_by_category, period_report};
pub use reports_model::{
    CategoryTotal, DailyTotals, DashboardSummary, DateWindow, MonthlyTotals, PeriodReport,
    TimeRange,
};
pub use reports_service::{ReportService, ReportServiceTrait};
