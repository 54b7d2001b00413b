use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Spending share (in percent) at which a budget is reported as approaching its ceiling
pub const APPROACHING_THRESHOLD_PERCENT: Decimal = dec!(80);

/// Spending share (in percent) at which a budget is reported as exceeded
pub const EXCEEDED_THRESHOLD_PERCENT: Decimal = dec!(100);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Number of transactions shown in the dashboard's recent list
pub const RECENT_TRANSACTIONS_LIMIT: usize = 5;

/// Default fetch timeout for loading a user's snapshot, in milliseconds
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Collection names in the document store
pub mod collections {
    pub const TRANSACTIONS: &str = "transactions";
    pub const BUDGETS: &str = "budgets";
    pub const CATEGORIES: &str = "categories";
    pub const HISTORY: &str = "history";
    pub const USERS: &str = "users";
}
