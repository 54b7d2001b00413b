//! In-memory repositories and a canned auth provider for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::budgets::{Budget, BudgetError, BudgetRepositoryTrait, BudgetUpdate, NewBudget};
use crate::categories::{Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory};
use crate::constants::collections;
use crate::errors::{Error, Result, StoreError};
use crate::history::{HistoryEntry, HistoryRepositoryTrait, NewHistoryEntry};
use crate::records::{Fetched, MalformedRecord};
use crate::session::{AuthProviderTrait, AuthenticatedUser, Session};
use crate::settings::{SettingsRepositoryTrait, ThemeColor, UserSettings};
use crate::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait, TransactionType,
};
use crate::utils::time_utils::start_of_day_utc;

/// A session for `user_id` that stays valid for the length of any test.
pub fn test_session(user_id: &str) -> Session {
    Session {
        user_id: user_id.to_string(),
        email: format!("{}@example.com", user_id),
        display_name: None,
        id_token: format!("token-{}", user_id),
        expires_at: Utc::now() + chrono::Duration::days(1),
        theme_color: ThemeColor::default(),
    }
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    start_of_day_utc(date)
}

fn not_found(collection: &str, id: &str) -> Error {
    StoreError::NotFound(format!("{}/{}", collection, id)).into()
}

#[derive(Default)]
struct State {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    categories: Vec<Category>,
    history: Vec<HistoryEntry>,
    settings: HashMap<String, UserSettings>,
    /// (owner, record) pairs returned alongside valid reads.
    malformed: Vec<(String, MalformedRecord)>,
    latency: Option<Duration>,
    failure: Option<String>,
}

/// Document store kept in memory, implementing every repository trait.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Delays every read by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.state().latency = Some(latency);
    }

    /// Makes every subsequent read fail with a request error.
    pub fn fail_reads_with(&self, message: &str) {
        self.state().failure = Some(message.to_string());
    }

    async fn before_read(&self) -> Result<()> {
        let (latency, failure) = {
            let state = self.state();
            (state.latency, state.failure.clone())
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match failure {
            Some(message) => Err(StoreError::RequestFailed(message).into()),
            None => Ok(()),
        }
    }

    fn malformed_in(&self, user_id: &str, collection: &str) -> Vec<MalformedRecord> {
        self.state()
            .malformed
            .iter()
            .filter(|(owner, record)| owner == user_id && record.collection == collection)
            .map(|(_, record)| record.clone())
            .collect()
    }

    pub fn seed_transaction(
        &self,
        session: &Session,
        kind: TransactionType,
        category: &str,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Transaction {
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: session.user_id.clone(),
            transaction_type: kind,
            category: category.to_string(),
            amount,
            date,
            note: None,
            receipt_url: None,
            created_at: date,
        };
        self.state().transactions.push(transaction.clone());
        transaction
    }

    pub fn seed_expense(
        &self,
        session: &Session,
        category: &str,
        amount: Decimal,
        y: i32,
        m: u32,
        d: u32,
    ) -> Transaction {
        self.seed_transaction(session, TransactionType::Expense, category, amount, day(y, m, d))
    }

    pub fn seed_income(
        &self,
        session: &Session,
        category: &str,
        amount: Decimal,
        y: i32,
        m: u32,
        d: u32,
    ) -> Transaction {
        self.seed_transaction(session, TransactionType::Income, category, amount, day(y, m, d))
    }

    pub fn seed_budget(
        &self,
        session: &Session,
        category: &str,
        amount: Decimal,
        start: (i32, u32, u32),
        end: (i32, u32, u32),
    ) -> Budget {
        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            user_id: session.user_id.clone(),
            category: category.to_string(),
            amount,
            start_date: day(start.0, start.1, start.2),
            end_date: day(end.0, end.1, end.2),
            created_at: None,
        };
        self.state().budgets.push(budget.clone());
        budget
    }

    pub fn seed_malformed_budget(&self, session: &Session, id: &str, field: &str) {
        self.state().malformed.push((
            session.user_id.clone(),
            MalformedRecord::missing_field(collections::BUDGETS, id, field),
        ));
    }

    pub fn seed_malformed_transaction(&self, session: &Session, id: &str, field: &str) {
        self.state().malformed.push((
            session.user_id.clone(),
            MalformedRecord::missing_field(collections::TRANSACTIONS, id, field),
        ));
    }

    pub fn history_actions(&self, session: &Session) -> Vec<String> {
        self.state()
            .history
            .iter()
            .filter(|e| e.user_id == session.user_id)
            .map(|e| e.action.clone())
            .collect()
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryStore {
    async fn list_transactions(&self, session: &Session) -> Result<Fetched<Transaction>> {
        self.before_read().await?;
        let records = self
            .state()
            .transactions
            .iter()
            .filter(|t| t.user_id == session.user_id)
            .cloned()
            .collect();
        Ok(Fetched {
            records,
            malformed: self.malformed_in(&session.user_id, collections::TRANSACTIONS),
        })
    }

    async fn get_transaction(&self, session: &Session, id: &str) -> Result<Transaction> {
        self.before_read().await?;
        self.state()
            .transactions
            .iter()
            .find(|t| t.id == id && t.user_id == session.user_id)
            .cloned()
            .ok_or_else(|| not_found(collections::TRANSACTIONS, id))
    }

    async fn insert_transaction(
        &self,
        session: &Session,
        new_transaction: &NewTransaction,
        created_at: DateTime<Utc>,
    ) -> Result<Transaction> {
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: session.user_id.clone(),
            transaction_type: new_transaction.transaction_type,
            category: new_transaction.category.clone(),
            amount: new_transaction.amount,
            date: new_transaction.date_utc(),
            note: new_transaction.trimmed_note(),
            receipt_url: new_transaction.receipt_url.clone(),
            created_at,
        };
        self.state().transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn delete_transaction(&self, session: &Session, id: &str) -> Result<()> {
        let mut state = self.state();
        let before = state.transactions.len();
        state
            .transactions
            .retain(|t| !(t.id == id && t.user_id == session.user_id));
        if state.transactions.len() == before {
            return Err(not_found(collections::TRANSACTIONS, id));
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetRepositoryTrait for InMemoryStore {
    async fn list_budgets(&self, session: &Session) -> Result<Fetched<Budget>> {
        self.before_read().await?;
        let records = self
            .state()
            .budgets
            .iter()
            .filter(|b| b.user_id == session.user_id)
            .cloned()
            .collect();
        Ok(Fetched {
            records,
            malformed: self.malformed_in(&session.user_id, collections::BUDGETS),
        })
    }

    async fn get_budget(&self, session: &Session, id: &str) -> Result<Budget> {
        self.before_read().await?;
        if let Some(record) = self
            .malformed_in(&session.user_id, collections::BUDGETS)
            .into_iter()
            .find(|r| r.id == id)
        {
            return Err(BudgetError::MalformedBudget(record).into());
        }
        self.state()
            .budgets
            .iter()
            .find(|b| b.id == id && b.user_id == session.user_id)
            .cloned()
            .ok_or_else(|| not_found(collections::BUDGETS, id))
    }

    async fn insert_budget(
        &self,
        session: &Session,
        new_budget: &NewBudget,
        created_at: DateTime<Utc>,
    ) -> Result<Budget> {
        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            user_id: session.user_id.clone(),
            category: new_budget.category.clone(),
            amount: new_budget.amount,
            start_date: new_budget.start_date_utc(),
            end_date: new_budget.end_date_utc(),
            created_at: Some(created_at),
        };
        self.state().budgets.push(budget.clone());
        Ok(budget)
    }

    async fn update_budget(
        &self,
        session: &Session,
        id: &str,
        update: &BudgetUpdate,
    ) -> Result<Budget> {
        let mut state = self.state();
        let budget = state
            .budgets
            .iter_mut()
            .find(|b| b.id == id && b.user_id == session.user_id)
            .ok_or_else(|| not_found(collections::BUDGETS, id))?;
        update.apply_to(budget);
        Ok(budget.clone())
    }

    async fn delete_budget(&self, session: &Session, id: &str) -> Result<()> {
        let mut state = self.state();
        let before = state.budgets.len();
        state
            .budgets
            .retain(|b| !(b.id == id && b.user_id == session.user_id));
        if state.budgets.len() == before {
            return Err(not_found(collections::BUDGETS, id));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryStore {
    async fn list_categories(&self, session: &Session) -> Result<Fetched<Category>> {
        self.before_read().await?;
        let records = self
            .state()
            .categories
            .iter()
            .filter(|c| c.user_id == session.user_id)
            .cloned()
            .collect();
        Ok(Fetched {
            records,
            malformed: self.malformed_in(&session.user_id, collections::CATEGORIES),
        })
    }

    async fn insert_category(
        &self,
        session: &Session,
        new_category: &NewCategory,
    ) -> Result<Category> {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            user_id: session.user_id.clone(),
            name: new_category.name.clone(),
            category_type: new_category.category_type,
            color: new_category.color.clone(),
            icon: new_category.icon,
        };
        self.state().categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        session: &Session,
        id: &str,
        update: &CategoryUpdate,
    ) -> Result<Category> {
        let mut state = self.state();
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == id && c.user_id == session.user_id)
            .ok_or_else(|| not_found(collections::CATEGORIES, id))?;
        update.apply_to(category);
        Ok(category.clone())
    }

    async fn delete_category(&self, session: &Session, id: &str) -> Result<()> {
        let mut state = self.state();
        let before = state.categories.len();
        state
            .categories
            .retain(|c| !(c.id == id && c.user_id == session.user_id));
        if state.categories.len() == before {
            return Err(not_found(collections::CATEGORIES, id));
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryRepositoryTrait for InMemoryStore {
    async fn list_history(&self, session: &Session) -> Result<Fetched<HistoryEntry>> {
        self.before_read().await?;
        Ok(Fetched::new(
            self.state()
                .history
                .iter()
                .filter(|e| e.user_id == session.user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn append(&self, session: &Session, entry: &NewHistoryEntry) -> Result<HistoryEntry> {
        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            user_id: session.user_id.clone(),
            action: entry.action.clone(),
            timestamp: entry.timestamp,
        };
        self.state().history.push(entry.clone());
        Ok(entry)
    }
}

#[async_trait]
impl SettingsRepositoryTrait for InMemoryStore {
    async fn get_settings(&self, session: &Session) -> Result<Option<UserSettings>> {
        self.before_read().await?;
        Ok(self.state().settings.get(&session.user_id).cloned())
    }

    async fn save_settings(&self, session: &Session, settings: &UserSettings) -> Result<()> {
        self.state()
            .settings
            .insert(session.user_id.clone(), settings.clone());
        Ok(())
    }
}

struct Account {
    password: String,
    user_id: String,
    display_name: Option<String>,
}

/// Auth provider backed by a map of email to password.
#[derive(Default)]
pub struct StaticAuthProvider {
    accounts: Mutex<HashMap<String, Account>>,
}

impl StaticAuthProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_account(self: Arc<Self>, email: &str, password: &str, user_id: &str) -> Arc<Self> {
        self.lock().insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user_id: user_id.to_string(),
                display_name: None,
            },
        );
        self
    }

    pub fn display_name_of(&self, email: &str) -> Option<String> {
        self.lock().get(email).and_then(|a| a.display_name.clone())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Account>> {
        self.accounts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn user_for(email: &str, account: &Account) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: account.user_id.clone(),
            email: email.to_string(),
            display_name: account.display_name.clone(),
            id_token: format!("token-{}", account.user_id),
            expires_in_secs: 3600,
        }
    }
}

#[async_trait]
impl AuthProviderTrait for StaticAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        let accounts = self.lock();
        match accounts.get(email) {
            Some(account) if account.password == password => Ok(Self::user_for(email, account)),
            _ => Err(Error::Auth("INVALID_LOGIN_CREDENTIALS".to_string())),
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthenticatedUser> {
        let mut accounts = self.lock();
        if accounts.contains_key(email) {
            return Err(Error::Auth("EMAIL_EXISTS".to_string()));
        }
        let account = Account {
            password: password.to_string(),
            user_id: Uuid::new_v4().to_string(),
            display_name: display_name.map(str::to_string),
        };
        let user = Self::user_for(email, &account);
        accounts.insert(email.to_string(), account);
        Ok(user)
    }

    async fn update_display_name(&self, session: &Session, display_name: &str) -> Result<()> {
        let mut accounts = self.lock();
        let account = accounts
            .get_mut(&session.email)
            .ok_or_else(|| Error::Auth("USER_NOT_FOUND".to_string()))?;
        account.display_name = Some(display_name.to_string());
        Ok(())
    }
}
