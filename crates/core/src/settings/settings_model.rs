//! User settings and profile domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Currencies a user can choose for displaying amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Thb,
    Usd,
    Eur,
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Thb, Currency::Usd, Currency::Eur, Currency::Jpy];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Thb => "THB",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Jpy => "JPY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidInput(format!("Unsupported currency '{}'", s)))
    }
}

/// The palette offered for the application's primary color.
///
/// Serialized as the lowercase `#rrggbb` hex value the frontend applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum ThemeColor {
    Red,
    Pink,
    Purple,
    DeepPurple,
    Indigo,
    Blue,
    #[default]
    Green,
    Yellow,
    Orange,
    Brown,
}

impl ThemeColor {
    pub const ALL: [ThemeColor; 10] = [
        ThemeColor::Red,
        ThemeColor::Pink,
        ThemeColor::Purple,
        ThemeColor::DeepPurple,
        ThemeColor::Indigo,
        ThemeColor::Blue,
        ThemeColor::Green,
        ThemeColor::Yellow,
        ThemeColor::Orange,
        ThemeColor::Brown,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            ThemeColor::Red => "#f44336",
            ThemeColor::Pink => "#e91e63",
            ThemeColor::Purple => "#9c27b0",
            ThemeColor::DeepPurple => "#673ab7",
            ThemeColor::Indigo => "#3f51b5",
            ThemeColor::Blue => "#2196f3",
            ThemeColor::Green => "#4caf50",
            ThemeColor::Yellow => "#ffeb3b",
            ThemeColor::Orange => "#ff9800",
            ThemeColor::Brown => "#795548",
        }
    }
}

impl FromStr for ThemeColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeColor::ALL
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("'{}' is not one of the theme colors", s))
            })
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThemeColor> for String {
    fn from(color: ThemeColor) -> Self {
        color.hex().to_string()
    }
}

/// Per-user preferences stored alongside the profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub name: String,
    pub email: String,
    pub currency: Currency,
    pub budget_alerts: bool,
    pub payment_due_alerts: bool,
    pub theme_color: ThemeColor,
    pub created_at: Option<DateTime<Utc>>,
}

impl UserSettings {
    /// Settings written the first time a user's profile document is read.
    pub fn defaults_for(name: &str, email: &str, now: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            currency: Currency::default(),
            budget_alerts: false,
            payment_due_alerts: false,
            theme_color: ThemeColor::default(),
            created_at: Some(now),
        }
    }

    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(enabled) = update.budget_alerts {
            self.budget_alerts = enabled;
        }
        if let Some(enabled) = update.payment_due_alerts {
            self.payment_due_alerts = enabled;
        }
        if let Some(color) = update.theme_color {
            self.theme_color = color;
        }
    }
}

/// Partial update of the user's preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub currency: Option<Currency>,
    pub budget_alerts: Option<bool>,
    pub payment_due_alerts: Option<bool>,
    pub theme_color: Option<ThemeColor>,
}

/// Profile information shown on the profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub member_since: Option<DateTime<Utc>>,
}
