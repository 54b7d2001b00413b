use chrono::Utc;
use fintrack_core::constants::collections::USERS;
use fintrack_core::records::MalformedRecord;
use fintrack_core::settings::{Currency, ThemeColor, UserSettings};

use crate::document::{Document, Fields, Value};

/// Reads the user document. Fields written by older clients may be missing,
/// so every preference falls back to its default.
pub fn settings_from_document(document: &Document) -> Result<UserSettings, MalformedRecord> {
    let r = document.reader(USERS);
    let mut settings = UserSettings::defaults_for(
        r.opt_string("name")?.as_deref().unwrap_or_default(),
        r.opt_string("email")?.as_deref().unwrap_or_default(),
        Utc::now(),
    );
    settings.created_at = r.opt_timestamp("createdAt")?;
    if r.opt_string("currency")?.is_some() {
        settings.currency = r.parsed::<Currency>("currency")?;
    }
    if r.opt_string("themeColor")?.is_some() {
        settings.theme_color = r.parsed::<ThemeColor>("themeColor")?;
    }
    settings.budget_alerts = r.bool_or("budgetAlerts", false)?;
    settings.payment_due_alerts = r.bool_or("paymentDueAlerts", false)?;
    Ok(settings)
}

pub fn settings_fields(user_id: &str, settings: &UserSettings) -> Fields {
    let mut fields = Fields::from([
        ("userId".to_string(), Value::string(user_id)),
        ("name".to_string(), Value::string(settings.name.as_str())),
        ("email".to_string(), Value::string(settings.email.as_str())),
        ("currency".to_string(), Value::string(settings.currency.code())),
        ("budgetAlerts".to_string(), Value::BooleanValue(settings.budget_alerts)),
        (
            "paymentDueAlerts".to_string(),
            Value::BooleanValue(settings.payment_due_alerts),
        ),
        ("themeColor".to_string(), Value::string(settings.theme_color.hex())),
    ]);
    if let Some(created_at) = settings.created_at {
        fields.insert("createdAt".to_string(), Value::timestamp(created_at));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_uses_defaults() {
        let document: Document = serde_json::from_str(
            r#"{"name":"projects/demo/databases/(default)/documents/users/u1","fields":{
                "name":{"stringValue":"Ann"},
                "email":{"stringValue":"ann@example.com"},
                "currency":{"stringValue":"USD"},
                "createdAt":{"timestampValue":"2023-06-01T08:00:00Z"}
            }}"#,
        )
        .unwrap();

        let settings = settings_from_document(&document).unwrap();
        assert_eq!(settings.currency, Currency::Usd);
        assert_eq!(settings.theme_color, ThemeColor::Green);
        assert!(!settings.budget_alerts);
        assert_eq!(
            settings.created_at.map(|t| t.to_rfc3339()),
            Some("2023-06-01T08:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_unknown_theme_color_is_malformed() {
        let document: Document = serde_json::from_str(
            r##"{"name":"x/users/u1","fields":{"themeColor":{"stringValue":"#123456"}}}"##,
        )
        .unwrap();
        let record = settings_from_document(&document).unwrap_err();
        assert_eq!(record.field.as_deref(), Some("themeColor"));
    }

    #[test]
    fn test_fields_round_trip() {
        let mut settings = UserSettings::defaults_for("Ann", "ann@example.com", Utc::now());
        settings.theme_color = ThemeColor::Indigo;
        settings.budget_alerts = true;

        let document = Document {
            name: "x/users/u1".to_string(),
            fields: settings_fields("u1", &settings),
            ..Default::default()
        };
        let parsed = settings_from_document(&document).unwrap();
        assert_eq!(parsed.theme_color, ThemeColor::Indigo);
        assert!(parsed.budget_alerts);
        assert_eq!(parsed.name, "Ann");
    }
}
