//! Firestore REST document representation and typed field access.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use fintrack_core::records::MalformedRecord;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type Fields = BTreeMap<String, Value>;

/// A typed Firestore value, in the externally tagged JSON form the REST API uses
/// (`{"stringValue": "..."}`, `{"integerValue": "42"}`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// int64 encoded as a decimal string.
    IntegerValue(String),
    DoubleValue(f64),
    /// RFC 3339 instant.
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(LatLng),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: Fields,
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::StringValue(value.into())
    }

    pub fn optional_string(value: Option<&str>) -> Self {
        value.map_or(Value::NullValue(()), Value::string)
    }

    /// Amounts are stored as doubles, matching what the web client writes.
    pub fn decimal(value: Decimal) -> Self {
        value
            .to_f64()
            .map_or(Value::NullValue(()), Value::DoubleValue)
    }

    pub fn timestamp(value: DateTime<Utc>) -> Self {
        Value::TimestampValue(value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::NullValue(_) => "null",
            Value::BooleanValue(_) => "boolean",
            Value::IntegerValue(_) => "integer",
            Value::DoubleValue(_) => "double",
            Value::TimestampValue(_) => "timestamp",
            Value::StringValue(_) => "string",
            Value::BytesValue(_) => "bytes",
            Value::ReferenceValue(_) => "reference",
            Value::GeoPointValue(_) => "geo point",
            Value::ArrayValue(_) => "array",
            Value::MapValue(_) => "map",
        }
    }
}

/// A stored document as returned by the REST API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, `projects/{p}/databases/(default)/documents/{collection}/{id}`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub fields: Fields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Document {
    pub fn with_fields(fields: Fields) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    /// Last path segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    pub fn reader(&self, collection: &'static str) -> FieldReader<'_> {
        FieldReader {
            document: self,
            collection,
        }
    }
}

/// Typed access to the fields of one document.
///
/// Every failure names the collection, document id and field.
pub struct FieldReader<'a> {
    document: &'a Document,
    collection: &'static str,
}

impl<'a> FieldReader<'a> {
    pub fn id(&self) -> &'a str {
        self.document.id()
    }

    fn missing(&self, field: &str) -> MalformedRecord {
        MalformedRecord::missing_field(self.collection, self.id(), field)
    }

    fn invalid(&self, field: &str, reason: String) -> MalformedRecord {
        MalformedRecord::invalid_field(self.collection, self.id(), field, reason)
    }

    fn wrong_type(&self, field: &str, expected: &str, found: &Value) -> MalformedRecord {
        self.invalid(
            field,
            format!(
                "field '{}' should be a {} but is a {}",
                field,
                expected,
                found.type_name()
            ),
        )
    }

    /// The field's value, treating an explicit null like an absent field.
    fn present(&self, field: &str) -> Option<&'a Value> {
        match self.document.fields.get(field) {
            None | Some(Value::NullValue(_)) => None,
            Some(value) => Some(value),
        }
    }

    pub fn opt_string(&self, field: &str) -> Result<Option<String>, MalformedRecord> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::StringValue(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.wrong_type(field, "string", other)),
        }
    }

    /// A string that must be present and non-blank.
    pub fn string(&self, field: &str) -> Result<String, MalformedRecord> {
        self.opt_string(field)?
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| self.missing(field))
    }

    pub fn opt_decimal(&self, field: &str) -> Result<Option<Decimal>, MalformedRecord> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::IntegerValue(raw)) => raw
                .parse::<i64>()
                .map(|n| Some(Decimal::from(n)))
                .map_err(|e| self.invalid(field, format!("field '{}' is not an integer: {}", field, e))),
            Some(Value::DoubleValue(n)) => Decimal::from_f64(*n)
                .map(Some)
                .ok_or_else(|| self.invalid(field, format!("field '{}' is not a finite number", field))),
            Some(other) => Err(self.wrong_type(field, "number", other)),
        }
    }

    pub fn decimal(&self, field: &str) -> Result<Decimal, MalformedRecord> {
        self.opt_decimal(field)?.ok_or_else(|| self.missing(field))
    }

    /// A number that must be present and not negative.
    pub fn non_negative_decimal(&self, field: &str) -> Result<Decimal, MalformedRecord> {
        let value = self.decimal(field)?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(self.invalid(field, format!("field '{}' is negative ({})", field, value)));
        }
        Ok(value)
    }

    pub fn opt_timestamp(&self, field: &str) -> Result<Option<DateTime<Utc>>, MalformedRecord> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::TimestampValue(raw)) => DateTime::parse_from_rfc3339(raw)
                .map(|t| Some(t.with_timezone(&Utc)))
                .map_err(|e| self.invalid(field, format!("field '{}' is not a valid timestamp: {}", field, e))),
            Some(other) => Err(self.wrong_type(field, "timestamp", other)),
        }
    }

    pub fn timestamp(&self, field: &str) -> Result<DateTime<Utc>, MalformedRecord> {
        self.opt_timestamp(field)?.ok_or_else(|| self.missing(field))
    }

    pub fn bool_or(&self, field: &str, default: bool) -> Result<bool, MalformedRecord> {
        match self.present(field) {
            None => Ok(default),
            Some(Value::BooleanValue(b)) => Ok(*b),
            Some(other) => Err(self.wrong_type(field, "boolean", other)),
        }
    }

    /// Parses a required string field with `FromStr`.
    pub fn parsed<T>(&self, field: &str) -> Result<T, MalformedRecord>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.string(field)?;
        raw.parse()
            .map_err(|e: T::Err| self.invalid(field, format!("field '{}': {}", field, e)))
    }
}
