//! Outcome of reading a collection whose documents are not schema-checked by the store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stored document that could not be converted into its typed entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MalformedRecord {
    pub collection: String,
    pub id: String,
    /// Field that was missing or had the wrong type, if a single field is to blame.
    pub field: Option<String>,
    pub reason: String,
}

impl MalformedRecord {
    pub fn missing_field(collection: &str, id: &str, field: &str) -> Self {
        Self {
            collection: collection.to_string(),
            id: id.to_string(),
            field: Some(field.to_string()),
            reason: format!("required field '{}' is missing", field),
        }
    }

    pub fn invalid_field(collection: &str, id: &str, field: &str, reason: impl Into<String>) -> Self {
        Self {
            collection: collection.to_string(),
            id: id.to_string(),
            field: Some(field.to_string()),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}: {}", self.collection, self.id, self.reason)
    }
}

/// Records read from a collection, with the documents that failed validation kept aside.
///
/// Malformed documents never abort a read: they are reported here so the caller
/// can surface them while still working with the valid records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fetched<T> {
    pub records: Vec<T>,
    pub malformed: Vec<MalformedRecord>,
}

impl<T> Default for Fetched<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            malformed: Vec::new(),
        }
    }
}

impl<T> Fetched<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            malformed: Vec::new(),
        }
    }

    pub fn push(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn reject(&mut self, record: MalformedRecord) {
        self.malformed.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.malformed.is_empty()
    }

    /// Applies `f` to the valid records, keeping the rejected ones untouched.
    pub fn map_records<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> Fetched<U> {
        Fetched {
            records: f(self.records),
            malformed: self.malformed,
        }
    }
}

impl<T> FromIterator<std::result::Result<T, MalformedRecord>> for Fetched<T> {
    fn from_iter<I: IntoIterator<Item = std::result::Result<T, MalformedRecord>>>(iter: I) -> Self {
        let mut fetched = Fetched::default();
        for item in iter {
            match item {
                Ok(record) => fetched.push(record),
                Err(malformed) => fetched.reject(malformed),
            }
        }
        fetched
    }
}
