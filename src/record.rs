// Domain types for secrets.
// A secret is addressed by an opaque id and materializes as a field map.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a secret record.
///
/// The server accepts both numeric and string ids, so anything stringly
/// convertible works here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretId(String);

impl SecretId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SecretId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SecretId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for SecretId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for SecretId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// A retrieved secret: field display name mapped to field content.
///
/// File attachments arrive base64-decoded, so a field's content is whatever
/// the server stored, inline value or file body alike. Field order carries
/// no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretRecord(HashMap<String, String>);

impl SecretRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a field by display name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, content: impl Into<String>) {
        self.0.insert(field.into(), content.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Display names of all fields present.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl FromIterator<(String, String)> for SecretRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_id_conversions() {
        assert_eq!(SecretId::from("db-password").as_str(), "db-password");
        assert_eq!(SecretId::from(42i64).as_str(), "42");
        assert_eq!(SecretId::from(42u64).to_string(), "42");
    }

    #[test]
    fn test_record_round_trip() {
        let mut record = SecretRecord::new();
        record.insert("Username", "svc-account");
        record.insert("Password", "hunter2");

        let json = serde_json::to_string(&record).unwrap();
        let back: SecretRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.get("Username"), Some("svc-account"));
        assert_eq!(back.len(), 2);
    }

    #[test]
    fn test_empty_content_is_present() {
        let mut record = SecretRecord::new();
        record.insert("Notes", "");
        assert_eq!(record.get("Notes"), Some(""));
        assert_eq!(record.get("Missing"), None);
    }
}
