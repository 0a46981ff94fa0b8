//! Named field access over record shapes.
//!
//! Search, sort, and the required/unique checks all address fields by their
//! wire name (`officeType`, `isActive`, ...), so every shape exposes its
//! fields through [`RecordFields::field`] as borrowed [`FieldValue`]s.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Fields that belong to the record envelope and can never be patched.
pub const READ_ONLY_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// A borrowed view of one field of a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Flag(bool),
    List(&'a [String]),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl FieldValue<'_> {
    /// Case-insensitive substring match. `needle` must already be lowercased.
    pub fn contains_folded(&self, needle: &str) -> bool {
        match self {
            Self::Text(s) => s.to_lowercase().contains(needle),
            Self::List(items) => items.iter().any(|s| s.to_lowercase().contains(needle)),
            Self::Number(_) | Self::Date(_) | Self::Timestamp(_) => {
                self.display().to_lowercase().contains(needle)
            }
            Self::Flag(_) => false,
        }
    }

    /// Blank text and empty lists count as "not provided".
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.iter().all(|s| s.trim().is_empty()),
            _ => false,
        }
    }

    /// Key used by uniqueness checks; text is trimmed and case-folded.
    pub fn unique_key(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_lowercase(),
            Self::List(items) => items
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect::<Vec<_>>()
                .join("\u{1f}"),
            _ => self.display(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => (*s).to_string(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{n:.0}"),
            Self::Number(n) => n.to_string(),
            Self::Flag(b) => b.to_string(),
            Self::List(items) => items.join(", "),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Timestamp(t) => t.to_rfc3339(),
        }
    }

    /// Ascending comparison. Values of different kinds order by kind so the
    /// relation stays total.
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => collate(a, b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Flag(a), FieldValue::Flag(b)) => a.cmp(b),
            (FieldValue::List(a), FieldValue::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = collate(x, y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Flag(_) => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Timestamp(_) => 3,
            Self::Text(_) => 4,
            Self::List(_) => 5,
        }
    }
}

/// Compare two optional field values; a missing value sorts first.
pub fn compare_optional(a: Option<FieldValue<'_>>, b: Option<FieldValue<'_>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Dictionary-style string order: case-folded first, exact bytes as tiebreak.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// The domain fields of one screen's records.
///
/// Implementors serialize as a flat JSON object with camelCase keys; that
/// object is also what [`Patch`] merges into.
pub trait RecordFields: Clone + Default + Serialize + DeserializeOwned {
    /// Look up a field by its wire name.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Shape-specific checks beyond required/unique fields.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A partial update: field name -> new JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// A patch that overwrites every field with the values in `fields`.
    pub fn from_fields<T: Serialize>(fields: &T) -> Result<Self, ValidationError> {
        match serde_json::to_value(fields) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(ValidationError::invalid("record", "fields must form an object")),
            Err(e) => Err(ValidationError::invalid("record", e.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Merge the patch into a copy of `target`.
    ///
    /// Keys are applied one at a time so a type error names the field that
    /// caused it. `target` is untouched on failure.
    pub fn apply_to<T: RecordFields>(&self, target: &T) -> Result<T, ValidationError> {
        let mut map = match serde_json::to_value(target) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(ValidationError::invalid("record", "fields must form an object")),
            Err(e) => return Err(ValidationError::invalid("record", e.to_string())),
        };

        let mut merged = target.clone();
        for (key, value) in &self.0 {
            if READ_ONLY_FIELDS.contains(&key.as_str()) {
                return Err(ValidationError::invalid(key.as_str(), "field is read-only"));
            }
            if !map.contains_key(key) {
                return Err(ValidationError::invalid(key.as_str(), "unknown field"));
            }
            map.insert(key.clone(), value.clone());
            merged = serde_json::from_value(Value::Object(map.clone()))
                .map_err(|e| ValidationError::invalid(key.as_str(), e.to_string()))?;
        }

        Ok(merged)
    }
}

impl From<Map<String, Value>> for Patch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Branch;

    #[test]
    fn test_collate_case_folds_first() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Banana", "apple"), Ordering::Greater);
        assert_eq!(collate("pune", "Pune"), Ordering::Greater);
        assert_eq!(collate("Pune", "Pune"), Ordering::Equal);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let a = FieldValue::Number(9.0);
        let b = FieldValue::Number(10.0);
        assert_eq!(a.compare(&b), Ordering::Less);
        // as text "9" > "10"
        assert_eq!(collate("9", "10"), Ordering::Greater);
    }

    #[test]
    fn test_compare_values_borrowed_from_different_records() {
        let names = [String::from("Sinnar"), String::from("baramati")];
        let first = FieldValue::Text(&names[0]);
        let ord = {
            let other = names[1].clone();
            let second = FieldValue::Text(&other);
            (first.compare(&second), second.compare(&first))
        };
        assert_eq!(ord, (Ordering::Greater, Ordering::Less));
        assert_eq!(
            FieldValue::Flag(true).compare(&FieldValue::Text("x")),
            Ordering::Less
        );
    }

    #[test]
    fn test_missing_sorts_first() {
        assert_eq!(
            compare_optional(None, Some(FieldValue::Text("a"))),
            Ordering::Less
        );
        assert_eq!(compare_optional(None, None), Ordering::Equal);
    }

    #[test]
    fn test_contains_folded() {
        assert!(FieldValue::Text("Pune Camp").contains_folded("camp"));
        assert!(!FieldValue::Flag(true).contains_folded("true"));
        assert!(FieldValue::Number(411001.0).contains_folded("4110"));
        let perms = vec!["read".to_string(), "Write".to_string()];
        assert!(FieldValue::List(&perms).contains_folded("wri"));
    }

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::Text("   ").is_blank());
        assert!(FieldValue::List(&[]).is_blank());
        assert!(!FieldValue::Flag(false).is_blank());
    }

    #[test]
    fn test_patch_apply_merges_fields() {
        let branch = Branch {
            name: "Pune".into(),
            code: "PN01".into(),
            ..Branch::default()
        };
        let patch = Patch::new().set("name", "Pune Camp").set("isActive", false);
        let merged = patch.apply_to(&branch).unwrap();
        assert_eq!(merged.name, "Pune Camp");
        assert_eq!(merged.code, "PN01");
        assert!(!merged.is_active);
    }

    #[test]
    fn test_patch_rejects_unknown_and_read_only() {
        let branch = Branch::default();
        let err = Patch::new().set("colour", "red").apply_to(&branch).unwrap_err();
        assert_eq!(err.field(), Some("colour"));

        let err = Patch::new().set("id", "branch-9999").apply_to(&branch).unwrap_err();
        assert_eq!(err.field(), Some("id"));
    }

    #[test]
    fn test_patch_rejects_wrong_type() {
        let branch = Branch::default();
        let err = Patch::new().set("isActive", "yes").apply_to(&branch).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { ref field, .. } if field == "isActive"));
    }

    #[test]
    fn test_patch_from_fields_roundtrip() {
        let branch = Branch {
            name: "Nashik".into(),
            ..Branch::default()
        };
        let patch = Patch::from_fields(&branch).unwrap();
        assert!(patch.fields().any(|f| f == "officeType"));
        let back = patch.apply_to(&Branch::default()).unwrap();
        assert_eq!(back, branch);
    }
}
