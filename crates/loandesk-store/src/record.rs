use chrono::{DateTime, Utc};
use loandesk_shared::RecordId;
use serde::{Deserialize, Serialize};

use crate::fields::{FieldValue, RecordFields};

/// One uniquely-identified row of a screen, with its envelope timestamps.
///
/// Serializes as a flat object: `{"id": ..., <fields>, "createdAt": ..., "updatedAt": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T> Record<T> {
    /// A fresh record whose `created_at` and `updated_at` are both `now`.
    pub fn new(id: RecordId, fields: T, now: DateTime<Utc>) -> Self {
        Self {
            id,
            fields,
            created_at: now,
            updated_at: now,
        }
    }
}

impl<T: RecordFields> Record<T> {
    /// Field lookup that also resolves the envelope fields.
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Text(self.id.as_str())),
            "createdAt" => Some(FieldValue::Timestamp(self.created_at)),
            "updatedAt" => Some(FieldValue::Timestamp(self.updated_at)),
            other => self.fields.field(other),
        }
    }
}
