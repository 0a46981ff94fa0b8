use std::collections::HashMap;

use loandesk_shared::RecordId;

use crate::error::ValidationError;
use crate::record::Record;

/// Records in insertion order, unique by id.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<Record<T>>,
    index: HashMap<RecordId, usize>,
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a collection from seed records, rejecting duplicate ids.
    pub fn from_records(records: Vec<Record<T>>) -> Result<Self, ValidationError> {
        let mut collection = Self::new();
        for record in records {
            collection.push(record)?;
        }
        Ok(collection)
    }

    /// Append a record. Fails if its id is already present.
    pub fn push(&mut self, record: Record<T>) -> Result<(), ValidationError> {
        if self.index.contains_key(&record.id) {
            return Err(ValidationError::DuplicateId(record.id));
        }
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Remove a record, preserving the order of the rest.
    pub fn remove(&mut self, id: &RecordId) -> Option<Record<T>> {
        let position = self.index.remove(id)?;
        let removed = self.records.remove(position);
        for record in &self.records[position..] {
            if let Some(slot) = self.index.get_mut(&record.id) {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record<T>> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub(crate) fn get_mut(&mut self, id: &RecordId) -> Option<&mut Record<T>> {
        let i = *self.index.get(id)?;
        self.records.get_mut(i)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[Record<T>] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record<T>> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.records.iter().map(|r| &r.id)
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a Record<T>;
    type IntoIter = std::slice::Iter<'a, Record<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
