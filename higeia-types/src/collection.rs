//! Ordered, id-unique record collections.

use crate::{Record, RecordId};

/// An ordered list of records with at most one record per id.
///
/// This is the pure structure under every list store: screens render it in
/// order, mutations address records by id. Mutations on absent ids are
/// no-ops rather than errors, so callers can apply confirmations without
/// checking membership first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from raw records, keeping the first occurrence
    /// of each id.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut collection = Self::new();
        for record in records {
            if !collection.contains(record.id()) {
                collection.records.push(record);
            }
        }
        collection
    }

    /// Appends the record, or replaces the record with the same id in
    /// place. Returns the replaced record.
    pub fn upsert(&mut self, record: Record) -> Option<Record> {
        match self.position(record.id()) {
            Some(index) => Some(std::mem::replace(&mut self.records[index], record)),
            None => {
                self.records.push(record);
                None
            }
        }
    }

    /// Replaces the record with the same id in place, keeping its position.
    /// Does nothing when the id is absent. Returns the replaced record.
    pub fn update(&mut self, record: Record) -> Option<Record> {
        let index = self.position(record.id())?;
        Some(std::mem::replace(&mut self.records[index], record))
    }

    /// Removes the record with the given id. Removing an absent id does
    /// nothing. Returns the removed record and its former position.
    pub fn remove(&mut self, id: &RecordId) -> Option<(usize, Record)> {
        let index = self.position(id)?;
        Some((index, self.records.remove(index)))
    }

    /// Inserts at a position, clamped to the current length. Any existing
    /// record with the same id is removed first so uniqueness holds.
    pub fn insert_at(&mut self, index: usize, record: Record) {
        if let Some(existing) = self.position(record.id()) {
            self.records.remove(existing);
        }
        let index = index.min(self.records.len());
        self.records.insert(index, record);
    }

    /// Replaces the whole collection, de-duplicating by id (first wins).
    pub fn replace_all(&mut self, records: Vec<Record>) {
        *self = Self::from_records(records);
    }

    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    #[must_use]
    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl From<Vec<Record>> for Collection {
    fn from(records: Vec<Record>) -> Self {
        Self::from_records(records)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Collection {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
