use serde::Serialize;
use tracing::debug;

use crate::StudentRecord;

/// Ordered collection of accepted records for the current session.
///
/// Insertion order is preserved and duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: StudentRecord) {
        self.records.push(record);
    }

    /// Removes and returns the record at `index`.
    ///
    /// Out-of-range indices leave the roster untouched and return `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<StudentRecord> {
        if index >= self.records.len() {
            debug!(index, len = self.records.len(), "ignoring out-of-range roster removal");
            return None;
        }
        Some(self.records.remove(index))
    }

    pub fn list(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&StudentRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
