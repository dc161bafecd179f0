//! The ordered fingerprint map behind every set variant.
//!
//! Entries live in a `Vec` in iteration order; a hash index maps each
//! fingerprint to its position. Removal shifts later entries left and
//! reindexes them, so positions stay dense.

use std::cmp::Ordering;

#[cfg(not(feature = "fxhash"))]
use std::collections::HashMap as IndexMap;

#[cfg(feature = "fxhash")]
use rustc_hash::FxHashMap as IndexMap;

use crate::fingerprint::Fingerprint;
#[cfg(test)]
use crate::fingerprint::StructuralHasher;
use crate::value::Value;

/// A stored element together with its fingerprint.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) fingerprint: Fingerprint,
    pub(crate) value: Value,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FingerprintTable {
    entries: Vec<Entry>,
    index: IndexMap<Fingerprint, usize>,
}

impl FingerprintTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn get(&self, position: usize) -> Option<&Value> {
        self.entries.get(position).map(|entry| &entry.value)
    }

    pub(crate) fn position(&self, fingerprint: &Fingerprint) -> Option<usize> {
        self.index.get(fingerprint).copied()
    }

    pub(crate) fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.index.contains_key(fingerprint)
    }

    /// Appends the value unless its fingerprint is present; returns the new position.
    #[cfg(test)]
    pub(crate) fn push(&mut self, value: Value) -> Option<usize> {
        self.push_entry(StructuralHasher::fingerprint(&value), value)
    }

    pub(crate) fn push_entry(&mut self, fingerprint: Fingerprint, value: Value) -> Option<usize> {
        if self.index.contains_key(&fingerprint) {
            return None;
        }
        let position = self.entries.len();
        self.index.insert(fingerprint.clone(), position);
        self.entries.push(Entry { fingerprint, value });
        Some(position)
    }

    /// Removes the entry with this fingerprint, returning its position and value.
    pub(crate) fn remove(&mut self, fingerprint: &Fingerprint) -> Option<(usize, Value)> {
        let position = self.index.remove(fingerprint)?;
        let entry = self.entries.remove(position);
        self.reindex_from(position);
        Some((position, entry.value))
    }

    pub(crate) fn pop(&mut self) -> Option<Value> {
        let entry = self.entries.pop()?;
        self.index.remove(&entry.fingerprint);
        Some(entry.value)
    }

    pub(crate) fn shift(&mut self) -> Option<Value> {
        if self.entries.is_empty() {
            return None;
        }
        let entry = self.entries.remove(0);
        self.index.remove(&entry.fingerprint);
        self.reindex_from(0);
        Some(entry.value)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Stable sort of the entries by value.
    pub(crate) fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.entries.sort_by(|left, right| compare(&left.value, &right.value));
        self.reindex_from(0);
    }

    fn reindex_from(&mut self, start: usize) {
        for (position, entry) in self.entries.iter().enumerate().skip(start) {
            if let Some(slot) = self.index.get_mut(&entry.fingerprint) {
                *slot = position;
            }
        }
    }
}

impl FromIterator<Entry> for FingerprintTable {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.push_entry(entry.fingerprint, entry.value);
        }
        table
    }
}
