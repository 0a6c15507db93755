//! # Database Value
//!
//! The whole dataset: a mapping from array name to an ordered sequence of
//! signed integers. Loaded fresh for every state-affecting command and owned by
//! the interpreter until it is saved or discarded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::errors::CommandError;

/// Named integer arrays.
///
/// Names are unique (INVARIANT-1). A `BTreeMap` keeps listings in a stable,
/// name-sorted order; insertion order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    arrays: BTreeMap<String, Vec<i64>>,
}

impl Database {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[i64]> {
        self.arrays.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.arrays.contains_key(name)
    }

    /// Insert an array, replacing any previous array with the same name.
    ///
    /// Returns the replaced values, if any.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<i64>) -> Option<Vec<i64>> {
        self.arrays.insert(name.into(), values)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<i64>> {
        self.arrays.remove(name)
    }

    /// Append `source` to the end of `target`.
    ///
    /// A missing `target` is reported before a missing `source`; either way
    /// nothing changes. `target == source` doubles the array.
    pub fn append(&mut self, target: &str, source: &str) -> Result<(), CommandError> {
        if !self.arrays.contains_key(target) {
            return Err(CommandError::UnknownArray(target.to_string()));
        }
        let tail = self
            .arrays
            .get(source)
            .cloned()
            .ok_or_else(|| CommandError::UnknownArray(source.to_string()))?;

        if let Some(values) = self.arrays.get_mut(target) {
            values.extend(tail);
        }
        Ok(())
    }

    /// Number of arrays.
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Arrays in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[i64])> {
        self.arrays
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<i64>)> for Database {
    fn from_iter<I: IntoIterator<Item = (N, Vec<i64>)>>(iter: I) -> Self {
        Self {
            arrays: iter
                .into_iter()
                .map(|(name, values)| (name.into(), values))
                .collect(),
        }
    }
}
