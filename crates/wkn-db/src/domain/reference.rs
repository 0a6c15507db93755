//! # Reference Resolver
//!
//! Resolves `<array>.<index>` tokens to a single element of the database.

use crate::domain::database::Database;
use crate::domain::errors::CommandError;

/// A parsed `<array>.<index>` token. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    pub name: &'a str,
    pub index: i64,
}

impl<'a> Reference<'a> {
    /// Split `token` into a non-empty name and a decimal index.
    ///
    /// Exactly one dot is allowed. Negative indices parse here and are
    /// rejected by the bounds check in [`resolve`].
    pub fn parse(token: &'a str) -> Result<Self, CommandError> {
        let invalid = || CommandError::InvalidReferenceFormat(token.to_string());

        let mut parts = token.split('.');
        let (Some(name), Some(index), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        if name.is_empty() {
            return Err(invalid());
        }
        let index = index.parse::<i64>().map_err(|_| invalid())?;

        Ok(Self { name, index })
    }
}

/// Look up the element named by `token` in `db`.
pub fn resolve(token: &str, db: &Database) -> Result<i64, CommandError> {
    let reference = Reference::parse(token)?;

    let values = db
        .get(reference.name)
        .ok_or_else(|| CommandError::UnknownArray(reference.name.to_string()))?;

    usize::try_from(reference.index)
        .ok()
        .and_then(|i| values.get(i).copied())
        .ok_or_else(|| CommandError::IndexOutOfBounds {
            name: reference.name.to_string(),
            index: reference.index,
            len: values.len(),
        })
}
