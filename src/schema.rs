//! Symbol schemas
//!
//! A [`SymbolSchema`] splits the symbols a map may carry into a required and
//! an optional set, and validates provided symbols against that contract.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{Result, SymbolError};
use crate::map::SymbolMap;
use crate::symbol::SymbolKey;
use crate::value::ValueKind;

/// Required/optional symbol contract for a map
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolSchema {
    required: BTreeSet<SymbolKey>,
    optional: BTreeSet<SymbolKey>,
    /// required ∪ optional
    symbols: BTreeSet<SymbolKey>,
}

/// Shorthand for [`SymbolSchema::new`]
pub fn schema<R, O>(required: R, optional: O) -> Result<SymbolSchema>
where
    R: IntoIterator,
    R::Item: Into<SymbolKey>,
    O: IntoIterator,
    O::Item: Into<SymbolKey>,
{
    SymbolSchema::new(required, optional)
}

impl SymbolSchema {
    /// Create a schema
    ///
    /// A symbol listed as both required and optional is a bug in the
    /// calling code and fails with `SymbolError::Bug`.
    pub fn new<R, O>(required: R, optional: O) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: Into<SymbolKey>,
        O: IntoIterator,
        O::Item: Into<SymbolKey>,
    {
        let required: BTreeSet<SymbolKey> = required.into_iter().map(Into::into).collect();
        let optional: BTreeSet<SymbolKey> = optional.into_iter().map(Into::into).collect();

        let overlap: Vec<&str> = required
            .intersection(&optional)
            .map(SymbolKey::name)
            .collect();
        if !overlap.is_empty() {
            return Err(SymbolError::Bug(format!(
                "the symbols ({}) were passed in as both required and optional",
                overlap.join(", ")
            )));
        }

        let symbols = required.union(&optional).cloned().collect();

        Ok(Self {
            required,
            optional,
            symbols,
        })
    }

    pub fn required_symbols(&self) -> &BTreeSet<SymbolKey> {
        &self.required
    }

    pub fn optional_symbols(&self) -> &BTreeSet<SymbolKey> {
        &self.optional
    }

    /// Every symbol this schema recognizes
    pub fn symbols(&self) -> &BTreeSet<SymbolKey> {
        &self.symbols
    }

    /// Return a new schema with extra optional symbols
    ///
    /// The required set is unchanged. The result goes through the same
    /// overlap check as [`new`](Self::new), so a required symbol cannot be
    /// made optional this way.
    pub fn with_optional<I>(&self, symbols: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<SymbolKey>,
    {
        let optional = self
            .optional
            .iter()
            .cloned()
            .chain(symbols.into_iter().map(Into::into));

        Self::new(self.required.iter().cloned(), optional)
    }

    /// Validate a set of provided symbols
    ///
    /// Both the missing (required but not provided) and the unexpected
    /// (provided but unknown) symbols are always computed and reported
    /// together.
    pub fn validate<I>(&self, provided: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<SymbolKey>,
    {
        let provided: BTreeSet<SymbolKey> = provided.into_iter().map(Into::into).collect();

        let missing: BTreeSet<SymbolKey> =
            self.required.difference(&provided).cloned().collect();
        let unexpected: BTreeSet<SymbolKey> =
            provided.difference(&self.symbols).cloned().collect();

        if missing.is_empty() && unexpected.is_empty() {
            return Ok(());
        }

        debug!(
            missing = missing.len(),
            unexpected = unexpected.len(),
            "symbol validation failed"
        );
        Err(SymbolError::InvalidSymbols { missing, unexpected })
    }

    /// Validate the symbols present in a map
    pub fn validate_map(&self, map: &SymbolMap) -> Result<()> {
        self.validate(map.symbols())
    }

    /// Validate raw string keys, e.g. the field names of a submitted form
    ///
    /// Names the schema does not know are reported as string symbols.
    pub fn validate_names<I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let provided = names.into_iter().map(|name| {
            let name = name.as_ref();
            match self.symbols.get(name) {
                Some(key) => key.clone(),
                None => SymbolKey::new(name.to_string(), ValueKind::Str),
            }
        });
        self.validate(provided)
    }
}
