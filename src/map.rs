//! Symbol maps
//!
//! A [`SymbolMap`] is an immutable association of symbols to values of
//! their declared types. Maps are accumulated with a [`SymbolMapBuilder`]
//! and frozen into a snapshot:
//!
//! ```
//! use symbol_schemas::{Symbol, SymbolMap};
//!
//! const NAME: Symbol<String> = Symbol::from_static("name");
//! const AGE: Symbol<i64> = Symbol::from_static("age");
//!
//! let map = SymbolMap::builder().put(&NAME, "bob").put(&AGE, 9).freeze();
//! assert_eq!(map.get(&AGE).unwrap(), 9);
//! ```

use std::collections::btree_map::{self, BTreeMap};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Result, SymbolError};
use crate::symbol::{Symbol, SymbolKey};
use crate::value::{SymbolType, Value};

/// Immutable mapping from symbols to values
///
/// Equality and hashing are structural: two maps holding the same
/// symbol/value pairs are equal regardless of how they were built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SymbolMap {
    entries: BTreeMap<SymbolKey, Value>,
}

impl SymbolMap {
    pub fn builder() -> SymbolMapBuilder {
        SymbolMapBuilder::default()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Start a builder seeded with this map's entries
    pub fn to_builder(&self) -> SymbolMapBuilder {
        SymbolMapBuilder {
            entries: self.entries.clone(),
        }
    }

    /// Get the value of a symbol
    ///
    /// Fails with `NotContained` when the symbol is absent, and with
    /// `OutOfRange` when a stored integer does not fit `T`.
    pub fn get<T: SymbolType>(&self, symbol: &Symbol<T>) -> Result<T> {
        let value = self
            .entries
            .get(symbol.name())
            .ok_or_else(|| SymbolError::not_contained(symbol.name()))?;

        T::from_value(value).ok_or_else(|| SymbolError::unreadable::<T>(symbol.name(), value))
    }

    /// Get the value of a symbol, `None` when absent or of another type
    pub fn find<T: SymbolType>(&self, symbol: &Symbol<T>) -> Option<T> {
        self.entries.get(symbol.name()).and_then(T::from_value)
    }

    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The symbols present in this map
    pub fn symbols(&self) -> btree_map::Keys<'_, SymbolKey, Value> {
        self.entries.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, SymbolKey, Value> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SymbolMap {
    type Item = (&'a SymbolKey, &'a Value);
    type IntoIter = btree_map::Iter<'a, SymbolKey, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serializes as an object keyed by symbol name
impl Serialize for SymbolMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.name(), value)?;
        }
        map.end()
    }
}

/// Accumulates symbol/value pairs for a [`SymbolMap`]
///
/// The builder is persistent: [`freeze`](Self::freeze) takes a snapshot, and
/// later puts never reach maps that were already frozen.
#[derive(Debug, Clone, Default)]
pub struct SymbolMapBuilder {
    entries: BTreeMap<SymbolKey, Value>,
}

impl SymbolMapBuilder {
    /// Put a typed value, replacing any earlier value for the same symbol
    pub fn put<T: SymbolType>(mut self, symbol: &Symbol<T>, value: impl Into<T>) -> Self {
        self.insert(symbol.key(), value.into().into_value());
        self
    }

    /// Put a type-erased value
    ///
    /// Fails with `TypeMismatch` when the value's kind differs from the
    /// kind declared by `key`.
    pub fn put_value(mut self, key: SymbolKey, value: Value) -> Result<Self> {
        if value.kind() != key.kind() {
            return Err(SymbolError::TypeMismatch {
                name: key.name().to_string(),
                expected: key.kind(),
                actual: value.kind(),
            });
        }
        self.insert(key, value);
        Ok(self)
    }

    /// Snapshot the accumulated entries into an immutable map
    pub fn freeze(&self) -> SymbolMap {
        SymbolMap {
            entries: self.entries.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: SymbolKey, value: Value) {
        // BTreeMap::insert keeps the old key; drop it so the stored kind
        // always matches the stored value.
        self.entries.remove(key.name());
        self.entries.insert(key, value);
    }
}
