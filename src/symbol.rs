//! Typed symbols
//!
//! A [`Symbol<T>`] is a named key whose value type `T` is part of its static
//! contract. Identity is the name alone: two symbols created independently
//! with the same name are equal and address the same map entry.
//!
//! ```
//! use symbol_schemas::Symbol;
//!
//! const AGE: Symbol<i64> = Symbol::from_static("age");
//! let name: Symbol<String> = symbol_schemas::symbol("name");
//!
//! assert_eq!(AGE.name(), "age");
//! assert_eq!(name, Symbol::new("name"));
//! ```

use std::borrow::{Borrow, Cow};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::value::{SymbolType, ValueKind};

/// A uniquely named key with a declared value type
pub struct Symbol<T> {
    name: Cow<'static, str>,
    _type: PhantomData<fn() -> T>,
}

/// Create a symbol whose type is inferred from context
pub fn symbol<T: SymbolType>(name: impl Into<Cow<'static, str>>) -> Symbol<T> {
    Symbol::new(name)
}

impl<T> Symbol<T> {
    /// Create a symbol usable in `const` declarations
    ///
    /// # Panics
    /// Panics if `name` is empty.
    pub const fn from_static(name: &'static str) -> Self {
        assert!(!name.is_empty(), "symbol names must not be empty");
        Self {
            name: Cow::Borrowed(name),
            _type: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: SymbolType> Symbol<T> {
    /// Create a symbol
    ///
    /// # Panics
    /// Panics if `name` is empty.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "symbol names must not be empty");
        Self {
            name,
            _type: PhantomData,
        }
    }

    /// The runtime kind of this symbol's values
    pub fn kind(&self) -> ValueKind {
        T::KIND
    }

    /// The type-erased identity of this symbol
    pub fn key(&self) -> SymbolKey {
        SymbolKey {
            name: self.name.clone(),
            kind: T::KIND,
        }
    }
}

impl<T> Clone for Symbol<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Symbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Symbol").field(&self.name).finish()
    }
}

impl<T> fmt::Display for Symbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> PartialEq for Symbol<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for Symbol<T> {}

impl<T> Hash for Symbol<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Type-erased symbol identity: a name plus the declared value kind
///
/// Equality, ordering and hashing only look at the name; the kind is the
/// descriptor used for runtime type checks.
#[derive(Clone)]
pub struct SymbolKey {
    name: Cow<'static, str>,
    kind: ValueKind,
}

impl SymbolKey {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

impl fmt::Debug for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.kind)
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl PartialEq for SymbolKey {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SymbolKey {}

impl PartialOrd for SymbolKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SymbolKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for SymbolKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// Consistent with Eq/Ord/Hash above, so keyed collections can be probed by name.
impl Borrow<str> for SymbolKey {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl<T: SymbolType> From<&Symbol<T>> for SymbolKey {
    fn from(symbol: &Symbol<T>) -> Self {
        symbol.key()
    }
}

impl<T: SymbolType> From<Symbol<T>> for SymbolKey {
    fn from(symbol: Symbol<T>) -> Self {
        SymbolKey {
            name: symbol.name,
            kind: T::KIND,
        }
    }
}

impl From<&SymbolKey> for SymbolKey {
    fn from(key: &SymbolKey) -> Self {
        key.clone()
    }
}

/// Collect symbols of different value types into a `Vec<SymbolKey>`
///
/// ```
/// use symbol_schemas::{symbol_keys, Symbol};
///
/// const AGE: Symbol<i64> = Symbol::from_static("age");
/// const NAME: Symbol<String> = Symbol::from_static("name");
///
/// let keys = symbol_keys![AGE, NAME];
/// assert_eq!(keys.len(), 2);
/// ```
#[macro_export]
macro_rules! symbol_keys {
    () => {
        ::std::vec::Vec::<$crate::SymbolKey>::new()
    };
    ($($symbol:expr),+ $(,)?) => {
        ::std::vec![$($crate::SymbolKey::from(&$symbol)),+]
    };
}
