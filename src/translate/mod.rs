//! Translation between symbol maps and string maps
//!
//! A translator is a registry of per-symbol [`Format`](crate::Format)s that
//! converts typed [`SymbolMap`]s to and from plain string-keyed maps such as
//! form fields or query parameters.
//!
//! Each direction is a capability trait:
//!
//! - [`SymbolParser`]: strings → values
//! - [`SymbolWriter`]: values → strings
//!
//! [`SymbolTranslator`] implements both. A translator built with
//! [`parser()`] or [`writer()`] still implements both traits, but every call
//! in the direction it was not built for fails with
//! `SymbolError::NotImplemented`.
//!
//! ```
//! use symbol_schemas::{translate, Symbol, SymbolParser, SymbolWriter, INT_FORMAT};
//!
//! const AGE: Symbol<i64> = Symbol::from_static("age");
//! const NAME: Symbol<String> = Symbol::from_static("name");
//!
//! let translator = translate::translator()
//!     .add(&AGE, &INT_FORMAT)
//!     .add_passthru(&NAME)
//!     .build();
//!
//! assert_eq!(translator.parse(&AGE, "9").unwrap(), 9);
//! assert_eq!(translator.write(&AGE, 9).unwrap(), "9");
//! ```

mod registry;
mod translator;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SymbolError};
use crate::map::SymbolMap;
use crate::symbol::Symbol;
use crate::value::{SymbolType, Value};

pub use registry::SymbolFormats;
pub use translator::{SymbolTranslator, SymbolTranslatorBuilder};

/// Plain string-keyed map, e.g. decoded form fields
pub type StringMap = BTreeMap<String, String>;

/// Directions a translator was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Parse and write
    #[default]
    Translate,
    #[serde(rename = "parse")]
    ParseOnly,
    #[serde(rename = "write")]
    WriteOnly,
}

impl Capability {
    pub fn can_parse(&self) -> bool {
        matches!(self, Capability::Translate | Capability::ParseOnly)
    }

    pub fn can_write(&self) -> bool {
        matches!(self, Capability::Translate | Capability::WriteOnly)
    }
}

/// Converts raw strings into symbol values
pub trait SymbolParser {
    /// Parse the raw string for the symbol registered under `name`
    fn parse_value(&self, name: &str, raw: &str) -> Result<Value>;

    /// Parse every entry of a string map
    ///
    /// Each key must name a registered symbol; the resulting map holds
    /// exactly the input's keys.
    fn parse_map(&self, raw: &StringMap) -> Result<SymbolMap>;

    /// Parse a raw string as the value of `symbol`
    fn parse<T: SymbolType>(&self, symbol: &Symbol<T>, raw: &str) -> Result<T>
    where
        Self: Sized,
    {
        let value = self.parse_value(symbol.name(), raw)?;
        T::from_value(&value).ok_or_else(|| SymbolError::unreadable::<T>(symbol.name(), &value))
    }
}

/// Converts symbol values into strings
pub trait SymbolWriter {
    /// Write a value for the symbol registered under `name`
    fn write_value(&self, name: &str, value: &Value) -> Result<String>;

    /// Write every entry of a symbol map, keyed by symbol name
    fn write_map(&self, map: &SymbolMap) -> Result<StringMap>;

    /// Write a value of `symbol`
    fn write<T: SymbolType>(&self, symbol: &Symbol<T>, value: impl Into<T>) -> Result<String>
    where
        Self: Sized,
    {
        self.write_value(symbol.name(), &value.into().into_value())
    }
}

/// Start a translator that parses and writes
pub fn translator() -> SymbolTranslatorBuilder {
    SymbolTranslator::builder(Capability::Translate)
}

/// Start a translator that only parses
pub fn parser() -> SymbolTranslatorBuilder {
    SymbolTranslator::builder(Capability::ParseOnly)
}

/// Start a translator that only writes
pub fn writer() -> SymbolTranslatorBuilder {
    SymbolTranslator::builder(Capability::WriteOnly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_directions() {
        assert!(Capability::Translate.can_parse() && Capability::Translate.can_write());
        assert!(Capability::ParseOnly.can_parse() && !Capability::ParseOnly.can_write());
        assert!(!Capability::WriteOnly.can_parse() && Capability::WriteOnly.can_write());
    }

    #[test]
    fn test_capability_names() {
        let parsed: Capability = serde_json::from_str("\"parse\"").unwrap();
        assert_eq!(parsed, Capability::ParseOnly);
        assert_eq!(serde_json::to_string(&Capability::Translate).unwrap(), "\"translate\"");
        assert_eq!(serde_json::to_string(&Capability::WriteOnly).unwrap(), "\"write\"");
    }
}
