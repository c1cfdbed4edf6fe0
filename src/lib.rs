//! Symbol Schemas
//!
//! Typed key/value contracts for string-keyed input such as form fields and
//! query parameters.
//!
//! ## Features
//!
//! - **Symbols**: uniquely named keys with a static value type
//! - **Symbol Maps**: immutable, type-checked symbol → value maps
//! - **Schemas**: required/optional symbol sets with full missing/unexpected diagnostics
//! - **Formats**: shareable parse/write pairs between strings and typed values
//! - **Translators**: bulk conversion between symbol maps and string maps,
//!   with parse-only and write-only variants
//! - **Contracts**: schema + translator bundles, declarable in TOML
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use symbol_schemas::{translate, Symbol, SymbolMap, SymbolParser, SymbolWriter, INT_FORMAT};
//!
//! const NAME: Symbol<String> = Symbol::from_static("name");
//! const AGE: Symbol<i64> = Symbol::from_static("age");
//!
//! let translator = translate::translator()
//!     .add(&AGE, &INT_FORMAT)
//!     .add_passthru(&NAME)
//!     .build();
//!
//! let raw: BTreeMap<String, String> =
//!     [("name".to_string(), "bob".to_string()), ("age".to_string(), "9".to_string())].into();
//!
//! let map = translator.parse_map(&raw).unwrap();
//! assert_eq!(map, SymbolMap::builder().put(&NAME, "bob").put(&AGE, 9).freeze());
//! assert_eq!(translator.write_map(&map).unwrap(), raw);
//! ```

pub mod config;
pub mod contract;
pub mod error;
pub mod format;
pub mod map;
pub mod schema;
pub mod symbol;
pub mod translate;
pub mod value;

pub use config::{ContractConfig, SymbolConfig};
pub use contract::SymbolContract;
pub use error::{Result, SymbolError};
pub use format::{
    DateFormat, Format, FromStrFormat, PassthruFormat, PatternFormat, TimestampFormat,
    BOOL_FORMAT, FLOAT_FORMAT, I32_FORMAT, INT_FORMAT, ISO_DATE_FORMAT, PASSTHRU_FORMAT,
    TIMESTAMP_FORMAT, U32_FORMAT,
};
pub use map::{SymbolMap, SymbolMapBuilder};
pub use schema::{schema, SymbolSchema};
pub use symbol::{symbol, Symbol, SymbolKey};
pub use translate::{
    Capability, StringMap, SymbolFormats, SymbolParser, SymbolTranslator,
    SymbolTranslatorBuilder, SymbolWriter,
};
pub use value::{SymbolType, Value, ValueKind};
