//! Error types for symbol maps, schemas and translators

use std::collections::BTreeSet;

use thiserror::Error;

use crate::symbol::SymbolKey;
use crate::value::{SymbolType, Value, ValueKind};

/// Result type for symbol operations
pub type Result<T> = std::result::Result<T, SymbolError>;

/// Symbol library errors
#[derive(Error, Debug)]
pub enum SymbolError {
    /// The caller's static setup is wrong (a defect, not bad input)
    #[error("Bug: {0}")]
    Bug(String),

    #[error("Symbol not contained: {name}")]
    NotContained { name: String },

    #[error(
        "Symbol validation failed, missing symbols = {}, unexpected symbols = {}",
        key_list(.missing),
        key_list(.unexpected)
    )]
    InvalidSymbols {
        missing: BTreeSet<SymbolKey>,
        unexpected: BTreeSet<SymbolKey>,
    },

    #[error("Parse error: {raw:?} is not a valid {expected}")]
    Parse { raw: String, expected: String },

    #[error("Not implemented: {operation}")]
    NotImplemented { operation: &'static str },

    #[error("Type mismatch for symbol {name}: expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("Value {value:?} of symbol {name} does not fit {target}")]
    OutOfRange {
        name: String,
        value: Value,
        target: &'static str,
    },

    #[error("Invalid contract configuration: {0}")]
    InvalidConfig(String),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

impl SymbolError {
    pub(crate) fn not_contained(name: impl Into<String>) -> Self {
        Self::NotContained { name: name.into() }
    }

    pub(crate) fn parse(raw: &str, expected: impl Into<String>) -> Self {
        Self::Parse {
            raw: raw.to_string(),
            expected: expected.into(),
        }
    }

    /// The error for a stored value that cannot be read as `T`
    ///
    /// Same kind means the value is out of `T`'s range (narrow integers).
    pub(crate) fn unreadable<T: SymbolType>(name: &str, value: &Value) -> Self {
        if value.kind() == T::KIND {
            Self::OutOfRange {
                name: name.to_string(),
                value: value.clone(),
                target: std::any::type_name::<T>(),
            }
        } else {
            Self::TypeMismatch {
                name: name.to_string(),
                expected: T::KIND,
                actual: value.kind(),
            }
        }
    }
}

fn key_list(keys: &BTreeSet<SymbolKey>) -> String {
    let names: Vec<&str> = keys.iter().map(SymbolKey::name).collect();
    format!("[{}]", names.join(", "))
}
