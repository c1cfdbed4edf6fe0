use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{Result, SymbolError};
use crate::format::Format;
use crate::symbol::SymbolKey;
use crate::value::{SymbolType, Value};

/// A [`Format`] with its value type erased to [`Value`]
pub(crate) trait ErasedFormat: Send + Sync {
    fn parse_value(&self, raw: &str) -> Result<Value>;

    fn write_value(&self, key: &SymbolKey, value: &Value) -> Result<String>;
}

struct Typed<T, F> {
    format: F,
    _type: PhantomData<fn() -> T>,
}

impl<T: SymbolType, F: Format<T>> ErasedFormat for Typed<T, F> {
    fn parse_value(&self, raw: &str) -> Result<Value> {
        Ok(self.format.parse(raw)?.into_value())
    }

    fn write_value(&self, key: &SymbolKey, value: &Value) -> Result<String> {
        let typed =
            T::from_value(value).ok_or_else(|| SymbolError::unreadable::<T>(key.name(), value))?;
        Ok(self.format.write(&typed))
    }
}

/// Immutable symbol → format registry shared by translators
#[derive(Clone, Default)]
pub struct SymbolFormats {
    entries: BTreeMap<SymbolKey, Arc<dyn ErasedFormat>>,
}

impl SymbolFormats {
    pub(crate) fn insert<T, F>(&mut self, key: SymbolKey, format: F)
    where
        T: SymbolType,
        F: Format<T> + 'static,
    {
        let erased: Arc<dyn ErasedFormat> = Arc::new(Typed {
            format,
            _type: PhantomData,
        });
        // Re-registering a name replaces both the key and the format.
        self.entries.remove(key.name());
        self.entries.insert(key, erased);
    }

    /// Resolve the registration for a symbol name
    pub(crate) fn lookup(&self, name: &str) -> Result<(&SymbolKey, &dyn ErasedFormat)> {
        self.entries
            .get_key_value(name)
            .map(|(key, format)| (key, format.as_ref()))
            .ok_or_else(|| SymbolError::not_contained(name))
    }

    /// The key registered under `name`, with its declared kind
    pub fn key(&self, name: &str) -> Option<&SymbolKey> {
        self.entries.get_key_value(name).map(|(key, _)| key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered symbols, ordered by name
    pub fn symbols(&self) -> impl ExactSizeIterator<Item = &SymbolKey> + '_ {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for SymbolFormats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{INT_FORMAT, PASSTHRU_FORMAT};
    use crate::value::ValueKind;

    #[test]
    fn test_lookup_unknown_name() {
        let formats = SymbolFormats::default();
        assert!(matches!(
            formats.lookup("age"),
            Err(SymbolError::NotContained { name }) if name == "age"
        ));
    }

    #[test]
    fn test_reregistration_replaces_kind() {
        let mut formats = SymbolFormats::default();
        formats.insert::<i64, _>(SymbolKey::new("code", ValueKind::Int), &INT_FORMAT);
        formats.insert::<String, _>(SymbolKey::new("code", ValueKind::Str), &PASSTHRU_FORMAT);

        assert_eq!(formats.len(), 1);
        let (key, format) = formats.lookup("code").unwrap();
        assert_eq!(key.kind(), ValueKind::Str);
        assert_eq!(format.parse_value("x1").unwrap(), Value::Str("x1".into()));
    }

    #[test]
    fn test_erased_write_checks_kind() {
        let mut formats = SymbolFormats::default();
        let key = SymbolKey::new("age", ValueKind::Int);
        formats.insert::<i64, _>(key.clone(), &INT_FORMAT);

        let (_, format) = formats.lookup("age").unwrap();
        assert_eq!(format.write_value(&key, &Value::Int(9)).unwrap(), "9");
        assert!(matches!(
            format.write_value(&key, &Value::Bool(true)),
            Err(SymbolError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_key_reports_registered_kind() {
        let mut formats = SymbolFormats::default();
        formats.insert::<i64, _>(SymbolKey::new("age", ValueKind::Int), &INT_FORMAT);
        formats.insert::<String, _>(SymbolKey::new("age", ValueKind::Str), PASSTHRU_FORMAT);

        assert_eq!(formats.key("age").map(SymbolKey::kind), Some(ValueKind::Str));
        assert_eq!(formats.key("name"), None);
    }
}
