use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::registry::SymbolFormats;
use super::{Capability, StringMap, SymbolParser, SymbolWriter};
use crate::error::{Result, SymbolError};
use crate::format::{Format, PASSTHRU_FORMAT};
use crate::map::SymbolMap;
use crate::symbol::Symbol;
use crate::value::{SymbolType, Value};

/// Immutable, reusable translator between symbol maps and string maps
///
/// Cloning is cheap; clones share the same format registry.
#[derive(Clone)]
pub struct SymbolTranslator {
    capability: Capability,
    formats: Arc<SymbolFormats>,
}

impl SymbolTranslator {
    pub fn builder(capability: Capability) -> SymbolTranslatorBuilder {
        SymbolTranslatorBuilder {
            capability,
            formats: SymbolFormats::default(),
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn formats(&self) -> &SymbolFormats {
        &self.formats
    }

    /// A view of the same registry limited to `capability`
    pub fn restricted(&self, capability: Capability) -> Self {
        Self {
            capability,
            formats: Arc::clone(&self.formats),
        }
    }

    pub(crate) fn ensure_parse(&self, operation: &'static str) -> Result<()> {
        if self.capability.can_parse() {
            Ok(())
        } else {
            Err(SymbolError::NotImplemented { operation })
        }
    }

    pub(crate) fn ensure_write(&self, operation: &'static str) -> Result<()> {
        if self.capability.can_write() {
            Ok(())
        } else {
            Err(SymbolError::NotImplemented { operation })
        }
    }
}

impl SymbolParser for SymbolTranslator {
    fn parse_value(&self, name: &str, raw: &str) -> Result<Value> {
        self.ensure_parse("SymbolParser::parse_value")?;
        let (_, format) = self.formats.lookup(name)?;
        format.parse_value(raw)
    }

    fn parse_map(&self, raw: &StringMap) -> Result<SymbolMap> {
        self.ensure_parse("SymbolParser::parse_map")?;

        let mut builder = SymbolMap::builder();
        for (name, raw_value) in raw {
            let (key, format) = self.formats.lookup(name)?;
            builder = builder.put_value(key.clone(), format.parse_value(raw_value)?)?;
        }

        trace!(symbols = builder.len(), "parsed string map");
        Ok(builder.freeze())
    }
}

impl SymbolWriter for SymbolTranslator {
    fn write_value(&self, name: &str, value: &Value) -> Result<String> {
        self.ensure_write("SymbolWriter::write_value")?;
        let (key, format) = self.formats.lookup(name)?;
        format.write_value(key, value)
    }

    fn write_map(&self, map: &SymbolMap) -> Result<StringMap> {
        self.ensure_write("SymbolWriter::write_map")?;

        let mut written = StringMap::new();
        for (key, value) in map {
            let (registered, format) = self.formats.lookup(key.name())?;
            written.insert(key.name().to_string(), format.write_value(registered, value)?);
        }

        trace!(symbols = written.len(), "wrote symbol map");
        Ok(written)
    }
}

impl fmt::Debug for SymbolTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTranslator")
            .field("capability", &self.capability)
            .field("formats", &self.formats)
            .finish()
    }
}

/// Accumulates symbol formats for a [`SymbolTranslator`]
pub struct SymbolTranslatorBuilder {
    capability: Capability,
    formats: SymbolFormats,
}

impl SymbolTranslatorBuilder {
    /// Register `format` for `symbol`, replacing any earlier registration
    pub fn add<T, F>(mut self, symbol: &Symbol<T>, format: F) -> Self
    where
        T: SymbolType,
        F: Format<T> + 'static,
    {
        self.formats.insert::<T, F>(symbol.key(), format);
        self
    }

    /// Register a string symbol with the passthru format
    pub fn add_passthru(self, symbol: &Symbol<String>) -> Self {
        self.add(symbol, &PASSTHRU_FORMAT)
    }

    pub fn build(self) -> SymbolTranslator {
        debug!(
            symbols = self.formats.len(),
            capability = ?self.capability,
            "built symbol translator"
        );
        SymbolTranslator {
            capability: self.capability,
            formats: Arc::new(self.formats),
        }
    }
}
