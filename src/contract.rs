//! Symbol contracts
//!
//! A [`SymbolContract`] pairs a [`SymbolSchema`] with a [`SymbolTranslator`]
//! that knows a format for every symbol of the schema. It is the shape a
//! request-binding layer consumes: raw string maps are checked against the
//! schema before they are parsed, and typed maps are checked before they
//! are written.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::config::{ContractConfig, SymbolConfig};
use crate::error::{Result, SymbolError};
use crate::format::{
    DateFormat, PatternFormat, BOOL_FORMAT, FLOAT_FORMAT, INT_FORMAT, ISO_DATE_FORMAT,
    TIMESTAMP_FORMAT,
};
use crate::map::SymbolMap;
use crate::schema::SymbolSchema;
use crate::symbol::{Symbol, SymbolKey};
use crate::translate::{
    StringMap, SymbolParser, SymbolTranslator, SymbolTranslatorBuilder, SymbolWriter,
};
use crate::value::ValueKind;

/// A schema together with the translator for its symbols
#[derive(Debug, Clone)]
pub struct SymbolContract {
    schema: SymbolSchema,
    translator: SymbolTranslator,
}

impl SymbolContract {
    /// Bundle a schema and a translator
    ///
    /// Every schema symbol needs a registered format of the same kind; a gap
    /// or a disagreement is a bug in the calling code.
    pub fn new(schema: SymbolSchema, translator: SymbolTranslator) -> Result<Self> {
        let mut problems = Vec::new();
        for key in schema.symbols() {
            match translator.formats().key(key.name()) {
                None => problems.push(format!("{} has no registered format", key.name())),
                Some(registered) if registered.kind() != key.kind() => problems.push(format!(
                    "{} is declared {} but formatted as {}",
                    key.name(),
                    key.kind(),
                    registered.kind()
                )),
                Some(_) => {}
            }
        }

        if !problems.is_empty() {
            return Err(SymbolError::Bug(format!(
                "schema and translator disagree: {}",
                problems.join("; ")
            )));
        }

        Ok(Self { schema, translator })
    }

    /// Build a contract from its declarative configuration
    pub fn from_config(config: &ContractConfig) -> Result<Self> {
        let mut builder = SymbolTranslator::builder(config.capability);
        let mut required = Vec::new();
        let mut optional = Vec::new();

        for (name, declared) in &config.symbols {
            let kind = declared.value_kind(name)?;
            let (next, key) = register(builder, name, kind, declared)?;
            builder = next;

            if declared.required {
                required.push(key);
            } else {
                optional.push(key);
            }
        }

        let schema = SymbolSchema::new(required, optional)?;
        let contract = Self::new(schema, builder.build())?;

        debug!(
            required = contract.schema.required_symbols().len(),
            optional = contract.schema.optional_symbols().len(),
            "built symbol contract from config"
        );
        Ok(contract)
    }

    pub fn schema(&self) -> &SymbolSchema {
        &self.schema
    }

    pub fn translator(&self) -> &SymbolTranslator {
        &self.translator
    }

    /// Validate raw keys against the schema, then parse them
    pub fn parse(&self, raw: &StringMap) -> Result<SymbolMap> {
        self.translator.ensure_parse("SymbolContract::parse")?;
        self.schema.validate_names(raw.keys())?;
        self.translator.parse_map(raw)
    }

    /// Validate a map against the schema, then write it
    pub fn write(&self, map: &SymbolMap) -> Result<StringMap> {
        self.translator.ensure_write("SymbolContract::write")?;
        self.schema.validate_map(map)?;
        self.translator.write_map(map)
    }
}

fn register(
    builder: SymbolTranslatorBuilder,
    name: &str,
    kind: ValueKind,
    declared: &SymbolConfig,
) -> Result<(SymbolTranslatorBuilder, SymbolKey)> {
    let name = name.to_string();
    let invalid = |e: SymbolError| SymbolError::InvalidConfig(format!("symbol {}: {}", name, e));

    let (builder, key) = match kind {
        ValueKind::Str => {
            let symbol: Symbol<String> = Symbol::new(name.clone());
            let builder = match &declared.regex {
                Some(regex) => builder.add(&symbol, PatternFormat::new(regex).map_err(invalid)?),
                None => builder.add_passthru(&symbol),
            };
            (builder, symbol.key())
        }
        ValueKind::Int => {
            let symbol: Symbol<i64> = Symbol::new(name.clone());
            (builder.add(&symbol, &INT_FORMAT), symbol.key())
        }
        ValueKind::Float => {
            let symbol: Symbol<f64> = Symbol::new(name.clone());
            (builder.add(&symbol, &FLOAT_FORMAT), symbol.key())
        }
        ValueKind::Bool => {
            let symbol: Symbol<bool> = Symbol::new(name.clone());
            (builder.add(&symbol, &BOOL_FORMAT), symbol.key())
        }
        ValueKind::Date => {
            let symbol: Symbol<NaiveDate> = Symbol::new(name.clone());
            let builder = match &declared.pattern {
                Some(pattern) => {
                    builder.add(&symbol, DateFormat::new(pattern.clone()).map_err(invalid)?)
                }
                None => builder.add(&symbol, &ISO_DATE_FORMAT),
            };
            (builder, symbol.key())
        }
        ValueKind::Timestamp => {
            let symbol: Symbol<DateTime<Utc>> = Symbol::new(name.clone());
            (builder.add(&symbol, &TIMESTAMP_FORMAT), symbol.key())
        }
    };

    Ok((builder, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol_keys;
    use crate::translate::{parser, translator, writer};

    const NAME: Symbol<String> = Symbol::from_static("name");
    const AGE: Symbol<i64> = Symbol::from_static("age");

    #[test]
    fn test_new_requires_formats_for_schema_symbols() {
        let schema = SymbolSchema::new(symbol_keys![NAME, AGE], symbol_keys![]).unwrap();
        let translator = translator().add_passthru(&NAME).build();

        match SymbolContract::new(schema, translator) {
            Err(SymbolError::Bug(message)) => assert!(message.contains("age")),
            other => panic!("Expected Bug, got {:?}", other),
        }
    }

    #[test]
    fn test_new_requires_matching_kinds() {
        let age_text: Symbol<String> = Symbol::new("age");
        let schema = SymbolSchema::new(symbol_keys![NAME, AGE], symbol_keys![]).unwrap();
        let translator = translator().add_passthru(&NAME).add_passthru(&age_text).build();

        match SymbolContract::new(schema, translator) {
            Err(SymbolError::Bug(message)) => {
                assert!(message.contains("age is declared int but formatted as string"));
                assert!(!message.contains("name"));
            }
            other => panic!("Expected Bug, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_direction_wins_over_validation() {
        let schema = SymbolSchema::new(symbol_keys![NAME], symbol_keys![]).unwrap();
        let write_only = writer().add_passthru(&NAME).build();
        let contract = SymbolContract::new(schema.clone(), write_only).unwrap();

        let mut raw = StringMap::new();
        raw.insert("color".into(), "red".into());
        assert!(matches!(
            contract.parse(&raw),
            Err(SymbolError::NotImplemented { operation: "SymbolContract::parse" })
        ));

        let parse_only = parser().add_passthru(&NAME).build();
        let contract = SymbolContract::new(schema, parse_only).unwrap();
        assert!(matches!(
            contract.write(&SymbolMap::empty()),
            Err(SymbolError::NotImplemented { operation: "SymbolContract::write" })
        ));
    }

    #[test]
    fn test_parse_validates_before_translating() {
        let schema = SymbolSchema::new(symbol_keys![NAME], symbol_keys![]).unwrap();
        let translator = translator().add_passthru(&NAME).add(&AGE, &INT_FORMAT).build();
        let contract = SymbolContract::new(schema, translator).unwrap();

        let mut raw = StringMap::new();
        raw.insert("name".into(), "bob".into());
        raw.insert("age".into(), "9".into());

        // age has a format but is not part of the schema
        assert!(matches!(
            contract.parse(&raw),
            Err(SymbolError::InvalidSymbols { .. })
        ));
    }
}
