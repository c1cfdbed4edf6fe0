//! Declarative contract configuration
//!
//! Supports loading a contract description from:
//! - Default values
//! - Config file (contract.toml)
//! - Environment variables (CONTRACT__*)
//!
//! ## Example config file (contract.toml):
//! ```toml
//! capability = "translate"
//!
//! [symbols.name]
//! type = "string"
//! required = true
//!
//! [symbols.age]
//! type = "int"
//! required = true
//!
//! [symbols.birthday]
//! type = "date"
//! pattern = "%d/%m/%Y"
//!
//! [symbols.code]
//! type = "string"
//! regex = "[A-Z]{3}"
//! ```
//!
//! Symbol names are matched case-insensitively by the config loader, so
//! declare them in lowercase.

use std::collections::BTreeMap;
use std::path::Path;

use config_crate::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SymbolError};
use crate::translate::Capability;
use crate::value::ValueKind;

/// Contract configuration: which symbols exist and how they are formatted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Directions the translator supports
    #[serde(default)]
    pub capability: Capability,

    /// Symbol declarations by name
    #[serde(default)]
    pub symbols: BTreeMap<String, SymbolConfig>,
}

/// Declaration of a single symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolConfig {
    /// Value type name (string, int, float, bool, date, timestamp)
    #[serde(rename = "type", default = "default_type")]
    pub kind: String,

    /// Required symbols must be present; all others are optional
    #[serde(default)]
    pub required: bool,

    /// strftime pattern for date symbols
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Regular expression string symbols must match in full
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

fn default_type() -> String {
    ValueKind::Str.as_str().to_string()
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            kind: default_type(),
            required: false,
            pattern: None,
            regex: None,
        }
    }
}

impl SymbolConfig {
    /// Resolve the declared value kind and check the options fit it
    pub fn value_kind(&self, name: &str) -> Result<ValueKind> {
        let kind = ValueKind::from_name(&self.kind).ok_or_else(|| {
            SymbolError::InvalidConfig(format!(
                "symbol {} has unknown type {:?}",
                name, self.kind
            ))
        })?;

        if self.pattern.is_some() && kind != ValueKind::Date {
            return Err(SymbolError::InvalidConfig(format!(
                "symbol {}: `pattern` only applies to date symbols",
                name
            )));
        }
        if self.regex.is_some() && kind != ValueKind::Str {
            return Err(SymbolError::InvalidConfig(format!(
                "symbol {}: `regex` only applies to string symbols",
                name
            )));
        }

        Ok(kind)
    }
}

impl ContractConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file on top of the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["contract.toml", ".contract.toml", "config/contract.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "symbols", "symbol-schemas") {
            let xdg_config = config_dir.config_dir().join("contract.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // Load from environment variables (CONTRACT__*)
        builder = builder.add_source(
            Environment::with_prefix("CONTRACT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SymbolError::InvalidConfig(e.to_string()))
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Names of the required symbols
    pub fn required_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols
            .iter()
            .filter(|(_, symbol)| symbol.required)
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERSON: &str = r#"
capability = "parse"

[symbols.name]
type = "string"
required = true

[symbols.age]
type = "int"
required = true

[symbols.birthday]
type = "date"
pattern = "%d/%m/%Y"
"#;

    #[test]
    fn test_default_config() {
        let config = ContractConfig::default();
        assert_eq!(config.capability, Capability::Translate);
        assert!(config.symbols.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let config = ContractConfig::from_toml_str(PERSON).unwrap();
        assert_eq!(config.capability, Capability::ParseOnly);
        assert_eq!(config.symbols.len(), 3);
        assert_eq!(config.symbols["age"].kind, "int");
        assert_eq!(config.symbols["birthday"].pattern.as_deref(), Some("%d/%m/%Y"));
        assert_eq!(config.required_names().collect::<Vec<_>>(), vec!["age", "name"]);
    }

    #[test]
    fn test_type_defaults_to_string() {
        let config = ContractConfig::from_toml_str("[symbols.note]\nrequired = false\n").unwrap();
        let note = &config.symbols["note"];
        assert_eq!(note.value_kind("note").unwrap(), ValueKind::Str);
    }

    #[test]
    fn test_value_kind_rejects_misplaced_options() {
        let unknown = SymbolConfig {
            kind: "uuid".into(),
            ..SymbolConfig::default()
        };
        assert!(matches!(unknown.value_kind("id"), Err(SymbolError::InvalidConfig(_))));

        let regex_on_int = SymbolConfig {
            kind: "int".into(),
            regex: Some("[0-9]+".into()),
            ..SymbolConfig::default()
        };
        assert!(matches!(regex_on_int.value_kind("age"), Err(SymbolError::InvalidConfig(_))));
    }

    #[test]
    fn test_serialize_config() {
        let config = ContractConfig::from_toml_str(PERSON).unwrap();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[symbols.age]"));
        assert!(toml_str.contains("capability = \"parse\""));
    }
}
