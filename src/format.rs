//! String formats
//!
//! A [`Format<T>`] converts between a raw string and a typed value. Formats
//! are stateless after construction and meant to be shared: the built-in
//! ones are exposed as statics and one instance can back any number of
//! symbols.

use std::borrow::Cow;
use std::fmt::{Display, Write as _};
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use regex::Regex;

use crate::error::{Result, SymbolError};

/// A parse/write pair between `&str` and `T`
pub trait Format<T>: Send + Sync {
    /// Parse a raw string, failing with `SymbolError::Parse` on malformed input
    fn parse(&self, raw: &str) -> Result<T>;

    fn write(&self, value: &T) -> String;
}

impl<T, F: Format<T> + ?Sized> Format<T> for &F {
    fn parse(&self, raw: &str) -> Result<T> {
        (**self).parse(raw)
    }

    fn write(&self, value: &T) -> String {
        (**self).write(value)
    }
}

impl<T, F: Format<T> + ?Sized> Format<T> for Arc<F> {
    fn parse(&self, raw: &str) -> Result<T> {
        (**self).parse(raw)
    }

    fn write(&self, value: &T) -> String {
        (**self).write(value)
    }
}

// =============================================================================
// Passthru
// =============================================================================

/// Identity format for string symbols
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthruFormat;

pub static PASSTHRU_FORMAT: PassthruFormat = PassthruFormat;

impl Format<String> for PassthruFormat {
    fn parse(&self, raw: &str) -> Result<String> {
        Ok(raw.to_string())
    }

    fn write(&self, value: &String) -> String {
        value.clone()
    }
}

// =============================================================================
// FromStr / Display
// =============================================================================

/// Format backed by a type's `FromStr` and `Display` impls
///
/// The whole input must be a valid literal; `"9"` parses as an integer,
/// `"9 "` and `"x"` do not.
pub struct FromStrFormat<T> {
    _type: PhantomData<fn() -> T>,
}

impl<T> FromStrFormat<T> {
    pub const fn new() -> Self {
        Self { _type: PhantomData }
    }
}

impl<T> Default for FromStrFormat<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FromStrFormat<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FromStrFormat<T> {}

impl<T> std::fmt::Debug for FromStrFormat<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FromStrFormat<{}>", std::any::type_name::<T>())
    }
}

impl<T: FromStr + Display> Format<T> for FromStrFormat<T> {
    fn parse(&self, raw: &str) -> Result<T> {
        raw.parse::<T>()
            .map_err(|_| SymbolError::parse(raw, std::any::type_name::<T>()))
    }

    fn write(&self, value: &T) -> String {
        value.to_string()
    }
}

pub static INT_FORMAT: FromStrFormat<i64> = FromStrFormat::new();
pub static I32_FORMAT: FromStrFormat<i32> = FromStrFormat::new();
pub static U32_FORMAT: FromStrFormat<u32> = FromStrFormat::new();
pub static FLOAT_FORMAT: FromStrFormat<f64> = FromStrFormat::new();
/// Accepts exactly `true` and `false`
pub static BOOL_FORMAT: FromStrFormat<bool> = FromStrFormat::new();

// =============================================================================
// Dates and timestamps
// =============================================================================

/// Calendar date with a chrono strftime pattern
#[derive(Debug, Clone)]
pub struct DateFormat {
    pattern: Cow<'static, str>,
}

pub static ISO_DATE_FORMAT: DateFormat = DateFormat {
    pattern: Cow::Borrowed("%Y-%m-%d"),
};

impl DateFormat {
    /// Create a date format
    ///
    /// Patterns chrono cannot read, that need more than a date to be
    /// written (e.g. `%H`), or whose output does not parse back to the same
    /// date (e.g. `%Y`) are rejected with `SymbolError::Bug`.
    pub fn new(pattern: impl Into<Cow<'static, str>>) -> Result<Self> {
        let pattern = pattern.into();

        let unreadable = StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error));
        if unreadable || !round_trips(&pattern) {
            return Err(SymbolError::Bug(format!(
                "invalid date pattern {:?}",
                pattern
            )));
        }

        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn round_trips(pattern: &str) -> bool {
    let Some(sample) = NaiveDate::from_ymd_opt(2001, 2, 3) else {
        return false;
    };
    let mut written = String::new();
    if write!(written, "{}", sample.format(pattern)).is_err() {
        return false;
    }
    NaiveDate::parse_from_str(&written, pattern).ok() == Some(sample)
}

impl Format<NaiveDate> for DateFormat {
    fn parse(&self, raw: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(raw, &self.pattern)
            .map_err(|_| SymbolError::parse(raw, format!("date ({})", self.pattern)))
    }

    fn write(&self, value: &NaiveDate) -> String {
        value.format(&self.pattern).to_string()
    }
}

/// RFC 3339 timestamp, normalized to UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampFormat;

pub static TIMESTAMP_FORMAT: TimestampFormat = TimestampFormat;

impl Format<DateTime<Utc>> for TimestampFormat {
    fn parse(&self, raw: &str) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|_| SymbolError::parse(raw, "RFC 3339 timestamp"))
    }

    fn write(&self, value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

// =============================================================================
// Pattern
// =============================================================================

/// String that must match a regular expression in full
#[derive(Debug, Clone)]
pub struct PatternFormat {
    source: String,
    regex: Regex,
}

impl PatternFormat {
    /// Compile a pattern; an invalid expression fails with `SymbolError::Bug`
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| SymbolError::Bug(format!("invalid regex {:?}: {}", pattern, e)))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.source
    }
}

impl Format<String> for PatternFormat {
    fn parse(&self, raw: &str) -> Result<String> {
        if self.regex.is_match(raw) {
            Ok(raw.to_string())
        } else {
            Err(SymbolError::parse(
                raw,
                format!("string matching {}", self.source),
            ))
        }
    }

    fn write(&self, value: &String) -> String {
        value.clone()
    }
}
