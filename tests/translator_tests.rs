//! Translator Tests
//!
//! Full translators, parser-only and writer-only translators, checked
//! against the same parse/write expectations.

use symbol_schemas::translate::{parser, translator, writer};
use symbol_schemas::{
    StringMap, Symbol, SymbolError, SymbolMap, SymbolParser, SymbolWriter, INT_FORMAT,
};

// =============================================================================
// Symbols and values
// =============================================================================

const MISSING: Symbol<String> = Symbol::from_static("missing");

const AGE: Symbol<i64> = Symbol::from_static("age");
const NAME: Symbol<String> = Symbol::from_static("name");

fn str_map() -> StringMap {
    [("name", "bob"), ("age", "9")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn symbol_map() -> SymbolMap {
    SymbolMap::builder().put(&NAME, "bob").put(&AGE, 9).freeze()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_symbol_translator() {
    let translator = translator().add(&AGE, &INT_FORMAT).add_passthru(&NAME).build();

    verify_parser(&translator);
    verify_writer(&translator);
}

#[test]
fn test_symbol_parser() {
    let parser = parser().add(&AGE, &INT_FORMAT).add_passthru(&NAME).build();

    verify_parser(&parser);

    assert!(matches!(
        parser.write(&NAME, "bob"),
        Err(SymbolError::NotImplemented { .. })
    ));
    assert!(matches!(
        parser.write_map(&symbol_map()),
        Err(SymbolError::NotImplemented { .. })
    ));
}

#[test]
fn test_symbol_writer() {
    let writer = writer().add(&AGE, &INT_FORMAT).add_passthru(&NAME).build();

    verify_writer(&writer);

    assert!(matches!(
        writer.parse(&NAME, "bob"),
        Err(SymbolError::NotImplemented { .. })
    ));
    assert!(matches!(
        writer.parse_map(&str_map()),
        Err(SymbolError::NotImplemented { .. })
    ));
}

#[test]
fn test_unsupported_direction_wins_over_lookup() {
    let parser = parser().build();
    assert!(matches!(
        parser.write(&MISSING, "..."),
        Err(SymbolError::NotImplemented { .. })
    ));
}

#[test]
fn test_parse_map_unknown_key() {
    let translator = translator().add(&AGE, &INT_FORMAT).build();

    match translator.parse_map(&str_map()) {
        Err(SymbolError::NotContained { name }) => assert_eq!(name, "name"),
        other => panic!("Expected NotContained, got {:?}", other),
    }
}

#[test]
fn test_write_map_unknown_symbol() {
    let translator = translator().add_passthru(&NAME).build();

    match translator.write_map(&symbol_map()) {
        Err(SymbolError::NotContained { name }) => assert_eq!(name, "age"),
        other => panic!("Expected NotContained, got {:?}", other),
    }
}

#[test]
fn test_empty_maps_round_trip() {
    let translator = translator().add(&AGE, &INT_FORMAT).build();
    assert!(translator.parse_map(&StringMap::new()).unwrap().is_empty());
    assert!(translator.write_map(&SymbolMap::empty()).unwrap().is_empty());
}

#[test]
fn test_round_trips() {
    let translator = translator().add(&AGE, &INT_FORMAT).add_passthru(&NAME).build();

    let raw = str_map();
    assert_eq!(translator.write_map(&translator.parse_map(&raw).unwrap()).unwrap(), raw);

    let typed = symbol_map();
    assert_eq!(translator.parse_map(&translator.write_map(&typed).unwrap()).unwrap(), typed);
}

#[test]
fn test_translator_is_shareable_across_threads() {
    let translator = translator().add(&AGE, &INT_FORMAT).add_passthru(&NAME).build();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let translator = translator.clone();
            std::thread::spawn(move || translator.parse(&AGE, &i.to_string()).unwrap())
        })
        .collect();

    let parsed: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(parsed, vec![0, 1, 2, 3]);
}

// =============================================================================
// Verify parser
// =============================================================================

fn verify_parser<P: SymbolParser>(parser: &P) {
    // parse str (passthru)
    assert_eq!(parser.parse(&NAME, "bob").unwrap(), "bob");

    // parse 1
    assert_eq!(parser.parse(&AGE, "9").unwrap(), 9);

    match parser.parse(&AGE, "x") {
        Err(SymbolError::Parse { raw, .. }) => assert_eq!(raw, "x"),
        other => panic!("Expected Parse, got {:?}", other),
    }

    // missing symbol
    assert!(matches!(
        parser.parse(&MISSING, "..."),
        Err(SymbolError::NotContained { .. })
    ));

    // parse n
    assert_eq!(parser.parse_map(&str_map()).unwrap(), symbol_map());
}

// =============================================================================
// Verify writer
// =============================================================================

fn verify_writer<W: SymbolWriter>(writer: &W) {
    // write str (passthru)
    assert_eq!(writer.write(&NAME, "bob").unwrap(), "bob");

    // write int
    assert_eq!(writer.write(&AGE, 9).unwrap(), "9");

    // missing symbol
    assert!(matches!(
        writer.write(&MISSING, "..."),
        Err(SymbolError::NotContained { .. })
    ));

    // write n
    assert_eq!(writer.write_map(&symbol_map()).unwrap(), str_map());
}
