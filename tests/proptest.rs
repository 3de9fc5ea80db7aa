//! Property-based tests for the tag parser's universal invariants: purity,
//! offset progress, case normalization, the closing/self-closing
//! exclusion, closing-tag purity, whitespace tolerance, and quoted-value
//! strip idempotence.

use proptest::prelude::*;

use bbcode_tag_parser::{is_whitespace, parse_tag, ParseError, ParserOptions};

fn ident() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,8}"
}

fn ws() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just(" ".to_string()), Just("  ".to_string()), Just("\t".to_string())]
}

/// A well-formed opening tag, optionally with a tag value and up to two
/// plain (unquoted) attributes, padded with arbitrary whitespace at every
/// position the grammar allows it.
fn valid_opening_tag() -> impl Strategy<Value = String> {
    (ident(), ws(), ws(), ws(), proptest::option::of((ident(), ws(), ws())))
        .prop_flat_map(|(name, w1, w2, w3, maybe_value)| {
            let head = match maybe_value {
                Some((value, w4, w5)) => format!("[{w1}{name}{w2}={w4}{value}{w5}"),
                None => format!("[{w1}{name}{w2}"),
            };
            Just(format!("{head}{w3}]"))
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// parse_tag never panics, regardless of what follows the opening
    /// bracket (the one precondition proptest must respect is that the
    /// text actually starts with the opening character).
    #[test]
    fn never_panics(rest in ".{0,40}") {
        let text = format!("[{rest}");
        let _ = parse_tag(&text, 0, &ParserOptions::default());
    }

    /// Calling parse_tag twice on the same input produces the same result.
    #[test]
    fn parsing_is_pure(rest in ".{0,40}") {
        let text = format!("[{rest}");
        let options = ParserOptions::default();
        let a = parse_tag(&text, 0, &options);
        let b = parse_tag(&text, 0, &options);
        prop_assert_eq!(a, b);
    }

    /// A successful parse always advances the cursor and never reads past
    /// the end of the text it was given.
    #[test]
    fn end_offset_makes_progress_and_stays_in_bounds(text in valid_opening_tag()) {
        let tag = parse_tag(&text, 0, &ParserOptions::default()).unwrap();
        prop_assert!(tag.end_offset > 0);
        prop_assert!(tag.end_offset <= text.len());
    }

    /// Every successfully parsed name and attribute key is ASCII-lowercase
    /// regardless of the casing used in the source text.
    #[test]
    fn name_and_keys_are_always_lowercase(text in valid_opening_tag()) {
        let tag = parse_tag(&text, 0, &ParserOptions::default()).unwrap();
        prop_assert_eq!(tag.name.as_ref(), tag.name.to_ascii_lowercase());
        for key in tag.attributes.keys() {
            prop_assert_eq!(key.as_ref(), key.to_ascii_lowercase());
        }
    }

    /// A tag can never be simultaneously closing and self-closing, and a
    /// closing tag never carries attributes.
    #[test]
    fn closing_and_self_closing_are_mutually_exclusive(rest in ".{0,40}") {
        let text = format!("[{rest}");
        if let Ok(tag) = parse_tag(&text, 0, &ParserOptions::default()) {
            prop_assert!(!(tag.is_closing && tag.is_self_closing));
            if tag.is_closing {
                prop_assert!(tag.attributes.is_empty());
            }
        }
    }

    /// Inserting extra ASCII whitespace at any grammar-permitted spacing
    /// position changes nothing about the parsed name or attribute set,
    /// only (monotonically) the end offset.
    #[test]
    fn whitespace_padding_does_not_change_semantics(name in ident(), extra in ws()) {
        let options = ParserOptions::default();
        let tight = format!("[{name}]");
        let padded = format!("[{name}{extra}]");
        let a = parse_tag(&tight, 0, &options).unwrap();
        let b = parse_tag(&padded, 0, &options).unwrap();
        prop_assert_eq!(a.name, b.name);
        prop_assert_eq!(a.is_closing, b.is_closing);
        prop_assert_eq!(a.is_self_closing, b.is_self_closing);
        prop_assert!(b.end_offset >= a.end_offset);
    }

    /// A quoted value's whitespace stripping is idempotent: re-wrapping an
    /// already-stripped value in the same quote and re-parsing yields the
    /// identical value.
    #[test]
    fn quoted_value_strip_is_idempotent(value in "[a-zA-Z0-9]{0,12}", padding in ws()) {
        let options = ParserOptions::default();
        let padded = format!("[test=\"{padding}{value}{padding}\"]");
        let stripped = format!("[test=\"{value}\"]");
        let a = parse_tag(&padded, 0, &options).unwrap();
        let b = parse_tag(&stripped, 0, &options).unwrap();
        prop_assert_eq!(a.attributes.get("test"), b.attributes.get("test"));
        if let Some(v) = a.attributes.get("test") {
            prop_assert!(!v.starts_with(is_whitespace) && !v.ends_with(is_whitespace));
        }
    }

    /// Every ParseError carries an offset within (or exactly at the end
    /// of) the text it was produced from — no error ever blames an
    /// out-of-range position.
    #[test]
    fn error_offsets_are_in_bounds(rest in ".{0,40}") {
        let text = format!("[{rest}");
        match parse_tag(&text, 0, &ParserOptions::default()) {
            Err(ParseError::OutOfInput { offset }) | Err(ParseError::MalformedTag { offset, .. }) => {
                prop_assert!(offset <= text.len());
            }
            Ok(_) => {}
        }
    }
}
