//! Character classes shared by every scanner in the tag parser.
//!
//! Both classes are ASCII-only and locale-independent: a tag's structural
//! characters (brackets, `=`, `/`, quotes, whitespace, identifier chars) are
//! always ASCII by grammar, so classifying a `char` here never needs to
//! reason about anything past the Basic Latin block.

/// The ASCII whitespace characters recognized between tag tokens.
pub const WHITESPACE_CHARSET: [char; 6] = [' ', '\t', '\n', '\r', '\x0B', '\x0C'];

/// The non-alphanumeric characters that are additionally part of an
/// identifier (tag names and attribute keys).
const IDENTIFIER_EXTRA_CHARSET: [char; 2] = ['_', '*'];

/// Returns `true` if `c` is one of [`WHITESPACE_CHARSET`].
#[inline]
pub fn is_whitespace(c: char) -> bool {
    WHITESPACE_CHARSET.contains(&c)
}

/// Returns `true` if `c` may appear in a tag name or attribute key:
/// ASCII letters, ASCII digits, `_`, or `*`.
#[inline]
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || IDENTIFIER_EXTRA_CHARSET.contains(&c)
}
