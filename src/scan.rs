//! The two primitive scanners every `parse_tag` state transition routes
//! through: [`skip_whitespaces`] and [`get_identifier`].
//!
//! Centralizing them here is what keeps the `OutOfInput` vs `MalformedTag`
//! distinction decided at a single site: both scanners peek one character
//! ahead of the cursor on every step, and the only way either of them
//! produces [`ParseError::OutOfInput`] is by peeking past the end of `text`.

use std::borrow::Cow;

use cow_utils::CowUtils;

use crate::charset::{is_identifier_char, is_whitespace};
use crate::error::ParseError;

/// Advances `offset` past the maximal run of characters satisfying `pred`,
/// one character at a time.
///
/// Returns the offset of the first character that does not satisfy `pred`
/// (which may equal `offset` if the character already there fails the
/// predicate). Returns [`ParseError::OutOfInput`] if `text` ends before such
/// a character is found — including immediately, if `offset` is already
/// past the end of `text`.
fn scan_while(text: &str, offset: usize, pred: impl Fn(char) -> bool) -> Result<usize, ParseError> {
    let mut idx = offset;
    loop {
        match text[idx..].chars().next() {
            None => return Err(ParseError::out_of_input(idx)),
            Some(c) if pred(c) => idx += c.len_utf8(),
            Some(_) => return Ok(idx),
        }
    }
}

/// Advances `offset` past a run of whitespace (§4.2).
///
/// If `text[offset]` is not whitespace, `offset` is returned unchanged —
/// that is not an error. Running off the end of `text` while still inside
/// a whitespace run (or with nothing left to peek at all) is
/// [`ParseError::OutOfInput`].
pub fn skip_whitespaces(text: &str, offset: usize) -> Result<usize, ParseError> {
    scan_while(text, offset, is_whitespace)
}

/// Consumes the longest prefix of `text` starting at `offset` made of
/// [`crate::charset::is_identifier_char`] characters (§4.3).
///
/// The identifier charset is ASCII-only, so the matched slice is always
/// pure ASCII; lowering it with [`CowUtils::cow_to_ascii_lowercase`] is
/// therefore both correct and zero-copy whenever the source was already
/// lowercase.
///
/// An empty match (the character at `offset` is not an identifier
/// character) is not an error: it returns the empty string with `offset`
/// unchanged, leaving the "empty identifier means a malformed tag" call to
/// the caller. Running off the end of `text` mid-run is
/// [`ParseError::OutOfInput`].
pub fn get_identifier(text: &str, offset: usize) -> Result<(Cow<'_, str>, usize), ParseError> {
    let end = scan_while(text, offset, is_identifier_char)?;
    let raw = &text[offset..end];
    Ok((raw.cow_to_ascii_lowercase(), end))
}
