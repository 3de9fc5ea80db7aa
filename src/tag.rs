//! The tag state machine: [`parse_tag`] and the [`ParsedTag`] record it
//! produces (§4.4).
//!
//! This is the 80%-of-the-budget piece of the crate: everything else
//! ([`crate::charset`], [`crate::scan`]) exists only to give this module a
//! consistent, centrally-decided notion of "ran off the end of input".

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::charset::{is_identifier_char, is_whitespace};
use crate::error::{MalformedTagReason, ParseError, ParseResult};
use crate::scan::{get_identifier, skip_whitespaces};

/// Configuration for [`parse_tag`]. No hidden defaults: every knob the
/// grammar depends on is an explicit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// The character that opens a tag, e.g. `'['`.
    pub opening_ch: char,
    /// The character that closes a tag, e.g. `']'`.
    pub closing_ch: char,
    /// Whether `[name=value ...]` is accepted. When `false`, that form is
    /// rejected as [`MalformedTagReason::DisallowedTagValue`]; ordinary
    /// `key=value` attributes are unaffected.
    pub allow_tagvalue_attr: bool,
    /// Whether a trailing `/` before `closing_ch` is accepted. When
    /// `false`, it is rejected as
    /// [`MalformedTagReason::DisallowedSelfClosing`].
    pub allow_self_closing_tags: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            opening_ch: '[',
            closing_ch: ']',
            allow_tagvalue_attr: true,
            allow_self_closing_tags: true,
        }
    }
}

/// The structural record produced by a successful [`parse_tag`] call.
///
/// See `spec.md` §3 for the invariants this type upholds: `name` is always
/// non-empty and lowercased, `is_closing` and `is_self_closing` are mutually
/// exclusive, a closing tag's `attributes` is always empty, and every
/// `Cow` borrows from the parsed `text` unless an escape sequence forced an
/// owned allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag<'a> {
    /// The tag name, ASCII-lowercased.
    pub name: Cow<'a, str>,
    /// `true` for `[/name ...]`.
    pub is_closing: bool,
    /// `true` for `[name ... /]`.
    pub is_self_closing: bool,
    /// Attribute name (lowercased) to value. Order-preserving: a repeated
    /// key keeps its first position but the later value wins.
    pub attributes: IndexMap<Cow<'a, str>, Cow<'a, str>>,
    /// Offset one past the `closing_ch` that terminates the tag.
    pub end_offset: usize,
}

/// Peeks the character at `offset`, or [`ParseError::OutOfInput`] if there
/// is none. Every scanner in this module that can legally observe
/// end-of-input does so by calling this.
fn peek(text: &str, offset: usize) -> ParseResult<char> {
    text[offset..]
        .chars()
        .next()
        .ok_or_else(|| ParseError::out_of_input(offset))
}

/// Parses a single tag occurrence starting at `text[offset]`.
///
/// # Preconditions
///
/// `text[offset] == options.opening_ch`. Violating this is a logic error in
/// the caller (typically a text-cursor driver deciding where tags start);
/// it is checked with `debug_assert` rather than returned as a `Result`,
/// the same way the teacher's parser trusts its own tokenizer's bracket
/// detection rather than re-validating it downstream.
pub fn parse_tag<'a>(
    text: &'a str,
    offset: usize,
    options: &ParserOptions,
) -> ParseResult<ParsedTag<'a>> {
    debug_assert_eq!(
        text[offset..].chars().next(),
        Some(options.opening_ch),
        "parse_tag called at an offset that is not the opening bracket"
    );

    // --- Start ---
    let mut cursor = offset + options.opening_ch.len_utf8();

    // --- Before-slash-or-name ---
    cursor = skip_whitespaces(text, cursor)?;
    let mut is_closing = false;
    if peek(text, cursor)? == '/' {
        is_closing = true;
        cursor += 1;
        cursor = skip_whitespaces(text, cursor)?;
    }

    // --- Name ---
    let (name, new_cursor) = get_identifier(text, cursor)?;
    if name.is_empty() {
        return Err(ParseError::malformed(cursor, MalformedTagReason::EmptyName));
    }
    cursor = new_cursor;

    let mut attributes: IndexMap<Cow<'a, str>, Cow<'a, str>> = IndexMap::new();

    // --- After-name ---
    cursor = skip_whitespaces(text, cursor)?;
    let c = peek(text, cursor)?;
    if c == options.closing_ch {
        cursor += options.closing_ch.len_utf8();
        return Ok(ParsedTag {
            name,
            is_closing,
            is_self_closing: false,
            attributes,
            end_offset: cursor,
        });
    } else if c == '/' {
        let end_offset = finish_self_close(text, cursor, is_closing, options)?;
        return Ok(ParsedTag {
            name,
            is_closing,
            is_self_closing: true,
            attributes,
            end_offset,
        });
    } else if is_closing {
        return Err(ParseError::malformed(
            cursor,
            MalformedTagReason::ClosingTagWithArguments,
        ));
    } else if c == '=' {
        if !options.allow_tagvalue_attr {
            return Err(ParseError::malformed(
                cursor,
                MalformedTagReason::DisallowedTagValue,
            ));
        }
        cursor += 1;
        cursor = skip_whitespaces(text, cursor)?;
        let (value, new_cursor) = read_value(text, cursor, options)?;
        attributes.insert(name.clone(), value);
        cursor = new_cursor;
    }
    // else: `c` is the first character of the first attribute; fall into
    // the After-value loop below without consuming anything.

    // --- After-value (loops back through Attribute for each subsequent
    // key[=value] pair) ---
    loop {
        cursor = skip_whitespaces(text, cursor)?;
        let c = peek(text, cursor)?;

        if c == options.closing_ch {
            cursor += options.closing_ch.len_utf8();
            return Ok(ParsedTag {
                name,
                is_closing,
                is_self_closing: false,
                attributes,
                end_offset: cursor,
            });
        } else if c == '/' {
            let end_offset = finish_self_close(text, cursor, is_closing, options)?;
            return Ok(ParsedTag {
                name,
                is_closing,
                is_self_closing: true,
                attributes,
                end_offset,
            });
        } else if is_identifier_char(c) {
            let (key, new_cursor) = get_identifier(text, cursor)?;
            if key.is_empty() {
                return Err(ParseError::malformed(
                    cursor,
                    MalformedTagReason::EmptyAttributeName,
                ));
            }
            cursor = new_cursor;
            cursor = skip_whitespaces(text, cursor)?;
            let c2 = peek(text, cursor)?;
            if c2 == '=' {
                cursor += 1;
                cursor = skip_whitespaces(text, cursor)?;
                let (value, new_cursor) = read_value(text, cursor, options)?;
                attributes.insert(key, value);
                cursor = new_cursor;
            } else {
                // Standalone attribute: empty value, nothing consumed past
                // the key, so the next loop iteration re-examines `c2`.
                attributes.insert(key, Cow::Borrowed(""));
            }
        } else {
            return Err(ParseError::malformed(
                cursor,
                MalformedTagReason::UnexpectedCharacter,
            ));
        }
    }
}

/// Handles the `Self-close` state (§4.4.1 item 8). `cursor` points at the
/// `/` character (not yet consumed). Returns the offset one past
/// `closing_ch` on success.
fn finish_self_close(
    text: &str,
    cursor: usize,
    is_closing: bool,
    options: &ParserOptions,
) -> ParseResult<usize> {
    if !options.allow_self_closing_tags {
        return Err(ParseError::malformed(
            cursor,
            MalformedTagReason::DisallowedSelfClosing,
        ));
    }
    if is_closing {
        // `[/test /]` — a closing tag cannot also be self-closing.
        return Err(ParseError::malformed(
            cursor,
            MalformedTagReason::ClosingTagSelfClosing,
        ));
    }

    let mut cursor = cursor + 1; // consume '/'
    cursor = skip_whitespaces(text, cursor)?;
    let c = peek(text, cursor)?;
    if c == options.closing_ch {
        Ok(cursor + options.closing_ch.len_utf8())
    } else {
        Err(ParseError::malformed(
            cursor,
            MalformedTagReason::BadSelfCloseTerminator,
        ))
    }
}

/// Reads a value (§4.4.2): `offset` is already past any whitespace
/// following `=`. Dispatches on the first character to the double-quoted,
/// single-quoted, or unquoted form.
fn read_value<'a>(
    text: &'a str,
    offset: usize,
    options: &ParserOptions,
) -> ParseResult<(Cow<'a, str>, usize)> {
    match peek(text, offset)? {
        q @ ('"' | '\'') => read_quoted_value(text, offset, q, options),
        _ => read_unquoted_value(text, offset, options),
    }
}

fn read_quoted_value<'a>(
    text: &'a str,
    offset: usize,
    quote: char,
    options: &ParserOptions,
) -> ParseResult<(Cow<'a, str>, usize)> {
    let content_start = offset + quote.len_utf8();
    let mut cursor = content_start;
    let mut owned: Option<String> = None;
    let content_end;

    loop {
        let c = peek(text, cursor)?;
        if c == quote {
            content_end = cursor;
            cursor += quote.len_utf8();
            break;
        } else if c == '\\' {
            let esc_offset = cursor + 1;
            let escaped = peek(text, esc_offset)?;
            let buf = owned.get_or_insert_with(|| text[content_start..cursor].to_string());
            if escaped == quote {
                // Successful escape: the quote character itself.
                buf.push(quote);
            } else {
                // Erroneous escape: preserved verbatim, backslash and all
                // (spec.md §9 — deliberately not extended to C-style
                // escapes).
                buf.push('\\');
                buf.push(escaped);
            }
            cursor = esc_offset + escaped.len_utf8();
        } else {
            if let Some(buf) = owned.as_mut() {
                buf.push(c);
            }
            cursor += c.len_utf8();
        }
    }

    // The character right after the closing quote must separate the value
    // from whatever follows; anything else is real-world-mistake territory
    // (e.g. `[test=""a`).
    let after = peek(text, cursor)?;
    if !(is_whitespace(after) || after == '/' || after == options.closing_ch) {
        return Err(ParseError::malformed(
            cursor,
            MalformedTagReason::TrailingGarbageAfterQuotedValue,
        ));
    }

    let value = match owned {
        Some(s) => Cow::Owned(strip_ws(&s).to_string()),
        None => Cow::Borrowed(strip_ws(&text[content_start..content_end])),
    };
    Ok((value, cursor))
}

fn read_unquoted_value<'a>(
    text: &'a str,
    offset: usize,
    options: &ParserOptions,
) -> ParseResult<(Cow<'a, str>, usize)> {
    let mut cursor = offset;
    loop {
        let c = peek(text, cursor)?;
        if is_whitespace(c) || c == options.closing_ch {
            break;
        }
        if c == options.opening_ch {
            // Catches real-world mistakes like `[url=http://x[/url]`.
            return Err(ParseError::malformed(
                cursor,
                MalformedTagReason::ForbiddenOpeningCharInValue,
            ));
        }
        cursor += c.len_utf8();
    }
    Ok((Cow::Borrowed(&text[offset..cursor]), cursor))
}

/// Strips leading/trailing ASCII whitespace without touching interior
/// whitespace (spec.md §4.4.2, §9).
fn strip_ws(s: &str) -> &str {
    s.trim_matches(is_whitespace)
}
