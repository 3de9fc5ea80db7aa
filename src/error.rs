//! Error types for the tag parser.
//!
//! Two kinds only, matching the two recovery strategies available to a
//! caller driving a text cursor across a document: `OutOfInput` means the
//! bracket is still open and recovery should wait for more text (or, for a
//! fully materialized input, treat the opening bracket as literal and carry
//! on); `MalformedTag` means the tag is structurally broken at a position
//! that is fully in-bounds, so recovery can resume scanning right after the
//! opening bracket.

use thiserror::Error;

/// Why a tag was rejected as [`ParseError::MalformedTag`].
///
/// This refines `spec.md`'s single `MalformedTag` kind with enough context
/// for a caller (or a test) to assert on the precise failure without
/// string-matching `Display` output. It never changes which of
/// [`ParseError::OutOfInput`] / [`ParseError::MalformedTag`] a given input
/// produces.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum MalformedTagReason {
    /// `[]`, `[/]`, `[#...`, `["...`, `[[...` — no identifier where a tag
    /// name was expected.
    #[error("tag name is empty")]
    EmptyName,

    /// An attribute position started with a non-identifier character.
    #[error("attribute name is empty")]
    EmptyAttributeName,

    /// `[/test=value]`, `[/test key=value]` — closing tags carry no
    /// attributes.
    #[error("a closing tag cannot carry attributes")]
    ClosingTagWithArguments,

    /// Something other than whitespace, `/`, `closing_ch`, or the start of
    /// a new attribute followed a value or attribute.
    #[error("unexpected character where an attribute, '/', or the closing bracket was expected")]
    UnexpectedCharacter,

    /// `opening_ch` appeared inside an unquoted value, e.g.
    /// `[url=http://x[/url]`.
    #[error("unquoted value must not contain the opening bracket character")]
    ForbiddenOpeningCharInValue,

    /// A quoted value was immediately followed by something other than
    /// whitespace, `/`, or `closing_ch`.
    #[error("unexpected character immediately after a quoted value")]
    TrailingGarbageAfterQuotedValue,

    /// `[test />` or similar: a `/` was not immediately followed by
    /// `closing_ch` (after optional whitespace).
    #[error("expected the closing bracket after '/'")]
    BadSelfCloseTerminator,

    /// `[/test /]` — a closing tag cannot also be self-closing.
    #[error("a closing tag cannot be self-closing")]
    ClosingTagSelfClosing,

    /// `allow_self_closing_tags` is `false` but the tag used `/closing_ch`.
    #[error("self-closing tags are not allowed")]
    DisallowedSelfClosing,

    /// `allow_tagvalue_attr` is `false` but the tag used `name=value`.
    #[error("tag-value attributes are not allowed")]
    DisallowedTagValue,
}

/// Errors produced by [`crate::parse_tag`] and the scanners it is built on.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    /// The scanner ran past the end of `text` while the tag was still
    /// incomplete: an unterminated tag, an unterminated quoted value, or a
    /// dangling backslash escape.
    #[error("unexpected end of input at offset {offset}")]
    OutOfInput {
        /// Byte offset at which the scan ran out of input.
        offset: usize,
    },

    /// The tag is structurally invalid at a position fully inside `text`.
    #[error("malformed tag at offset {offset}: {reason}")]
    MalformedTag {
        /// Byte offset at which the malformed construct was detected.
        offset: usize,
        /// Which rule the tag violated.
        reason: MalformedTagReason,
    },
}

impl ParseError {
    pub(crate) fn out_of_input(offset: usize) -> Self {
        Self::OutOfInput { offset }
    }

    pub(crate) fn malformed(offset: usize, reason: MalformedTagReason) -> Self {
        Self::MalformedTag { offset, reason }
    }
}

/// Result type for the tag parser.
pub type ParseResult<T> = Result<T, ParseError>;
