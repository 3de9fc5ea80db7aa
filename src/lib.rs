//! # bbcode-tag-parser
//!
//! A zero-copy lexer for a single BBCode-style tag occurrence: `[tag]`,
//! `[/tag]`, `[tag/]`, and every attribute shape in between
//! (`[tag=value]`, `[tag key=value]`, `[tag key]`, quoted values with
//! escapes).
//!
//! This crate does not tokenize a whole document, build a tag tree, or
//! render anything — it answers exactly one question: "given text and an
//! offset that points at an opening bracket, what tag is there, and where
//! does it end?" A caller driving a text cursor across a full document
//! (deciding where brackets start, handling unmatched closing tags,
//! building a tree, escaping body text) is expected to sit on top of this.
//!
//! ## Quick Start
//!
//! ```rust
//! use bbcode_tag_parser::{parse_tag, ParserOptions};
//!
//! let tag = parse_tag("[url=https://example.com]", 0, &ParserOptions::default()).unwrap();
//! assert_eq!(tag.name, "url");
//! assert_eq!(tag.attributes.get("url").unwrap(), "https://example.com");
//! assert_eq!(tag.end_offset, 25);
//! ```
//!
//! ## Error handling
//!
//! [`parse_tag`] never panics on malformed or truncated input; it returns
//! [`ParseError`], which distinguishes truncated input
//! ([`ParseError::OutOfInput`], recoverable by waiting for more text) from
//! a structurally broken tag fully inside the given text
//! ([`ParseError::MalformedTag`], recoverable by resuming the scan past
//! the opening bracket). See [`error`] for the full breakdown.
//!
//! ## Configuration
//!
//! [`ParserOptions`] controls the bracket characters and two grammar
//! toggles (`allow_tagvalue_attr`, `allow_self_closing_tags`). There is no
//! global state: every call is independently configured.

pub mod charset;
pub mod error;
pub mod scan;
pub mod tag;

pub use charset::{is_identifier_char, is_whitespace};
pub use error::{MalformedTagReason, ParseError, ParseResult};
pub use scan::{get_identifier, skip_whitespaces};
pub use tag::{parse_tag, ParsedTag, ParserOptions};
