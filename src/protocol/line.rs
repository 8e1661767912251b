//! # Command-Line Translation
//!
//! A command line is a list of tokens separated by ASCII spaces:
//!
//! ```text
//! ESC @ 1Bh 61h 1d Total: 12.50 LF
//! ```
//!
//! Each token goes through [`encode_token`] and the results are
//! concatenated in order. Only `' '` separates tokens; runs of spaces are
//! collapsed, while tabs and other whitespace stay inside the token.
//! No separator bytes are added between tokens, so a literal space in the
//! output has to be written as `SP` or `20h`.

use super::token::{TokenKind, classify_token, encode_token};

/// Translate one command line into its byte sequence.
///
/// ## Example
///
/// ```
/// use linea::protocol::line::translate_line;
///
/// assert_eq!(translate_line("NUL 41H"), vec![0x00, 0x41]);
/// assert_eq!(translate_line("NUL  41H"), vec![0x00, 0x41]);
/// ```
pub fn translate_line(line: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len());
    for token in tokens(line) {
        out.extend(encode_token(token));
    }
    out
}

/// Translate every line of `text` and concatenate the results.
///
/// Lines end at `\n` or `\r\n`. Line breaks themselves produce no bytes.
pub fn translate_lines(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for line in text.lines() {
        out.extend(translate_line(line));
    }
    out
}

/// One token of a line together with how it was encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReport<'a> {
    pub token: &'a str,
    pub kind: TokenKind,
    pub bytes: Vec<u8>,
}

/// Per-token breakdown of [`translate_line`], for diagnostics.
pub fn explain_line(line: &str) -> Vec<TokenReport<'_>> {
    tokens(line)
        .map(|token| TokenReport {
            token,
            kind: classify_token(token),
            bytes: encode_token(token),
        })
        .collect()
}

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(' ').filter(|t| !t.is_empty())
}
