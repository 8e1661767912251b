//! # Command Protocol
//!
//! Turns hand-written command lines into the byte stream a printer expects.
//!
//! ## Module Structure
//!
//! - [`mnemonic`]: The 33 control-code names (`NUL` … `SP`)
//! - [`token`]: Single-token encoder (mnemonic, decimal, hex, text)
//! - [`line`]: Whole-line translation
//! - [`gbk`]: GBK text fallback
//! - [`hex`]: Hex string helpers
//!
//! ## Usage Example
//!
//! ```
//! use linea::protocol::{hex, line};
//!
//! // Initialize, select emphasized print, print text, feed a line
//! let data = line::translate_line("ESC @ ESC E Total LF");
//!
//! assert_eq!(hex::to_hex_dump(&data), "1B 40 1B 45 54 6F 74 61 6C 0A");
//! ```
//!
//! Note that `@` and `E` above are one-character text tokens. The encoder
//! adds nothing between tokens, so they land right after the `ESC` byte.
//!
//! Everything in this module is pure and safe to call from any thread.

pub mod gbk;
pub mod hex;
pub mod line;
pub mod mnemonic;
pub mod token;

pub use line::{translate_line, translate_lines};
pub use token::{TokenKind, classify_token, encode_token};
