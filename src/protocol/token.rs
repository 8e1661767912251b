//! # Token Encoder
//!
//! Turns one command token into the bytes it stands for.
//!
//! ## Token Forms
//!
//! | Form | Example | Bytes |
//! |------|---------|-------|
//! | Mnemonic | `ESC` | `1B` |
//! | Decimal, `D`/`d` suffix, 1–3 digits | `64d` | `40` |
//! | Hex, `H`/`h` suffix, 1–2 digits | `1Bh` | `1B` |
//! | Hex, `0x` prefix, 1–2 digits | `0x1b` | `1B` |
//! | Anything else | `Hello` | GBK text |
//!
//! Rules are tried in the order of the table above and the first match wins.
//! Encoding cannot fail: a token that fits no literal form is sent as text.
//!
//! ## Quirks Kept For Compatibility
//!
//! - A decimal literal above 255 (`999d`) is not an error. The whole token
//!   is sent as text, so `999d` becomes the four bytes `39 39 39 64`.
//! - The `D` and `H` suffix forms match the whole token, so `1234d` is text.
//!   The `0x` prefix form reads at most two hex digits and ignores the rest:
//!   `0x1B00` is `1B` and `0x1G` is `01`.
//! - Only lowercase `0x` is a hex prefix. `0X1B` is text.

use super::{gbk, mnemonic};

/// Which rule produced a token's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Control-code name from the mnemonic table
    Mnemonic,
    /// Decimal literal with `D`/`d` suffix
    Decimal,
    /// Hex literal with `H`/`h` suffix or `0x` prefix
    Hex,
    /// GBK-encoded text fallback
    Text,
}

impl TokenKind {
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Mnemonic => "mnemonic",
            TokenKind::Decimal => "decimal",
            TokenKind::Hex => "hex",
            TokenKind::Text => "text",
        }
    }
}

/// What a matching rule resolved the token to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Byte(u8),
    /// The rule matched but hands the whole token to the text fallback.
    Text,
}

type Rule = (TokenKind, fn(&str) -> Option<Resolution>);

/// Literal rules in priority order. Text is the implicit final rule.
const RULES: &[Rule] = &[
    (TokenKind::Mnemonic, match_mnemonic),
    (TokenKind::Decimal, match_decimal),
    (TokenKind::Hex, match_hex_suffix),
    (TokenKind::Hex, match_hex_prefix),
];

/// Encode a single token.
///
/// ## Example
///
/// ```
/// use linea::protocol::token::encode_token;
///
/// assert_eq!(encode_token("ESC"), vec![0x1B]);
/// assert_eq!(encode_token("64d"), vec![0x40]);
/// assert_eq!(encode_token("1Dh"), vec![0x1D]);
/// assert_eq!(encode_token("0x21"), vec![0x21]);
/// assert_eq!(encode_token("Hi"), b"Hi".to_vec());
/// ```
pub fn encode_token(token: &str) -> Vec<u8> {
    match resolve(token) {
        (_, Resolution::Byte(b)) => vec![b],
        (_, Resolution::Text) => gbk::encode(token),
    }
}

/// Report which rule [`encode_token`] applies to `token`.
///
/// A decimal literal above 255 reports [`TokenKind::Text`], since that is
/// how it is encoded.
pub fn classify_token(token: &str) -> TokenKind {
    match resolve(token) {
        (kind, Resolution::Byte(_)) => kind,
        (_, Resolution::Text) => TokenKind::Text,
    }
}

fn resolve(token: &str) -> (TokenKind, Resolution) {
    RULES
        .iter()
        .find_map(|(kind, rule)| rule(token).map(|r| (*kind, r)))
        .unwrap_or((TokenKind::Text, Resolution::Text))
}

fn match_mnemonic(token: &str) -> Option<Resolution> {
    mnemonic::lookup(token).map(Resolution::Byte)
}

/// `^\d{1,3}[Dd]$`
fn match_decimal(token: &str) -> Option<Resolution> {
    let digits = token.strip_suffix(['D', 'd'])?;
    if !is_digits(digits, 3, |c| c.is_ascii_digit()) {
        return None;
    }
    let value: u16 = digits.parse().ok()?;
    Some(match u8::try_from(value) {
        Ok(b) => Resolution::Byte(b),
        Err(_) => Resolution::Text,
    })
}

/// `^[0-9a-fA-F]{1,2}[Hh]$`
fn match_hex_suffix(token: &str) -> Option<Resolution> {
    let digits = token.strip_suffix(['H', 'h'])?;
    parse_hex_byte(digits)
}

/// `^0x[0-9a-fA-F]{1,2}`, anything after the digits is ignored
fn match_hex_prefix(token: &str) -> Option<Resolution> {
    let rest = token.strip_prefix("0x")?;
    let len = rest
        .bytes()
        .take(2)
        .take_while(u8::is_ascii_hexdigit)
        .count();
    // Hex digits are ASCII, so `len` is a char boundary
    parse_hex_byte(&rest[..len])
}

fn parse_hex_byte(digits: &str) -> Option<Resolution> {
    if !is_digits(digits, 2, |c| c.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(digits, 16).ok().map(Resolution::Byte)
}

/// 1..=max characters, all satisfying `pred`.
fn is_digits(s: &str, max: usize, pred: fn(&u8) -> bool) -> bool {
    (1..=max).contains(&s.len()) && s.as_bytes().iter().all(pred)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonics() {
        assert_eq!(encode_token("NUL"), vec![0x00]);
        assert_eq!(encode_token("ESC"), vec![0x1B]);
        assert_eq!(encode_token("SP"), vec![0x20]);
        assert_eq!(classify_token("GS"), TokenKind::Mnemonic);
    }

    #[test]
    fn test_decimal_suffix() {
        assert_eq!(encode_token("0d"), vec![0]);
        assert_eq!(encode_token("65d"), vec![0x41]);
        assert_eq!(encode_token("65D"), vec![0x41]);
        assert_eq!(encode_token("007d"), vec![7]);
        assert_eq!(encode_token("255d"), vec![0xFF]);
        assert_eq!(classify_token("27D"), TokenKind::Decimal);
    }

    #[test]
    fn test_decimal_over_255_is_text() {
        assert_eq!(encode_token("256d"), b"256d".to_vec());
        assert_eq!(encode_token("999d"), b"999d".to_vec());
        assert_eq!(classify_token("999d"), TokenKind::Text);
    }

    #[test]
    fn test_decimal_too_many_digits_is_text() {
        assert_eq!(encode_token("0001d"), b"0001d".to_vec());
        assert_eq!(encode_token("d"), b"d".to_vec());
    }

    #[test]
    fn test_hex_suffix() {
        assert_eq!(encode_token("1Bh"), vec![0x1B]);
        assert_eq!(encode_token("1bH"), vec![0x1B]);
        assert_eq!(encode_token("Fh"), vec![0x0F]);
        assert_eq!(encode_token("FFh"), vec![0xFF]);
        // Decimal rule needs D/d as the last char, so this is hex 0x1D
        assert_eq!(encode_token("1Dh"), vec![0x1D]);
        assert_eq!(classify_token("41H"), TokenKind::Hex);
    }

    #[test]
    fn test_hex_suffix_rejects_long_or_non_hex() {
        assert_eq!(encode_token("123h"), b"123h".to_vec());
        assert_eq!(encode_token("GGh"), b"GGh".to_vec());
        assert_eq!(encode_token("h"), b"h".to_vec());
    }

    #[test]
    fn test_hex_prefix() {
        assert_eq!(encode_token("0x1b"), vec![0x1B]);
        assert_eq!(encode_token("0x1B"), vec![0x1B]);
        assert_eq!(encode_token("0xA"), vec![0x0A]);
        assert_eq!(classify_token("0xff"), TokenKind::Hex);
    }

    #[test]
    fn test_hex_prefix_ignores_remainder() {
        assert_eq!(encode_token("0x1B00"), vec![0x1B]);
        assert_eq!(encode_token("0x1bzz"), vec![0x1B]);
        assert_eq!(encode_token("0x1G"), vec![0x01]);
        assert_eq!(classify_token("0x1B00"), TokenKind::Hex);
    }

    #[test]
    fn test_hex_prefix_without_digits_is_text() {
        assert_eq!(encode_token("0x"), b"0x".to_vec());
        assert_eq!(encode_token("0xZZ"), b"0xZZ".to_vec());
        assert_eq!(encode_token("0X1B"), b"0X1B".to_vec());
        assert_eq!(classify_token("0xZZ"), TokenKind::Text);
    }

    #[test]
    fn test_text_fallback() {
        assert_eq!(encode_token("Hello"), b"Hello".to_vec());
        assert_eq!(encode_token("esc"), b"esc".to_vec());
        assert_eq!(encode_token("中"), vec![0xD6, 0xD0]);
        assert_eq!(classify_token("Total:"), TokenKind::Text);
    }

    #[test]
    fn test_multibyte_suffix_does_not_panic() {
        assert_eq!(classify_token("1中"), TokenKind::Text);
        assert_eq!(classify_token("é"), TokenKind::Text);
    }

    #[test]
    fn test_pure() {
        for token in ["ESC", "999d", "0x1b", "文字"] {
            assert_eq!(encode_token(token), encode_token(token));
        }
    }
}
