//! # GBK Text Encoding
//!
//! Free text in a command line is sent to the printer as GBK, the
//! double-byte code page most Chinese-market receipt printers boot into.
//! ASCII (U+0000–U+007F) passes through unchanged.
//!
//! ## Unmappable Characters
//!
//! Encoding never fails. A character GBK cannot represent is replaced by
//! an HTML decimal character reference, which is what `encoding_rs` emits
//! for encoders without a native replacement byte. For example `€` is in
//! GBK (0x80) but `😀` becomes the ASCII bytes of `&#128512;`.

use encoding_rs::GBK;

/// Encode a Unicode string as GBK bytes.
///
/// ## Example
///
/// ```
/// use linea::protocol::gbk;
///
/// assert_eq!(gbk::encode("abc"), b"abc".to_vec());
/// assert_eq!(gbk::encode("中"), vec![0xD6, 0xD0]);
/// ```
pub fn encode(s: &str) -> Vec<u8> {
    let (bytes, _, _) = GBK.encode(s);
    bytes.into_owned()
}

/// Whether every character of `s` has a native GBK representation.
pub fn is_representable(s: &str) -> bool {
    let (_, _, had_unmappable) = GBK.encode(s);
    !had_unmappable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode("Hello, 999d!"), b"Hello, 999d!".to_vec());
        assert!(is_representable("Hello"));
    }

    #[test]
    fn test_empty() {
        assert!(encode("").is_empty());
    }

    #[test]
    fn test_chinese_is_double_byte() {
        // 中文 = D6D0 CEC4
        assert_eq!(encode("中文"), vec![0xD6, 0xD0, 0xCE, 0xC4]);
    }

    #[test]
    fn test_unmappable_becomes_character_reference() {
        assert!(!is_representable("😀"));
        assert_eq!(encode("😀"), b"&#128512;".to_vec());
    }
}
