//! # Hex Strings
//!
//! Byte/hex conversions used to display encoded commands and to accept
//! raw hex payloads.

use crate::error::LineaError;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Uppercase hex, two characters per byte, no separator.
///
/// ## Example
///
/// ```
/// use linea::protocol::hex;
///
/// assert_eq!(hex::to_hex_string(&[0x1B, 0x40]), "1B40");
/// ```
pub fn to_hex_string(data: &[u8]) -> String {
    let mut s = String::with_capacity(data.len() * 2);
    for &b in data {
        s.push(HEX_DIGITS[(b >> 4) as usize] as char);
        s.push(HEX_DIGITS[(b & 0x0F) as usize] as char);
    }
    s
}

/// Space-separated uppercase hex pairs, e.g. `1B 40 0A`.
pub fn to_hex_dump(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a hex string into bytes.
///
/// Case-insensitive. ASCII whitespace between digits is ignored, so the
/// output of [`to_hex_dump`] parses back.
///
/// ## Errors
///
/// [`LineaError::InvalidHex`] on a non-hex character or an odd number of
/// digits.
pub fn from_hex_string(s: &str) -> Result<Vec<u8>, LineaError> {
    let digits = s
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| {
            nibble(b).ok_or_else(|| {
                LineaError::InvalidHex(format!("'{}' is not a hex digit", b as char))
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if digits.len() % 2 != 0 {
        return Err(LineaError::InvalidHex(format!(
            "odd number of digits ({})",
            digits.len()
        )));
    }

    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
