//! # Control-Code Mnemonics
//!
//! The 33 names an operator can write instead of a raw control byte.
//! A name's position in [`MNEMONICS`] is the byte it encodes to.
//!
//! | Byte | Name | Byte | Name | Byte | Name | Byte | Name |
//! |------|------|------|------|------|------|------|------|
//! | 0x00 | NUL  | 0x08 | BS   | 0x10 | DLE  | 0x18 | CAN  |
//! | 0x01 | SOH  | 0x09 | HT   | 0x11 | DC1  | 0x19 | EM   |
//! | 0x02 | STX  | 0x0A | LF   | 0x12 | DC2  | 0x1A | SUB  |
//! | 0x03 | ETX  | 0x0B | VT   | 0x13 | DC3  | 0x1B | ESC  |
//! | 0x04 | EOT  | 0x0C | CLR  | 0x14 | DC4  | 0x1C | FS   |
//! | 0x05 | ENQ  | 0x0D | CR   | 0x15 | NAK  | 0x1D | GS   |
//! | 0x06 | ACK  | 0x0E | SO   | 0x16 | SYN  | 0x1E | RS   |
//! | 0x07 | BEL  | 0x0F | SI   | 0x17 | ETB  | 0x1F | US   |
//! |      |      |      |      |      |      | 0x20 | SP   |
//!
//! Note that 0x0C is spelled `CLR`, not `FF`. Existing command scripts
//! depend on that spelling, so `FF` is not accepted as an alias.

/// Control-code names indexed by byte value.
pub static MNEMONICS: [&str; 33] = [
    "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", //
    "BS", "HT", "LF", "VT", "CLR", "CR", "SO", "SI", //
    "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB", //
    "CAN", "EM", "SUB", "ESC", "FS", "GS", "RS", "US", //
    "SP",
];

/// Look up the byte for a mnemonic. Matching is exact and case-sensitive.
///
/// ## Example
///
/// ```
/// use linea::protocol::mnemonic;
///
/// assert_eq!(mnemonic::lookup("ESC"), Some(0x1B));
/// assert_eq!(mnemonic::lookup("esc"), None);
/// ```
pub fn lookup(name: &str) -> Option<u8> {
    MNEMONICS
        .iter()
        .position(|&m| m == name)
        .map(|index| index as u8)
}

/// Reverse lookup: the mnemonic for a control byte, if it has one.
pub fn name_of(byte: u8) -> Option<&'static str> {
    MNEMONICS.get(byte as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(MNEMONICS.len(), 33);
    }

    #[test]
    fn test_every_name_maps_to_its_index() {
        for (i, name) in MNEMONICS.iter().enumerate() {
            assert_eq!(lookup(name), Some(i as u8), "{}", name);
        }
    }

    #[test]
    fn test_well_known_codes() {
        assert_eq!(lookup("NUL"), Some(0x00));
        assert_eq!(lookup("LF"), Some(0x0A));
        assert_eq!(lookup("CLR"), Some(0x0C));
        assert_eq!(lookup("ESC"), Some(0x1B));
        assert_eq!(lookup("GS"), Some(0x1D));
        assert_eq!(lookup("SP"), Some(0x20));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup("nul"), None);
        assert_eq!(lookup("Esc"), None);
        assert_eq!(lookup("FF"), None);
        assert_eq!(lookup(""), None);
        assert_eq!(lookup("ESC "), None);
    }

    #[test]
    fn test_name_of() {
        assert_eq!(name_of(0x1B), Some("ESC"));
        assert_eq!(name_of(0x20), Some("SP"));
        assert_eq!(name_of(0x21), None);
        assert_eq!(name_of(0xFF), None);
    }
}
