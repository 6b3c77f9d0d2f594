//! Decoding of fixed-width text fields stored on disc

use encoding_rs::{SHIFT_JIS, WINDOWS_1252};

use super::enums::Country;

/// Character encoding used by a disc's text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    ShiftJis,
    Windows1252,
}

impl TextEncoding {
    /// Japanese and Taiwanese discs use Shift-JIS, everything else Windows-1252
    pub fn for_country(country: Country) -> Self {
        match country {
            Country::Japan | Country::Taiwan => Self::ShiftJis,
            _ => Self::Windows1252,
        }
    }
}

/// Decode a fixed-width field, stopping at the first NUL byte
pub fn decode_string(bytes: &[u8], encoding: TextEncoding) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let bytes = &bytes[..end];

    let (text, _) = match encoding {
        TextEncoding::ShiftJis => SHIFT_JIS.decode_without_bom_handling(bytes),
        TextEncoding::Windows1252 => WINDOWS_1252.decode_without_bom_handling(bytes),
    };
    text.into_owned()
}
