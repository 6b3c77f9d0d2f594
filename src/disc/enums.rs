//! Region, country, language and partition definitions

use serde::Serialize;

/// Video/market region of a disc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    NtscJ,
    NtscU,
    Pal,
    Unknown,
}

/// Country a disc was released for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Country {
    Europe,
    Japan,
    Usa,
    Australia,
    France,
    Germany,
    Italy,
    Korea,
    Netherlands,
    Russia,
    Spain,
    Taiwan,
    World,
    Unknown,
}

/// Banner/menu languages, in the order the disc formats enumerate them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Language {
    Japanese,
    English,
    German,
    French,
    Spanish,
    Italian,
    Dutch,
    SimplifiedChinese,
    TraditionalChinese,
    Korean,
    Unknown,
}

impl Language {
    const ORDER: [Language; 11] = [
        Language::Japanese,
        Language::English,
        Language::German,
        Language::French,
        Language::Spanish,
        Language::Italian,
        Language::Dutch,
        Language::SimplifiedChinese,
        Language::TraditionalChinese,
        Language::Korean,
        Language::Unknown,
    ];

    /// Language `steps` places after `self` in the enumeration order
    ///
    /// Stepping past the last real language yields [`Language::Unknown`].
    pub fn offset(self, steps: usize) -> Language {
        let index = self as usize + steps;
        Self::ORDER.get(index).copied().unwrap_or(Language::Unknown)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Japanese => "Japanese",
            Self::English => "English",
            Self::German => "German",
            Self::French => "French",
            Self::Spanish => "Spanish",
            Self::Italian => "Italian",
            Self::Dutch => "Dutch",
            Self::SimplifiedChinese => "Simplified Chinese",
            Self::TraditionalChinese => "Traditional Chinese",
            Self::Korean => "Korean",
            Self::Unknown => "Unknown",
        }
    }
}

/// Hardware platform a volume belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Platform {
    GameCubeDisc,
}

/// Partition context for volume reads
///
/// GameCube discs have no partition table, so the only context that can be
/// read from is [`Partition::NONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition(Option<u64>);

impl Partition {
    pub const NONE: Partition = Partition(None);

    /// Partition whose data starts at `offset` on the disc
    pub fn at(offset: u64) -> Self {
        Partition(Some(offset))
    }
}

/// Map the country byte of a GameCube game ID to its region
pub fn region_from_byte(country_code: u8) -> Region {
    match country_code {
        // Korean releases run on NTSC-J consoles
        b'J' | b'W' | b'K' | b'Q' | b'T' => Region::NtscJ,
        b'B' | b'E' | b'N' | b'Z' => Region::NtscU,
        b'D' | b'F' | b'H' | b'I' | b'L' | b'M' | b'P' | b'R' | b'S' | b'U' | b'X' | b'Y' => {
            Region::Pal
        }
        _ => Region::Unknown,
    }
}

/// Map the country byte of a game ID to a country
pub fn country_from_byte(country_code: u8) -> Country {
    match country_code {
        b'A' => Country::World,

        b'D' => Country::Germany,
        b'X' | b'Y' | b'L' | b'M' | b'P' => Country::Europe,
        b'U' => Country::Australia,
        b'F' => Country::France,
        b'I' => Country::Italy,
        b'H' => Country::Netherlands,
        b'R' => Country::Russia,
        b'S' => Country::Spain,

        b'E' | b'N' | b'Z' | b'B' => Country::Usa,
        b'J' => Country::Japan,
        b'K' | b'Q' | b'T' => Country::Korea,
        b'W' => Country::Taiwan,

        _ => {
            if country_code > b'A' {
                log::warn!("Unknown country code: {:?}", country_code as char);
            }
            Country::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_mapping() {
        assert_eq!(region_from_byte(b'J'), Region::NtscJ);
        assert_eq!(region_from_byte(b'K'), Region::NtscJ);
        assert_eq!(region_from_byte(b'E'), Region::NtscU);
        assert_eq!(region_from_byte(b'P'), Region::Pal);
        assert_eq!(region_from_byte(0), Region::Unknown);
    }

    #[test]
    fn test_country_mapping() {
        assert_eq!(country_from_byte(b'J'), Country::Japan);
        assert_eq!(country_from_byte(b'E'), Country::Usa);
        assert_eq!(country_from_byte(b'P'), Country::Europe);
        assert_eq!(country_from_byte(b'W'), Country::Taiwan);
        assert_eq!(country_from_byte(b'A'), Country::World);
        assert_eq!(country_from_byte(0), Country::Unknown);
        assert_eq!(country_from_byte(b'~'), Country::Unknown);
    }

    #[test]
    fn test_language_offset() {
        assert_eq!(Language::English.offset(0), Language::English);
        assert_eq!(Language::English.offset(1), Language::German);
        assert_eq!(Language::English.offset(5), Language::Dutch);
        assert_eq!(Language::Korean.offset(1), Language::Unknown);
        assert_eq!(Language::Korean.offset(40), Language::Unknown);
    }
}
