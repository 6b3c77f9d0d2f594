//! `opening.bnr` banner parsing
//!
//! A GameCube banner is a fixed-layout blob: a 4-byte magic, padding, a
//! 96x32 RGB5A3 image and one or six 0x140-byte text records. `BNR1`
//! (NTSC) carries one record whose language depends on the disc region;
//! `BNR2` (PAL) carries six records for English through Dutch.

pub mod pixels;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::disc::enums::Language;
use crate::disc::text::{decode_string, TextEncoding};

/// Path of the banner file in the disc root
pub const BANNER_PATH: &str = "opening.bnr";

/// Banner image width in pixels
pub const BANNER_WIDTH: u32 = 96;

/// Banner image height in pixels
pub const BANNER_HEIGHT: u32 = 32;

/// Offset of the image block within the blob
pub const IMAGE_OFFSET: usize = 0x20;

/// Size of the RGB5A3 image block
pub const IMAGE_SIZE: usize = (BANNER_WIDTH * BANNER_HEIGHT * 2) as usize;

/// Offset of the first text record
pub const INFO_OFFSET: usize = IMAGE_OFFSET + IMAGE_SIZE;

/// Size of one text record
pub const INFO_SIZE: usize = 0x140;

/// Exact size of a single-language banner
pub const BNR1_SIZE: usize = INFO_OFFSET + INFO_SIZE;

/// Exact size of a six-language banner
pub const BNR2_SIZE: usize = INFO_OFFSET + 6 * INFO_SIZE;

const BNR1_MAGIC: [u8; 4] = *b"BNR1";
const BNR2_MAGIC: [u8; 4] = *b"BNR2";

// Field layout of a text record
const SHORT_NAME: std::ops::Range<usize> = 0x00..0x20;
const SHORT_MAKER: std::ops::Range<usize> = 0x20..0x40;
const LONG_NAME: std::ops::Range<usize> = 0x40..0x80;
const LONG_MAKER: std::ops::Range<usize> = 0x80..0xC0;
const DESCRIPTION: std::ops::Range<usize> = 0xC0..0x140;

/// First language of a six-language banner's records
const SIX_LANGUAGE_BASE: Language = Language::English;

/// Text keyed by language; a missing key means the banner has no such text
pub type LocalizedStrings = BTreeMap<Language, String>;

/// Errors that can occur while reading a banner
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BannerError {
    #[error("Unrecognized banner (magic 0x{magic:08x}, size 0x{size:x})")]
    UnrecognizedBanner { magic: u32, size: usize },

    #[error("Invalid banner file size 0x{0:x}")]
    InvalidSize(usize),

    #[error("Short banner read ({actual} of {expected} bytes)")]
    ShortRead { expected: usize, actual: usize },
}

/// The two banner layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerVariant {
    /// `BNR1`: one text record
    SingleLanguage,
    /// `BNR2`: six text records
    SixLanguage,
}

impl BannerVariant {
    /// Exact blob size of this layout
    pub fn size(&self) -> usize {
        match self {
            Self::SingleLanguage => BNR1_SIZE,
            Self::SixLanguage => BNR2_SIZE,
        }
    }

    fn magic(&self) -> [u8; 4] {
        match self {
            Self::SingleLanguage => BNR1_MAGIC,
            Self::SixLanguage => BNR2_MAGIC,
        }
    }
}

/// Whether `size` is the size of either banner layout
pub fn is_banner_size(size: usize) -> bool {
    size == BNR1_SIZE || size == BNR2_SIZE
}

/// Pick the layout from the magic and exact length together
pub fn classify(blob: &[u8]) -> Result<BannerVariant, BannerError> {
    let magic: [u8; 4] = blob
        .get(..4)
        .and_then(|m| m.try_into().ok())
        .unwrap_or_default();

    [BannerVariant::SingleLanguage, BannerVariant::SixLanguage]
        .into_iter()
        .find(|variant| variant.magic() == magic && variant.size() == blob.len())
        .ok_or(BannerError::UnrecognizedBanner {
            magic: u32::from_be_bytes(magic),
            size: blob.len(),
        })
}

/// Decoded 96x32 banner image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerImage {
    pub width: u32,
    pub height: u32,
    /// Row-major `0xAARRGGBB` pixels, `width * height` of them
    pub pixels: Vec<u32>,
}

impl BannerImage {
    /// Decode a raw RGB5A3 banner image block
    pub fn decode(block: &[u8]) -> Self {
        Self {
            width: BANNER_WIDTH,
            height: BANNER_HEIGHT,
            pixels: pixels::decode_5a3_image(block, BANNER_WIDTH as usize, BANNER_HEIGHT as usize),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Everything extracted from a banner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    pub short_names: LocalizedStrings,
    pub long_names: LocalizedStrings,
    pub short_makers: LocalizedStrings,
    pub long_makers: LocalizedStrings,
    pub descriptions: LocalizedStrings,
    pub image: BannerImage,
}

/// One raw text record
#[derive(Debug, Clone, Copy)]
struct LanguageEntry<'a>(&'a [u8]);

impl<'a> LanguageEntry<'a> {
    fn field(&self, range: std::ops::Range<usize>, encoding: TextEncoding) -> String {
        decode_string(&self.0[range], encoding)
    }
}

/// A validated blob split into the parts its layout owns
enum BannerLayout<'a> {
    SingleLanguage {
        image: &'a [u8],
        entry: LanguageEntry<'a>,
    },
    SixLanguage {
        image: &'a [u8],
        entries: [LanguageEntry<'a>; 6],
    },
}

impl<'a> BannerLayout<'a> {
    fn split(blob: &'a [u8], variant: BannerVariant) -> Self {
        let image = &blob[IMAGE_OFFSET..INFO_OFFSET];
        let entry = move |i: usize| {
            let start = INFO_OFFSET + i * INFO_SIZE;
            LanguageEntry(&blob[start..start + INFO_SIZE])
        };

        match variant {
            BannerVariant::SingleLanguage => Self::SingleLanguage {
                image,
                entry: entry(0),
            },
            BannerVariant::SixLanguage => Self::SixLanguage {
                image,
                entries: std::array::from_fn(entry),
            },
        }
    }
}

/// Parse a banner blob of the given layout
///
/// `single_language` is the language assigned to a `BNR1` record; it is
/// ignored for `BNR2`, whose records are English, German, French, Spanish,
/// Italian and Dutch in that order.
pub fn parse(
    blob: &[u8],
    variant: BannerVariant,
    single_language: Language,
    encoding: TextEncoding,
) -> Result<Banner, BannerError> {
    if classify(blob)? != variant {
        return Err(BannerError::UnrecognizedBanner {
            magic: u32::from_be_bytes([blob[0], blob[1], blob[2], blob[3]]),
            size: blob.len(),
        });
    }

    let mut banner = Banner::default();
    match BannerLayout::split(blob, variant) {
        BannerLayout::SingleLanguage { image, entry } => {
            banner.image = BannerImage::decode(image);
            banner.add_entry(single_language, entry, encoding);
        }
        BannerLayout::SixLanguage { image, entries } => {
            banner.image = BannerImage::decode(image);
            for (i, entry) in entries.into_iter().enumerate() {
                banner.add_entry(SIX_LANGUAGE_BASE.offset(i), entry, encoding);
            }
        }
    }

    Ok(banner)
}

impl Banner {
    fn add_entry(&mut self, language: Language, entry: LanguageEntry<'_>, encoding: TextEncoding) {
        let fields = [
            (&mut self.descriptions, DESCRIPTION),
            (&mut self.short_names, SHORT_NAME),
            (&mut self.long_names, LONG_NAME),
            (&mut self.short_makers, SHORT_MAKER),
            (&mut self.long_makers, LONG_MAKER),
        ];

        for (map, range) in fields {
            let text = entry.field(range, encoding);
            if !text.is_empty() {
                map.insert(language, text);
            }
        }
    }
}
