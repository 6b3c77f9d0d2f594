//! GameCube disc volume
//!
//! Scalar header fields are read on demand at fixed offsets. Banner-derived
//! fields come from `opening.bnr`, which is located, read and parsed at most
//! once per volume, on the first banner accessor call.

use std::io;
use std::sync::{Mutex, MutexGuard};

use super::blob::{BlobReader, MemoryBlobReader};
use super::enums::{country_from_byte, region_from_byte, Country, Language, Partition, Platform, Region};
use super::filesystem::{create_filesystem, read_file};
use super::formats::BlobType;
use super::text::{decode_string, TextEncoding};
use super::volume::Volume;
use crate::banner::{self, Banner, BannerError, BannerImage, LocalizedStrings, BANNER_PATH};

/// Returned by [`VolumeGc::game_id`] when the ID cannot be read
pub const NO_UID: &str = "NO_UID";

const GAME_ID_OFFSET: u64 = 0x0;
const GAME_ID_LEN: usize = 6;
const COUNTRY_OFFSET: u64 = 0x3;
const MAKER_ID_OFFSET: u64 = 0x4;
const MAKER_ID_LEN: usize = 2;
const DISC_NUMBER_OFFSET: u64 = 0x6;
const REVISION_OFFSET: u64 = 0x7;
const INTERNAL_NAME_OFFSET: u64 = 0x20;
const INTERNAL_NAME_LEN: usize = 0x60;
const APPLOADER_DATE_OFFSET: u64 = 0x2440;
const APPLOADER_DATE_LEN: usize = 0x10;

/// Lazy banner cache
///
/// `Loaded` is entered before the load runs and is never left, so a failed
/// load leaves an empty [`Banner`] and is not retried.
enum BannerState {
    NotLoaded,
    Loaded(Banner),
}

/// A GameCube disc image
pub struct VolumeGc {
    reader: Mutex<Box<dyn BlobReader>>,
    banner: Mutex<BannerState>,
}

impl VolumeGc {
    pub fn new(reader: Box<dyn BlobReader>) -> Self {
        Self {
            reader: Mutex::new(reader),
            banner: Mutex::new(BannerState::NotLoaded),
        }
    }

    /// Volume over a disc image held in memory
    pub fn from_bytes(image: Vec<u8>) -> Self {
        Self::new(Box::new(MemoryBlobReader::new(image)))
    }

    fn reader(&self) -> MutexGuard<'_, Box<dyn BlobReader>> {
        self.reader.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Read a fixed-width text field, empty on failure
    fn read_string(&self, offset: u64, length: usize, partition: Partition) -> Option<String> {
        let mut buf = vec![0u8; length];
        self.read(offset, &mut buf, partition).ok()?;
        Some(decode_string(&buf, self.text_encoding()))
    }

    fn text_encoding(&self) -> TextEncoding {
        self.country(Partition::NONE)
            .map(TextEncoding::for_country)
            .unwrap_or(TextEncoding::Windows1252)
    }

    /// Run `f` on the banner, loading it first if this is the first access
    fn with_banner<T>(&self, f: impl FnOnce(&Banner) -> T) -> T {
        let mut state = self.banner.lock().unwrap_or_else(|e| e.into_inner());
        if let BannerState::NotLoaded = *state {
            // Mark loaded before attempting so a failure is never retried
            *state = BannerState::Loaded(Banner::default());
            match self.load_banner() {
                Ok(Some(banner)) => *state = BannerState::Loaded(banner),
                Ok(None) => {}
                Err(e) => log::warn!("Invalid {}: {}", BANNER_PATH, e),
            }
        }

        match &*state {
            BannerState::Loaded(banner) => f(banner),
            BannerState::NotLoaded => f(&Banner::default()),
        }
    }

    /// Locate, read and parse `opening.bnr`
    ///
    /// `Ok(None)` means the disc has no readable filesystem or no banner file.
    fn load_banner(&self) -> Result<Option<Banner>, BannerError> {
        let filesystem = match create_filesystem(self, Partition::NONE) {
            Ok(fs) => fs,
            Err(e) => {
                log::debug!("No filesystem: {}", e);
                return Ok(None);
            }
        };

        let Some(file) = filesystem.find_file(BANNER_PATH) else {
            return Ok(None);
        };

        let file_size = file.size as usize;
        if !banner::is_banner_size(file_size) {
            return Err(BannerError::InvalidSize(file_size));
        }

        let mut blob = vec![0u8; file_size];
        let actual = read_file(self, Partition::NONE, &file, &mut blob) as usize;
        if actual != file_size {
            return Err(BannerError::ShortRead {
                expected: file_size,
                actual,
            });
        }

        let variant = banner::classify(&blob)?;
        let single_language = if self.region() == Some(Region::NtscJ) {
            Language::Japanese
        } else {
            Language::English
        };

        banner::parse(&blob, variant, single_language, self.text_encoding()).map(Some)
    }
}

impl Volume for VolumeGc {
    fn read(&self, offset: u64, buf: &mut [u8], partition: Partition) -> Result<(), io::Error> {
        if partition != Partition::NONE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "GameCube discs have no partitions",
            ));
        }
        self.reader().read(offset, buf)
    }

    fn game_id(&self, partition: Partition) -> String {
        match self.read_string(GAME_ID_OFFSET, GAME_ID_LEN, partition) {
            Some(id) => id,
            None => {
                log::error!("Failed to read unique ID from disc image");
                NO_UID.to_string()
            }
        }
    }

    fn region(&self) -> Option<Region> {
        self.read_u8(COUNTRY_OFFSET, Partition::NONE).map(region_from_byte)
    }

    fn country(&self, partition: Partition) -> Option<Country> {
        self.read_u8(COUNTRY_OFFSET, partition).map(country_from_byte)
    }

    fn maker_id(&self, partition: Partition) -> String {
        self.read_string(MAKER_ID_OFFSET, MAKER_ID_LEN, partition)
            .unwrap_or_default()
    }

    fn revision(&self, partition: Partition) -> Option<u16> {
        self.read_u8(REVISION_OFFSET, partition).map(u16::from)
    }

    fn internal_name(&self, partition: Partition) -> String {
        self.read_string(INTERNAL_NAME_OFFSET, INTERNAL_NAME_LEN, partition)
            .unwrap_or_default()
    }

    fn disc_number(&self, partition: Partition) -> Option<u8> {
        self.read_u8(DISC_NUMBER_OFFSET, partition)
    }

    fn apploader_date(&self, partition: Partition) -> String {
        self.read_string(APPLOADER_DATE_OFFSET, APPLOADER_DATE_LEN, partition)
            .unwrap_or_default()
    }

    fn short_names(&self) -> LocalizedStrings {
        self.with_banner(|b| b.short_names.clone())
    }

    fn long_names(&self) -> LocalizedStrings {
        self.with_banner(|b| b.long_names.clone())
    }

    fn short_makers(&self) -> LocalizedStrings {
        self.with_banner(|b| b.short_makers.clone())
    }

    fn long_makers(&self) -> LocalizedStrings {
        self.with_banner(|b| b.long_makers.clone())
    }

    fn descriptions(&self) -> LocalizedStrings {
        self.with_banner(|b| b.descriptions.clone())
    }

    fn banner(&self) -> BannerImage {
        self.with_banner(|b| b.image.clone())
    }

    fn platform(&self) -> Platform {
        Platform::GameCubeDisc
    }

    fn blob_type(&self) -> BlobType {
        self.reader().blob_type()
    }

    fn size(&self) -> u64 {
        self.reader().data_size()
    }

    fn raw_size(&self) -> u64 {
        self.reader().raw_size()
    }
}
