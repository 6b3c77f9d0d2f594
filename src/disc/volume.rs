//! Volume interface and opening of disc images

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::blob::{BlobReader, IsoBlobReader};
use super::enums::{Country, Partition, Platform, Region};
use super::formats::BlobType;
use super::volume_gc::VolumeGc;
use crate::banner::{BannerImage, LocalizedStrings};

/// GameCube disc magic word, stored big-endian at 0x1C
pub const GC_DISC_MAGIC: u32 = 0xC233_9F3D;

const GC_DISC_MAGIC_OFFSET: u64 = 0x1C;

/// Errors that can occur when opening disc images
#[derive(Error, Debug)]
pub enum DiscError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Not a GameCube disc (magic 0x{magic:08x})")]
    NotGameCube { magic: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Read-only view of a disc's metadata
///
/// Every accessor degrades to an empty or absent value when the underlying
/// data cannot be read; none of them return errors.
pub trait Volume: Send + Sync {
    /// Read raw bytes through the given partition context
    fn read(&self, offset: u64, buf: &mut [u8], partition: Partition) -> Result<(), io::Error>;

    /// Read a single byte, `None` on failure
    fn read_u8(&self, offset: u64, partition: Partition) -> Option<u8> {
        let mut byte = [0u8; 1];
        self.read(offset, &mut byte, partition).ok().map(|_| byte[0])
    }

    /// Six-character game ID
    fn game_id(&self, partition: Partition) -> String;
    fn region(&self) -> Option<Region>;
    fn country(&self, partition: Partition) -> Option<Country>;
    fn maker_id(&self, partition: Partition) -> String;
    fn revision(&self, partition: Partition) -> Option<u16>;
    fn internal_name(&self, partition: Partition) -> String;
    fn disc_number(&self, partition: Partition) -> Option<u8>;
    fn apploader_date(&self, partition: Partition) -> String;

    fn short_names(&self) -> LocalizedStrings;
    fn long_names(&self) -> LocalizedStrings;
    fn short_makers(&self) -> LocalizedStrings;
    fn long_makers(&self) -> LocalizedStrings;
    fn descriptions(&self) -> LocalizedStrings;
    /// Banner image; empty (0x0) when the disc has no usable banner
    fn banner(&self) -> BannerImage;

    fn platform(&self) -> Platform;
    fn blob_type(&self) -> BlobType;
    /// Logical size of the disc data
    fn size(&self) -> u64;
    /// Size of the container on disk
    fn raw_size(&self) -> u64;
}

/// Open a disc image file as a GameCube volume
///
/// # Returns
/// * `Ok(VolumeGc)` - Image opened and carries the GameCube disc magic
/// * `Err(DiscError)` - Missing file, unknown extension, I/O error or foreign disc
pub fn open_volume(path: &Path) -> Result<VolumeGc, DiscError> {
    if !path.exists() {
        return Err(DiscError::FileNotFound(path.to_path_buf()));
    }

    BlobType::from_path(path).ok_or_else(|| {
        DiscError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )
    })?;

    let mut reader: Box<dyn BlobReader> = Box::new(IsoBlobReader::new(path)?);

    let mut magic = [0u8; 4];
    reader.read(GC_DISC_MAGIC_OFFSET, &mut magic)?;
    let magic = u32::from_be_bytes(magic);
    if magic != GC_DISC_MAGIC {
        return Err(DiscError::NotGameCube { magic });
    }

    log::info!("Opened GameCube disc {}", path.display());
    Ok(VolumeGc::new(reader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::DiscBuilder;
    use std::io::Write;

    fn write_image(suffix: &str, data: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_open_volume() {
        let file = write_image(".iso", &DiscBuilder::new(b"GALE01").build());
        let volume = open_volume(file.path()).unwrap();

        assert_eq!(volume.game_id(Partition::NONE), "GALE01");
        assert_eq!(volume.blob_type(), BlobType::Plain);
        assert_eq!(volume.platform(), Platform::GameCubeDisc);
    }

    #[test]
    fn test_file_not_found() {
        let result = open_volume(Path::new("/nonexistent/path.iso"));
        assert!(matches!(result, Err(DiscError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_format() {
        let file = write_image(".xyz", &DiscBuilder::new(b"GALE01").build());
        let result = open_volume(file.path());
        assert!(matches!(result, Err(DiscError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_not_gamecube() {
        let file = write_image(".gcm", &vec![0u8; 0x1000]);
        let result = open_volume(file.path());
        assert!(matches!(result, Err(DiscError::NotGameCube { magic: 0 })));
    }

    #[test]
    fn test_truncated_image() {
        let file = write_image(".iso", b"GALE01");
        assert!(matches!(open_volume(file.path()), Err(DiscError::IoError(_))));
    }
}
