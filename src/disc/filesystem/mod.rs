//! Disc filesystem resolution
//!
//! Resolves paths on a volume to byte ranges. GameCube discs carry a single
//! flat file-system table (FST) describing the whole directory tree.

pub mod entry;
pub mod fst;

pub use entry::{EntryType, FileInfo};
pub use fst::FstFilesystem;

use thiserror::Error;

use super::enums::Partition;
use super::volume::Volume;

/// Errors that can occur while building a filesystem index
#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Abstraction over a disc's directory index
pub trait Filesystem: Send {
    /// Look up a file by path ("/dir/name" or "name"), ignoring ASCII case
    fn find_file(&self, path: &str) -> Option<FileInfo>;
}

/// Build the filesystem index of `volume` for the given partition context
pub fn create_filesystem(
    volume: &dyn Volume,
    partition: Partition,
) -> Result<Box<dyn Filesystem>, FilesystemError> {
    Ok(Box::new(FstFilesystem::new(volume, partition)?))
}

/// Read the start of `file` into `buf`
///
/// Reads `min(file.size, buf.len())` bytes and returns how many were read;
/// a failed read returns 0.
pub fn read_file(volume: &dyn Volume, partition: Partition, file: &FileInfo, buf: &mut [u8]) -> u64 {
    let length = std::cmp::min(file.size, buf.len() as u64) as usize;
    match volume.read(file.offset, &mut buf[..length], partition) {
        Ok(()) => length as u64,
        Err(e) => {
            log::debug!("Failed to read {}: {}", file.path, e);
            0
        }
    }
}
