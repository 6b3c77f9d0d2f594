//! Byte-range reader trait and implementations for disc image containers

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::formats::BlobType;

/// Random access to the logical bytes of a disc image
///
/// Implementations hide whatever container the image is stored in; callers
/// only ever see a flat byte-addressable stream of `data_size()` bytes.
pub trait BlobReader: Send {
    /// Fill `buf` with the bytes starting at logical `offset`
    ///
    /// Either the whole buffer is filled or an error is returned.
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), io::Error>;

    /// Size of the logical disc data
    fn data_size(&self) -> u64;

    /// Size of the container on disk
    fn raw_size(&self) -> u64;

    /// Container type
    fn blob_type(&self) -> BlobType;
}

/// Blob reader for plain ISO/GCM dumps (direct access)
pub struct IsoBlobReader {
    file: BufReader<File>,
    size: u64,
}

impl IsoBlobReader {
    /// Open a plain disc image
    pub fn new(path: &Path) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            file: BufReader::new(file),
            size,
        })
    }
}

impl BlobReader for IsoBlobReader {
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), io::Error> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(buf)
    }

    fn data_size(&self) -> u64 {
        self.size
    }

    fn raw_size(&self) -> u64 {
        self.size
    }

    fn blob_type(&self) -> BlobType {
        BlobType::Plain
    }
}

/// Blob reader over a disc image already loaded into memory
pub struct MemoryBlobReader {
    data: Vec<u8>,
}

impl MemoryBlobReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl BlobReader for MemoryBlobReader {
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), io::Error> {
        let start = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::UnexpectedEof, "offset out of range"))?;
        let end = start
            .checked_add(buf.len())
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("read of {} bytes at 0x{:x} past end of image", buf.len(), offset),
                )
            })?;
        buf.copy_from_slice(&self.data[start..end]);
        Ok(())
    }

    fn data_size(&self) -> u64 {
        self.data.len() as u64
    }

    fn raw_size(&self) -> u64 {
        self.data.len() as u64
    }

    fn blob_type(&self) -> BlobType {
        BlobType::Memory
    }
}
