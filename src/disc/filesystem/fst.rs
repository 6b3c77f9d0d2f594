//! GameCube file-system table (FST) implementation

use super::entry::FileInfo;
use super::{Filesystem, FilesystemError};
use crate::disc::enums::Partition;
use crate::disc::text::{decode_string, TextEncoding};
use crate::disc::volume::Volume;

/// Disc header field holding the FST offset and size (two big-endian u32s)
const FST_POINTER_OFFSET: u64 = 0x424;

/// Size of one FST entry
const ENTRY_SIZE: usize = 12;

/// Entry type flag marking a directory
const DIRECTORY_FLAG: u8 = 1;

/// Raw 12-byte FST entry
#[derive(Debug, Clone, Copy)]
struct FstEntry {
    /// 1 for directories, 0 for files
    flags: u8,
    /// Offset of the name in the string table
    name_offset: u32,
    /// Files: data offset. Directories: parent index
    offset: u32,
    /// Files: data length. Directories: index one past the last child
    size: u32,
}

impl FstEntry {
    fn parse(data: &[u8]) -> Self {
        Self {
            flags: data[0],
            name_offset: u32::from_be_bytes([0, data[1], data[2], data[3]]),
            offset: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            size: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
        }
    }

    fn is_directory(&self) -> bool {
        self.flags == DIRECTORY_FLAG
    }
}

/// Directory index built from a disc's FST
pub struct FstFilesystem {
    entries: Vec<FileInfo>,
}

impl FstFilesystem {
    /// Read and index the FST of `volume`
    pub fn new(volume: &dyn Volume, partition: Partition) -> Result<Self, FilesystemError> {
        let mut pointer = [0u8; 8];
        volume.read(FST_POINTER_OFFSET, &mut pointer, partition)?;

        let fst_offset = u32::from_be_bytes([pointer[0], pointer[1], pointer[2], pointer[3]]) as u64;
        let fst_size = u32::from_be_bytes([pointer[4], pointer[5], pointer[6], pointer[7]]) as u64;

        if fst_size < ENTRY_SIZE as u64 {
            return Err(FilesystemError::InvalidData(format!(
                "FST too small: {} bytes",
                fst_size
            )));
        }
        if fst_offset + fst_size > volume.size() {
            return Err(FilesystemError::InvalidData(format!(
                "FST at 0x{:x} (+0x{:x}) lies outside the disc",
                fst_offset, fst_size
            )));
        }

        let mut fst = vec![0u8; fst_size as usize];
        volume.read(fst_offset, &mut fst, partition)?;

        let entries = Self::parse_table(&fst)?;
        log::debug!(
            "Indexed FST at 0x{:x}: {} entries",
            fst_offset,
            entries.len()
        );

        Ok(Self { entries })
    }

    /// Flatten the raw table into entries with full paths
    fn parse_table(fst: &[u8]) -> Result<Vec<FileInfo>, FilesystemError> {
        let root = FstEntry::parse(&fst[..ENTRY_SIZE]);
        if !root.is_directory() {
            return Err(FilesystemError::InvalidData(
                "FST root entry is not a directory".to_string(),
            ));
        }

        let count = root.size as usize;
        let table_size = count
            .checked_mul(ENTRY_SIZE)
            .filter(|&size| count > 0 && size <= fst.len())
            .ok_or_else(|| {
                FilesystemError::InvalidData(format!("FST entry count {} exceeds table", count))
            })?;
        let names = &fst[table_size..];

        let mut entries = Vec::with_capacity(count - 1);
        // (end index, path prefix) for every directory we are inside of
        let mut dirs: Vec<(usize, String)> = vec![(count, String::new())];

        for index in 1..count {
            while dirs.len() > 1 && dirs.last().is_some_and(|(end, _)| index >= *end) {
                dirs.pop();
            }

            let start = index * ENTRY_SIZE;
            let raw = FstEntry::parse(&fst[start..start + ENTRY_SIZE]);

            let name_bytes = names.get(raw.name_offset as usize..).ok_or_else(|| {
                FilesystemError::InvalidData(format!(
                    "FST entry {} name offset 0x{:x} out of range",
                    index, raw.name_offset
                ))
            })?;
            let name = decode_string(name_bytes, TextEncoding::ShiftJis);

            let parent = dirs.last().map(|(_, path)| path.as_str()).unwrap_or("");
            let path = format!("{}/{}", parent, name);

            if raw.is_directory() {
                let end = raw.size as usize;
                if end <= index || end > count {
                    return Err(FilesystemError::InvalidData(format!(
                        "FST directory {} has invalid end index {}",
                        path, end
                    )));
                }
                dirs.push((end, path.clone()));
                entries.push(FileInfo::new_directory(name, path));
            } else {
                entries.push(FileInfo::new_file(name, path, raw.offset as u64, raw.size as u64));
            }
        }

        Ok(entries)
    }
}

impl Filesystem for FstFilesystem {
    fn find_file(&self, path: &str) -> Option<FileInfo> {
        let wanted = path.trim_start_matches('/');
        self.entries
            .iter()
            .find(|entry| {
                entry.is_file() && entry.path.trim_start_matches('/').eq_ignore_ascii_case(wanted)
            })
            .cloned()
    }
}
