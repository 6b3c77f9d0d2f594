//! File entry structures for the disc filesystem

/// A single file or directory resolved from the disc's file table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// File/directory name
    pub name: String,
    /// Full path from root (e.g., "/audio/opening.adp")
    pub path: String,
    /// Entry type (file or directory)
    pub entry_type: EntryType,
    /// Byte offset of the file data on the disc (0 for directories)
    pub offset: u64,
    /// File size in bytes (0 for directories)
    pub size: u64,
}

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
}

impl FileInfo {
    /// Create a new file entry
    pub fn new_file(name: String, path: String, offset: u64, size: u64) -> Self {
        Self {
            name,
            path,
            entry_type: EntryType::File,
            offset,
            size,
        }
    }

    /// Create a new directory entry
    pub fn new_directory(name: String, path: String) -> Self {
        Self {
            name,
            path,
            entry_type: EntryType::Directory,
            offset: 0,
            size: 0,
        }
    }

    /// Check if this is a file
    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }
}
