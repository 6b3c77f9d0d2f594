//! Disc image handling module
//!
//! Provides byte-range access to GameCube disc images, the disc filesystem
//! index and the [`Volume`] metadata interface built on top of them.

pub mod blob;
pub mod enums;
pub mod filesystem;
pub mod formats;
pub mod text;
pub mod volume;
pub mod volume_gc;

pub use blob::{BlobReader, IsoBlobReader, MemoryBlobReader};
pub use enums::{country_from_byte, region_from_byte, Country, Language, Partition, Platform, Region};
pub use filesystem::{create_filesystem, read_file, FileInfo, Filesystem, FilesystemError};
pub use formats::{supported_extensions, BlobType};
pub use text::{decode_string, TextEncoding};
pub use volume::{open_volume, DiscError, Volume};
pub use volume_gc::{VolumeGc, NO_UID};
