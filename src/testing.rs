//! Synthetic disc and banner images for unit tests

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::banner::{BNR1_SIZE, BNR2_SIZE, INFO_OFFSET, INFO_SIZE};
use crate::disc::volume::GC_DISC_MAGIC;
use crate::disc::{BlobReader, BlobType, MemoryBlobReader};

/// Where the builder places the FST
const FST_OFFSET: usize = 0x2460;

/// Text for one banner record
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRecord<'a> {
    pub short_name: &'a str,
    pub short_maker: &'a str,
    pub long_name: &'a str,
    pub long_maker: &'a str,
    pub description: &'a str,
}

/// Builds `opening.bnr` blobs
pub struct BannerBuilder {
    blob: Vec<u8>,
}

impl BannerBuilder {
    pub fn single() -> Self {
        let mut blob = vec![0u8; BNR1_SIZE];
        blob[..4].copy_from_slice(b"BNR1");
        Self { blob }
    }

    pub fn six() -> Self {
        let mut blob = vec![0u8; BNR2_SIZE];
        blob[..4].copy_from_slice(b"BNR2");
        Self { blob }
    }

    pub fn record(mut self, slot: usize, text: TextRecord<'_>) -> Self {
        let base = INFO_OFFSET + slot * INFO_SIZE;
        let fields = [
            (0x00, text.short_name),
            (0x20, text.short_maker),
            (0x40, text.long_name),
            (0x80, text.long_maker),
            (0xC0, text.description),
        ];
        for (offset, value) in fields {
            let start = base + offset;
            self.blob[start..start + value.len()].copy_from_slice(value.as_bytes());
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.blob
    }
}

enum Node {
    File(String, Vec<u8>),
    Dir(String, Vec<Node>),
}

/// Builds minimal GameCube disc images with a header, FST and files
pub struct DiscBuilder {
    header: Vec<u8>,
    root: Vec<Node>,
}

impl DiscBuilder {
    pub fn new(game_id: &[u8; 6]) -> Self {
        let mut header = vec![0u8; FST_OFFSET];
        header[..6].copy_from_slice(game_id);
        header[0x1C..0x20].copy_from_slice(&GC_DISC_MAGIC.to_be_bytes());
        Self {
            header,
            root: Vec::new(),
        }
    }

    pub fn internal_name(mut self, name: &str) -> Self {
        self.header[0x20..0x20 + name.len()].copy_from_slice(name.as_bytes());
        self
    }

    pub fn revision(mut self, revision: u8) -> Self {
        self.header[7] = revision;
        self
    }

    pub fn disc_number(mut self, number: u8) -> Self {
        self.header[6] = number;
        self
    }

    pub fn apploader_date(mut self, date: &str) -> Self {
        self.header[0x2440..0x2440 + date.len()].copy_from_slice(date.as_bytes());
        self
    }

    /// Add a file at a "/"-separated path, creating directories as needed
    pub fn file(mut self, path: &str, data: Vec<u8>) -> Self {
        let parts: Vec<&str> = path.split('/').collect();
        let mut dir = &mut self.root;
        for part in &parts[..parts.len() - 1] {
            let index = match dir
                .iter()
                .position(|n| matches!(n, Node::Dir(name, _) if name == part))
            {
                Some(i) => i,
                None => {
                    dir.push(Node::Dir(part.to_string(), Vec::new()));
                    dir.len() - 1
                }
            };
            dir = match &mut dir[index] {
                Node::Dir(_, children) => children,
                Node::File(..) => unreachable!(),
            };
        }
        dir.push(Node::File(parts[parts.len() - 1].to_string(), data));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut entries: Vec<[u32; 3]> = vec![[0x0100_0000, 0, 0]];
        let mut names = Vec::new();
        let mut files: Vec<(usize, Vec<u8>)> = Vec::new();
        Self::flatten(&self.root, 0, &mut entries, &mut names, &mut files);
        entries[0][2] = entries.len() as u32;

        let fst_size = entries.len() * 12 + names.len();
        let mut data_offset = (FST_OFFSET + fst_size + 0x1F) & !0x1F;
        let mut blobs = Vec::new();
        for (index, data) in files {
            entries[index][1] = data_offset as u32;
            blobs.push((data_offset, data.len(), data));
            data_offset = (data_offset + blobs.last().map_or(0, |b| b.1) + 0x1F) & !0x1F;
        }

        let mut image = self.header;
        image.resize(data_offset.max(FST_OFFSET + fst_size), 0);
        image[0x424..0x428].copy_from_slice(&(FST_OFFSET as u32).to_be_bytes());
        image[0x428..0x42C].copy_from_slice(&(fst_size as u32).to_be_bytes());

        let mut fst = Vec::with_capacity(fst_size);
        for entry in &entries {
            for word in entry {
                fst.extend_from_slice(&word.to_be_bytes());
            }
        }
        fst.extend_from_slice(&names);
        image[FST_OFFSET..FST_OFFSET + fst_size].copy_from_slice(&fst);

        for (offset, len, data) in blobs {
            image[offset..offset + len].copy_from_slice(&data);
        }
        image
    }

    fn flatten(
        nodes: &[Node],
        parent: usize,
        entries: &mut Vec<[u32; 3]>,
        names: &mut Vec<u8>,
        files: &mut Vec<(usize, Vec<u8>)>,
    ) {
        for node in nodes {
            let name_offset = names.len() as u32;
            match node {
                Node::File(name, data) => {
                    names.extend_from_slice(name.as_bytes());
                    names.push(0);
                    files.push((entries.len(), data.clone()));
                    entries.push([name_offset, 0, data.len() as u32]);
                }
                Node::Dir(name, children) => {
                    names.extend_from_slice(name.as_bytes());
                    names.push(0);
                    let index = entries.len();
                    entries.push([0x0100_0000 | name_offset, parent as u32, 0]);
                    Self::flatten(children, index, entries, names, files);
                    entries[index][2] = entries.len() as u32;
                }
            }
        }
    }
}

/// Blob reader that counts reads and can fail at one offset
pub struct SpyReader {
    inner: MemoryBlobReader,
    reads: Arc<AtomicUsize>,
    fail_at: Option<u64>,
}

impl SpyReader {
    pub fn new(image: Vec<u8>) -> (Self, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let spy = Self {
            inner: MemoryBlobReader::new(image),
            reads: Arc::clone(&reads),
            fail_at: None,
        };
        (spy, reads)
    }

    pub fn failing_at(mut self, offset: u64) -> Self {
        self.fail_at = Some(offset);
        self
    }
}

impl BlobReader for SpyReader {
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), io::Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(offset) {
            return Err(io::Error::new(io::ErrorKind::Other, "injected read failure"));
        }
        self.inner.read(offset, buf)
    }

    fn data_size(&self) -> u64 {
        self.inner.data_size()
    }

    fn raw_size(&self) -> u64 {
        self.inner.raw_size() + 0x100
    }

    fn blob_type(&self) -> BlobType {
        BlobType::Memory
    }
}
