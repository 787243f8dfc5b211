//! Blob store: the raw record buffer backing a frozen trie.
//!
//! The buffer is either owned (decoded from a text payload, or handed over by
//! the caller) or memory-mapped from a file. Either way it is immutable once
//! the store is built.

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use memmap2::Mmap;

use crate::error::{Result, TrieError};
use crate::record::{Record, RECORD_SIZE};

enum Storage {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for Storage {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Storage::Owned(v) => v,
            Storage::Mapped(m) => m,
        }
    }
}

/// Fixed-size record access over a byte buffer.
pub struct BlobStore {
    data: Storage,
}

impl BlobStore {
    /// Wrap raw big-endian records.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::with_storage(Storage::Owned(bytes))
    }

    /// Decode a standard-alphabet base64 payload.
    pub fn from_base64(text: impl AsRef<[u8]>) -> Result<Self> {
        let bytes = STANDARD.decode(text.as_ref().trim_ascii())?;
        Ok(Self::from_bytes(bytes))
    }

    /// Decode a companion script of the form `var trie_data="<base64>";`.
    pub fn from_script(script: &str) -> Result<Self> {
        let payload = script
            .find('"')
            .zip(script.rfind('"'))
            .filter(|(start, end)| start < end)
            .map(|(start, end)| &script[start + 1..end])
            .ok_or_else(|| TrieError::Malformed("script carries no quoted trie payload".into()))?;
        Self::from_base64(payload)
    }

    /// Memory-map a file of raw records.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        if file.metadata()?.len() == 0 {
            return Ok(Self::from_bytes(Vec::new()));
        }
        // SAFETY: the mapping is read-only and the blob is treated as immutable
        // for the lifetime of the store; callers must not truncate the file
        // while it is mapped.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self::with_storage(Storage::Mapped(mmap)))
    }

    /// Read a companion script from disk and decode it.
    pub fn open_script(path: impl AsRef<Path>) -> Result<Self> {
        let script = std::fs::read_to_string(path.as_ref())?;
        Self::from_script(&script)
    }

    fn with_storage(data: Storage) -> Self {
        let trailing = data.len() % RECORD_SIZE;
        if trailing != 0 {
            tracing::warn!(
                bytes = data.len(),
                trailing,
                "blob length is not a multiple of the record size; trailing bytes are ignored"
            );
        }
        Self { data }
    }

    /// Length of the underlying buffer in bytes.
    pub fn len_bytes(&self) -> usize {
        self.data.len()
    }

    /// Number of complete records in the buffer.
    pub fn record_count(&self) -> usize {
        self.data.len() / RECORD_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Decode the record at `index` (in record units).
    #[inline]
    pub fn record_at(&self, index: u32) -> Result<Record> {
        let start = index as usize * RECORD_SIZE;
        let bytes = self
            .data
            .get(start..start + RECORD_SIZE)
            .ok_or(TrieError::OutOfRange {
                index,
                len: self.data.len(),
            })?;
        let mut buf = [0u8; RECORD_SIZE];
        buf.copy_from_slice(bytes);
        Ok(Record::from_be_bytes(buf))
    }
}

impl std::fmt::Debug for BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backing = match self.data {
            Storage::Owned(_) => "owned",
            Storage::Mapped(_) => "mapped",
        };
        f.debug_struct("BlobStore")
            .field("backing", &backing)
            .field("bytes", &self.data.len())
            .finish()
    }
}
