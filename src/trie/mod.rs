//! The trie engine: owns the blob and answers queries against it.

mod completion;
mod fuzzy;

pub use fuzzy::Correction;

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use crate::blob::BlobStore;
use crate::error::Result;
use crate::node::{EdgeRun, Node, NodeCache, ROOT_INDEX};

/// A read-only trie decoded lazily from a frozen blob.
///
/// Queries take `&self`; decoded sibling runs and parent links are memoized
/// internally, so one `Trie` can be shared between threads.
pub struct Trie {
    blob: BlobStore,
    root: Node,
    cache: NodeCache,
    case_sensitive: bool,
}

impl Trie {
    /// Build a trie over `blob`. Fails if the blob has no root record.
    pub fn new(blob: BlobStore) -> Result<Self> {
        let root = Node::new(ROOT_INDEX, blob.record_at(ROOT_INDEX)?);
        tracing::debug!(
            records = blob.record_count(),
            bytes = blob.len_bytes(),
            "loaded frozen trie"
        );
        Ok(Self {
            blob,
            root,
            cache: NodeCache::new(),
            case_sensitive: true,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::new(BlobStore::from_bytes(bytes))
    }

    /// Build from a payload that is either raw records or base64 text.
    pub fn from_payload(payload: impl AsRef<[u8]>, is_base64: bool) -> Result<Self> {
        let blob = if is_base64 {
            BlobStore::from_base64(payload)?
        } else {
            BlobStore::from_bytes(payload.as_ref().to_vec())
        };
        Self::new(blob)
    }

    /// Memory-map a raw blob file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(BlobStore::open(path)?)
    }

    /// Load a `var trie_data="...";` companion script.
    pub fn open_script(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(BlobStore::open_script(path)?)
    }

    pub fn root(&self) -> Node {
        self.root
    }

    pub fn blob(&self) -> &BlobStore {
        &self.blob
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// When disabled, queries are lowercased before traversal. Stored letters
    /// are never folded.
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    pub(crate) fn fold<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(word)
        } else {
            Cow::Owned(word.to_lowercase())
        }
    }

    /// Children of `node`, in sibling-run order.
    pub fn edges(&self, node: Node) -> Result<Arc<EdgeRun>> {
        self.cache.edges(&self.blob, node)
    }

    /// The word spelled by the path from the root to `node`.
    ///
    /// `node` must have been reached from this trie's root (through
    /// [`Trie::root`], [`Trie::edges`] or a lookup); otherwise this fails with
    /// [`TrieError::Unanchored`](crate::TrieError::Unanchored).
    pub fn word(&self, node: Node) -> Result<String> {
        self.cache.word(&self.blob, node)
    }

    /// Node reached by spelling `word` from the root, if any.
    pub fn lookup_node(&self, word: &str) -> Result<Option<Node>> {
        self.lookup_node_from(word, self.root)
    }

    /// Node reached by spelling `word` from `start`, if any.
    pub fn lookup_node_from(&self, word: &str, start: Node) -> Result<Option<Node>> {
        let word = self.fold(word);
        self.descend(start, &word)
    }

    /// Follow `word` (already folded) from `start`.
    pub(crate) fn descend(&self, start: Node, word: &str) -> Result<Option<Node>> {
        let mut node = start;
        for letter in word.chars() {
            match self.edges(node)?.get(letter) {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(Some(node))
    }

    /// Whether `word` is a complete dictionary entry.
    pub fn exists(&self, word: &str) -> Result<bool> {
        Ok(self.lookup_node(word)?.is_some_and(|n| n.is_final()))
    }
}

impl std::fmt::Debug for Trie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trie")
            .field("blob", &self.blob)
            .field("case_sensitive", &self.case_sensitive)
            .finish()
    }
}
