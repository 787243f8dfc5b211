//! # frozen-trie
//!
//! Read-only lookup over a dictionary serialized as a "frozen trie": a flat
//! array of 32-bit big-endian records where each node's children occupy a
//! contiguous run of records, terminated by a flag bit.
//!
//! Supported queries:
//! - exact membership ([`Trie::exists`], [`Trie::lookup_node`])
//! - prefix completion ([`Trie::lookup_completions`])
//! - substring matches anchored at any node ([`Trie::lookup_submatches`])
//! - bounded Levenshtein search ([`Trie::search`])
//!
//! Nodes are decoded on demand; decoded sibling runs are cached per trie.
//!
//! ## Example
//!
//! ```rust
//! use frozen_trie::{BlobStore, Record, Trie};
//!
//! // root -> 'a' (final) -> 'b' (final)
//! let records = [
//!     Record::pack(0x1E, false, true, 1),
//!     Record::pack(b'a', true, true, 2),
//!     Record::pack(b'b', true, true, 0),
//! ];
//! let bytes: Vec<u8> = records.iter().flat_map(|r| r.to_be_bytes()).collect();
//! let trie = Trie::new(BlobStore::from_bytes(bytes)).unwrap();
//!
//! assert!(trie.exists("ab").unwrap());
//! let a = trie.lookup_node("a").unwrap().unwrap();
//! assert_eq!(trie.lookup_completions(a, 10).unwrap(), vec!["ab"]);
//! assert_eq!(trie.search("b", 1).unwrap().get("ab"), Some(&1));
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

pub mod blob;
#[cfg(any(test, feature = "encode"))]
pub mod encode;
pub mod error;
pub mod node;
pub mod record;
pub mod suggest;
pub mod trie;

pub use blob::BlobStore;
pub use error::{Result, TrieError};
pub use node::{EdgeRun, Node, NodeIndex};
pub use record::Record;
pub use suggest::{SearchConfig, Suggestions};
pub use trie::{Correction, Trie};

#[cfg(test)]
mod proptests;
