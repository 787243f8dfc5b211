//! Error types for frozen trie operations.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrieError {
    /// A record index points past the end of the blob.
    #[error("record {index} is out of range for a blob of {len} bytes")]
    OutOfRange { index: u32, len: usize },

    #[error("malformed trie: {0}")]
    Malformed(String),

    /// Word reconstruction was asked for a node whose ancestry this trie never
    /// discovered (e.g. a node taken from another `Trie`).
    #[error("node {index} is not anchored to the root of this trie")]
    Unanchored { index: u32 },

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("encode error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, TrieError>;
