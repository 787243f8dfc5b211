//! Node views and the per-trie caches that back them.
//!
//! A [`Node`] is a cheap copy of one decoded record plus its index. Children
//! and back-references are not stored on the node itself: they live in a
//! [`NodeCache`] owned by the trie, keyed by record index. A child's parent is
//! recorded when (and only when) the run containing it is decoded.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::blob::BlobStore;
use crate::error::{Result, TrieError};
use crate::record::Record;

/// Index of a record in the blob, in record units.
pub type NodeIndex = u32;

/// Index of the root record.
pub const ROOT_INDEX: NodeIndex = 0;

/// A decoded trie node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    index: NodeIndex,
    record: Record,
}

impl Node {
    #[inline]
    pub(crate) fn new(index: NodeIndex, record: Record) -> Self {
        Self { index, record }
    }

    #[inline]
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Letter of the edge leading into this node. Meaningless for the root.
    #[inline]
    pub fn letter(&self) -> char {
        char::from(self.record.letter())
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.record.is_final()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.index == ROOT_INDEX
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.record.has_children()
    }

    #[inline]
    pub fn record(&self) -> Record {
        self.record
    }
}

/// The children of one node, keyed by letter, in sibling-run order.
#[derive(Clone, Debug, Default)]
pub struct EdgeRun {
    edges: SmallVec<[Node; 4]>,
}

impl EdgeRun {
    /// Insert a child, replacing (in place) an earlier child with the same letter.
    fn insert(&mut self, node: Node) {
        let letter = node.record.letter();
        match self.edges.iter_mut().find(|n| n.record.letter() == letter) {
            Some(slot) => *slot = node,
            None => self.edges.push(node),
        }
    }

    /// Child reached through `letter`, if any.
    #[inline]
    pub fn get(&self, letter: char) -> Option<Node> {
        if !letter.is_ascii() {
            return None;
        }
        let letter = letter as u8;
        self.edges.iter().copied().find(|n| n.record.letter() == letter)
    }

    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.edges.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[derive(Default)]
struct CacheState {
    edges: HashMap<NodeIndex, Arc<EdgeRun>>,
    parents: HashMap<NodeIndex, NodeIndex>,
}

/// Memoized edge runs and parent links, filled on first access.
///
/// Entries are only ever inserted, and inserting the same run twice yields
/// the same contents, so concurrent readers never observe a conflicting state.
#[derive(Default)]
pub(crate) struct NodeCache {
    state: RwLock<CacheState>,
}

impl NodeCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Decoded children of `node`, decoding its sibling run on first access.
    pub(crate) fn edges(&self, blob: &BlobStore, node: Node) -> Result<Arc<EdgeRun>> {
        if !node.has_children() {
            return Ok(Arc::default());
        }
        if let Some(run) = self.state.read().edges.get(&node.index) {
            return Ok(Arc::clone(run));
        }

        let run = Arc::new(decode_run(blob, node)?);
        let mut state = self.state.write();
        for child in run.iter() {
            state.parents.insert(child.index, node.index);
        }
        Ok(Arc::clone(state.edges.entry(node.index).or_insert(run)))
    }

    /// Letters from the root (exclusive) down to `node` (inclusive).
    pub(crate) fn word(&self, blob: &BlobStore, node: Node) -> Result<String> {
        let state = self.state.read();
        let mut letters = Vec::new();
        let mut current = node;
        while !current.is_root() {
            letters.push(current.record.letter());
            let parent = *state
                .parents
                .get(&current.index)
                .ok_or(TrieError::Unanchored { index: node.index })?;
            current = Node::new(parent, blob.record_at(parent)?);
        }
        letters.reverse();
        // Letters are 7-bit, so every byte is a complete ASCII char.
        Ok(letters.into_iter().map(char::from).collect())
    }

    #[cfg(test)]
    pub(crate) fn cached_runs(&self) -> usize {
        self.state.read().edges.len()
    }
}

/// Decode the sibling run starting at `parent`'s first child.
fn decode_run(blob: &BlobStore, parent: Node) -> Result<EdgeRun> {
    let first = parent.record.first_child();
    // Breadth-first layout: children always follow their parent. Anything
    // else would let a traversal loop forever.
    if first <= parent.index {
        return Err(TrieError::Malformed(format!(
            "child run must follow its parent in breadth-first layout: node {} points to child {}",
            parent.index, first
        )));
    }

    let mut run = EdgeRun::default();
    let mut index = first;
    loop {
        let record = blob.record_at(index)?;
        run.insert(Node::new(index, record));
        if record.bft_last() {
            return Ok(run);
        }
        index = index.checked_add(1).ok_or(TrieError::OutOfRange {
            index,
            len: blob.len_bytes(),
        })?;
    }
}
