//! Prefix completion and submatch search.
//!
//! Both walk the trie depth-first with an explicit LIFO stack: a popped node's
//! children are examined in sibling-run order and pushed in that order, so the
//! last child is expanded first. When a cap truncates the output, this order
//! decides which words are returned.

use std::collections::HashSet;

use super::Trie;
use crate::error::Result;
use crate::node::{Node, NodeIndex};

/// Collected nodes, capped, without duplicates.
struct Collector {
    nodes: Vec<Node>,
    seen: HashSet<NodeIndex>,
    cap: usize,
}

impl Collector {
    fn new(cap: usize) -> Self {
        Self {
            nodes: Vec::new(),
            seen: HashSet::new(),
            cap,
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.nodes.len() >= self.cap
    }

    fn push(&mut self, node: Node) {
        if !self.is_full() && self.seen.insert(node.index()) {
            self.nodes.push(node);
        }
    }

    fn into_words(self, trie: &Trie) -> Result<Vec<String>> {
        self.nodes.into_iter().map(|n| trie.word(n)).collect()
    }
}

impl Trie {
    /// Up to `max_results` dictionary words strictly below `start`.
    ///
    /// `start` itself is never returned, even when final.
    pub fn lookup_completions(&self, start: Node, max_results: usize) -> Result<Vec<String>> {
        let mut out = Collector::new(max_results);
        self.collect_completions(start, &mut out)?;
        tracing::trace!(
            start = start.index(),
            max_results,
            found = out.nodes.len(),
            "lookup_completions"
        );
        out.into_words(self)
    }

    fn collect_completions(&self, start: Node, out: &mut Collector) -> Result<()> {
        if out.is_full() {
            return Ok(());
        }
        let mut stack = vec![start];
        while let Some(vertex) = stack.pop() {
            for child in self.edges(vertex)?.iter() {
                if child.is_final() {
                    out.push(child);
                }
                if out.is_full() {
                    return Ok(());
                }
                stack.push(child);
            }
        }
        Ok(())
    }

    /// Up to `max_submatches` dictionary words containing `word` anywhere,
    /// not only as a prefix.
    ///
    /// Every node of the trie (the root first, then depth-first) is tried as
    /// the point where `word` starts; a match contributes itself when final,
    /// then its completions. The whole walk stops once the cap is reached.
    pub fn lookup_submatches(&self, word: &str, max_submatches: usize) -> Result<Vec<String>> {
        let word = self.fold(word);
        let mut out = Collector::new(max_submatches);

        if !out.is_full() {
            self.submatches_at(self.root, &word, &mut out)?;
        }

        let mut stack = vec![self.root];
        'walk: while !out.is_full() {
            let Some(vertex) = stack.pop() else {
                break;
            };
            for child in self.edges(vertex)?.iter() {
                self.submatches_at(child, &word, &mut out)?;
                if out.is_full() {
                    break 'walk;
                }
                stack.push(child);
            }
        }

        tracing::trace!(
            query = %word,
            max_submatches,
            found = out.nodes.len(),
            "lookup_submatches"
        );
        out.into_words(self)
    }

    fn submatches_at(&self, node: Node, word: &str, out: &mut Collector) -> Result<()> {
        let Some(found) = self.descend(node, word)? else {
            return Ok(());
        };
        if found.is_final() {
            out.push(found);
        }
        self.collect_completions(found, out)
    }
}
