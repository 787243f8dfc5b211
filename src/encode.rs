//! Reference encoder: dictionary -> frozen trie blob.
//!
//! Only compiled for tests and with the `encode` feature. Nodes are laid out
//! breadth-first, children sorted by letter, so every sibling run is
//! contiguous and every child follows its parent.

use std::collections::{BTreeMap, VecDeque};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Result, TrieError};
use crate::record::{Record, MAX_CHILD_INDEX, RECORD_SIZE};

/// Letter stored in the root record. Never part of a word.
pub const ROOT_SENTINEL: u8 = 0x1E;

#[derive(Default)]
struct BuildNode {
    letter: u8,
    is_final: bool,
    children: BTreeMap<u8, usize>,
}

/// Encode `words` as raw big-endian records.
pub fn encode<I, S>(words: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut nodes = vec![BuildNode {
        letter: ROOT_SENTINEL,
        ..BuildNode::default()
    }];

    for word in words {
        let word = word.as_ref();
        let mut current = 0;
        for &letter in word.as_bytes() {
            if !letter.is_ascii() {
                return Err(TrieError::Encode(format!(
                    "{:?} contains a letter outside 7-bit ASCII",
                    word
                )));
            }
            current = match nodes[current].children.get(&letter) {
                Some(&child) => child,
                None => {
                    let child = nodes.len();
                    nodes.push(BuildNode {
                        letter,
                        ..BuildNode::default()
                    });
                    nodes[current].children.insert(letter, child);
                    child
                }
            };
        }
        nodes[current].is_final = true;
    }

    // Breadth-first numbering; order[i] is the build node stored at record i.
    let mut order = Vec::with_capacity(nodes.len());
    let mut bft_id = vec![0usize; nodes.len()];
    let mut bft_last = vec![false; nodes.len()];
    let mut queue = VecDeque::from([0usize]);
    bft_last[0] = true;
    while let Some(id) = queue.pop_front() {
        bft_id[id] = order.len();
        order.push(id);
        let count = nodes[id].children.len();
        for (i, &child) in nodes[id].children.values().enumerate() {
            bft_last[child] = i + 1 == count;
            queue.push_back(child);
        }
    }

    if order.len() > MAX_CHILD_INDEX as usize + 1 {
        return Err(TrieError::Encode(format!(
            "{} nodes exceed the addressable record range",
            order.len()
        )));
    }

    let mut out = Vec::with_capacity(order.len() * RECORD_SIZE);
    for &id in &order {
        let node = &nodes[id];
        let first_child = node
            .children
            .values()
            .next()
            .map_or(0, |&child| bft_id[child] as u32);
        let record = Record::pack(node.letter, node.is_final, bft_last[id], first_child);
        out.extend_from_slice(&record.to_be_bytes());
    }
    Ok(out)
}

/// Encode `words` as standard base64 text.
pub fn encode_base64<I, S>(words: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(STANDARD.encode(encode(words)?))
}

/// Encode `words` as a `var trie_data="...";` companion script.
pub fn encode_script<I, S>(words: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(format!("var trie_data=\"{}\";", encode_base64(words)?))
}
