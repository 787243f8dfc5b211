//! Node decoder: one 32-bit big-endian record per trie node.
//!
//! Layout (as an integer, after big-endian decoding):
//! - Bits 0..=6: letter (7-bit ASCII) labelling the edge into this node
//! - Bit 7: final (the path from the root spells a dictionary word)
//! - Bit 8: last record of its sibling run
//! - Bits 9..=31: index of the first child, `0` = no children

use std::fmt;

/// Size of one record in bytes.
pub const RECORD_SIZE: usize = 4;

pub const LETTER_MASK: u32 = 0x7F;
pub const FINAL_MASK: u32 = 1 << 7;
pub const BFT_LAST_MASK: u32 = 1 << 8;
const CHILD_SHIFT: u32 = 9;

/// Largest first-child index a record can address.
pub const MAX_CHILD_INDEX: u32 = (1 << (32 - CHILD_SHIFT)) - 1;

/// A single decoded record.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Record(u32);

impl Record {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn from_be_bytes(bytes: [u8; RECORD_SIZE]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Packs the fields of a record.
    pub fn pack(letter: u8, is_final: bool, bft_last: bool, first_child: u32) -> Self {
        debug_assert!(u32::from(letter) <= LETTER_MASK);
        debug_assert!(first_child <= MAX_CHILD_INDEX);
        let mut raw = (first_child << CHILD_SHIFT) | (u32::from(letter) & LETTER_MASK);
        if is_final {
            raw |= FINAL_MASK;
        }
        if bft_last {
            raw |= BFT_LAST_MASK;
        }
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn to_be_bytes(self) -> [u8; RECORD_SIZE] {
        self.0.to_be_bytes()
    }

    #[inline]
    pub fn letter(self) -> u8 {
        (self.0 & LETTER_MASK) as u8
    }

    #[inline]
    pub fn is_final(self) -> bool {
        self.0 & FINAL_MASK != 0
    }

    #[inline]
    pub fn bft_last(self) -> bool {
        self.0 & BFT_LAST_MASK != 0
    }

    #[inline]
    pub fn first_child(self) -> u32 {
        self.0 >> CHILD_SHIFT
    }

    #[inline]
    pub fn has_children(self) -> bool {
        self.first_child() != 0
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("letter", &char::from(self.letter()))
            .field("is_final", &self.is_final())
            .field("bft_last", &self.bft_last())
            .field("first_child", &self.first_child())
            .finish()
    }
}
