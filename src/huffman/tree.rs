//! Alphabet constants, the owned code tree, and the code length table.

use crate::error::{Error, Result};
use std::fmt;

/// Number of symbol slots: byte values 0-255 plus the end-of-stream sentinel
pub const SYMBOL_LIMIT: usize = 257;

/// Reserved end-of-stream symbol (slot 256)
pub const END_OF_STREAM: u16 = 256;

/// Longest code length the one-byte-per-symbol header can carry
pub const MAX_CODE_LENGTH: usize = u8::MAX as usize;

/// A node of a Huffman code tree
///
/// Each internal node owns both children. Trees are built fresh on the
/// encode and decode side and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeNode {
    Leaf(u16),
    Internal(Box<TreeNode>, Box<TreeNode>),
}

impl TreeNode {
    pub fn internal(left: TreeNode, right: TreeNode) -> Self {
        Self::Internal(Box::new(left), Box::new(right))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Call `visit(symbol, depth)` for every leaf, left to right
    pub fn for_each_leaf<F: FnMut(u16, usize)>(&self, visit: &mut F) {
        fn walk<F: FnMut(u16, usize)>(node: &TreeNode, depth: usize, visit: &mut F) {
            match node {
                TreeNode::Leaf(symbol) => visit(*symbol, depth),
                TreeNode::Internal(left, right) => {
                    walk(left, depth + 1, visit);
                    walk(right, depth + 1, visit);
                }
            }
        }
        walk(self, 0, visit);
    }

    /// Number of leaves below (and including) this node
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.for_each_leaf(&mut |_, _| count += 1);
        count
    }
}

/// Code length per symbol slot, 0 meaning "unused"
///
/// Always exactly [`SYMBOL_LIMIT`] entries; this is also the on-disk header.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeLengths([u8; SYMBOL_LIMIT]);

impl CodeLengths {
    pub fn new() -> Self {
        Self([0; SYMBOL_LIMIT])
    }

    /// Build from a slice, which must hold exactly 257 lengths
    pub fn from_slice(lengths: &[u8]) -> Result<Self> {
        let table: [u8; SYMBOL_LIMIT] = lengths.try_into().map_err(|_| {
            Error::LengthTableSize { expected: SYMBOL_LIMIT, found: lengths.len() }
        })?;
        Ok(Self(table))
    }

    /// Length for `symbol`; 0 for unused or out-of-range symbols
    #[inline]
    pub fn get(&self, symbol: u16) -> u8 {
        self.0.get(symbol as usize).copied().unwrap_or(0)
    }

    /// # Panics
    ///
    /// Panics if `symbol >= SYMBOL_LIMIT`.
    #[inline]
    pub fn set(&mut self, symbol: u16, length: u8) {
        self.0[symbol as usize] = length;
    }

    pub fn as_bytes(&self) -> &[u8; SYMBOL_LIMIT] {
        &self.0
    }

    /// Longest code length in the table (0 when empty)
    pub fn max_length(&self) -> u8 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// `(symbol, length)` for every used symbol, in ascending symbol order
    pub fn used(&self) -> impl Iterator<Item = (u16, u8)> + '_ {
        self.0.iter().enumerate().filter(|&(_, &len)| len > 0).map(|(sym, &len)| (sym as u16, len))
    }

    /// Number of symbols with a non-zero length
    pub fn used_count(&self) -> usize {
        self.0.iter().filter(|&&len| len > 0).count()
    }

    /// True if no symbol is used
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&len| len == 0)
    }

    /// Whether the table reserves a code for the end-of-stream sentinel
    pub fn has_end_of_stream(&self) -> bool {
        self.get(END_OF_STREAM) > 0
    }
}

impl Default for CodeLengths {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u8; SYMBOL_LIMIT]> for CodeLengths {
    fn from(table: [u8; SYMBOL_LIMIT]) -> Self {
        Self(table)
    }
}

impl fmt::Debug for CodeLengths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 257 mostly-zero entries are noise; show the used ones
        f.debug_map().entries(self.used()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_size_checked() {
        assert!(CodeLengths::from_slice(&[0u8; SYMBOL_LIMIT]).is_ok());
        match CodeLengths::from_slice(&[1u8, 1]) {
            Err(Error::LengthTableSize { expected, found }) => {
                assert_eq!(expected, 257);
                assert_eq!(found, 2);
            }
            other => panic!("expected LengthTableSize, got {:?}", other),
        }
    }

    #[test]
    fn test_used_in_symbol_order() {
        let mut lengths = CodeLengths::new();
        lengths.set(98, 2);
        lengths.set(3, 1);
        lengths.set(END_OF_STREAM, 2);

        let used: Vec<(u16, u8)> = lengths.used().collect();
        assert_eq!(used, vec![(3, 1), (98, 2), (256, 2)]);
        assert_eq!(lengths.used_count(), 3);
        assert_eq!(lengths.max_length(), 2);
        assert!(lengths.has_end_of_stream());
        assert!(!lengths.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let lengths = CodeLengths::default();
        assert!(lengths.is_empty());
        assert_eq!(lengths.max_length(), 0);
        assert_eq!(lengths.as_bytes().len(), SYMBOL_LIMIT);
    }

    #[test]
    fn test_leaf_walk_depths() {
        // ((a, b), c)
        let tree = TreeNode::internal(
            TreeNode::internal(TreeNode::Leaf(b'a' as u16), TreeNode::Leaf(b'b' as u16)),
            TreeNode::Leaf(b'c' as u16),
        );
        let mut seen = Vec::new();
        tree.for_each_leaf(&mut |sym, depth| seen.push((sym as u8, depth)));
        assert_eq!(seen, vec![(b'a', 2), (b'b', 2), (b'c', 1)]);
        assert_eq!(tree.leaf_count(), 3);
        assert!(!tree.is_leaf());
    }

    #[test]
    fn test_get_out_of_range() {
        let mut lengths = CodeLengths::new();
        lengths.set(END_OF_STREAM, 3);
        assert_eq!(lengths.get(END_OF_STREAM), 3);
        assert_eq!(lengths.get(SYMBOL_LIMIT as u16), 0);
        assert_eq!(lengths.get(u16::MAX), 0);
    }
}
