//! Canonical Huffman codes rebuilt purely from a code length table.
//!
//! The tree is reconstructed bottom-up, one level at a time: at level `L`
//! the symbols of length `L` (ascending) come first, followed by the nodes
//! of level `L + 1` joined in arrival order, two at a time. Leaves thus sit
//! left of internal nodes on every level, which yields the usual canonical
//! ordering: codes grow numerically with length and, within a length, with
//! symbol value. Encoder and decoder run the same construction, so only the
//! lengths need to be transmitted.

use super::builder::compute_code_lengths;
use super::frequency::FrequencyTable;
use super::tree::{CodeLengths, TreeNode, SYMBOL_LIMIT};
use crate::error::{Error, Result};
use std::fmt;

/// Longest code the encoder's integer code table can hold
pub const MAX_CODE_BITS: u8 = 64;

/// Tree reconstructed from a code length table
///
/// A table with a single symbol of length 1 yields a bare leaf as root; its
/// code is the single bit `0`.
#[derive(Clone, Debug)]
pub struct CanonicalTree {
    lengths: CodeLengths,
    root: Option<TreeNode>,
}

impl CanonicalTree {
    /// Rebuild the canonical tree for `lengths`
    pub fn from_lengths(lengths: CodeLengths) -> Result<Self> {
        let root = rebuild(&lengths)?;
        Ok(Self { lengths, root })
    }

    /// Root node, `None` when no symbol is used
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    pub fn lengths(&self) -> &CodeLengths {
        &self.lengths
    }
}

fn rebuild(lengths: &CodeLengths) -> Result<Option<TreeNode>> {
    let max_len = lengths.max_length() as usize;
    if max_len == 0 {
        return Ok(None);
    }

    // Symbols per length, ascending within each bucket
    let mut by_length: Vec<Vec<u16>> = vec![Vec::new(); max_len + 1];
    for (symbol, len) in lengths.used() {
        by_length[len as usize].push(symbol);
    }

    let mut carry: Vec<TreeNode> = Vec::new();
    for level in (1..=max_len).rev() {
        let mut nodes: Vec<TreeNode> = by_length[level].iter().map(|&s| TreeNode::Leaf(s)).collect();
        pair_into(&mut nodes, carry)?;
        carry = nodes;
    }

    // `carry` now holds the depth-1 nodes
    let mut top = carry.into_iter();
    match (top.next(), top.next(), top.next()) {
        (Some(left), Some(right), None) => Ok(Some(TreeNode::internal(left, right))),
        (Some(leaf @ TreeNode::Leaf(_)), None, None) => Ok(Some(leaf)),
        _ => Err(Error::InvalidCodeLengths),
    }
}

/// Join `carry` pairwise in arrival order and append the parents to `out`
fn pair_into(out: &mut Vec<TreeNode>, carry: Vec<TreeNode>) -> Result<()> {
    if carry.len() % 2 != 0 {
        return Err(Error::InvalidCodeLengths);
    }
    let mut nodes = carry.into_iter();
    while let (Some(left), Some(right)) = (nodes.next(), nodes.next()) {
        out.push(TreeNode::internal(left, right));
    }
    Ok(())
}

/// A single canonical code: the low `length` bits of `value`, MSB first
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code {
    pub value: u64,
    pub length: u8,
}

impl Code {
    /// True if `self` is a bit-prefix of `other`
    ///
    /// The empty code is a prefix of nothing.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.length > 0
            && self.length <= other.length
            && other.value >> (other.length - self.length) == self.value
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.length == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.value, width = self.length as usize)
    }
}

/// Canonical code table plus the tree it was read from
#[derive(Clone, Debug)]
pub struct CanonicalCode {
    tree: CanonicalTree,
    codes: [Code; SYMBOL_LIMIT],
}

impl CanonicalCode {
    /// Derive lengths from the byte frequencies of `data`, then canonicalize
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    /// Derive lengths from `freq`, then canonicalize
    pub fn from_frequencies(freq: &FrequencyTable) -> Result<Self> {
        Self::from_lengths(compute_code_lengths(freq)?)
    }

    /// Canonicalize a known length table
    pub fn from_lengths(lengths: CodeLengths) -> Result<Self> {
        Self::from_tree(CanonicalTree::from_lengths(lengths)?)
    }

    /// Assign codes by walking an already rebuilt tree
    pub fn from_tree(tree: CanonicalTree) -> Result<Self> {
        let max_len = tree.lengths().max_length();
        if max_len > MAX_CODE_BITS {
            let symbol = tree.lengths().used().find(|&(_, l)| l == max_len).map_or(0, |(s, _)| s);
            return Err(Error::CodeTooLong { symbol, length: max_len });
        }

        let mut codes = [Code::default(); SYMBOL_LIMIT];
        match tree.root() {
            None => {}
            // Lone symbol
            Some(TreeNode::Leaf(symbol)) => codes[*symbol as usize] = Code { value: 0, length: 1 },
            Some(root) => assign(root, 0, 0, &mut codes),
        }

        Ok(Self { tree, codes })
    }

    /// Code for `symbol`, `None` if the symbol is unused or out of range
    #[inline]
    pub fn code(&self, symbol: u16) -> Option<Code> {
        self.codes.get(symbol as usize).copied().filter(|c| c.length > 0)
    }

    /// `(symbol, code)` for every used symbol, in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u16, Code)> + '_ {
        self.codes.iter().enumerate().filter(|(_, c)| c.length > 0).map(|(s, &c)| (s as u16, c))
    }

    pub fn lengths(&self) -> &CodeLengths {
        self.tree.lengths()
    }

    pub fn tree(&self) -> &CanonicalTree {
        &self.tree
    }
}

impl PartialEq for CanonicalCode {
    fn eq(&self, other: &Self) -> bool {
        self.codes == other.codes
    }
}
impl Eq for CanonicalCode {}

/// Depth-first walk: `0` going left, `1` going right
fn assign(node: &TreeNode, value: u64, depth: u8, codes: &mut [Code; SYMBOL_LIMIT]) {
    match node {
        TreeNode::Leaf(symbol) => codes[*symbol as usize] = Code { value, length: depth },
        TreeNode::Internal(left, right) => {
            assign(left, value << 1, depth + 1, codes);
            assign(right, (value << 1) | 1, depth + 1, codes);
        }
    }
}
