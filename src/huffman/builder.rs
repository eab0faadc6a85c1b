use super::frequency::FrequencyTable;
use super::tree::{CodeLengths, TreeNode, MAX_CODE_LENGTH};
use crate::error::{Error, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Heap entry for the greedy merge
///
/// Ordered by weight, then by insertion sequence, so equal weights pop
/// in a fixed order regardless of heap internals.
struct HeapNode {
    weight: u64,
    seq: u64,
    node: TreeNode,
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for HeapNode {}
impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight).then(self.seq.cmp(&other.seq))
    }
}

/// Build a Huffman tree minimizing weighted path length
///
/// Leaves are seeded in ascending symbol order. The first node popped in
/// each merge becomes the left child. Returns `None` when no symbol occurs;
/// a lone symbol yields a bare leaf.
pub fn build_tree(freq: &FrequencyTable) -> Option<TreeNode> {
    let mut heap: BinaryHeap<Reverse<HeapNode>> = freq
        .iter()
        .enumerate()
        .map(|(seq, (sym, weight))| {
            Reverse(HeapNode { weight, seq: seq as u64, node: TreeNode::Leaf(sym) })
        })
        .collect();
    let mut next_seq = heap.len() as u64;

    loop {
        let Reverse(left) = heap.pop()?;
        let Some(Reverse(right)) = heap.pop() else {
            return Some(left.node);
        };

        heap.push(Reverse(HeapNode {
            weight: left.weight + right.weight,
            seq: next_seq,
            node: TreeNode::internal(left.node, right.node),
        }));
        next_seq += 1;
    }
}

/// Read each leaf's depth off `root` as its code length
///
/// A bare-leaf root (one distinct symbol) gets length 1.
pub fn code_lengths_from_tree(root: &TreeNode) -> Result<CodeLengths> {
    let mut lengths = CodeLengths::new();
    let mut overflow = None;

    root.for_each_leaf(&mut |symbol, depth| {
        // Minimum code length is 1
        let depth = depth.max(1);
        if depth > MAX_CODE_LENGTH {
            overflow.get_or_insert(Error::CodeLengthOverflow { symbol, length: depth });
        } else {
            lengths.set(symbol, depth as u8);
        }
    });

    match overflow {
        Some(err) => Err(err),
        None => Ok(lengths),
    }
}

/// Compute optimal code lengths for the given frequencies
///
/// Unused symbols (and every symbol, for empty input) get length 0.
pub fn compute_code_lengths(freq: &FrequencyTable) -> Result<CodeLengths> {
    match build_tree(freq) {
        Some(root) => code_lengths_from_tree(&root),
        None => Ok(CodeLengths::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::tree::END_OF_STREAM;

    fn kraft_sum(lengths: &CodeLengths) -> f64 {
        lengths.used().map(|(_, l)| 2f64.powi(-(l as i32))).sum()
    }

    #[test]
    fn test_empty_frequencies() {
        let freq = FrequencyTable::new();
        assert!(build_tree(&freq).is_none());
        let lengths = compute_code_lengths(&freq).unwrap();
        assert!(lengths.is_empty());
    }

    #[test]
    fn test_single_symbol_gets_length_one() {
        let freq = FrequencyTable::from_bytes(b"zzzzzz");
        let tree = build_tree(&freq).unwrap();
        assert_eq!(tree, TreeNode::Leaf(b'z' as u16));

        let lengths = compute_code_lengths(&freq).unwrap();
        assert_eq!(lengths.get(b'z' as u16), 1);
        assert_eq!(lengths.used_count(), 1);
    }

    #[test]
    fn test_two_symbols() {
        let freq = FrequencyTable::from_bytes(b"aaab");
        let tree = build_tree(&freq).unwrap();
        // b (weight 1) pops first and becomes the left child
        assert_eq!(
            tree,
            TreeNode::internal(TreeNode::Leaf(b'b' as u16), TreeNode::Leaf(b'a' as u16))
        );

        let lengths = compute_code_lengths(&freq).unwrap();
        assert_eq!(lengths.get(b'a' as u16), 1);
        assert_eq!(lengths.get(b'b' as u16), 1);
        assert_eq!(lengths.used_count(), 2);
    }

    #[test]
    fn test_skewed_frequencies() {
        let mut data = vec![b'a'; 100];
        data.extend_from_slice(b"bcd");
        let lengths = compute_code_lengths(&FrequencyTable::from_bytes(&data)).unwrap();

        // Most frequent should have shortest code
        assert_eq!(lengths.get(b'a' as u16), 1);
        assert!(lengths.get(b'a' as u16) <= lengths.get(b'b' as u16));
        assert!(lengths.get(b'a' as u16) <= lengths.get(b'c' as u16));
        assert!(lengths.get(b'a' as u16) <= lengths.get(b'd' as u16));
        assert_eq!(kraft_sum(&lengths), 1.0);
    }

    #[test]
    fn test_equal_frequencies() {
        let lengths = compute_code_lengths(&FrequencyTable::from_bytes(b"abcd")).unwrap();
        assert!(lengths.used().all(|(_, l)| l == 2));
        assert_eq!(kraft_sum(&lengths), 1.0);
    }

    #[test]
    fn test_weighted_path_length_is_optimal() {
        // Classic example: weights 5, 9, 12, 13, 16, 45 -> cost 224
        let mut freq = FrequencyTable::new();
        for (sym, count) in [(b'a', 5), (b'b', 9), (b'c', 12), (b'd', 13), (b'e', 16), (b'f', 45)] {
            freq.count_bytes(&vec![sym; count]);
        }
        let lengths = compute_code_lengths(&freq).unwrap();
        let cost: u64 = freq.iter().map(|(sym, c)| c * lengths.get(sym) as u64).sum();
        assert_eq!(cost, 224);
        assert_eq!(lengths.get(b'f' as u16), 1);
    }

    #[test]
    fn test_deterministic() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let freq = FrequencyTable::from_bytes(data);
        let first = compute_code_lengths(&freq).unwrap();
        for _ in 0..10 {
            assert_eq!(compute_code_lengths(&freq).unwrap(), first);
        }
    }

    #[test]
    fn test_end_of_stream_slot() {
        let mut freq = FrequencyTable::from_bytes(b"aaab");
        freq.count_end_of_stream();
        let lengths = compute_code_lengths(&freq).unwrap();
        assert_eq!(lengths.get(b'a' as u16), 1);
        assert_eq!(lengths.get(b'b' as u16), 2);
        assert_eq!(lengths.get(END_OF_STREAM), 2);
    }

    #[test]
    fn test_fibonacci_depth() {
        // Fibonacci weights give the deepest possible tree: n symbols, depth n-1
        let mut freq = FrequencyTable::new();
        let (mut a, mut b) = (1usize, 1usize);
        for sym in 0u8..12 {
            freq.count_bytes(&vec![sym; a]);
            (a, b) = (b, a + b);
        }
        let lengths = compute_code_lengths(&freq).unwrap();
        assert_eq!(lengths.max_length(), 11);
        assert_eq!(kraft_sum(&lengths), 1.0);
    }
}
