use crate::bits::BitReader;
use crate::error::{Error, Result};
use crate::huffman::{CanonicalTree, CodeLengths, TreeNode, END_OF_STREAM};
use crate::{CodecConfig, DecodeStats, HEADER_SIZE};
use std::io::{BufReader, BufWriter, Read, Write};

/// Where the symbol walk currently stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeState {
    /// Before the first bit of a symbol
    AtRoot,
    /// Inside the tree, more bits needed
    Descending,
    /// A symbol was just emitted; the next read restarts at the root
    Leaf,
    /// Input exhausted (terminal)
    EndOfStream,
}

/// Walks a canonical tree one bit at a time
pub struct SymbolReader<'a, R: Read> {
    root: Option<&'a TreeNode>,
    bits: BitReader<R>,
    state: DecodeState,
    /// Depth reached when input ran out
    trailing_bits: usize,
}

impl<'a, R: Read> SymbolReader<'a, R> {
    pub fn new(tree: &'a CanonicalTree, bits: BitReader<R>) -> Self {
        Self { root: tree.root(), bits, state: DecodeState::AtRoot, trailing_bits: 0 }
    }

    /// Decode the next symbol, or `None` once the input is exhausted
    pub fn next_symbol(&mut self) -> Result<Option<u16>> {
        if self.state == DecodeState::EndOfStream {
            return Ok(None);
        }
        self.state = DecodeState::AtRoot;

        let mut node = self.root;
        let mut depth = 0;
        loop {
            let Some(bit) = self.bits.read_bit()? else {
                self.trailing_bits = depth;
                self.state = DecodeState::EndOfStream;
                return Ok(None);
            };
            depth += 1;
            self.state = DecodeState::Descending;

            node = match node {
                Some(TreeNode::Internal(left, right)) => Some(if bit { &**right } else { &**left }),
                // Lone-symbol root: only the `0` branch exists
                Some(leaf @ TreeNode::Leaf(_)) if !bit => Some(leaf),
                _ => return Err(Error::UnmappedCode),
            };

            if let Some(TreeNode::Leaf(symbol)) = node {
                self.state = DecodeState::Leaf;
                return Ok(Some(*symbol));
            }
        }
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Bits consumed by the unfinished descent at end of input
    pub fn trailing_bits(&self) -> usize {
        self.trailing_bits
    }

    /// Input bytes consumed so far, header included
    pub fn bytes_consumed(&self) -> u64 {
        self.bits.bytes_consumed()
    }
}

/// Reads the code length header, rebuilds the tree, and replays the payload
pub struct Decoder {
    config: CodecConfig,
}

impl Decoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Read and validate the 257-byte header
    pub fn read_header<R: Read>(bits: &mut BitReader<R>) -> Result<CanonicalTree> {
        let mut header = [0u8; HEADER_SIZE];
        let found = bits.read_bytes(&mut header)?;
        if found < HEADER_SIZE {
            return Err(Error::MalformedHeader { found });
        }
        CanonicalTree::from_lengths(CodeLengths::from(header))
    }

    /// Decode a compressed stream from `input` into `output`
    ///
    /// With a sentinel in the header, decoding stops at it and running out
    /// of input first is an error. Without one, decoding stops at end of
    /// input and an unfinished descent is treated as padding.
    pub fn decode<R: Read, W: Write>(&self, input: R, output: W) -> Result<DecodeStats> {
        let reader = BufReader::with_capacity(self.config.buffer_size, input);
        let mut bits = BitReader::new(reader);
        let tree = Self::read_header(&mut bits)?;

        let lengths = tree.lengths();
        let has_end_marker = lengths.has_end_of_stream();
        let mut stats = DecodeStats {
            distinct_symbols: lengths.used().filter(|&(sym, _)| sym != END_OF_STREAM).count(),
            max_code_length: lengths.max_length(),
            ..Default::default()
        };

        let mut writer = BufWriter::with_capacity(self.config.buffer_size, output);
        let mut symbols = SymbolReader::new(&tree, bits);
        loop {
            match symbols.next_symbol()? {
                Some(END_OF_STREAM) if has_end_marker => {
                    stats.end_marker_seen = true;
                    break;
                }
                Some(symbol) => {
                    writer.write_all(&[symbol as u8])?;
                    stats.output_bytes += 1;
                }
                None if has_end_marker => return Err(Error::UnexpectedEndOfStream),
                None => break,
            }
        }
        writer.flush()?;

        stats.input_bytes = symbols.bytes_consumed();
        stats.trailing_bits = symbols.trailing_bits();
        Ok(stats)
    }
}
