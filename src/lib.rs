pub mod bits;
pub mod codec;
pub mod error;
pub mod huffman;

pub use codec::{Decoder, Encoder};
pub use error::{Error, Result};
pub use huffman::{CanonicalCode, CanonicalTree, Code, CodeLengths, FrequencyTable, TreeNode};
pub use huffman::{END_OF_STREAM, SYMBOL_LIMIT};

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Size of the code length header at the start of every compressed stream
pub const HEADER_SIZE: usize = SYMBOL_LIMIT;

/// When the encoder codes the end-of-stream sentinel (symbol 256)
///
/// The decoder needs no setting: a non-zero header length at slot 256 tells
/// it to stop at the sentinel instead of at physical end of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EndMarker {
    /// Only when the final zero padding would spell a complete code
    #[default]
    Auto,
    /// Always code the sentinel after the payload
    Always,
    /// Never code it; padding may decode as extra symbols
    Never,
}

/// Configuration for compression and decompression
#[derive(Clone, Debug)]
pub struct CodecConfig {
    /// End-of-stream sentinel policy for encoding
    pub end_marker: EndMarker,
    /// Buffer size for I/O operations
    pub buffer_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { end_marker: EndMarker::Auto, buffer_size: 128 * 1024 }
    }
}

/// Statistics from an encode operation
#[derive(Clone, Debug, Default)]
pub struct EncodeStats {
    pub input_bytes: u64,
    /// Header plus payload
    pub output_bytes: u64,
    pub distinct_symbols: usize,
    pub max_code_length: u8,
    /// Coded bits before padding, sentinel included
    pub payload_bits: u64,
    /// Zero bits added to reach a byte boundary
    pub padding_bits: u8,
    pub end_marker_written: bool,
}

/// Statistics from a decode operation
#[derive(Clone, Debug, Default)]
pub struct DecodeStats {
    /// Header plus payload bytes up to the last decoded bit; data after
    /// the end-of-stream symbol is not counted
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub distinct_symbols: usize,
    pub max_code_length: u8,
    /// Bits of an unfinished descent when input ran out (padding)
    pub trailing_bits: usize,
    pub end_marker_seen: bool,
}

/// Compress `data` with the default configuration
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, &CodecConfig::default())
}

/// Compress `data` with an explicit configuration
pub fn compress_with(data: &[u8], config: &CodecConfig) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(HEADER_SIZE + data.len() / 2);
    Encoder::new(config.clone()).encode(data, &mut output)?;
    Ok(output)
}

/// Decompress a stream positioned at the code length header
pub fn decompress<R: Read>(input: R) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    Decoder::new(CodecConfig::default()).decode(input, &mut output)?;
    Ok(output)
}

/// Compress the file at `input` into a new file at `output`
///
/// The input is opened and read in full before the output is created, so a
/// missing or unreadable input leaves no output behind.
pub fn compress_file(input: &Path, output: &Path, config: &CodecConfig) -> Result<EncodeStats> {
    let mut data = Vec::new();
    File::open(input)?.read_to_end(&mut data)?;

    let encoder = Encoder::new(config.clone());
    let code = encoder.build_code(&data)?;

    let mut file = File::create(output)?;
    let stats = encoder.encode_with_code(&data, &code, &mut file)?;
    file.flush()?;
    Ok(stats)
}

/// Decompress the file at `input` into a new file at `output`
///
/// Decoding completes in memory first; the output file is only created
/// once the whole stream decoded successfully.
pub fn decompress_file(input: &Path, output: &Path, config: &CodecConfig) -> Result<DecodeStats> {
    let reader = BufReader::with_capacity(config.buffer_size, File::open(input)?);

    let mut decoded = Vec::new();
    let stats = Decoder::new(config.clone()).decode(reader, &mut decoded)?;

    let mut file = File::create(output)?;
    file.write_all(&decoded)?;
    file.flush()?;
    Ok(stats)
}
