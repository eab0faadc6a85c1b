use crate::bits::BitWriter;
use crate::error::{Error, Result};
use crate::huffman::{CanonicalCode, FrequencyTable, END_OF_STREAM};
use crate::{CodecConfig, EncodeStats, EndMarker, HEADER_SIZE};
use std::io::{BufWriter, Write};

/// Writes the code length header followed by the bit-packed payload
pub struct Encoder {
    config: CodecConfig,
}

impl Encoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Derive the canonical code for `data` under the end-marker policy
    pub fn build_code(&self, data: &[u8]) -> Result<CanonicalCode> {
        let mut freq = FrequencyTable::from_bytes(data);

        match self.config.end_marker {
            EndMarker::Never => CanonicalCode::from_frequencies(&freq),
            EndMarker::Always => {
                freq.count_end_of_stream();
                CanonicalCode::from_frequencies(&freq)
            }
            EndMarker::Auto => {
                let code = CanonicalCode::from_frequencies(&freq)?;
                if !padding_is_ambiguous(&code, &freq) {
                    return Ok(code);
                }
                freq.count_end_of_stream();
                CanonicalCode::from_frequencies(&freq)
            }
        }
    }

    /// Encode `data` with a freshly derived code
    pub fn encode<W: Write>(&self, data: &[u8], output: W) -> Result<EncodeStats> {
        let code = self.build_code(data)?;
        self.encode_with_code(data, &code, output)
    }

    /// Encode `data` with a caller-supplied code
    ///
    /// Every byte of `data` must have a code. The sentinel is written after
    /// the payload exactly when the table assigns it a length.
    pub fn encode_with_code<W: Write>(
        &self,
        data: &[u8],
        code: &CanonicalCode,
        output: W,
    ) -> Result<EncodeStats> {
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, output);

        // Phase 1: header, one length byte per symbol slot
        writer.write_all(code.lengths().as_bytes())?;

        // Phase 2: payload
        let mut bits = BitWriter::new(writer);
        let mut payload_bits = 0u64;
        for &byte in data {
            let c = code.code(byte as u16).ok_or(Error::MissingCode(byte as u16))?;
            bits.write_bits(c.value, c.length)?;
            payload_bits += c.length as u64;
        }

        let end_marker = code.code(END_OF_STREAM);
        if let Some(c) = end_marker {
            bits.write_bits(c.value, c.length)?;
            payload_bits += c.length as u64;
        }

        // Phase 3: zero padding to the byte boundary
        let padding_bits = bits.pending_padding();
        let payload_bytes = bits.len();
        bits.finish()?.flush()?;

        Ok(EncodeStats {
            input_bytes: data.len() as u64,
            output_bytes: HEADER_SIZE as u64 + payload_bytes,
            distinct_symbols: code.iter().filter(|&(sym, _)| sym != END_OF_STREAM).count(),
            max_code_length: code.lengths().max_length(),
            payload_bits,
            padding_bits,
            end_marker_written: end_marker.is_some(),
        })
    }
}

/// Whether zero padding after the payload would decode as extra symbols
///
/// The all-zero path from the root ends at the shortest code, so padding
/// is ambiguous once it is at least that long.
fn padding_is_ambiguous(code: &CanonicalCode, freq: &FrequencyTable) -> bool {
    let payload_bits: u64 = freq
        .iter()
        .map(|(sym, count)| count * code.code(sym).map_or(0, |c| c.length as u64))
        .sum();
    let padding = (8 - payload_bits % 8) % 8;

    match code.iter().find(|(_, c)| c.value == 0) {
        Some((_, zero)) => padding >= zero.length as u64,
        None => false,
    }
}
