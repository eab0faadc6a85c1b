use crate::error::Result;
use std::io::Write;

/// Bit-level writer for the compressed payload
///
/// Writes bits MSB-first: the first bit written lands in bit 7 of the
/// first output byte. Every completed byte is forwarded to the inner
/// writer immediately.
pub struct BitWriter<W: Write> {
    writer: W,
    /// Current byte being built
    current_byte: u8,
    /// Bits written to current byte (0-7)
    bits_in_byte: u8,
    /// Total complete bytes handed to the inner writer
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, current_byte: 0, bits_in_byte: 0, bytes_written: 0 }
    }

    /// Write the low `n` bits (0-64) of `value`, most significant first
    pub fn write_bits(&mut self, value: u64, n: u8) -> Result<()> {
        debug_assert!(n <= 64);

        let mut remaining = n;
        while remaining > 0 {
            let space = 8 - self.bits_in_byte;
            let to_write = remaining.min(space);

            // Take the next `to_write` bits from the top of what is left
            let shift = remaining - to_write;
            let chunk = ((value >> shift) & ((1u64 << to_write) - 1)) as u8;
            self.current_byte |= chunk << (space - to_write);

            self.bits_in_byte += to_write;
            remaining -= to_write;

            if self.bits_in_byte == 8 {
                self.emit_byte()?;
            }
        }
        Ok(())
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u64, 1)
    }

    /// Pad to byte boundary with zero bits, returning how many were added
    pub fn align_to_byte(&mut self) -> Result<u8> {
        if self.bits_in_byte == 0 {
            return Ok(0);
        }
        let padding = 8 - self.bits_in_byte;
        self.emit_byte()?;
        Ok(padding)
    }

    /// Zero bits the next `align_to_byte` would add
    pub fn pending_padding(&self) -> u8 {
        if self.bits_in_byte == 0 {
            0
        } else {
            8 - self.bits_in_byte
        }
    }

    /// Total output length in bytes (including partial byte)
    pub fn len(&self) -> u64 {
        self.bytes_written + if self.bits_in_byte > 0 { 1 } else { 0 }
    }

    /// Check if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.bytes_written == 0 && self.bits_in_byte == 0
    }

    /// Pad, flush, and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.align_to_byte()?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn emit_byte(&mut self) -> Result<()> {
        self.writer.write_all(&[self.current_byte])?;
        self.bytes_written += 1;
        self.current_byte = 0;
        self.bits_in_byte = 0;
        Ok(())
    }
}
