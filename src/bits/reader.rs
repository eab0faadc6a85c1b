use crate::error::{Error, Result};
use std::io::Read;

/// Bit-level reader for the compressed payload
///
/// Bits are read MSB-first within each byte, matching [`BitWriter`].
/// A fresh chunk of input is only pulled once the buffer is empty, so
/// exhaustion is reported exactly when a bit is requested past the last
/// byte.
///
/// [`BitWriter`]: super::BitWriter
pub struct BitReader<R: Read> {
    reader: R,
    /// Buffer holding up to 64 bits; the next bit is bit `bits_available - 1`
    buffer: u64,
    /// Number of valid bits in buffer (0-64)
    bits_available: u8,
    /// Total bytes pulled from the inner reader
    bytes_read: u64,
    /// Set once the inner reader returned 0 bytes
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buffer: 0, bits_available: 0, bytes_read: 0, exhausted: false }
    }

    /// Refill the empty buffer with up to 8 bytes
    ///
    /// Returns `false` when the inner reader has nothing left.
    fn refill(&mut self) -> Result<bool> {
        debug_assert_eq!(self.bits_available, 0);

        if self.exhausted {
            return Ok(false);
        }

        let mut bulk_buf = [0u8; 8];
        loop {
            match self.reader.read(&mut bulk_buf) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(false);
                }
                Ok(n) => {
                    self.buffer = 0;
                    for &byte in &bulk_buf[..n] {
                        self.buffer = (self.buffer << 8) | byte as u64;
                    }
                    self.bits_available = (n * 8) as u8;
                    self.bytes_read += n as u64;
                    return Ok(true);
                }
                // Retry on interrupt
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    /// Read a single bit, or `None` once the input is exhausted
    #[inline]
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_available == 0 && !self.refill()? {
            return Ok(None);
        }
        self.bits_available -= 1;
        Ok(Some((self.buffer >> self.bits_available) & 1 != 0))
    }

    /// Read `n` bits (0-32) MSB-first
    ///
    /// Returns `None` if the input runs out before all `n` bits are read.
    pub fn read_bits(&mut self, n: u8) -> Result<Option<u32>> {
        debug_assert!(n <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..n {
            match self.read_bit()? {
                Some(bit) => value = (value << 1) | bit as u32,
                None => return Ok(None),
            }
        }
        Ok(Some(value))
    }

    /// Discard remaining bits in current byte, align to next byte boundary
    pub fn align_to_byte(&mut self) {
        self.bits_available -= self.bits_available % 8;
    }

    /// Read whole bytes into `buf` (aligns to byte boundary first)
    ///
    /// Returns the number of bytes filled, which is less than `buf.len()`
    /// only when the input is exhausted.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.align_to_byte();
        let mut filled = 0;
        while filled < buf.len() {
            if self.bits_available == 0 && !self.refill()? {
                break;
            }
            self.bits_available -= 8;
            buf[filled] = (self.buffer >> self.bits_available) as u8;
            filled += 1;
        }
        Ok(filled)
    }

    /// Total bytes pulled from the inner reader
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Bytes up to and including the one holding the last bit read
    ///
    /// Unlike [`bytes_read`](Self::bytes_read), whole bytes still sitting in
    /// the refill buffer are not counted.
    pub fn bytes_consumed(&self) -> u64 {
        self.bytes_read - (self.bits_available / 8) as u64
    }
}
